use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::history::load_history;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{format_timestamp, pad_right};
use crate::utils::hours2readable;
use ansi_term::Colour;

/// Handle the `history` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let history = load_history(&store)?;

    if history.is_empty() {
        info("No registrations yet.");
        return Ok(());
    }

    header("Recent registrations");

    for entry in &history {
        println!(
            "{} | {} | {} {}",
            format_timestamp(&entry.timestamp),
            Colour::Cyan.paint(pad_right(&hours2readable(entry.hours), 7)),
            Colour::Yellow.paint(format!("#{}", entry.item_id)),
            entry.item_title
        );
    }

    Ok(())
}
