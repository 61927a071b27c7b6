use crate::cli::commands::{api_client, open_store};
use crate::config::Config;
use crate::core::PromptCycle;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use ansi_term::Colour;

/// Handle the `items` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let cycle = PromptCycle::new(open_store(cfg)?, api_client(cfg));
    let (items, selected) = cycle.candidates();

    if items.is_empty() {
        warning("No work items found (check tp_url, tp_team_name and tp_access_token)");
        return Ok(());
    }

    for (i, item) in items.iter().enumerate() {
        if Some(i) == selected {
            println!("{} {}", Colour::Green.bold().paint("*"), item);
        } else {
            println!("  {}", item);
        }
    }

    Ok(())
}
