use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::due::{is_due, read_next_run};
use crate::core::history::last_registration;
use crate::errors::AppResult;
use crate::models::ScheduleConfig;
use crate::ui::messages::{header, warning};
use crate::utils::formatting::{format_timestamp, pad_right};
use crate::utils::hours2readable;
use ansi_term::Colour;
use chrono::Local;

/// Handle the `status` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let now = Local::now();

    header("zup status");

    let next_run = read_next_run(&store);
    let due = if is_due(&next_run, &now) {
        Colour::Red.bold().paint("due now")
    } else {
        Colour::Green.paint("not due")
    };
    println!("{} {} ({})", pad_right("Next run:", 12), next_run, due);

    match ScheduleConfig::from_store(&store) {
        Ok(schedule) => println!("{} {}", pad_right("Schedule:", 12), schedule),
        Err(e) => warning(format!("Schedule is invalid: {e}")),
    }

    match last_registration(&store)? {
        Some(last) => {
            let when = last
                .timestamp
                .map(|t| format_timestamp(&t))
                .unwrap_or_else(|| "--".to_string());
            println!(
                "{} {}: #{}: {}",
                pad_right("Last entry:", 12),
                when,
                last.item_id,
                hours2readable(last.hours)
            );
        }
        None => println!("{} --", pad_right("Last entry:", 12)),
    }

    Ok(())
}
