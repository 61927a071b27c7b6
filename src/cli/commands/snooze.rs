use crate::cli::commands::{api_client, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::PromptCycle;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;

/// Handle the `snooze` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Snooze {
        minutes,
        next_day,
        next_monday,
    } = cmd
    else {
        return Ok(());
    };

    let duration = match (minutes, next_day, next_monday) {
        (Some(m), _, _) => *m,
        (None, true, _) => -1,
        (None, _, true) => -2,
        _ => {
            return Err(AppError::InvalidArgument(
                "give a number of minutes, --next-day or --next-monday".into(),
            ));
        }
    };

    let mut cycle = PromptCycle::new(open_store(cfg)?, api_client(cfg));
    cycle.open_manually();
    let resolution = cycle.snooze(duration, &Local::now())?;

    success(format!("Snoozed until {}", resolution.next_run()));
    Ok(())
}
