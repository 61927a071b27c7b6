use crate::cli::commands::{api_client, open_store};
use crate::config::Config;
use crate::core::PromptCycle;
use crate::errors::AppResult;
use crate::ui::messages::info;
use chrono::Local;

/// Handle the `cancel` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut cycle = PromptCycle::new(open_store(cfg)?, api_client(cfg));
    cycle.open_manually();
    let resolution = cycle.cancel(&Local::now())?;

    info(format!("Nothing logged. Next run: {}", resolution.next_run()));
    Ok(())
}
