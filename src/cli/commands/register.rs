use crate::cli::commands::{api_client, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::PromptCycle;
use crate::errors::AppResult;
use crate::models::{Registration, WorkItem};
use crate::ui::messages::{success, warning};
use crate::utils::hours2readable;
use crate::utils::time::parse_hours;
use chrono::Local;

/// Handle the `register` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Register { item, hours, title } = cmd else {
        return Ok(());
    };

    let hours = parse_hours(hours)?;
    let mut cycle = PromptCycle::new(open_store(cfg)?, api_client(cfg));
    cycle.open_manually();

    let title = match title {
        Some(t) => t.clone(),
        None => {
            let (items, _) = cycle.candidates();
            items
                .into_iter()
                .find(|candidate| candidate.id == *item)
                .map(|candidate| candidate.title)
                .unwrap_or_default()
        }
    };

    let registration = Registration::new(WorkItem::new(*item, title), hours);
    let result = cycle.register(registration, &Local::now());

    // the process is about to exit, let the request finish either way
    if cycle.join_submissions() > 0 {
        warning("Submission worker stopped unexpectedly");
    }

    let resolution = result?;
    success(format!(
        "Registered {} on #{}. Next run: {}",
        hours2readable(hours),
        item,
        resolution.next_run()
    ));

    Ok(())
}
