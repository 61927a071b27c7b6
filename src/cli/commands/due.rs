use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::due_now;
use crate::errors::AppResult;
use chrono::Local;

/// Handle the `due` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    // an unreadable store is simply "due"
    let due = match open_store(cfg) {
        Ok(store) => due_now(&store, &Local::now()),
        Err(e) => {
            tracing::warn!(error = %e, "cannot open store, assuming a prompt is due");
            true
        }
    };

    println!("{}", if due { "due" } else { "not due" });
    Ok(())
}
