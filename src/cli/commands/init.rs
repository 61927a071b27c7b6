use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the settings file (unless running in test mode)
///  - the JSON state store
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let config_path = cli.config_path();

    info("Initializing zup…");
    cfg.init_all(&config_path, cli.test)?;

    if !cli.test {
        println!("📄 Settings : {}", config_path.display());
    }
    println!("🗄️  Store    : {}", cfg.store_path().display());

    success("zup initialization completed!");
    Ok(())
}
