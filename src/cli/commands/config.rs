use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    {
        let path = cli.config_path();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current settings ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&cfg.redacted())?);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if !path.exists() {
                cfg.save_to(&path)?;
            }
            edit(&path, editor.clone());
        }
    }

    Ok(())
}

fn edit(path: &Path, requested_editor: Option<String>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested_editor.unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            println!("✅ Settings edited successfully using '{}'", editor_to_use);
        }
        Ok(_) | Err(_) => {
            eprintln!(
                "⚠️  Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            );

            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => {
                    println!(
                        "✅ Settings edited successfully using fallback '{}'",
                        default_editor
                    );
                }
                Ok(_) | Err(_) => {
                    eprintln!(
                        "❌ Failed to edit settings using fallback '{}'",
                        default_editor
                    );
                }
            }
        }
    }
}
