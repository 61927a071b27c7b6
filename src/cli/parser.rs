use crate::config::Config;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for zup
/// Reminder that nags you to log time on TargetProcess work items
#[derive(Parser)]
#[command(
    name = "zup",
    version = env!("CARGO_PKG_VERSION"),
    about = "A reminder that periodically asks you to log time on your TargetProcess work items",
    long_about = None
)]
pub struct Cli {
    /// Override settings file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override state store path (useful for tests or multiple profiles)
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Run in test mode (no settings file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(crate::utils::path::expand_tilde)
            .unwrap_or_else(Config::config_file)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the settings file and the state store
    Init,

    /// Manage the settings file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current settings")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the settings file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show the next run, the schedule and the last registration
    Status,

    /// Tell whether a prompt is due right now
    Due,

    /// Show or change when prompts fire
    #[command(group(
        ArgGroup::new("mode")
            .args(["times", "add", "remove", "interval"])
            .multiple(false)
    ))]
    Schedule {
        #[arg(
            long = "times",
            value_delimiter = ',',
            help = "Prompt daily at these times (HH:MM,HH:MM,...)"
        )]
        times: Option<Vec<String>>,

        #[arg(long = "add", help = "Add a time (HH:MM) to the daily schedule")]
        add: Option<String>,

        #[arg(long = "remove", help = "Remove a time (HH:MM) from the daily schedule")]
        remove: Option<String>,

        #[arg(long = "interval", help = "Prompt every H:MM instead of at fixed times")]
        interval: Option<String>,
    },

    /// Postpone the next prompt
    #[command(group(
        ArgGroup::new("duration")
            .args(["minutes", "next_day", "next_monday"])
            .required(true)
            .multiple(false)
    ))]
    Snooze {
        /// Minutes to wait (-1 = next day, -2 = next Monday)
        #[arg(allow_negative_numbers = true)]
        minutes: Option<i64>,

        #[arg(long = "next-day", help = "Snooze until tomorrow at 06:00")]
        next_day: bool,

        #[arg(long = "next-monday", help = "Snooze until next Monday at 06:00")]
        next_monday: bool,
    },

    /// Skip this prompt and move on to the next scheduled one
    Cancel,

    /// Log time on a work item now
    Register {
        #[arg(long = "item", help = "Work item id")]
        item: u64,

        #[arg(
            long = "hours",
            default_value = "1h",
            help = "Time spent: hours (1.5) or with a unit (4h, 30m, 1d)"
        )]
        hours: String,

        #[arg(long = "title", help = "Work item title (looked up when omitted)")]
        title: Option<String>,
    },

    /// Print the most recent registrations
    History,

    /// List the work items you can log time on
    Items,

    /// Keep running and prompt whenever a registration is due
    Watch {
        #[arg(long = "once", help = "Check a single time and exit")]
        once: bool,
    },
}
