use crate::cli::commands::{api_client, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{PromptCycle, Resolution, TickOutcome};
use crate::errors::{AppError, AppResult};
use crate::models::{Registration, WorkItem};
use crate::store::KeyValueStore;
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::time::parse_hours;
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Snooze choices offered in the prompt, as (label, minutes).
const SNOOZE_CHOICES: [(&str, i64); 6] = [
    ("15m", 15),
    ("30m", 30),
    ("1h", 60),
    ("4h", 4 * 60),
    ("next-day", -1),
    ("next-monday", -2),
];

/// One line typed at the prompt.
enum Answer {
    Register { index: usize, hours: f64 },
    Snooze(i64),
    Cancel,
    Dismiss,
}

fn parse_answer(line: &str, count: usize, selected: Option<usize>) -> AppResult<Answer> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return match selected {
            Some(index) => Ok(Answer::Register { index, hours: 1.0 }),
            None => Err(AppError::InvalidArgument("pick an item number".into())),
        };
    };

    match first {
        "c" | "cancel" => Ok(Answer::Cancel),
        "q" | "quit" => Ok(Answer::Dismiss),
        "s" | "snooze" => {
            let choice = words.next().unwrap_or("15m");
            SNOOZE_CHOICES
                .iter()
                .find(|(label, _)| *label == choice)
                .map(|(_, minutes)| Answer::Snooze(*minutes))
                .or_else(|| choice.parse::<i64>().ok().map(Answer::Snooze))
                .ok_or_else(|| AppError::InvalidArgument(format!("unknown snooze '{choice}'")))
        }
        number => {
            let index = number
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=count).contains(n))
                .map(|n| n - 1)
                .ok_or_else(|| AppError::InvalidArgument(format!("no item '{number}'")))?;
            let hours = match words.next() {
                Some(h) => parse_hours(h)?,
                None => 1.0,
            };
            Ok(Answer::Register { index, hours })
        }
    }
}

fn show_prompt(items: &[WorkItem], selected: Option<usize>) {
    header("Log work");
    for (i, item) in items.iter().enumerate() {
        let marker = if Some(i) == selected { '*' } else { ' ' };
        println!("{marker} {:>2}) {item}", i + 1);
    }
    let snoozes: Vec<&str> = SNOOZE_CHOICES.iter().map(|(label, _)| *label).collect();
    println!();
    println!("  <n> [hours]  register on item n (default 1h, Enter = starred item)");
    println!("  s [{}]", snoozes.join("|"));
    println!("  c            cancel, wait for the next scheduled run");
    println!("  q            close without answering");
    print!("> ");
    io::stdout().flush().ok();
}

/// Ask until the answer resolves the prompt. End of input closes it.
fn run_prompt<S: KeyValueStore>(
    cycle: &mut PromptCycle<S>,
    input: &mut impl BufRead,
) -> AppResult<Resolution> {
    let (items, selected) = cycle.candidates();

    loop {
        show_prompt(&items, selected);

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return cycle.dismiss(&Local::now());
        }

        let answer = match parse_answer(line.trim(), items.len(), selected) {
            Ok(answer) => answer,
            Err(e) => {
                error(e);
                continue;
            }
        };

        let now = Local::now();
        let result = match answer {
            Answer::Register { index, hours } => {
                let registration = Registration::new(items[index].clone(), hours);
                cycle.register(registration, &now)
            }
            Answer::Snooze(minutes) => cycle.snooze(minutes, &now),
            Answer::Cancel => cycle.cancel(&now),
            Answer::Dismiss => cycle.dismiss(&now),
        };

        match result {
            Err(AppError::InvalidArgument(msg)) => error(msg),
            other => return other,
        }
    }
}

/// Handle the `watch` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let once = matches!(cmd, Commands::Watch { once: true });
    let mut cycle = PromptCycle::new(open_store(cfg)?, api_client(cfg));
    let stdin = io::stdin();

    if !once {
        info(format!(
            "Watching, checking every {}s. Ctrl+C to stop.",
            cfg.tick_seconds
        ));
    }

    let outcome = loop {
        if cycle.tick(&Local::now()) == TickOutcome::Due {
            match run_prompt(&mut cycle, &mut stdin.lock()) {
                Ok(Resolution::Registered { next_run }) => {
                    success(format!("Registered. Next run: {next_run}"))
                }
                Ok(Resolution::Snoozed { next_run }) => {
                    success(format!("Snoozed until {next_run}"))
                }
                Ok(Resolution::Cancelled { next_run } | Resolution::Dismissed { next_run }) => {
                    info(format!("Next run: {next_run}"))
                }
                Err(e) => break Err(e),
            }
        } else if once {
            info("Nothing due.");
        }

        if once {
            break Ok(());
        }

        let running = cycle.pending_submissions();
        if running > 0 {
            debug!(running, "submissions still in flight");
        }
        thread::sleep(Duration::from_secs(cfg.tick_seconds.max(1)));
    };

    // never leave a submission behind, even when bailing out
    if cycle.join_submissions() > 0 {
        warning("Submission worker stopped unexpectedly");
    }

    outcome
}
