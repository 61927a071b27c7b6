use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{ScheduleConfig, TimeOfDay};
use crate::ui::messages::{info, success};

/// Handle the `schedule` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule {
        times,
        add,
        remove,
        interval,
    } = cmd
    else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;

    let updated = if let Some(list) = times {
        Some(ScheduleConfig::parse_fixed_times(list.as_slice())?)
    } else if let Some(time) = add {
        let mut set = ScheduleConfig::stored_times(&store)?;
        set.insert(time.parse::<TimeOfDay>()?);
        Some(ScheduleConfig::fixed_times(set)?)
    } else if let Some(time) = remove {
        let target = time.parse::<TimeOfDay>()?;
        let mut set = ScheduleConfig::stored_times(&store)?;
        if !set.remove(&target) {
            return Err(AppError::InvalidArgument(format!(
                "{target} is not in the schedule"
            )));
        }
        Some(ScheduleConfig::fixed_times(set)?)
    } else if let Some(value) = interval {
        Some(ScheduleConfig::parse_interval(value)?)
    } else {
        None
    };

    match updated {
        Some(schedule) => {
            schedule.to_store(&mut store)?;
            success(format!("Schedule saved: {schedule}"));
        }
        None => {
            let schedule = ScheduleConfig::from_store(&store)?;
            info(format!("Schedule: {schedule}"));
        }
    }

    Ok(())
}
