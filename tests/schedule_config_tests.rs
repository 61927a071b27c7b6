use serde_json::json;
use zup::errors::AppError;
use zup::models::{ScheduleConfig, TimeOfDay};
use zup::store::{KeyValueStore, MemoryStore, keys};

#[test]
fn test_defaults_when_store_is_empty() {
    let store = MemoryStore::new();
    let config = ScheduleConfig::from_store(&store).unwrap();

    assert_eq!(config, ScheduleConfig::default());
    assert_eq!(config.to_string(), "daily at 06:00, 11:00, 14:00");
}

#[test]
fn test_interval_defaults() {
    let mut store = MemoryStore::new();
    store.set(keys::SCHEDULE_TYPE, json!("interval")).unwrap();

    let config = ScheduleConfig::from_store(&store).unwrap();
    assert_eq!(config, ScheduleConfig::interval(0, 15));
}

#[test]
fn test_round_trip_through_store() {
    let mut store = MemoryStore::new();

    let fixed = ScheduleConfig::parse_fixed_times(&["14:30", "08:15"]).unwrap();
    fixed.to_store(&mut store).unwrap();
    assert_eq!(store.get(keys::SCHEDULE_LIST).unwrap(), Some(json!(["08:15", "14:30"])));
    assert_eq!(ScheduleConfig::from_store(&store).unwrap(), fixed);

    let interval = ScheduleConfig::interval(1, 45);
    interval.to_store(&mut store).unwrap();
    assert_eq!(store.get(keys::SCHEDULE_TYPE).unwrap(), Some(json!("interval")));
    assert_eq!(ScheduleConfig::from_store(&store).unwrap(), interval);

    // the daily list survives a switch to interval mode
    assert_eq!(ScheduleConfig::stored_times(&store).unwrap().len(), 2);
}

#[test]
fn test_malformed_values_are_rejected() {
    let cases = [
        (keys::SCHEDULE_TYPE, json!("weekly")),
        (keys::SCHEDULE_TYPE, json!(3)),
        (keys::SCHEDULE_LIST, json!([])),
        (keys::SCHEDULE_LIST, json!("06:00")),
        (keys::SCHEDULE_LIST, json!([600])),
    ];

    for (key, value) in cases {
        let mut store = MemoryStore::new();
        store.set(key, value.clone()).unwrap();
        let result = ScheduleConfig::from_store(&store);
        assert!(
            matches!(result, Err(AppError::InvalidArgument(_))),
            "{key} = {value} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_bad_times_and_intervals() {
    assert!(matches!(
        ScheduleConfig::parse_fixed_times(&["25:00"]),
        Err(AppError::InvalidTime(_))
    ));
    assert!(matches!(
        ScheduleConfig::parse_fixed_times(&["noon"]),
        Err(AppError::InvalidTime(_))
    ));
    assert!(matches!(
        ScheduleConfig::parse_fixed_times::<&str>(&[]),
        Err(AppError::InvalidArgument(_))
    ));

    let mut store = MemoryStore::new();
    store.set(keys::SCHEDULE_TYPE, json!("interval")).unwrap();
    store.set(keys::INTERVAL_MINUTES, json!(-5)).unwrap();
    assert!(matches!(
        ScheduleConfig::from_store(&store),
        Err(AppError::InvalidArgument(_))
    ));

    assert_eq!(
        ScheduleConfig::parse_interval("1:30").unwrap(),
        ScheduleConfig::interval(1, 30)
    );
    assert_eq!(
        ScheduleConfig::parse_interval("45").unwrap(),
        ScheduleConfig::interval(0, 45)
    );
    assert!(ScheduleConfig::parse_interval("soon").is_err());
}

#[test]
fn test_time_of_day() {
    let t: TimeOfDay = "09:05".parse().unwrap();
    assert_eq!((t.hour(), t.minute()), (9, 5));
    assert_eq!(t.to_string(), "09:05");
    assert!(TimeOfDay::new(24, 0).is_err());
    assert!(TimeOfDay::new(23, 60).is_err());
}
