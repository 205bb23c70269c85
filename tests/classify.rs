mod common;

use common::*;
use fitstore_rs::error::ClassificationError;
use fitstore_rs::pipeline::{classify, timeseries};
use fitstore_rs::types::activity::{RawMessageSet, RecordMessage, SportMessage};
use fitstore_rs::types::sport::SportCategory;

fn run(records: Vec<RecordMessage>, sports: Vec<SportMessage>) -> Result<SportCategory, ClassificationError> {
    let messages = RawMessageSet {
        records,
        events: vec![timer_start(0)],
        sports,
        ..RawMessageSet::default()
    };
    let table = timeseries::build(&messages);
    classify::classify(&messages.sports, &table)
}

fn samples(fields: &[(&str, fitstore_rs::types::activity::FieldValue)]) -> Vec<RecordMessage> {
    (0..3).map(|i| record(i, fields)).collect()
}

#[test]
fn cycling_sub_sports_map_to_indoor_and_outdoor() {
    let indoor = run(samples(&[]), vec![SportMessage::new("cycling", "indoor_cycling")]);
    assert_eq!(indoor.unwrap(), SportCategory::CyclingIndoor);

    let outdoor = run(samples(&[]), vec![SportMessage::new("cycling", "generic")]);
    assert_eq!(outdoor.unwrap(), SportCategory::CyclingOutdoor);
}

#[test]
fn unknown_cycling_sub_sport_is_rejected() {
    let result = run(samples(&[]), vec![SportMessage::new("cycling", "mountain")]);
    assert!(matches!(
        result,
        Err(ClassificationError::UnknownCyclingSubSport(ref meta)) if meta.contains("mountain")
    ));
}

#[test]
fn running_sport_message_is_running() {
    let result = run(samples(&[]), vec![SportMessage::new("running", "trail")]);
    assert_eq!(result.unwrap(), SportCategory::Running);
}

#[test]
fn swimming_with_stroke_counts_is_pool() {
    let result = run(
        samples(&[("total_cycles", int(12))]),
        vec![SportMessage::new("swimming", "lap_swimming")],
    );
    assert_eq!(result.unwrap(), SportCategory::SwimmingPool);
}

#[test]
fn open_water_without_total_cycles() {
    let result = run(
        samples(&[("heart_rate", int(140))]),
        vec![SportMessage::new("swimming", "open_water")],
    );
    assert_eq!(result.unwrap(), SportCategory::SwimmingOpenWater);
}

#[test]
fn open_water_with_zero_total_cycles_is_still_open_water() {
    let result = run(
        samples(&[("total_cycles", int(0))]),
        vec![SportMessage::new("swimming", "open_water")],
    );
    assert_eq!(result.unwrap(), SportCategory::SwimmingOpenWater);
}

#[test]
fn ambiguous_swim_is_rejected() {
    let result = run(samples(&[]), vec![SportMessage::new("swimming", "generic")]);
    assert!(matches!(result, Err(ClassificationError::AmbiguousSwim(_))));
}

#[test]
fn other_sports_are_rejected() {
    let result = run(samples(&[]), vec![SportMessage::new("rowing", "generic")]);
    assert!(matches!(
        result,
        Err(ClassificationError::UnsupportedSport(ref meta)) if meta.contains("rowing")
    ));
}

#[test]
fn multiple_non_cycling_sports_are_rejected() {
    let result = run(
        samples(&[]),
        vec![
            SportMessage::new("running", "generic"),
            SportMessage::new("swimming", "open_water"),
        ],
    );
    assert!(matches!(result, Err(ClassificationError::MultipleSports(_))));
}

#[test]
fn repeated_identical_sport_message_counts_once() {
    let result = run(
        samples(&[]),
        vec![
            SportMessage::new("running", "generic"),
            SportMessage::new("running", "generic"),
        ],
    );
    assert_eq!(result.unwrap(), SportCategory::Running);
}

#[test]
fn multi_sport_cycling_rederives_sub_sport_from_speed() {
    let sports = vec![
        SportMessage::new("cycling", "road"),
        SportMessage::new("cycling", "indoor_cycling"),
    ];

    let moving = run(samples(&[("speed", float(7.2))]), sports.clone());
    assert_eq!(moving.unwrap(), SportCategory::CyclingOutdoor);

    let stationary = run(samples(&[("speed", float(0.0))]), sports.clone());
    assert_eq!(stationary.unwrap(), SportCategory::CyclingIndoor);

    let no_speed = run(samples(&[]), sports);
    assert_eq!(no_speed.unwrap(), SportCategory::CyclingIndoor);
}

#[test]
fn activity_type_running_without_sport_message() {
    let result = run(samples(&[("activity_type", text("running"))]), vec![]);
    assert_eq!(result.unwrap(), SportCategory::Running);
}

#[test]
fn activity_type_without_running_is_not_specified() {
    let result = run(samples(&[("activity_type", text("walking"))]), vec![]);
    assert!(matches!(result, Err(ClassificationError::SportNotSpecified)));
}

#[test]
fn no_metadata_and_no_distance_stays_unidentified() {
    let result = run(samples(&[("heart_rate", int(120))]), vec![]);
    assert_eq!(result.unwrap(), SportCategory::Unidentified);
}

#[test]
fn unidentified_with_distance_and_power_is_outdoor_cycling() {
    let records = vec![
        record(0, &[("distance", float(0.0)), ("power", int(180))]),
        record(600, &[("distance", float(2500.0)), ("power", int(250))]),
        record(1200, &[("distance", float(5000.0)), ("power", int(210))]),
    ];
    assert_eq!(run(records, vec![]).unwrap(), SportCategory::CyclingOutdoor);
}

#[test]
fn unidentified_slow_mover_is_running() {
    let records = vec![
        record(0, &[("distance", float(0.0)), ("speed", float(3.1))]),
        record(300, &[("distance", float(900.0)), ("speed", float(3.0))]),
        record(600, &[("distance", float(1800.0)), ("speed", float(2.9))]),
    ];
    assert_eq!(run(records, vec![]).unwrap(), SportCategory::Running);
}

#[test]
fn unidentified_fast_mover_without_power_stays_unidentified() {
    let records = vec![
        record(0, &[("distance", float(0.0)), ("speed", float(9.0))]),
        record(300, &[("distance", float(2700.0)), ("speed", float(9.0))]),
    ];
    assert_eq!(run(records, vec![]).unwrap(), SportCategory::Unidentified);
}

#[test]
fn unidentified_with_zero_distance_stays_unidentified() {
    let records = vec![
        record(0, &[("distance", float(0.0)), ("power", int(200))]),
        record(10, &[("distance", float(0.0)), ("power", int(210))]),
    ];
    assert_eq!(run(records, vec![]).unwrap(), SportCategory::Unidentified);
}

#[test]
fn classification_is_deterministic() {
    let sports = vec![SportMessage::new("cycling", "generic")];
    let first = run(samples(&[("speed", float(4.0))]), sports.clone()).unwrap();
    let second = run(samples(&[("speed", float(4.0))]), sports).unwrap();
    assert_eq!(first, second);
}
