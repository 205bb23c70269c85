use crate::error::ClassificationError;
use crate::types::activity::{ActivityTable, SportMessage};
use crate::types::sport::SportCategory;

/// Mean speed (device units, m/s) below which a distance-bearing recording
/// without power is taken to be a run. Heuristic, not a physical bound.
pub const RUNNING_SPEED_THRESHOLD: f64 = 5.0;

pub fn classify(
    sports: &[SportMessage],
    table: &ActivityTable,
) -> Result<SportCategory, ClassificationError> {
    let category = match primary_sport(sports, table)? {
        Some(sport) => from_sport_message(&sport, table)?,
        None => from_activity_type(table)?,
    };

    if category == SportCategory::Unidentified {
        return Ok(refine_unidentified(table));
    }
    Ok(category)
}

/// The first sport message, with the cycling sub-sport re-derived from
/// recorded speed when a file carries several sport messages.
fn primary_sport(
    sports: &[SportMessage],
    table: &ActivityTable,
) -> Result<Option<SportMessage>, ClassificationError> {
    let mut distinct: Vec<&SportMessage> = Vec::with_capacity(sports.len());
    for sport in sports {
        if !distinct.contains(&sport) {
            distinct.push(sport);
        }
    }

    let Some(first) = distinct.first() else {
        return Ok(None);
    };
    let mut primary = (*first).clone();

    if distinct.len() > 1 {
        if primary.sport.as_deref() != Some("cycling") {
            let listed = distinct
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ClassificationError::MultipleSports(listed));
        }
        let moving = table.column_max("speed").is_some_and(|v| v > 0.0);
        let sub_sport = if moving { "generic" } else { "indoor" };
        tracing::debug!("Several sport messages, cycling sub_sport re-derived as {}", sub_sport);
        primary.sub_sport = Some(sub_sport.to_string());
    }

    Ok(Some(primary))
}

fn from_sport_message(
    sport: &SportMessage,
    table: &ActivityTable,
) -> Result<SportCategory, ClassificationError> {
    let sub_sport = sport.sub_sport.as_deref().unwrap_or("");

    match sport.sport.as_deref() {
        Some("cycling") => {
            if sub_sport.contains("indoor") {
                Ok(SportCategory::CyclingIndoor)
            } else if sub_sport.contains("generic") {
                Ok(SportCategory::CyclingOutdoor)
            } else {
                Err(ClassificationError::UnknownCyclingSubSport(sport.to_string()))
            }
        }
        Some("running") => Ok(SportCategory::Running),
        Some("swimming") => {
            if table.column_max("total_cycles").is_some_and(|v| v > 0.0) {
                Ok(SportCategory::SwimmingPool)
            } else if sub_sport == "open_water" {
                Ok(SportCategory::SwimmingOpenWater)
            } else {
                Err(ClassificationError::AmbiguousSwim(sport.to_string()))
            }
        }
        _ => Err(ClassificationError::UnsupportedSport(sport.to_string())),
    }
}

fn from_activity_type(table: &ActivityTable) -> Result<SportCategory, ClassificationError> {
    if !table.has_column("activity_type") {
        tracing::warn!("Sport not identified");
        return Ok(SportCategory::Unidentified);
    }

    if table.text_values("activity_type").any(|v| v == "running") {
        Ok(SportCategory::Running)
    } else {
        tracing::warn!("Sport is not specified");
        Err(ClassificationError::SportNotSpecified)
    }
}

fn refine_unidentified(table: &ActivityTable) -> SportCategory {
    if !table.has_column("distance") {
        return SportCategory::Unidentified;
    }

    let max_distance = table.column_max("distance").unwrap_or(0.0);
    let max_elapsed = table.max_elapsed_time().unwrap_or(0.0);
    let avg_velocity = if max_elapsed > 0.0 {
        max_distance / max_elapsed
    } else {
        0.0
    };
    let avg_speed = if table.has_column("speed") {
        table.column_mean("speed")
    } else {
        Some(0.0)
    };
    tracing::debug!(
        "Unidentified: max distance {:.1}, average velocity {:.2}, mean speed {:?}",
        max_distance,
        avg_velocity,
        avg_speed
    );

    let refined = if max_distance > 0.0 && table.column_max("power").is_some_and(|p| p > 0.0) {
        SportCategory::CyclingOutdoor
    } else if max_distance > 0.0 && avg_speed.is_some_and(|v| v < RUNNING_SPEED_THRESHOLD) {
        SportCategory::Running
    } else {
        SportCategory::Unidentified
    };

    if refined != SportCategory::Unidentified {
        tracing::info!("Unidentified - identified: {}", refined);
    }
    refined
}
