//! Per-category destination schemas.
//!
//! One registry entry per [`SportCategory`]: the ordered output columns, how
//! each column is filled, whether sparse rows are pruned, and the target
//! tables. Both normalisation and persistence read from here.

use crate::types::sport::SportCategory;

/// Rows of an outdoor ride with fewer recorded values than this are dropped.
pub const MIN_RECORDED_VALUES: usize = 5;

/// Fill value for a missing temperature reading.
pub const MISSING_TEMPERATURE: f64 = -273.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    WorkoutId,
    Date,
    Timestamp,
    ElapsedTime,
    /// Numeric sample column, coerced and filled with `default` when missing.
    Measure { default: f64 },
    HrZones,
    PowerZones,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn sql_type(&self) -> &'static str {
        match self.kind {
            ColumnKind::WorkoutId => "INTEGER NOT NULL",
            ColumnKind::Date => "TEXT",
            ColumnKind::Timestamp => "TEXT NOT NULL",
            ColumnKind::ElapsedTime | ColumnKind::Measure { .. } => "REAL",
            ColumnKind::HrZones | ColumnKind::PowerZones => "TEXT",
        }
    }
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

const fn measure(name: &'static str) -> ColumnSpec {
    col(name, ColumnKind::Measure { default: 0.0 })
}

const WORKOUT_ID: ColumnSpec = col("workout_id", ColumnKind::WorkoutId);
const DATE: ColumnSpec = col("date", ColumnKind::Date);
const TIMESTAMP: ColumnSpec = col("timestamp", ColumnKind::Timestamp);
const ELAPSED_TIME: ColumnSpec = col("elapsed_time", ColumnKind::ElapsedTime);
const HR_ZONES: ColumnSpec = col("hr_zones", ColumnKind::HrZones);
const POWER_ZONES: ColumnSpec = col("power_zones", ColumnKind::PowerZones);
const TEMPERATURE: ColumnSpec = col(
    "temperature",
    ColumnKind::Measure {
        default: MISSING_TEMPERATURE,
    },
);

#[derive(Debug)]
pub struct CategorySchema {
    pub category: SportCategory,
    pub table: &'static str,
    pub test_table: &'static str,
    pub prune_sparse: bool,
    pub columns: &'static [ColumnSpec],
}

impl CategorySchema {
    pub fn for_category(category: SportCategory) -> &'static CategorySchema {
        match category {
            SportCategory::CyclingOutdoor => &CYCLING_OUTDOOR,
            SportCategory::CyclingIndoor => &CYCLING_INDOOR,
            SportCategory::Running => &RUNNING,
            SportCategory::SwimmingPool => &SWIMMING_POOL,
            SportCategory::SwimmingOpenWater => &SWIMMING_OPEN_WATER,
            SportCategory::Unidentified => &UNIDENTIFIED,
        }
    }

    pub fn table_name(&self, use_test_tables: bool) -> &'static str {
        if use_test_tables {
            self.test_table
        } else {
            self.table
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    /// Measure columns in schema order.
    pub fn measures(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| matches!(c.kind, ColumnKind::Measure { .. }))
    }

    pub fn measure_index(&self, name: &str) -> Option<usize> {
        self.measures().position(|c| c.name == name)
    }
}

static CYCLING_OUTDOOR: CategorySchema = CategorySchema {
    category: SportCategory::CyclingOutdoor,
    table: "CYCLING_OUTDOOR",
    test_table: "CYCLING_OUTDOOR_TEST",
    prune_sparse: true,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("position_lat"),
        measure("position_long"),
        measure("gps_accuracy"),
        measure("enhanced_altitude"),
        measure("altitude"),
        measure("distance"),
        measure("heart_rate"),
        measure("cadence"),
        measure("enhanced_speed"),
        measure("speed"),
        measure("power"),
        measure("left_right_balance"),
        measure("grade"),
        TEMPERATURE,
        HR_ZONES,
        POWER_ZONES,
    ],
};

static CYCLING_INDOOR: CategorySchema = CategorySchema {
    category: SportCategory::CyclingIndoor,
    table: "CYCLING_INDOOR",
    test_table: "CYCLING_INDOOR_TEST",
    prune_sparse: false,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("heart_rate"),
        measure("cadence"),
        measure("power"),
        measure("left_right_balance"),
        TEMPERATURE,
        HR_ZONES,
        POWER_ZONES,
    ],
};

static RUNNING: CategorySchema = CategorySchema {
    category: SportCategory::Running,
    table: "RUNNING",
    test_table: "RUNNING_TEST",
    prune_sparse: false,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("position_lat"),
        measure("position_long"),
        measure("gps_accuracy"),
        measure("grade"),
        measure("vertical_speed"),
        measure("ascent"),
        measure("enhanced_altitude"),
        measure("altitude"),
        measure("distance"),
        measure("heart_rate"),
        measure("cadence"),
        measure("fractional_cadence"),
        measure("enhanced_speed"),
        measure("speed"),
        measure("vertical_oscillation"),
        measure("stance_time"),
        measure("stance_time_percent"),
        TEMPERATURE,
        HR_ZONES,
    ],
};

static SWIMMING_POOL: CategorySchema = CategorySchema {
    category: SportCategory::SwimmingPool,
    table: "SWIMMING_POOL",
    test_table: "SWIMMING_POOL_TEST",
    prune_sparse: false,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("distance"),
        measure("total_cycles"),
        measure("heart_rate"),
        measure("cadence"),
        measure("enhanced_speed"),
        measure("speed"),
        HR_ZONES,
    ],
};

static SWIMMING_OPEN_WATER: CategorySchema = CategorySchema {
    category: SportCategory::SwimmingOpenWater,
    table: "SWIMMING_OPEN_WATER",
    test_table: "SWIMMING_OPEN_WATER_TEST",
    prune_sparse: false,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("distance"),
        measure("position_lat"),
        measure("position_long"),
        measure("heart_rate"),
        measure("cadence"),
        measure("enhanced_speed"),
        measure("speed"),
        HR_ZONES,
    ],
};

static UNIDENTIFIED: CategorySchema = CategorySchema {
    category: SportCategory::Unidentified,
    table: "UNIDENTIFIED_SPORT",
    test_table: "UNIDENTIFIED_SPORT_TEST",
    prune_sparse: false,
    columns: &[
        WORKOUT_ID,
        DATE,
        TIMESTAMP,
        ELAPSED_TIME,
        measure("position_lat"),
        measure("position_long"),
        measure("gps_accuracy"),
        measure("enhanced_altitude"),
        measure("altitude"),
        measure("distance"),
        measure("heart_rate"),
        measure("cadence"),
        measure("enhanced_speed"),
        measure("speed"),
        measure("power"),
        measure("left_right_balance"),
        measure("grade"),
        TEMPERATURE,
        HR_ZONES,
        POWER_ZONES,
        measure("vertical_speed"),
        measure("ascent"),
        measure("fractional_cadence"),
        measure("vertical_oscillation"),
        measure("stance_time"),
        measure("stance_time_percent"),
        measure("total_cycles"),
    ],
};
