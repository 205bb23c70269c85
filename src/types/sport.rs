use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnsupportedCategoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportCategory {
    CyclingIndoor,
    CyclingOutdoor,
    Running,
    SwimmingPool,
    SwimmingOpenWater,
    Unidentified,
}

impl SportCategory {
    pub const ALL: [SportCategory; 6] = [
        SportCategory::CyclingIndoor,
        SportCategory::CyclingOutdoor,
        SportCategory::Running,
        SportCategory::SwimmingPool,
        SportCategory::SwimmingOpenWater,
        SportCategory::Unidentified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SportCategory::CyclingIndoor => "cycling_indoor",
            SportCategory::CyclingOutdoor => "cycling_outdoor",
            SportCategory::Running => "running",
            SportCategory::SwimmingPool => "swimming_pool",
            SportCategory::SwimmingOpenWater => "swimming_open_water",
            SportCategory::Unidentified => "unidentified",
        }
    }
}

impl fmt::Display for SportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportCategory {
    type Err = UnsupportedCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SportCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnsupportedCategoryError(s.to_string()))
    }
}
