use crate::types::activity::ZoneMessage;

/// Zone boundaries of one recording, `-`-joined in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zones {
    pub hr_zones: String,
    pub power_zones: String,
}

pub fn extract(hr_zones: &[ZoneMessage], power_zones: &[ZoneMessage]) -> Zones {
    Zones {
        hr_zones: join_bounds(hr_zones),
        power_zones: join_bounds(power_zones),
    }
}

fn join_bounds(zones: &[ZoneMessage]) -> String {
    zones
        .iter()
        .map(|zone| zone.high.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
