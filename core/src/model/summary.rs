use serde::{Deserialize, Serialize};

pub const REGULAR_DAY_LABEL: &str = "Regular Day";
pub const HOLIDAY_LABEL: &str = "Holiday";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HourlyUsage {
    pub hour: u32,
    pub total: u64,
    pub casual: u64,
    pub registered: u64,
}

impl HourlyUsage {
    /// Axis label, e.g. `07:00`.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HolidaySummary {
    pub flag: i64,
    pub label: String,
    pub total: u64,
    pub mean: f64,
}

/// Human-readable name for a raw holiday flag. Unknown flags pass through as-is.
pub fn holiday_label(flag: i64) -> String {
    match flag {
        0 => REGULAR_DAY_LABEL.to_string(),
        1 => HOLIDAY_LABEL.to_string(),
        other => other.to_string(),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricTotals {
    pub casual: u64,
    pub registered: u64,
}
