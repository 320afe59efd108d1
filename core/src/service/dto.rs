use serde::{Serialize, Deserialize};

use crate::model::date_range::DateRange;
use crate::model::summary::{HolidaySummary, HourlyUsage, MetricTotals};

/// Everything the presentation layer needs for one range selection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub range: Option<DateRange>,
    pub rows: usize,
    pub metrics: Option<MetricTotals>,
    pub hourly: Vec<HourlyUsage>,
    pub holiday: Vec<HolidaySummary>,
    // Schema-missing messages, one per failed stage
    pub notices: Vec<String>,
}

impl DashboardView {
    pub fn peak_hour(&self) -> Option<&HourlyUsage> {
        self.hourly.iter().max_by_key(|h| h.total)
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}
