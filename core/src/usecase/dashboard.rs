use crate::error::SchemaError;
use crate::model::date_range::DateRange;
use crate::model::usage::{Field, UsageTable};
use crate::service::aggregate::{
    filter_by_date, holiday_summary, metric_totals, require, usage_by_hour, DATE_FILTER_STAGE,
};
use crate::service::dto::DashboardView;

/// Recomputes the dashboard for a date range over a loaded table.
///
/// Every stage runs on its own. A stage that finds its columns missing contributes a
/// notice and an empty result; the remaining stages still run.
pub struct DashboardUseCase<'a> {
    table: &'a UsageTable,
    bounds: Option<DateRange>,
}

impl<'a> DashboardUseCase<'a> {
    pub fn new(table: &'a UsageTable) -> Self {
        Self {
            table,
            bounds: DateRange::observed(table),
        }
    }

    /// Observed min/max dates; the picker is limited to this span.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    pub fn default_range(&self) -> Option<DateRange> {
        self.bounds
    }

    /// `None` selects the full observed span.
    pub fn compute(&self, range: Option<DateRange>) -> DashboardView {
        let range = range.or(self.bounds);
        let mut notices = Vec::new();

        let filtered = match range {
            Some(r) => filter_by_date(self.table, r),
            // No dates to pick from. A missing date column is still reported.
            None => require(self.table, DATE_FILTER_STAGE, &[Field::Date]).map(|()| self.table.clone()),
        };
        let filtered = recover(filtered, &mut notices, UsageTable::empty);

        log::debug!("Range {:?} selects {} of {} rows", range, filtered.len(), self.table.len());

        let metrics = metric_totals(&filtered);
        let hourly = recover(usage_by_hour(&filtered), &mut notices, Vec::new);
        let holiday = recover(holiday_summary(&filtered), &mut notices, Vec::new);

        DashboardView {
            range,
            rows: filtered.len(),
            metrics,
            hourly,
            holiday,
            notices,
        }
    }
}

fn recover<T>(result: Result<T, SchemaError>, notices: &mut Vec<String>, empty: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{}", err);
            notices.push(err.to_string());
            empty()
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
