use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::model::date_range::DateRange;
use crate::model::summary::{holiday_label, HolidaySummary, HourlyUsage, MetricTotals};
use crate::model::usage::{Field, UsageTable};

pub const DATE_FILTER_STAGE: &str = "date filter";
pub const HOURLY_STAGE: &str = "hourly usage";
pub const HOLIDAY_STAGE: &str = "holiday summary";

const HOURLY_COLUMNS: [Field; 4] = [Field::Hour, Field::Total, Field::Casual, Field::Registered];
const HOLIDAY_COLUMNS: [Field; 2] = [Field::Holiday, Field::Total];

pub(crate) fn require(table: &UsageTable, stage: &'static str, required: &[Field]) -> Result<(), SchemaError> {
    let columns = table.missing(required);
    if columns.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Missing { stage, columns })
    }
}

/// Rows whose date falls inside `range`, in their original order.
pub fn filter_by_date(table: &UsageTable, range: DateRange) -> Result<UsageTable, SchemaError> {
    require(table, DATE_FILTER_STAGE, &[Field::Date])?;

    let records = table
        .records()
        .iter()
        .filter(|r| r.date.is_some_and(|d| range.contains(d)))
        .cloned()
        .collect();
    Ok(table.derive(records))
}

/// Sums of the three usage counts per hour of day, ascending by hour.
pub fn usage_by_hour(table: &UsageTable) -> Result<Vec<HourlyUsage>, SchemaError> {
    require(table, HOURLY_STAGE, &HOURLY_COLUMNS)?;

    let mut by_hour: BTreeMap<u32, HourlyUsage> = BTreeMap::new();
    for record in table.records() {
        let (Some(hour), Some(total), Some(casual), Some(registered)) =
            (record.hour, record.total, record.casual, record.registered)
        else {
            continue;
        };

        let entry = by_hour.entry(hour).or_insert(HourlyUsage {
            hour,
            total: 0,
            casual: 0,
            registered: 0,
        });
        entry.total += total;
        entry.casual += casual;
        entry.registered += registered;
    }

    Ok(by_hour.into_values().collect())
}

/// Sum and mean of total usage per holiday flag, ascending by raw flag, then labelled.
pub fn holiday_summary(table: &UsageTable) -> Result<Vec<HolidaySummary>, SchemaError> {
    require(table, HOLIDAY_STAGE, &HOLIDAY_COLUMNS)?;

    // flag -> (sum, count)
    let mut by_flag: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
    for record in table.records() {
        let (Some(flag), Some(total)) = (record.holiday, record.total) else {
            continue;
        };
        let entry = by_flag.entry(flag).or_default();
        entry.0 += total;
        entry.1 += 1;
    }

    Ok(by_flag
        .into_iter()
        .map(|(flag, (total, count))| HolidaySummary {
            flag,
            label: holiday_label(flag),
            total,
            mean: total as f64 / count as f64,
        })
        .collect())
}

/// Casual and registered totals. `None` when either column is absent or there are no
/// rows; this stage never reports a schema problem.
pub fn metric_totals(table: &UsageTable) -> Option<MetricTotals> {
    if table.is_empty() || !table.has(Field::Casual) || !table.has(Field::Registered) {
        return None;
    }

    let totals = table.records().iter().fold(MetricTotals::default(), |acc, r| MetricTotals {
        casual: acc.casual + r.casual.unwrap_or(0),
        registered: acc.registered + r.registered.unwrap_or(0),
    });
    Some(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::usage::UsageRecord;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hourly_record(hour: u32, total: u64, casual: u64, registered: u64) -> UsageRecord {
        UsageRecord {
            hour: Some(hour),
            total: Some(total),
            casual: Some(casual),
            registered: Some(registered),
            ..Default::default()
        }
    }

    fn holiday_record(flag: i64, total: u64) -> UsageRecord {
        UsageRecord { holiday: Some(flag), total: Some(total), ..Default::default() }
    }

    fn dated_table() -> UsageTable {
        let records = (1..=9)
            .map(|day| {
                let d = NaiveDate::from_ymd_opt(2011, 1, day).unwrap();
                UsageRecord::new(d, day % 3, 0, day as u64 * 10, day as u64, day as u64 * 9)
            })
            .collect();
        UsageTable::with_all_fields(records).unwrap()
    }

    #[test]
    fn test_usage_by_hour_sums_and_orders() {
        let table = UsageTable::new(
            HOURLY_COLUMNS.to_vec(),
            vec![
                hourly_record(6, 4, 1, 3),
                hourly_record(5, 10, 3, 7),
                hourly_record(5, 20, 5, 15),
            ],
        )
        .unwrap();

        let rows = usage_by_hour(&table).unwrap();
        assert_eq!(
            rows,
            vec![
                HourlyUsage { hour: 5, total: 30, casual: 8, registered: 22 },
                HourlyUsage { hour: 6, total: 4, casual: 1, registered: 3 },
            ]
        );
    }

    #[test]
    fn test_usage_by_hour_omits_absent_hours() {
        let table = UsageTable::new(
            HOURLY_COLUMNS.to_vec(),
            vec![hourly_record(0, 1, 0, 1), hourly_record(23, 2, 1, 1)],
        )
        .unwrap();

        let hours: Vec<u32> = usage_by_hour(&table).unwrap().iter().map(|r| r.hour).collect();
        assert_eq!(hours, vec![0, 23]);
    }

    #[test]
    fn test_usage_by_hour_requires_each_column() {
        for dropped in HOURLY_COLUMNS {
            let schema: Vec<Field> = HOURLY_COLUMNS.into_iter().filter(|f| *f != dropped).collect();
            let table = UsageTable::new(schema, vec![]).unwrap();

            let err = usage_by_hour(&table).unwrap_err();
            assert_eq!(
                err,
                SchemaError::Missing { stage: HOURLY_STAGE, columns: vec![dropped] }
            );
        }
    }

    #[test]
    fn test_holiday_summary_labels_and_means() {
        let table = UsageTable::new(
            HOLIDAY_COLUMNS.to_vec(),
            vec![holiday_record(0, 100), holiday_record(1, 30), holiday_record(0, 50)],
        )
        .unwrap();

        let rows = holiday_summary(&table).unwrap();
        assert_eq!(
            rows,
            vec![
                HolidaySummary { flag: 0, label: "Regular Day".to_string(), total: 150, mean: 75.0 },
                HolidaySummary { flag: 1, label: "Holiday".to_string(), total: 30, mean: 30.0 },
            ]
        );
    }

    #[test]
    fn test_holiday_summary_passes_unknown_flags_through() {
        let table = UsageTable::new(
            HOLIDAY_COLUMNS.to_vec(),
            vec![holiday_record(2, 9), holiday_record(1, 3)],
        )
        .unwrap();

        let labels: Vec<String> = holiday_summary(&table).unwrap().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Holiday".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_holiday_summary_requires_columns() {
        let table = UsageTable::new(vec![Field::Total], vec![]).unwrap();
        assert_eq!(
            holiday_summary(&table).unwrap_err().columns(),
            &[Field::Holiday]
        );

        let table = UsageTable::new(vec![Field::Holiday], vec![]).unwrap();
        assert_eq!(
            holiday_summary(&table).unwrap_err(),
            SchemaError::Missing { stage: HOLIDAY_STAGE, columns: vec![Field::Total] }
        );

        let err = holiday_summary(&UsageTable::empty()).unwrap_err();
        assert_eq!(err.columns(), &[Field::Holiday, Field::Total]);
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let table = dated_table();
        let filtered = filter_by_date(&table, DateRange::new(date("2011-01-03"), date("2011-01-05"))).unwrap();

        let days: Vec<NaiveDate> = filtered.records().iter().filter_map(|r| r.date).collect();
        assert_eq!(days, vec![date("2011-01-03"), date("2011-01-04"), date("2011-01-05")]);
        assert_eq!(filtered.schema(), table.schema());
    }

    #[test]
    fn test_filter_inverted_range_is_empty() {
        let table = dated_table();
        let filtered = filter_by_date(&table, DateRange::new(date("2011-01-05"), date("2011-01-03"))).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_disjoint_range_is_empty() {
        let table = dated_table();
        let filtered = filter_by_date(&table, DateRange::new(date("2012-01-01"), date("2012-12-31"))).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_full_span_is_identity() {
        let table = dated_table();
        let span = DateRange::observed(&table).unwrap();
        assert_eq!(filter_by_date(&table, span).unwrap(), table);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = dated_table();
        let range = DateRange::new(date("2011-01-02"), date("2011-01-06"));

        let once = filter_by_date(&table, range).unwrap();
        let twice = filter_by_date(&once, range).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_requires_date_column() {
        let table = UsageTable::new(HOURLY_COLUMNS.to_vec(), vec![hourly_record(1, 1, 0, 1)]).unwrap();
        let err = filter_by_date(&table, DateRange::new(date("2011-01-01"), date("2011-01-02"))).unwrap_err();
        assert_eq!(err, SchemaError::Missing { stage: DATE_FILTER_STAGE, columns: vec![Field::Date] });
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let table = dated_table();
        let before = table.clone();
        let _ = filter_by_date(&table, DateRange::new(date("2011-01-02"), date("2011-01-02"))).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_metric_totals() {
        let totals = metric_totals(&dated_table()).unwrap();
        assert_eq!(totals, MetricTotals { casual: 45, registered: 405 });
    }

    #[test]
    fn test_metric_totals_skips_silently() {
        let table = UsageTable::new(vec![Field::Casual], vec![]).unwrap();
        assert_eq!(metric_totals(&table), None);

        let empty_rows = UsageTable::with_all_fields(vec![]).unwrap();
        assert_eq!(metric_totals(&empty_rows), None);
    }
}
