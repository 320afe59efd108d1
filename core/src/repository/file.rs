use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::model::usage::{Field, UsageRecord, UsageTable};
use crate::repository::traits::UsageRepository;
use crate::time::parse_date;

/// Reads the usage dataset from a CSV file with a header row.
///
/// Known columns are picked out by name; any other column is ignored. Which of the
/// known columns are present becomes the table's schema.
#[derive(Clone)]
pub struct CsvUsageRepository {
    file_path: PathBuf,
}

impl CsvUsageRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl UsageRepository for CsvUsageRepository {
    fn load(&self) -> Result<UsageTable> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open dataset {}", self.file_path.display()))?;
        let table = read_usage_csv(BufReader::new(file))
            .with_context(|| format!("Failed to read dataset {}", self.file_path.display()))?;

        log::info!(
            "Loaded {} rows from {} (columns: {})",
            table.len(),
            self.file_path.display(),
            table.schema().iter().map(|f| f.column_name()).collect::<Vec<_>>().join(", "),
        );
        Ok(table)
    }
}

/// Parses CSV text into a table. Exposed for callers that already hold the bytes.
pub fn read_usage_csv<R: Read>(reader: R) -> Result<UsageTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    // Column index for every known field the header mentions. First occurrence wins.
    let mut positions: Vec<(Field, usize)> = Vec::new();
    for (i, header) in reader.headers()?.iter().enumerate() {
        if let Some(field) = Field::from_column_name(header.trim()) {
            if !positions.iter().any(|(f, _)| *f == field) {
                positions.push((field, i));
            }
        }
    }
    log::debug!("CSV header maps known columns {:?}", positions);

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        let mut record = UsageRecord::default();

        for (field, i) in &positions {
            let value = raw.get(*i).unwrap_or("").trim();
            set_field(&mut record, *field, value).with_context(|| {
                format!("row {}: invalid value '{}' in column '{}'", row + 1, value, field)
            })?;
        }
        records.push(record);
    }

    let schema = positions.into_iter().map(|(f, _)| f).collect();
    UsageTable::new(schema, records)
}

fn set_field(record: &mut UsageRecord, field: Field, value: &str) -> Result<()> {
    match field {
        Field::Date => record.date = Some(parse_date(value)?),
        Field::Hour => record.hour = Some(u32::try_from(parse_integer(value)?)?),
        Field::Holiday => record.holiday = Some(parse_integer(value)?),
        Field::Total => record.total = Some(u64::try_from(parse_integer(value)?)?),
        Field::Casual => record.casual = Some(u64::try_from(parse_integer(value)?)?),
        Field::Registered => record.registered = Some(u64::try_from(parse_integer(value)?)?),
    }
    Ok(())
}

/// Integers may arrive as `"3"` or, from float-typed exports, `"3.0"`.
fn parse_integer(value: &str) -> Result<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n);
    }
    let f: f64 = value.parse().map_err(|_| anyhow!("not a number"))?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(anyhow!("not an integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    const SAMPLE: &str = "\
instant,dteday,hr,holiday_hours,weathersit,cnt_hours,casual_hours,registered_hours
1,2011-01-01,0,0,1,16,3,13
2,2011-01-01,1,0,1,40,8,32
3,2011-01-02,0,1,2,17,0,17
";

    #[test]
    fn test_read_picks_known_columns() {
        let table = read_usage_csv(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.schema(), &Field::ALL[..]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.records()[1],
            UsageRecord::new(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(), 1, 0, 40, 8, 32)
        );
    }

    #[test]
    fn test_read_with_partial_schema() {
        let csv = "hr,cnt_hours\n5,10\n6,4\n";
        let table = read_usage_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.schema(), &[Field::Hour, Field::Total]);
        assert!(!table.has(Field::Date));
        assert_eq!(table.records()[0].hour, Some(5));
        assert_eq!(table.records()[0].casual, None);
    }

    #[test]
    fn test_read_accepts_float_integers_and_padding() {
        let csv = " dteday , hr ,cnt_hours\n2011-01-01 00:00:00, 3.0 ,12\n";
        let table = read_usage_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0].hour, Some(3));
        assert_eq!(table.records()[0].date, NaiveDate::from_ymd_opt(2011, 1, 1));
    }

    #[test]
    fn test_read_rejects_malformed_value() {
        let csv = "hr,cnt_hours\n5,ten\n";
        let err = read_usage_csv(csv.as_bytes()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("row 1"), "{}", message);
        assert!(message.contains("cnt_hours"), "{}", message);
    }

    #[test]
    fn test_read_rejects_negative_count() {
        let csv = "cnt_hours\n-1\n";
        assert!(read_usage_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let repo = CsvUsageRepository::new(file.path());
        let table = repo.load().unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvUsageRepository::new(dir.path().join("nope.csv"));
        let err = repo.load().unwrap_err();
        assert!(err.to_string().contains("Failed to open dataset"));
    }
}
