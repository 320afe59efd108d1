use chrono::NaiveDate;
use std::fmt;

/// Columns of the source dataset that the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Date,
    Hour,
    Holiday,
    Total,
    Casual,
    Registered,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Date,
        Field::Hour,
        Field::Holiday,
        Field::Total,
        Field::Casual,
        Field::Registered,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Field::Date => "dteday",
            Field::Hour => "hr",
            Field::Holiday => "holiday_hours",
            Field::Total => "cnt_hours",
            Field::Casual => "casual_hours",
            Field::Registered => "registered_hours",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One row of the dataset.
///
/// A value is `Some` exactly when its column is part of the owning table's schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageRecord {
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub holiday: Option<i64>,
    pub total: Option<u64>,
    pub casual: Option<u64>,
    pub registered: Option<u64>,
}

impl UsageRecord {
    pub fn new(
        date: NaiveDate,
        hour: u32,
        holiday: i64,
        total: u64,
        casual: u64,
        registered: u64,
    ) -> Self {
        Self {
            date: Some(date),
            hour: Some(hour),
            holiday: Some(holiday),
            total: Some(total),
            casual: Some(casual),
            registered: Some(registered),
        }
    }

    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Date => self.date.is_some(),
            Field::Hour => self.hour.is_some(),
            Field::Holiday => self.holiday.is_some(),
            Field::Total => self.total.is_some(),
            Field::Casual => self.casual.is_some(),
            Field::Registered => self.registered.is_some(),
        }
    }

    /// Drops every value whose column is not in `schema`.
    fn restrict(mut self, schema: &[Field]) -> Self {
        if !schema.contains(&Field::Date) { self.date = None; }
        if !schema.contains(&Field::Hour) { self.hour = None; }
        if !schema.contains(&Field::Holiday) { self.holiday = None; }
        if !schema.contains(&Field::Total) { self.total = None; }
        if !schema.contains(&Field::Casual) { self.casual = None; }
        if !schema.contains(&Field::Registered) { self.registered = None; }
        self
    }
}

/// An immutable, ordered set of usage records sharing one schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageTable {
    schema: Vec<Field>,
    records: Vec<UsageRecord>,
}

impl UsageTable {
    /// Builds a table, normalising records so that only schema columns carry values.
    /// Returns an error naming the first record that lacks a schema column.
    pub fn new(schema: Vec<Field>, records: Vec<UsageRecord>) -> anyhow::Result<Self> {
        let mut schema = schema;
        schema.sort();
        schema.dedup();

        for (i, record) in records.iter().enumerate() {
            if let Some(field) = schema.iter().find(|f| !record.has(**f)) {
                anyhow::bail!("record {} has no value for column '{}'", i, field);
            }
        }

        let records = records.into_iter().map(|r| r.restrict(&schema)).collect();
        Ok(Self { schema, records })
    }

    /// A table with every known column.
    pub fn with_all_fields(records: Vec<UsageRecord>) -> anyhow::Result<Self> {
        Self::new(Field::ALL.to_vec(), records)
    }

    /// No columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &[Field] {
        &self.schema
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has(&self, field: Field) -> bool {
        self.schema.contains(&field)
    }

    /// Columns from `required` that this table does not have, in the given order.
    pub fn missing(&self, required: &[Field]) -> Vec<Field> {
        required.iter().copied().filter(|f| !self.has(*f)).collect()
    }

    /// Same schema, subset of rows. Callers only pass records taken from `self`.
    pub(crate) fn derive(&self, records: Vec<UsageRecord>) -> Self {
        Self {
            schema: self.schema.clone(),
            records,
        }
    }
}
