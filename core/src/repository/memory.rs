use anyhow::Result;

use crate::model::usage::UsageTable;
use crate::repository::traits::UsageRepository;

/// Serves a table that is already in memory.
#[derive(Clone, Default)]
pub struct InMemoryUsageRepository {
    table: UsageTable,
}

impl InMemoryUsageRepository {
    pub fn new(table: UsageTable) -> Self {
        Self { table }
    }
}

impl UsageRepository for InMemoryUsageRepository {
    fn load(&self) -> Result<UsageTable> {
        Ok(self.table.clone())
    }
}
