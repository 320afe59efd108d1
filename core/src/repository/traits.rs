use crate::model::usage::UsageTable;
use anyhow::Result;

pub trait UsageRepository {
    fn load(&self) -> Result<UsageTable>;
}
