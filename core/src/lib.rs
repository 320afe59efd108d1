pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::{Config, ConfigFile};
pub use error::SchemaError;
pub use model::date_range::DateRange;
pub use model::summary::{HolidaySummary, HourlyUsage, MetricTotals};
pub use model::usage::{Field, UsageRecord, UsageTable};
pub use repository::{CsvUsageRepository, InMemoryUsageRepository, UsageRepository};
pub use service::dto::DashboardView;
pub use time::{format_thousands, parse_date};
pub use usecase::dashboard::DashboardUseCase;
