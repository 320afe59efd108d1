pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::{read_usage_csv, CsvUsageRepository};
pub use memory::InMemoryUsageRepository;
pub use traits::UsageRepository;
