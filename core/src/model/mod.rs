pub mod date_range;
pub mod summary;
pub mod usage;
