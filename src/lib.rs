pub mod cli;
pub mod config;
pub mod imgio;
pub mod logger;
pub mod normalize;
pub mod report;
pub mod types;

// Re-export commonly used items
pub use config::{NormalizeConfig, OutlierPolicy};
pub use normalize::{NormalizeError, Outcome, run};
pub use report::print_report;
