pub mod error;
pub mod options;
pub mod tracker;

pub use options::{decide_strategy, ResultOption, ResultsStrategy};
pub use tracker::{DetailedResultsTracker, InteractiveKind, InteractiveRecord};
