//! Progress statistics
//!
//! Pure functions over the catalog and a completion snapshot. Nothing here
//! holds state; recomputing on every change is cheap for a sheet this size.

pub mod aggregate;
pub mod filter;
pub mod motivation;

pub use aggregate::{
    ProgressReport, Tally, TopicStats, completed_count, per_difficulty_stats, per_topic_stats,
    progress_percentage, rounded_percentage, total_count,
};
pub use filter::{FilteredCatalog, FilteredTopic, ProblemFilter, filter_problems};
pub use motivation::MotivationBand;
