//! Brief domain model, filter pipeline, and stats aggregation
//!
//! Everything in this module is pure and synchronous: the filter pipeline
//! and stats aggregator are side-effect-free recomputations suitable for
//! memoization keyed on their inputs.

pub mod filter;
pub mod stats;
pub mod types;

pub use filter::{
    apply_filters, ConfidenceFilter, ConfidenceThreshold, FilterState, PeriodFilter,
    PriorityFilter,
};
pub use stats::{compute_default_stats, CenterStats, DefaultStatsPolicy, StatsOverride, StatsPolicy};
pub use types::{
    decode_collection, Brief, CreateBriefRequest, GeographicFocus, Prediction, PriorityLevel,
    RelatedData, Signal, Trend,
};

/// Entity type names used at the service boundary
pub mod entity_types {
    pub const BRIEF: &str = "Brief";
    pub const PREDICTION: &str = "Prediction";
    pub const SIGNAL: &str = "Signal";
    pub const TREND: &str = "Trend";
}
