//! Repodash Dashboard - view models derived from fetched repository data
//!
//! Everything here is synchronous and side-effect free: the same input always
//! yields the same view, and nothing is cached between builds.

pub mod activity;
pub mod contributors;
pub mod languages;
pub mod render;

pub use activity::{ActivitySummary, BusiestSlot, BusiestWeek};
pub use contributors::{
    AggregateStats, ContributionSlice, ContributorRow, ContributorsPanel, ContributorsView,
    CHART_PALETTE, EMPTY_CONTRIBUTORS_MESSAGE, OTHERS_LABEL, TABLE_ROW_LIMIT, TOP_SLICE_COUNT,
};
pub use languages::{LanguageBreakdown, LanguageShare};

/// `round(numerator / denominator)` with halves rounded up; 0 when `denominator` is 0
pub fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (numerator as u128, denominator as u128);
    ((2 * n + d) / (2 * d)) as u64
}

/// `round(part / total * 100)`; 0 when `total` is 0
pub fn percentage_of(part: u64, total: u64) -> u64 {
    rounded_ratio(part.saturating_mul(100), total)
}
