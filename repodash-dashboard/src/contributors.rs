//! Contributor statistics panel
//!
//! Contributors are ranked by contribution count (stable, so equal counts keep
//! the order the API returned them in). The five largest get their own chart
//! slice and everybody else is folded into "Others"; the table lists the ten
//! largest with a per-row share of the total.
//!
//! Row percentages are rounded independently and need not add up to 100.

use repodash_core::Contributor;
use serde::Serialize;

use crate::{percentage_of, rounded_ratio};

/// Contributors that get a chart slice of their own
pub const TOP_SLICE_COUNT: usize = 5;
/// Rows shown in the ranking table
pub const TABLE_ROW_LIMIT: usize = 10;
pub const OTHERS_LABEL: &str = "Others";
/// Slice colors, assigned by slice position
pub const CHART_PALETTE: [&str; 6] = [
    "#3b82f6", "#10b981", "#a855f7", "#f59e0b", "#ef4444", "#6b7280",
];
pub const EMPTY_CONTRIBUTORS_MESSAGE: &str =
    "No contributor data available. Please ensure the repository is accessible.";

/// One weighted chart segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionSlice {
    pub name: String,
    pub value: u64,
    pub color: &'static str,
}

/// Summary figures over all contributors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub contributor_count: usize,
    pub total_contributions: u64,
    pub average_contributions: u64,
    pub top_contributor: Contributor,
    pub top_contribution_percentage: u64,
}

/// One line of the ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorRow {
    pub rank: usize,
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub contributions: u64,
    pub percentage: u64,
}

/// Everything the populated panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorsPanel {
    pub chart: Vec<ContributionSlice>,
    pub stats: AggregateStats,
    pub table: Vec<ContributorRow>,
}

/// The three mutually exclusive states of the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContributorsView {
    Loading,
    Empty { message: String },
    Populated(ContributorsPanel),
}

impl ContributorsView {
    /// Pick the state from the inputs; only the populated state aggregates
    pub fn build(contributors: Option<&[Contributor]>, is_loading: bool) -> Self {
        if is_loading {
            return Self::Loading;
        }

        match contributors.and_then(ContributorsPanel::from_contributors) {
            Some(panel) => Self::Populated(panel),
            None => Self::Empty {
                message: EMPTY_CONTRIBUTORS_MESSAGE.to_string(),
            },
        }
    }

    pub fn panel(&self) -> Option<&ContributorsPanel> {
        match self {
            Self::Populated(panel) => Some(panel),
            _ => None,
        }
    }
}

impl ContributorsPanel {
    /// `None` for an empty list
    pub fn from_contributors(contributors: &[Contributor]) -> Option<Self> {
        let sorted = sort_by_contributions(contributors);
        let stats = aggregate_stats(&sorted)?;

        Some(Self {
            chart: chart_dataset(&sorted),
            table: table_rows(&sorted, stats.total_contributions),
            stats,
        })
    }
}

/// Copy of `contributors`, largest first; ties keep their input order
pub fn sort_by_contributions(contributors: &[Contributor]) -> Vec<Contributor> {
    let mut sorted = contributors.to_vec();
    sorted.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    sorted
}

/// Chart slices for an already sorted list
///
/// The "Others" slice is present whenever there are more than
/// [`TOP_SLICE_COUNT`] contributors, even if its value is zero.
pub fn chart_dataset(sorted: &[Contributor]) -> Vec<ContributionSlice> {
    let split = sorted.len().min(TOP_SLICE_COUNT);
    let (top, rest) = sorted.split_at(split);

    let mut slices: Vec<(String, u64)> = top
        .iter()
        .map(|c| (c.login.clone(), c.contributions))
        .collect();

    if !rest.is_empty() {
        let others = rest.iter().map(|c| c.contributions).sum();
        slices.push((OTHERS_LABEL.to_string(), others));
    }

    slices
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| ContributionSlice {
            name,
            value,
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect()
}

/// Totals for an already sorted list; `None` when it is empty
pub fn aggregate_stats(sorted: &[Contributor]) -> Option<AggregateStats> {
    let top_contributor = sorted.first()?.clone();
    let total_contributions: u64 = sorted.iter().map(|c| c.contributions).sum();

    Some(AggregateStats {
        contributor_count: sorted.len(),
        total_contributions,
        average_contributions: rounded_ratio(total_contributions, sorted.len() as u64),
        top_contribution_percentage: percentage_of(
            top_contributor.contributions,
            total_contributions,
        ),
        top_contributor,
    })
}

/// Up to [`TABLE_ROW_LIMIT`] rows of an already sorted list
pub fn table_rows(sorted: &[Contributor], total_contributions: u64) -> Vec<ContributorRow> {
    sorted
        .iter()
        .take(TABLE_ROW_LIMIT)
        .enumerate()
        .map(|(index, c)| ContributorRow {
            rank: index + 1,
            id: c.id,
            login: c.login.clone(),
            avatar_url: c.avatar_url.clone(),
            profile_url: c.html_url.clone(),
            contributions: c.contributions,
            percentage: percentage_of(c.contributions, total_contributions),
        })
        .collect()
}
