//! Commit activity summary derived from the statistics bundle

use chrono::{DateTime, Utc};
use repodash_core::{CommitActivity, RepoStats};
use serde::Serialize;

use crate::{percentage_of, rounded_ratio};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusiestWeek {
    pub week_start: DateTime<Utc>,
    pub commits: u32,
}

/// Busiest weekday/hour cell of the punch card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusiestSlot {
    pub weekday: &'static str,
    pub hour: u32,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub total_commits: u64,
    pub weeks: usize,
    pub average_weekly_commits: u64,
    pub busiest_week: Option<BusiestWeek>,
    pub busiest_slot: Option<BusiestSlot>,
    pub additions: u64,
    pub deletions: u64,
    /// Owner's share of last year's commits
    pub owner_share_percentage: u64,
    pub branches: u32,
}

impl ActivitySummary {
    pub fn from_stats(stats: &RepoStats) -> Self {
        let total_commits: u64 = stats
            .commit_activity
            .iter()
            .map(|week| u64::from(week.total))
            .sum();
        let weeks = stats.commit_activity.len();

        let busiest_week = stats
            .commit_activity
            .iter()
            .filter(|week| week.total > 0)
            .fold(None::<&CommitActivity>, |best, week| match best {
                Some(b) if b.total >= week.total => Some(b),
                _ => Some(week),
            })
            .and_then(|week| {
                DateTime::from_timestamp(week.week, 0).map(|week_start| BusiestWeek {
                    week_start,
                    commits: week.total,
                })
            });

        let busiest_slot = stats
            .punch_card
            .iter()
            .filter(|[_, _, commits]| *commits > 0)
            .fold(None::<&[u32; 3]>, |best, cell| match best {
                Some(b) if b[2] >= cell[2] => Some(b),
                _ => Some(cell),
            })
            .and_then(|&[day, hour, commits]| {
                WEEKDAYS.get(day as usize).map(|&weekday| BusiestSlot {
                    weekday,
                    hour,
                    commits,
                })
            });

        let (additions, deletions) =
            stats
                .code_frequency
                .iter()
                .fold((0u64, 0u64), |(adds, dels), [_, added, deleted]| {
                    (
                        adds.saturating_add(added.unsigned_abs()),
                        dels.saturating_add(deleted.unsigned_abs()),
                    )
                });

        let all: u64 = stats.participation.all.iter().map(|&n| u64::from(n)).sum();
        let owner: u64 = stats.participation.owner.iter().map(|&n| u64::from(n)).sum();

        Self {
            total_commits,
            weeks,
            average_weekly_commits: rounded_ratio(total_commits, weeks as u64),
            busiest_week,
            busiest_slot,
            additions,
            deletions,
            owner_share_percentage: percentage_of(owner, all),
            branches: stats.branches,
        }
    }
}
