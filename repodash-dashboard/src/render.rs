//! Plain-text rendering of each panel for terminal output

use std::fmt::Write;

use repodash_core::{FileEntry, RepoData};

use crate::{
    rounded_ratio, ActivitySummary, ContributionSlice, ContributorsView, LanguageBreakdown,
};

/// Width of the contributor share bar in characters
pub const BAR_WIDTH: u64 = 40;
const BAR_GLYPHS: [char; 6] = ['█', '▓', '▒', '░', '#', '='];

pub fn render_overview(repo: &RepoData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", repo.full_name);
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  {}", description);
    }
    let _ = writeln!(out, "  {}", repo.html_url);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  ★ {}  ⑂ {}  ◉ {} issues  👁 {}",
        repo.stargazers_count, repo.forks_count, repo.open_issues_count, repo.watchers_count
    );
    let _ = writeln!(
        out,
        "  language: {}",
        repo.language.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(out, "  default branch: {}", repo.default_branch);
    let _ = writeln!(
        out,
        "  created {}  updated {}",
        repo.created_at.format("%Y-%m-%d"),
        repo.updated_at.format("%Y-%m-%d")
    );
    out
}

pub fn render_languages(breakdown: &LanguageBreakdown) -> String {
    if breakdown.is_empty() {
        return "No language data available.\n".to_string();
    }

    let width = breakdown
        .languages
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for language in &breakdown.languages {
        let _ = writeln!(
            out,
            "{:<width$}  {:>5.1}%  {} bytes",
            language.name,
            language.percentage,
            language.bytes,
            width = width
        );
    }
    out
}

pub fn render_contributors(view: &ContributorsView) -> String {
    let panel = match view {
        ContributorsView::Loading => return "Loading contributors...\n".to_string(),
        ContributorsView::Empty { message } => return format!("{}\n", message),
        ContributorsView::Populated(panel) => panel,
    };

    let mut out = String::new();
    let stats = &panel.stats;
    let _ = writeln!(out, "Contributors: {}", stats.contributor_count);
    let _ = writeln!(out, "Total contributions: {}", stats.total_contributions);
    let _ = writeln!(out, "Average per contributor: {}", stats.average_contributions);
    let _ = writeln!(
        out,
        "Top contributor: {} ({}%)",
        stats.top_contributor.login, stats.top_contribution_percentage
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", share_bar(&panel.chart));
    for (index, slice) in panel.chart.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {} {} ({})",
            BAR_GLYPHS[index % BAR_GLYPHS.len()],
            slice.name,
            slice.value
        );
    }
    let _ = writeln!(out);

    let width = panel
        .table
        .iter()
        .map(|row| row.login.chars().count())
        .max()
        .unwrap_or(0);
    for row in &panel.table {
        let _ = writeln!(
            out,
            "{:>3}. {:<width$}  {:>7}  {:>3}%",
            row.rank,
            row.login,
            row.contributions,
            row.percentage,
            width = width
        );
    }
    out
}

/// Proportional bar; segment ends are rounded from cumulative totals so the
/// segments always fill exactly [`BAR_WIDTH`] characters
pub fn share_bar(chart: &[ContributionSlice]) -> String {
    let total: u64 = chart.iter().map(|slice| slice.value).sum();
    if total == 0 {
        return String::new();
    }

    let mut bar = String::new();
    let mut cumulative = 0u64;
    let mut drawn = 0u64;
    for (index, slice) in chart.iter().enumerate() {
        cumulative += slice.value;
        let end = rounded_ratio(cumulative * BAR_WIDTH, total);
        let glyph = BAR_GLYPHS[index % BAR_GLYPHS.len()];
        bar.extend(std::iter::repeat(glyph).take((end - drawn) as usize));
        drawn = end;
    }
    bar
}

pub fn render_activity(summary: &ActivitySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Commits: {} over {} weeks (avg {}/week)",
        summary.total_commits, summary.weeks, summary.average_weekly_commits
    );
    if let Some(week) = &summary.busiest_week {
        let _ = writeln!(
            out,
            "Busiest week: {} ({} commits)",
            week.week_start.format("%Y-%m-%d"),
            week.commits
        );
    }
    if let Some(slot) = &summary.busiest_slot {
        let _ = writeln!(
            out,
            "Busiest time: {} {:02}:00 ({} commits)",
            slot.weekday, slot.hour, slot.commits
        );
    }
    let _ = writeln!(
        out,
        "Code churn: +{} / -{}",
        summary.additions, summary.deletions
    );
    let _ = writeln!(out, "Owner share: {}%", summary.owner_share_percentage);
    let _ = writeln!(out, "Branches: {}", summary.branches);
    out
}

pub fn render_tree(entries: &[FileEntry]) -> String {
    if entries.is_empty() {
        return "(empty)\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        if entry.is_dir() {
            let _ = writeln!(out, "📁 {}/", entry.name);
        } else {
            let _ = writeln!(out, "📄 {}", entry.name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use repodash_core::{Contributor, FileKind, RepoOwner};

    fn contributor(login: &str, contributions: u64) -> Contributor {
        Contributor {
            login: login.to_string(),
            id: 1,
            avatar_url: String::new(),
            html_url: String::new(),
            contributions,
            account_type: "User".to_string(),
        }
    }

    #[test]
    fn test_share_bar_fills_width() {
        let input: Vec<Contributor> = [50, 40, 30, 20, 10, 5, 5]
            .iter()
            .enumerate()
            .map(|(i, &n)| contributor(&format!("u{}", i), n))
            .collect();
        let view = ContributorsView::build(Some(&input), false);
        let bar = share_bar(&view.panel().unwrap().chart);

        assert_eq!(bar.chars().count() as u64, BAR_WIDTH);
        // 50/160 of 40 = 12.5
        assert_eq!(bar.chars().take_while(|&c| c == BAR_GLYPHS[0]).count(), 13);
    }

    #[test]
    fn test_share_bar_empty_for_zero_total() {
        let input = vec![contributor("a", 0)];
        let view = ContributorsView::build(Some(&input), false);
        assert!(share_bar(&view.panel().unwrap().chart).is_empty());
    }

    #[test]
    fn test_render_contributors_states() {
        assert_eq!(
            render_contributors(&ContributorsView::Loading),
            "Loading contributors...\n"
        );

        let empty = render_contributors(&ContributorsView::build(None, false));
        assert!(empty.starts_with("No contributor data available."));

        let input = vec![contributor("octocat", 3), contributor("hubot", 1)];
        let text = render_contributors(&ContributorsView::build(Some(&input), false));
        assert!(text.contains("Top contributor: octocat (75%)"));
        assert!(text.contains("  1. octocat"));
        assert!(text.contains("  2. hubot"));
    }

    #[test]
    fn test_render_tree() {
        let entries = vec![
            FileEntry {
                name: "src".to_string(),
                path: "src".to_string(),
                kind: FileKind::Dir,
                sha: "a".to_string(),
                url: String::new(),
            },
            FileEntry {
                name: "Cargo.toml".to_string(),
                path: "Cargo.toml".to_string(),
                kind: FileKind::File,
                sha: "b".to_string(),
                url: String::new(),
            },
        ];
        assert_eq!(render_tree(&entries), "📁 src/\n📄 Cargo.toml\n");
        assert_eq!(render_tree(&[]), "(empty)\n");
    }

    #[test]
    fn test_render_overview() {
        let repo = RepoData {
            name: "hello".to_string(),
            full_name: "octo/hello".to_string(),
            description: Some("Says hello".to_string()),
            html_url: "https://github.com/octo/hello".to_string(),
            owner: RepoOwner {
                login: "octo".to_string(),
                avatar_url: String::new(),
            },
            language: None,
            stargazers_count: 12,
            forks_count: 3,
            open_issues_count: 1,
            watchers_count: 12,
            created_at: Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap(),
            default_branch: "main".to_string(),
        };

        let text = render_overview(&repo);
        assert!(text.starts_with("octo/hello\n  Says hello\n"));
        assert!(text.contains("language: unknown"));
        assert!(text.contains("created 2020-01-02  updated 2024-05-06"));
    }
}
