//! Template system for server-side rendering
//!
//! This module provides templates for server-side rendering using Askama.

use askama::Template;

use repodash_dashboard::{AggregateStats, ContributionSlice, ContributorRow, ContributorsView};

/// Fill used for the chart when there is nothing to draw
const EMPTY_CHART_COLOR: &str = "#e5e7eb";

/// Contributors page template
#[derive(Template)]
#[template(path = "contributors.html")]
pub struct ContributorsTemplate {
    pub title: String,
    pub repository: String,
    pub loading: bool,
    pub message: Option<String>,
    pub gradient: String,
    pub chart: Vec<ContributionSlice>,
    pub stats: Option<AggregateStats>,
    pub rows: Vec<ContributorRow>,
    pub notices: Vec<String>,
}

impl ContributorsTemplate {
    pub fn new(repository: &str, view: &ContributorsView, notices: Vec<String>) -> Self {
        let mut page = Self {
            title: format!("{} · Contributors", repository),
            repository: repository.to_string(),
            loading: false,
            message: None,
            gradient: conic_gradient(&[]),
            chart: Vec::new(),
            stats: None,
            rows: Vec::new(),
            notices,
        };

        match view {
            ContributorsView::Loading => page.loading = true,
            ContributorsView::Empty { message } => page.message = Some(message.clone()),
            ContributorsView::Populated(panel) => {
                page.gradient = conic_gradient(&panel.chart);
                page.chart = panel.chart.clone();
                page.stats = Some(panel.stats.clone());
                page.rows = panel.table.clone();
            }
        }

        page
    }
}

/// CSS `conic-gradient` with one color stop range per slice
///
/// Ranges are taken from cumulative shares so they always close at 100%.
pub fn conic_gradient(chart: &[ContributionSlice]) -> String {
    let total: u64 = chart.iter().map(|slice| slice.value).sum();
    if total == 0 {
        return format!("conic-gradient({} 0% 100%)", EMPTY_CHART_COLOR);
    }

    let mut stops = Vec::with_capacity(chart.len());
    let mut cumulative = 0u64;
    for slice in chart {
        let start = cumulative as f64 / total as f64 * 100.0;
        cumulative += slice.value;
        let end = cumulative as f64 / total as f64 * 100.0;
        stops.push(format!("{} {:.1}% {:.1}%", slice.color, start, end));
    }

    format!("conic-gradient({})", stops.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use repodash_core::Contributor;
    use repodash_dashboard::CHART_PALETTE;

    fn contributors(counts: &[u64]) -> Vec<Contributor> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| Contributor {
                login: format!("user{}", i),
                id: i as u64,
                avatar_url: format!("https://avatars.example/{}", i),
                html_url: format!("https://github.com/user{}", i),
                contributions: n,
                account_type: "User".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_conic_gradient_closes_at_full_circle() {
        let input = contributors(&[3, 1]);
        let view = ContributorsView::build(Some(&input), false);
        let gradient = conic_gradient(&view.panel().unwrap().chart);

        assert_eq!(
            gradient,
            format!(
                "conic-gradient({} 0.0% 75.0%, {} 75.0% 100.0%)",
                CHART_PALETTE[0], CHART_PALETTE[1]
            )
        );
    }

    #[test]
    fn test_conic_gradient_for_zero_total() {
        assert_eq!(conic_gradient(&[]), "conic-gradient(#e5e7eb 0% 100%)");
    }

    #[test]
    fn test_populated_page_renders_rows() {
        let input = contributors(&[5, 3]);
        let view = ContributorsView::build(Some(&input), false);
        let html = ContributorsTemplate::new("octo/hello", &view, vec![])
            .render()
            .unwrap();

        assert!(html.contains("Contributors"));
        assert!(html.contains("user0"));
        assert!(html.contains("63%"));
        assert!(html.contains("conic-gradient("));
    }

    #[test]
    fn test_empty_page_shows_message_and_notices() {
        let view = ContributorsView::build(None, false);
        let html = ContributorsTemplate::new(
            "octo/hello",
            &view,
            vec!["Failed to fetch contributors".to_string()],
        )
        .render()
        .unwrap();

        assert!(html.contains("No contributor data available."));
        assert!(html.contains("Failed to fetch contributors"));
        assert!(!html.contains("<table"));
    }
}
