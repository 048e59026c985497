//! Language breakdown panel

use repodash_core::RepoLanguages;
use serde::Serialize;

use crate::contributors::CHART_PALETTE;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of all bytes, one decimal place
    pub percentage: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageBreakdown {
    pub total_bytes: u64,
    pub languages: Vec<LanguageShare>,
}

impl LanguageBreakdown {
    /// Largest language first; equal sizes fall back to name order
    pub fn from_languages(languages: &RepoLanguages) -> Self {
        let total_bytes: u64 = languages.values().sum();

        let mut entries: Vec<(&String, u64)> =
            languages.iter().map(|(name, &bytes)| (name, bytes)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let languages = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, bytes))| LanguageShare {
                name: name.clone(),
                bytes,
                percentage: one_decimal_share(bytes, total_bytes),
                color: CHART_PALETTE[index % CHART_PALETTE.len()],
            })
            .collect();

        Self {
            total_bytes,
            languages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn primary(&self) -> Option<&LanguageShare> {
        self.languages.first()
    }
}

fn one_decimal_share(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
