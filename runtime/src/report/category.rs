//! Assign a strategy category from the report filename.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The strategy family a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Trendline Scalper")]
    TrendlineScalper,
    #[serde(rename = "Trend Continuation")]
    TrendContinuation,
    #[serde(rename = "Spike Detector")]
    SpikeDetector,
    #[serde(rename = "General Strategy")]
    General,
}

/// Filename substring rules, checked top to bottom. First match wins.
pub const CATEGORY_RULES: &[(&str, Category)] = &[
    ("TrendlineReport", Category::TrendlineScalper),
    ("SafeReport", Category::TrendContinuation),
    ("Spike", Category::SpikeDetector),
];

impl Category {
    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::TrendlineScalper => "Trendline Scalper",
            Category::TrendContinuation => "Trend Continuation",
            Category::SpikeDetector => "Spike Detector",
            Category::General => "General Strategy",
        }
    }

    /// Short pitch shown next to the category on the site.
    pub fn description(self) -> &'static str {
        match self {
            Category::TrendContinuation => {
                "A low-drawdown Trend Continuation strategy. It identifies established market \
                 direction and enters on pullbacks, ensuring high-probability entries with tight \
                 risk management. Ideal for long-term capital preservation."
            }
            Category::TrendlineScalper => {
                "A high-frequency Scalping strategy targeting 5.0x ATR zones. Utilizes RSI \
                 filtering to catch rapid reversals and short-term corrections in volatile markets."
            }
            Category::SpikeDetector | Category::General => {
                "Algorithmic trading system utilizing technical indicators for optimal market entry."
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorize a report by its filename.
pub fn categorize(filename: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(pattern, _)| filename.contains(pattern))
        .map(|&(_, category)| category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_each_rule() {
        assert_eq!(
            categorize("EURUSD_TrendlineReport.html"),
            Category::TrendlineScalper
        );
        assert_eq!(
            categorize("GBPJPY_SafeReport.html"),
            Category::TrendContinuation
        );
        assert_eq!(categorize("Boom1000_Spike.html"), Category::SpikeDetector);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            categorize("SafeReport_TrendlineReport_Spike.html"),
            Category::TrendlineScalper
        );
        assert_eq!(
            categorize("Spike_SafeReport.html"),
            Category::TrendContinuation
        );
    }

    #[test]
    fn test_unmatched_is_general() {
        assert_eq!(categorize("report_EURUSD_2024.html"), Category::General);
        assert_eq!(categorize(""), Category::General);
        // Matching is case sensitive.
        assert_eq!(categorize("trendlinereport.html"), Category::General);
    }

    #[test]
    fn test_serializes_as_label() {
        for category in [
            Category::TrendlineScalper,
            Category::TrendContinuation,
            Category::SpikeDetector,
            Category::General,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }
}
