//! Per-category rollups of a digest, matching what the site's strategy
//! page shows: totals across bots and a risk badge per bot.

use crate::report::{Category, StrategyRecord};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Risk badge derived from a strategy's max drawdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskProfile {
    /// Classify by absolute drawdown percentage.
    pub fn from_drawdown(drawdown: f64) -> Self {
        let dd = drawdown.abs();
        if dd < 20.0 {
            RiskProfile::Conservative
        } else if dd < 50.0 {
            RiskProfile::Balanced
        } else {
            RiskProfile::Aggressive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Balanced => "Balanced",
            RiskProfile::Aggressive => "Aggressive",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub conservative: usize,
    pub balanced: usize,
    pub aggressive: usize,
}

impl RiskCounts {
    fn add(&mut self, profile: RiskProfile) {
        match profile {
            RiskProfile::Conservative => self.conservative += 1,
            RiskProfile::Balanced => self.balanced += 1,
            RiskProfile::Aggressive => self.aggressive += 1,
        }
    }
}

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub strategies: usize,
    pub total_balance: f64,
    pub total_net_profit: f64,
    pub risk: RiskCounts,
}

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").expect("leading number regex is valid")
});

/// Parse a display value such as `"$1,234.50"` or `"-12.5%"`.
///
/// Drops everything except digits, `.` and `-`, then reads the longest
/// leading number, so `"8.4% (-$840)"` yields `8.4`.
pub fn parse_display_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let number = LEADING_NUMBER_RE.find(&cleaned)?;
    number.as_str().parse().ok()
}

/// Group records by category, in order of first appearance.
///
/// Stats that do not parse as numbers are left out of the totals.
pub fn summarize(records: &[StrategyRecord]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for record in records {
        let idx = match summaries
            .iter()
            .position(|s| s.category == record.category)
        {
            Some(idx) => idx,
            None => {
                summaries.push(CategorySummary {
                    category: record.category,
                    strategies: 0,
                    total_balance: 0.0,
                    total_net_profit: 0.0,
                    risk: RiskCounts::default(),
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[idx];

        summary.strategies += 1;
        if let Some(balance) = parse_display_number(&record.stats.final_balance) {
            summary.total_balance += balance;
        }
        if let Some(profit) = parse_display_number(&record.stats.net_profit) {
            summary.total_net_profit += profit;
        }
        if let Some(dd) = parse_display_number(&record.stats.max_drawdown) {
            summary.risk.add(RiskProfile::from_drawdown(dd));
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportStats;

    fn record(category: Category, profit: &str, balance: &str, dd: &str) -> StrategyRecord {
        StrategyRecord {
            id: String::new(),
            category,
            name: "X".into(),
            filename: "x.html".into(),
            stats: ReportStats {
                net_profit: profit.into(),
                win_rate: "50%".into(),
                final_balance: balance.into(),
                max_drawdown: dd.into(),
                total_trades: "10".into(),
            },
            equity_curve: Vec::new(),
        }
    }

    #[test]
    fn test_parse_display_number() {
        assert_eq!(parse_display_number("$1,234.50"), Some(1234.5));
        assert_eq!(parse_display_number("-12.5%"), Some(-12.5));
        assert_eq!(parse_display_number(" 148 "), Some(148.0));
        assert_eq!(parse_display_number("N/A"), None);
        assert_eq!(parse_display_number("--"), None);
    }

    #[test]
    fn test_parse_display_number_reads_leading_number() {
        assert_eq!(parse_display_number("8.4% (-$840)"), Some(8.4));
        assert_eq!(parse_display_number("1.2.3"), Some(1.2));
        assert_eq!(parse_display_number("12."), Some(12.0));
        assert_eq!(parse_display_number(".5"), Some(0.5));
        assert_eq!(parse_display_number("-"), None);
        assert_eq!(parse_display_number("-.x"), None);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskProfile::from_drawdown(-19.9), RiskProfile::Conservative);
        assert_eq!(RiskProfile::from_drawdown(20.0), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_drawdown(-49.99), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_drawdown(50.0), RiskProfile::Aggressive);
    }

    #[test]
    fn test_summarize_groups_in_first_seen_order() {
        let records = vec![
            record(Category::TrendContinuation, "$100.00", "$1,100.00", "-5%"),
            record(Category::TrendlineScalper, "-$50.00", "$950.00", "-35%"),
            record(Category::TrendContinuation, "$200.00", "$1,200.00", "-60%"),
        ];
        let summaries = summarize(&records);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category, Category::TrendContinuation);
        assert_eq!(summaries[0].strategies, 2);
        assert_eq!(summaries[0].total_balance, 2300.0);
        assert_eq!(summaries[0].total_net_profit, 300.0);
        assert_eq!(
            summaries[0].risk,
            RiskCounts {
                conservative: 1,
                balanced: 0,
                aggressive: 1
            }
        );
        assert_eq!(summaries[1].category, Category::TrendlineScalper);
        assert_eq!(summaries[1].total_net_profit, -50.0);
        assert_eq!(summaries[1].risk.balanced, 1);
    }

    #[test]
    fn test_unparsable_stats_left_out() {
        let records = vec![
            record(Category::General, "n/a", "$500", "?"),
            record(Category::General, "$10", "n/a", "-1%"),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries[0].strategies, 2);
        assert_eq!(summaries[0].total_balance, 500.0);
        assert_eq!(summaries[0].total_net_profit, 10.0);
        assert_eq!(summaries[0].risk.conservative, 1);
    }
}
