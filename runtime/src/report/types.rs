//! Records produced from a single strategy report.

use super::category::Category;
use serde::{Deserialize, Serialize};

/// Stat field names, in the order the report generator emits the
/// `stat-val` elements.
pub const STAT_FIELDS: [&str; 5] = [
    "net_profit",
    "win_rate",
    "final_balance",
    "max_drawdown",
    "total_trades",
];

/// Headline statistics, kept as display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub net_profit: String,
    pub win_rate: String,
    pub final_balance: String,
    pub max_drawdown: String,
    pub total_trades: String,
}

impl ReportStats {
    /// Bind stat values to fields by position.
    ///
    /// Values past the fifth are ignored. Returns the name of the first
    /// unfilled field when fewer than five are present.
    pub fn from_values(values: &[String]) -> Result<Self, &'static str> {
        if values.len() < STAT_FIELDS.len() {
            return Err(STAT_FIELDS[values.len()]);
        }
        Ok(Self {
            net_profit: values[0].clone(),
            win_rate: values[1].clone(),
            final_balance: values[2].clone(),
            max_drawdown: values[3].clone(),
            total_trades: values[4].clone(),
        })
    }
}

/// One entry of the digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecord {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub filename: String,
    pub stats: ReportStats,
    pub equity_curve: Vec<f64>,
}

/// Build the frontend key for a record: `"{category}-{name}"`, lowercased,
/// spaces turned into hyphens. Not guaranteed unique.
pub fn record_id(category: Category, name: &str) -> String {
    format!("{category}-{name}").to_lowercase().replace(' ', "-")
}
