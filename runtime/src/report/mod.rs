//! Strategy report parsing.
//!
//! Turns one generated HTML backtest report into a [`StrategyRecord`]:
//! category from the filename, symbol from the title, headline stats from
//! the `stat-val` markers and the equity curve from the chart script.

pub mod category;
pub mod extract;
pub mod types;

pub use category::{categorize, Category};
pub use extract::{extract, ExtractError};
pub use types::{ReportStats, StrategyRecord, STAT_FIELDS};
