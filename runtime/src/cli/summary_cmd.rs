//! `strategy-digest summary` — per-category totals from a written digest.

use crate::cli::output::{self, Styled};
use crate::digest::summary::{self, CategorySummary};
use crate::digest;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the summary command against the digest at `path`.
pub fn run(path: &Path) -> Result<()> {
    let records = digest::load_digest(path)
        .with_context(|| format!("loading digest {}", path.display()))?;
    let summaries = summary::summarize(&records);

    if output::is_json() {
        output::print_json(&summary_json(&summaries)?);
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    let s = Styled::new();
    output::print_header(&s);

    if summaries.is_empty() {
        eprintln!("  No strategies in {}.", path.display());
        return Ok(());
    }

    for cat in &summaries {
        eprintln!("  {}", s.bold(cat.category.label()));
        if output::is_verbose() {
            eprintln!("    {}", s.dim(cat.category.description()));
        }
        output::print_check(s.ok_sym(), "Strategies:", &cat.strategies.to_string());
        output::print_check(
            s.ok_sym(),
            "Total balance:",
            &output::format_money(cat.total_balance),
        );
        let profit = output::format_money(cat.total_net_profit);
        let (sym, profit) = if cat.total_net_profit >= 0.0 {
            (s.ok_sym(), s.green(&profit))
        } else {
            (s.fail_sym(), s.red(&profit))
        };
        output::print_check(sym, "Net return:", &profit);
        output::print_check(
            s.ok_sym(),
            "Risk:",
            &format!(
                "{} {}, {} {}, {} {}",
                cat.risk.conservative,
                summary::RiskProfile::Conservative.label(),
                cat.risk.balanced,
                summary::RiskProfile::Balanced.label(),
                cat.risk.aggressive,
                summary::RiskProfile::Aggressive.label(),
            ),
        );
        eprintln!();
    }

    Ok(())
}

/// JSON form of the summaries, as printed under `--json`.
fn summary_json(summaries: &[CategorySummary]) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Category, ReportStats, StrategyRecord};
    use serde_json::json;

    fn record(category: Category, profit: &str, balance: &str, dd: &str) -> StrategyRecord {
        StrategyRecord {
            id: String::new(),
            category,
            name: "EURUSD".into(),
            filename: "x.html".into(),
            stats: ReportStats {
                net_profit: profit.into(),
                win_rate: "55%".into(),
                final_balance: balance.into(),
                max_drawdown: dd.into(),
                total_trades: "20".into(),
            },
            equity_curve: vec![1.0, 2.0],
        }
    }

    #[test]
    fn test_summary_json_shape() {
        let records = vec![record(Category::SpikeDetector, "$25.00", "$1,025.00", "-55%")];
        let value = summary_json(&summary::summarize(&records)).unwrap();
        assert_eq!(
            value,
            json!([{
                "category": "Spike Detector",
                "strategies": 1,
                "total_balance": 1025.0,
                "total_net_profit": 25.0,
                "risk": { "conservative": 0, "balanced": 0, "aggressive": 1 }
            }])
        );
    }

    #[test]
    fn test_run_reads_written_digest() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let records = vec![record(Category::General, "$1", "$2", "-3%")];
        digest::write_digest(&records, &path).unwrap();

        assert!(run(&path).is_ok());
    }

    #[test]
    fn test_run_fails_on_missing_digest() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().starts_with("loading digest"));
    }
}
