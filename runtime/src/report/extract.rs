//! Pull a [`StrategyRecord`] out of one generated report page.
//!
//! The report generator tags its five headline numbers with the `stat-val`
//! class and embeds the equity curve as chart data in the last `<script>`
//! block. Everything else on the page is ignored.

use super::category::categorize;
use super::types::{record_id, ReportStats, StrategyRecord, STAT_FIELDS};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

/// Fragments removed from the page title, in order, each at most once.
const TITLE_NOISE: &[&str] = &["Strategy Report", "Trendline Scalper:"];

static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

static STAT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".stat-val").expect("stat selector is valid"));

static SCRIPT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("script selector is valid"));

static EQUITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:\s*\[([\d.,\s-]+)\]").expect("equity regex is valid"));

/// Why a report page could not be turned into a record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read report: {0}")]
    Read(#[from] std::io::Error),

    #[error(
        "found {found} of {expected} stat values, `{field}` is missing",
        expected = STAT_FIELDS.len()
    )]
    MissingStat { field: &'static str, found: usize },

    #[error("invalid equity curve value {value:?}")]
    EquityValue { value: String },
}

/// Extract a record from report HTML.
///
/// Returns `Ok(None)` when the page carries no stat markers at all, i.e. it
/// is not a strategy report.
pub fn extract(html: &str, filename: &str) -> Result<Option<StrategyRecord>, ExtractError> {
    let document = Html::parse_document(html);
    let category = categorize(filename);

    let title = document
        .select(&TITLE_SEL)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let name = symbol_from_title(&title).unwrap_or_else(|| symbol_from_filename(filename));

    let stat_values: Vec<String> = document
        .select(&STAT_SEL)
        .map(|el| element_text(el).trim().to_string())
        .collect();
    if stat_values.is_empty() {
        return Ok(None);
    }
    let stats = ReportStats::from_values(&stat_values).map_err(|field| {
        ExtractError::MissingStat {
            field,
            found: stat_values.len(),
        }
    })?;

    let equity_curve = match document.select(&SCRIPT_SEL).last() {
        Some(script) => parse_equity_curve(&element_text(script))?,
        None => Vec::new(),
    };

    Ok(Some(StrategyRecord {
        id: record_id(category, &name),
        category,
        name,
        filename: filename.to_string(),
        stats,
        equity_curve,
    }))
}

/// Strip the generator's title boilerplate. `None` if nothing is left.
fn symbol_from_title(title: &str) -> Option<String> {
    let stripped = TITLE_NOISE
        .iter()
        .fold(title.to_string(), |acc, noise| acc.replacen(noise, "", 1));
    let symbol = stripped.trim();
    (!symbol.is_empty()).then(|| symbol.to_string())
}

/// Second `_`-separated token of the filename, or the whole filename.
fn symbol_from_filename(filename: &str) -> String {
    filename.split('_').nth(1).unwrap_or(filename).to_string()
}

/// Parse the `data: [..]` array out of chart script text.
///
/// No match yields an empty curve; a matched but malformed entry is an error.
/// Values that overflow `f64` are malformed too, since JSON cannot carry them.
pub fn parse_equity_curve(script: &str) -> Result<Vec<f64>, ExtractError> {
    let Some(caps) = EQUITY_RE.captures(script) else {
        return Ok(Vec::new());
    };

    caps[1]
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ExtractError::EquityValue {
                    value: piece.to_string(),
                })
        })
        .collect()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
