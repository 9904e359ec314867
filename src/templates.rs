// Default contents for every file in the memory directory

use crate::error::{SetupError, SetupResult};
use crate::models::{
    Category, CreatorRoi, SharedState, TraderHistory, CREATOR_ROI_FILE, SHARED_STATE_FILE,
    TRADER_HISTORY_FILE,
};
use serde::Serialize;
use serde_json::Number;
use std::fmt::Write as _;

pub const TRADER_LEARNINGS_FILE: &str = "trader-learnings.md";
pub const CREATOR_LEARNINGS_FILE: &str = "creator-learnings.md";
pub const TRADER_KELLY_FILE: &str = "trader-kelly.md";

/// Categories listed in the creator learnings table.
const CREATOR_TABLE_CATEGORIES: [&str; 3] = ["crypto_price", "news_events", "meta_cabal"];

/// One file to scaffold: name inside the memory directory plus its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: &'static str,
    pub contents: String,
}

/// Render a JSON record the way the memory files are stored (2-space indent).
pub fn render_json<T: Serialize>(name: &str, value: &T) -> SetupResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| SetupError::json(format!("default {}", name), e))
}

/// Build the full set of memory files: JSON records first, then Markdown documents.
///
/// `timestamp` fills `lastUpdated` and the learnings footers; `balance` is the
/// live balance from the API and only matters if the shared-state file is new.
pub fn default_memory_files(timestamp: &str, balance: Number) -> SetupResult<Vec<MemoryFile>> {
    let mut shared_state = SharedState::initial(timestamp.to_string());
    shared_state.balance = balance;

    Ok(vec![
        MemoryFile {
            name: SHARED_STATE_FILE,
            contents: render_json(SHARED_STATE_FILE, &shared_state)?,
        },
        MemoryFile {
            name: TRADER_HISTORY_FILE,
            contents: render_json(TRADER_HISTORY_FILE, &TraderHistory::default())?,
        },
        MemoryFile {
            name: CREATOR_ROI_FILE,
            contents: render_json(CREATOR_ROI_FILE, &CreatorRoi::default())?,
        },
        MemoryFile {
            name: TRADER_LEARNINGS_FILE,
            contents: trader_learnings(timestamp),
        },
        MemoryFile {
            name: CREATOR_LEARNINGS_FILE,
            contents: creator_learnings(timestamp),
        },
        MemoryFile {
            name: TRADER_KELLY_FILE,
            contents: TRADER_KELLY.to_string(),
        },
    ])
}

pub fn trader_learnings(timestamp: &str) -> String {
    let mut rows = String::new();
    for category in Category::ALL {
        let _ = writeln!(rows, "| {} | 0 | - | 0ŧ | ✅ OK |", category.as_str());
    }

    format!(
        "# Trader Learnings — MoltMarkets

## Purpose
Track patterns from wins/losses and adjust strategy accordingly.

---

## ⚠️ Categories Needing Improvement

*None yet — collecting data*

---

## 📊 Category Performance Summary

| Category | Trades | Win Rate | Total PnL | Status |
|----------|--------|----------|-----------|--------|
{rows}
---

## 📝 Lessons Learned

*Document specific lessons after each loss*

---

*Last updated: {timestamp}*
"
    )
}

pub fn creator_learnings(timestamp: &str) -> String {
    let mut rows = String::new();
    for name in CREATOR_TABLE_CATEGORIES {
        let _ = writeln!(rows, "| {} | 0 | - | - | 🆕 NEW |", name);
    }

    format!(
        "# Creator Learnings — MoltMarkets

## Purpose
Track what types of markets generate volume. Volume = fees = ROI.

---

## 📊 Category Performance Summary

| Category | Created | Avg Volume | Zero Vol % | Status |
|----------|---------|------------|------------|--------|
{rows}
---

## 🎯 What Makes Markets Tradeable

- **Stakes**: Real outcome people care about
- **Edge**: Traders think they know better than market
- **Clarity**: Obviously resolvable
- **Fun**: Entertaining to participate in

---

*Last updated: {timestamp}*
"
    )
}

pub const TRADER_KELLY: &str = "# Kelly Criterion for MoltMarkets

## Formula

kelly% = edge / odds

Where:
- edge = your_probability - market_probability
- odds = 1 / market_probability (YES) or 1 / (1 - market_probability) (NO)

## Risk Adjustments

| Condition | Kelly Multiplier |
|-----------|-----------------|
| Normal | 1.0x |
| Category loss streak 2 | 0.5x |
| Category loss streak 3+ | 0x (skip) |

## Position Limits

- Max 30% of balance per bet
- Min 10% edge to bet
- Round down bet sizes
";
