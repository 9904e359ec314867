// Records persisted in the agent's memory directory

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

pub const SHARED_STATE_FILE: &str = "moltmarkets-shared-state.json";
pub const TRADER_HISTORY_FILE: &str = "trader-history.json";
pub const CREATOR_ROI_FILE: &str = "creator-roi.json";

/// Serialize a Decimal as a JSON number: integers without a fraction (`0`, `120`),
/// everything else as f64 (`0.1`).
pub fn serialize_decimal<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let normalized = decimal.normalize();
    if normalized.scale() == 0 {
        if let Some(n) = normalized.to_i64() {
            return serializer.serialize_i64(n);
        }
    }
    serializer.serialize_f64(normalized.to_f64().unwrap_or(0.0))
}

/// Market topic used to bucket trade and creation statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CryptoPrice,
    NewsEvents,
    PrMerge,
    GithubActivity,
    CabalResponse,
    PlatformMeta,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::CryptoPrice,
        Category::NewsEvents,
        Category::PrMerge,
        Category::GithubActivity,
        Category::CabalResponse,
        Category::PlatformMeta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CryptoPrice => "crypto_price",
            Category::NewsEvents => "news_events",
            Category::PrMerge => "pr_merge",
            Category::GithubActivity => "github_activity",
            Category::CabalResponse => "cabal_response",
            Category::PlatformMeta => "platform_meta",
        }
    }
}

// ---------------------------------------------------------------------------
// moltmarkets-shared-state.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedState {
    /// Live balance, copied verbatim from the API response
    pub balance: Number,
    /// ISO-8601 UTC timestamp
    pub last_updated: String,
    pub last_action: LastAction,
    pub notifications: Notifications,
    pub config: AgentConfig,
    pub recent_trades: Vec<Value>,
    pub recent_creations: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    pub agent: String,
    pub action: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub cost: Decimal,
    pub market_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notifications {
    pub dm_dylan: NotificationFlags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFlags {
    pub on_resolution: bool,
    pub on_trade: bool,
    pub on_creation: bool,
    pub on_spawn: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub trader: TraderConfig,
    pub creator: CreatorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraderMode {
    Conservative,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreatorMode {
    Careful,
    LooseCannon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderConfig {
    #[serde(serialize_with = "serialize_decimal")]
    pub edge_threshold: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub kelly_multiplier: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub max_position_pct: Decimal,
    pub mode: TraderMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorConfig {
    pub max_open_markets: u32,
    pub cooldown_minutes: u32,
    #[serde(serialize_with = "serialize_decimal")]
    pub min_balance: Decimal,
    pub mode: CreatorMode,
}

impl SharedState {
    /// Initial shared state. `balance` is replaced with the live value before writing.
    pub fn initial(last_updated: String) -> Self {
        Self {
            balance: Number::from(0),
            last_updated,
            last_action: LastAction {
                agent: "setup".to_string(),
                action: "Initial setup".to_string(),
                cost: Decimal::ZERO,
                market_ids: Vec::new(),
            },
            notifications: Notifications {
                dm_dylan: NotificationFlags::default(),
            },
            config: AgentConfig {
                trader: TraderConfig {
                    edge_threshold: dec!(0.10),
                    kelly_multiplier: dec!(1.0),
                    max_position_pct: dec!(0.30),
                    mode: TraderMode::Aggressive,
                },
                creator: CreatorConfig {
                    max_open_markets: 8,
                    cooldown_minutes: 20,
                    min_balance: dec!(50),
                    mode: CreatorMode::LooseCannon,
                },
            },
            recent_trades: Vec::new(),
            recent_creations: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// trader-history.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_trades: u32,
    pub wins: u32,
    pub losses: u32,
    pub pending: u32,
    #[serde(serialize_with = "serialize_decimal")]
    pub win_rate: Decimal,
    #[serde(rename = "totalPnL", serialize_with = "serialize_decimal")]
    pub total_pnl: Decimal,
    pub recent_loss_streak: u32,
    pub recent_win_streak: u32,
}

/// Per-category statistics, one entry for each `Category` in `Category::ALL` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatsTable {
    pub crypto_price: CategoryStats,
    pub news_events: CategoryStats,
    pub pr_merge: CategoryStats,
    pub github_activity: CategoryStats,
    pub cabal_response: CategoryStats,
    pub platform_meta: CategoryStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderHistory {
    pub trades: Vec<Value>,
    pub category_stats: CategoryStatsTable,
    pub last_trade_id: u64,
    #[serde(rename = "netPnL", serialize_with = "serialize_decimal")]
    pub net_pnl: Decimal,
}

// ---------------------------------------------------------------------------
// creator-roi.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorRoi {
    pub markets: Vec<Value>,
    #[serde(serialize_with = "serialize_decimal")]
    pub total_liquidity_seeded: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub total_fees_earned: Decimal,
    #[serde(rename = "netROI", serialize_with = "serialize_decimal")]
    pub net_roi: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub avg_volume_per_market: Decimal,
    pub zero_volume_count: u32,
}
