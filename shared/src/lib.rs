use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod protocol;

pub use protocol::{ApiEndpoint, HttpMethod};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";

/// Builds the value of the `Authorization` header for a session token.
pub fn bearer(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

pub type EntityId = i64;

// =========================================================
// 认证 (Authentication)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// =========================================================
// 经纪商 (Brokers)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrokerStatus {
    Connected,
    Disconnected,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BrokerStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, BrokerStatus::Connected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrokerStatus::Connected => "connected",
            BrokerStatus::Disconnected => "disconnected",
            BrokerStatus::Error => "error",
            BrokerStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broker {
    pub id: EntityId,
    pub broker_name: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub last_used: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: BrokerStatus,
}

fn default_environment() -> String {
    "demo".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerInput {
    pub broker_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub additional_params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrokerList {
    #[serde(default)]
    pub brokers: Vec<Broker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConnectionTest {
    #[serde(default)]
    pub status: BrokerStatus,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 策略 (Strategies)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyInput {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StrategyList {
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToggleResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// =========================================================
// 机器学习模型 (ML Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlModel {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<MlModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUploaded {
    #[serde(default)]
    pub message: Option<String>,
    pub id: EntityId,
    #[serde(default)]
    pub model_type: Option<String>,
}

/// Input for `POST /api/models/:id/test`; `input` is forwarded to the model as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTestInput {
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    #[serde(default)]
    pub model_id: Option<String>,
    pub prediction: Value,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

// =========================================================
// 回测 (Backtests)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backtest {
    pub id: EntityId,
    #[serde(default)]
    pub strategy_id: Option<EntityId>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub initial_capital: Option<f64>,
    #[serde(default)]
    pub final_capital: Option<f64>,
    #[serde(default)]
    pub total_return: Option<f64>,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub max_drawdown: Option<f64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BacktestList {
    #[serde(default)]
    pub backtests: Vec<Backtest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub strategy_id: EntityId,
    /// ISO-8601 date, e.g. `2024-01-01`
    pub start_date: String,
    pub end_date: String,
    pub initial_capital: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BacktestMetrics {
    #[serde(default)]
    pub total_return: f64,
    #[serde(default)]
    pub sharpe_ratio: f64,
    #[serde(default)]
    pub max_drawdown: f64,
    #[serde(default)]
    pub trades: u32,
    #[serde(default)]
    pub winning_trades: u32,
    #[serde(default)]
    pub losing_trades: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    #[serde(default)]
    pub message: Option<String>,
    pub result_id: EntityId,
    #[serde(default)]
    pub results: BacktestMetrics,
}

// =========================================================
// 实盘交易 (Live Trading)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStartRequest {
    pub strategy_id: EntityId,
    pub broker_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStartResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<EntityId>,
    pub strategy_name: String,
    pub broker_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSession {
    pub id: EntityId,
    #[serde(default)]
    pub strategy_name: Option<String>,
    #[serde(default)]
    pub broker_name: Option<String>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LiveStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub sessions: Vec<LiveSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveTrade {
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LiveTradeList {
    #[serde(default)]
    pub trades: Vec<LiveTrade>,
}

// =========================================================
// 行情数据 (Market Data)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarketHistory {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub candles: Vec<Candle>,
}

// =========================================================
// 系统 (System)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub services: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogLines {
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<EntityId>,
}

/// Body the backend sends with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "message")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_broker_parses_backend_timestamps() {
        let broker: Broker = serde_json::from_value(json!({
            "id": 1,
            "broker_name": "Binance",
            "environment": "live",
            "last_used": "2024-05-01T12:30:00.123456",
            "status": "connected"
        }))
        .unwrap();
        assert!(broker.status.is_connected());
        assert!(broker.last_used.is_some());
    }

    #[test]
    fn test_unknown_broker_status_is_tolerated() {
        let broker: Broker = serde_json::from_value(json!({
            "id": 2,
            "broker_name": "IB",
            "status": "connecting"
        }))
        .unwrap();
        assert_eq!(broker.status, BrokerStatus::Unknown);
        assert_eq!(broker.environment, "demo");
    }

    #[test]
    fn test_missing_envelope_field_is_empty() {
        let list: StrategyList = serde_json::from_value(json!({})).unwrap();
        assert!(list.strategies.is_empty());
    }

    #[test]
    fn test_error_body_accepts_message_alias() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "nope" })).unwrap();
        assert_eq!(body.error, "nope");
    }
}
