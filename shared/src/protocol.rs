use crate::{
    BacktestConfig, BacktestList, BacktestRun, Backtest, BrokerInput, BrokerList, ConnectionTest,
    Credentials, EntityId, LiveStartRequest, LiveStartResponse, LiveStatus, LiveTradeList,
    LogLines, LoginResponse, MarketHistory, MarketQuote, MessageResponse, ModelList,
    ModelPrediction, ModelTestInput, Strategy, StrategyInput, StrategyList, SystemStatus,
    ToggleResult, User,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// For `POST`/`PUT` the endpoint value itself is serialized as the JSON body, so path
/// parameters are marked `#[serde(skip)]`.
pub trait ApiEndpoint: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the API base URL.
    fn path(&self) -> String;
    /// Query string parameters; `None` values are omitted.
    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }
}

pub const MODEL_UPLOAD_PATH: &str = "/api/models/upload";
pub const SYSTEM_IMPORT_PATH: &str = "/api/system/import";

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

macro_rules! by_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub struct $name {
            #[serde(skip)]
            pub id: EntityId,
        }

        impl $name {
            pub fn new(id: EntityId) -> Self {
                Self { id }
            }
        }
    };
}

// =========================================================
// Health & Auth
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthCheck;

impl ApiEndpoint for HealthCheck {
    type Response = SystemStatus;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/health".to_string()
    }
}

impl ApiEndpoint for Credentials {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

/// "Who am I": validates the stored token.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrentUser;

impl ApiEndpoint for CurrentUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/auth/me".to_string()
    }
}

// =========================================================
// Brokers
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListBrokers;

impl ApiEndpoint for ListBrokers {
    type Response = BrokerList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/brokers".to_string()
    }
}

impl ApiEndpoint for BrokerInput {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/brokers".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBroker {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub input: BrokerInput,
}

impl ApiEndpoint for UpdateBroker {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/brokers/{}", self.id)
    }
}

by_id!(DeleteBroker);

impl ApiEndpoint for DeleteBroker {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/brokers/{}", self.id)
    }
}

by_id!(
    /// Asks the backend to probe a broker connection.
    TestBroker
);

impl ApiEndpoint for TestBroker {
    type Response = ConnectionTest;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/brokers/{}/test", self.id)
    }
}

// =========================================================
// Strategies
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListStrategies;

impl ApiEndpoint for ListStrategies {
    type Response = StrategyList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/strategies".to_string()
    }
}

by_id!(GetStrategy);

impl ApiEndpoint for GetStrategy {
    type Response = Strategy;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/strategies/{}", self.id)
    }
}

impl ApiEndpoint for StrategyInput {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/strategies".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStrategy {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub input: StrategyInput,
}

impl ApiEndpoint for UpdateStrategy {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/strategies/{}", self.id)
    }
}

by_id!(DeleteStrategy);

impl ApiEndpoint for DeleteStrategy {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/strategies/{}", self.id)
    }
}

by_id!(
    /// Flips a strategy between enabled and disabled.
    ToggleStrategy
);

impl ApiEndpoint for ToggleStrategy {
    type Response = ToggleResult;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/strategies/{}/toggle", self.id)
    }
}

// =========================================================
// ML Models
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListModels;

impl ApiEndpoint for ListModels {
    type Response = ModelList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/models".to_string()
    }
}

by_id!(DeleteModel);

impl ApiEndpoint for DeleteModel {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/models/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestModel {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub input: ModelTestInput,
}

impl ApiEndpoint for TestModel {
    type Response = ModelPrediction;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/models/{}/test", self.id)
    }
}

// =========================================================
// Backtests
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListBacktests;

impl ApiEndpoint for ListBacktests {
    type Response = BacktestList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/backtests".to_string()
    }
}

by_id!(GetBacktest);

impl ApiEndpoint for GetBacktest {
    type Response = Backtest;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/backtests/{}", self.id)
    }
}

impl ApiEndpoint for BacktestConfig {
    type Response = BacktestRun;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/backtest".to_string()
    }
}

by_id!(DeleteBacktest);

impl ApiEndpoint for DeleteBacktest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/backtests/{}", self.id)
    }
}

// =========================================================
// Live Trading
// =========================================================

impl ApiEndpoint for LiveStartRequest {
    type Response = LiveStartResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/live/start".to_string()
    }
}

by_id!(StopLive);

impl ApiEndpoint for StopLive {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/live/{}/stop", self.id)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GetLiveStatus;

impl ApiEndpoint for GetLiveStatus {
    type Response = LiveStatus;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/live/status".to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListLiveTrades;

impl ApiEndpoint for ListLiveTrades {
    type Response = LiveTradeList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/live/trades".to_string()
    }
}

// =========================================================
// Market Data
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMarketData {
    #[serde(skip)]
    pub symbol: String,
}

impl ApiEndpoint for GetMarketData {
    type Response = MarketQuote;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/market-data/{}", segment(&self.symbol))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct GetMarketHistory {
    #[serde(skip)]
    pub symbol: String,
    pub timeframe: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ApiEndpoint for GetMarketHistory {
    type Response = MarketHistory;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/market-data/{}/history", segment(&self.symbol))
    }
    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("timeframe", self.timeframe.clone()),
            ("start", self.start.clone()),
            ("end", self.end.clone()),
        ]
    }
}

// =========================================================
// System
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GetSystemStatus;

impl ApiEndpoint for GetSystemStatus {
    type Response = SystemStatus;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/system/status".to_string()
    }
}

pub const DEFAULT_LOG_LINES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetLogs {
    pub service: Option<String>,
    pub lines: u32,
}

impl Default for GetLogs {
    fn default() -> Self {
        Self {
            service: None,
            lines: DEFAULT_LOG_LINES,
        }
    }
}

impl ApiEndpoint for GetLogs {
    type Response = LogLines;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/system/logs".to_string()
    }
    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("service", self.service.clone()),
            ("lines", Some(self.lines.to_string())),
        ]
    }
}

/// Full data export. The dump format belongs to the backend, so it stays untyped.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExportData;

impl ApiEndpoint for ExportData {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/system/export".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_params_are_not_serialized() {
        let req = UpdateBroker {
            id: 7,
            input: BrokerInput {
                broker_name: "binance".to_string(),
                api_key: "k".to_string(),
                api_secret: "s".to_string(),
                environment: "demo".to_string(),
                additional_params: json!({}),
            },
        };
        assert_eq!(req.path(), "/api/brokers/7");
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["broker_name"], "binance");
    }

    #[test]
    fn test_symbol_is_percent_encoded() {
        let req = GetMarketData {
            symbol: "EUR/USD".to_string(),
        };
        assert_eq!(req.path(), "/api/market-data/EUR%2FUSD");
    }

    #[test]
    fn test_logs_query_defaults() {
        let query = GetLogs::default().query();
        assert_eq!(query[0], ("service", None));
        assert_eq!(query[1], ("lines", Some("100".to_string())));
    }

    #[test]
    fn test_toggle_body_is_empty_object() {
        let body = serde_json::to_value(ToggleStrategy::new(3)).unwrap();
        assert_eq!(body, json!({}));
    }
}
