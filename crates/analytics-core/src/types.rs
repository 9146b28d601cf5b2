use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// One synthetic trading day: OHLCV plus the oscillator fields derived
/// alongside it (sma20/sma50 are randomized proxies, not true rolling means).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub sma20: f64,
    pub sma50: f64,
    pub rsi: f64,
    pub macd: f64,
}

/// Ordered daily price series for one symbol, oldest first.
///
/// Invariant: non-empty with strictly ascending dates, enforced at
/// construction. Points are immutable once the history is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<PricePoint>);

impl History {
    /// Build a history, rejecting empty input and out-of-order dates.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        if points.is_empty() {
            return Err(AnalysisError::InsufficientData(
                "history must contain at least one point".to_string(),
            ));
        }
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::InvalidParameter(format!(
                    "history dates must be strictly ascending: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Latest point. The constructor guarantees at least one exists.
    pub fn last(&self) -> &PricePoint {
        self.0.last().expect("history is never empty")
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.close).collect()
    }
}

/// A named forecasting strategy with its blending weight and declared
/// historical accuracy. Static metadata, not a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastModel {
    pub name: String,
    pub weight: f64,
    pub accuracy: f64,
}

impl ForecastModel {
    pub fn new(name: impl Into<String>, weight: f64, accuracy: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            accuracy,
        }
    }
}

/// One forecasted day with its confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub confidence: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Full ensemble forecast: the daily path, the model catalog that produced
/// it, and the consensus price at the 7-day reference horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub path: Vec<ForecastPoint>,
    pub models: Vec<ForecastModel>,
    pub consensus: f64,
    pub average_accuracy: f64,
}

/// RSI band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

/// Directional classification used by MACD, moving-average crossover, and
/// the overall sentiment bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bullish,
    Bearish,
}

/// Latest volume relative to its trailing 20-day average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeSignal {
    High,
    Low,
}

/// Point-in-time classification of the latest history point, together with
/// the numeric values the classifications were derived from. Recomputed
/// fresh on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi_value: f64,
    pub rsi_signal: RsiSignal,
    pub macd_value: f64,
    pub macd_signal: TrendSignal,
    pub sma20: f64,
    pub sma50: f64,
    pub ma_signal: TrendSignal,
    pub volume: u64,
    pub average_volume: f64,
    pub volume_signal: VolumeSignal,
}

/// Risk scalars derived from one history + forecast pair.
///
/// `max_drawdown` (percent) and `beta` are sampled placeholders within their
/// documented ranges rather than series-derived values; `risk_score` is a
/// composite gauge sampled in 30-69.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub annualized_volatility: f64,
    pub sharpe_like_ratio: f64,
    pub max_drawdown: f64,
    pub beta: f64,
    pub value_at_risk: f64,
    pub risk_score: u8,
}

/// Market-mood indicators, sampled independently of any price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub overall_bias: TrendSignal,
    pub fear_greed_index: u8,
    pub volatility_index: f64,
    pub news_sentiment: f64,
    pub social_sentiment: f64,
    pub institutional_flow: f64,
    pub analyst_rating: u8,
}

/// Last-close movement summary for the header/quote area of a consumer UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub last_close: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percent_change: f64,
    /// Expected move to the 7-day consensus, in percent of last close.
    pub expected_return_pct: f64,
}

/// Combined output of one full analysis pass for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub quote: QuoteSummary,
    pub history: History,
    pub forecast: ForecastResult,
    pub indicators: IndicatorSnapshot,
    pub risk: RiskSnapshot,
    pub sentiment: SentimentSnapshot,
}
