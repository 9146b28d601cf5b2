use async_trait::async_trait;

use crate::{
    AnalysisError, ForecastResult, History, IndicatorSnapshot, RiskSnapshot, SentimentSnapshot,
};

/// Trait for synthetic series generators
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn synthesize(&self, symbol: &str, days: u32) -> Result<History, AnalysisError>;
}

/// Trait for technical indicator engines
#[async_trait]
pub trait TechnicalAnalyzer: Send + Sync {
    async fn analyze(&self, history: &History) -> Result<IndicatorSnapshot, AnalysisError>;
}

/// Trait for ensemble price forecasters
#[async_trait]
pub trait Forecaster: Send + Sync {
    async fn forecast(
        &self,
        history: &History,
        horizon_days: u32,
    ) -> Result<ForecastResult, AnalysisError>;
}

/// Trait for portfolio risk engines
#[async_trait]
pub trait RiskAnalyzer: Send + Sync {
    async fn assess(
        &self,
        history: &History,
        forecast: &ForecastResult,
    ) -> Result<RiskSnapshot, AnalysisError>;
}

/// Trait for market-mood samplers
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn sample(&self) -> SentimentSnapshot;
}
