use analytics_core::{
    AnalysisError, ForecastResult, Forecaster, History, MarketAnalysis, QuoteSummary,
    RiskAnalyzer, SentimentSource, SeriesSource, StockUniverse, TechnicalAnalyzer,
};
use chrono::Utc;
use ensemble_forecast::EnsembleForecaster;
use market_sentiment::SentimentSampler;
use risk_metrics::RiskEngine;
use series_synthesis::SeriesSynthesizer;
use technical_signals::IndicatorEngine;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Composes the five engines into one analysis pass per symbol.
///
/// Every request gets a freshly synthesized history and forecast; nothing is
/// cached or shared between requests, so concurrent callers cannot observe
/// each other's state. Indicators, forecast, and sentiment run concurrently
/// over the immutable history; risk waits on the forecast.
pub struct AnalysisOrchestrator {
    universe: StockUniverse,
    synthesizer: SeriesSynthesizer,
    technical: IndicatorEngine,
    forecaster: EnsembleForecaster,
    risk: RiskEngine,
    sentiment: SentimentSampler,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self {
            universe: StockUniverse::builtin(),
            synthesizer: SeriesSynthesizer::new(),
            technical: IndicatorEngine::new(),
            forecaster: EnsembleForecaster::new(),
            risk: RiskEngine::new(),
            sentiment: SentimentSampler::new(),
        }
    }

    /// Swap the ensemble catalog, e.g. for a caller-tuned model table.
    pub fn with_forecaster(mut self, forecaster: EnsembleForecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    /// Symbol directory for lookup/search. Advisory only: `get_analysis`
    /// accepts symbols outside the directory as well.
    pub fn universe(&self) -> &StockUniverse {
        &self.universe
    }

    /// Full analysis with the default 90-day lookback and 30-day horizon.
    pub async fn get_analysis(&self, symbol: &str) -> Result<MarketAnalysis, AnalysisError> {
        self.get_analysis_with(symbol, DEFAULT_LOOKBACK_DAYS, DEFAULT_HORIZON_DAYS)
            .await
    }

    /// Full analysis with explicit window sizes.
    pub async fn get_analysis_with(
        &self,
        symbol: &str,
        days: u32,
        horizon_days: u32,
    ) -> Result<MarketAnalysis, AnalysisError> {
        let history = self.synthesizer.synthesize(symbol, days).await?;

        // Independent consumers of the immutable history
        let (indicators, forecast, sentiment) = tokio::join!(
            self.technical.analyze(&history),
            self.forecaster.forecast(&history, horizon_days),
            self.sentiment.sample(),
        );
        let indicators = indicators?;
        let forecast = forecast?;

        let risk = self.risk.assess(&history, &forecast).await?;
        let quote = quote_summary(&history, &forecast);

        tracing::info!(
            symbol,
            last_close = quote.last_close,
            consensus = forecast.consensus,
            "completed market analysis"
        );

        Ok(MarketAnalysis {
            symbol: symbol.to_string(),
            generated_at: Utc::now(),
            quote,
            history,
            forecast,
            indicators,
            risk,
            sentiment,
        })
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Last-close movement plus the expected move to the forecast consensus.
/// Lookback >= 1 guarantees at least two points.
fn quote_summary(history: &History, forecast: &ForecastResult) -> QuoteSummary {
    let points = history.points();
    let last_close = history.last().close;
    let previous_close = points[points.len() - 2].close;
    let change = last_close - previous_close;

    QuoteSummary {
        last_close,
        previous_close,
        change,
        percent_change: change / previous_close * 100.0,
        expected_return_pct: (forecast.consensus - last_close) / last_close * 100.0,
    }
}
