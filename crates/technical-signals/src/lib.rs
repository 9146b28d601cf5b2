use analytics_core::{
    stats, AnalysisError, History, IndicatorSnapshot, RsiSignal, TechnicalAnalyzer, TrendSignal,
    VolumeSignal,
};
use async_trait::async_trait;


const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const VOLUME_LOOKBACK: usize = 20;

/// Classifies the latest history point into technical signals.
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Pure function of the last `VOLUME_LOOKBACK` points (or all available
    /// if fewer). Needs at least two points and fails fast below that
    /// rather than propagating NaN.
    pub fn analyze_sync(&self, history: &History) -> Result<IndicatorSnapshot, AnalysisError> {
        if history.len() < 2 {
            return Err(AnalysisError::InsufficientData(
                "need at least 2 points for indicator analysis".to_string(),
            ));
        }

        let points = history.points();
        let latest = history.last();

        let rsi_signal = if latest.rsi > RSI_OVERBOUGHT {
            RsiSignal::Overbought
        } else if latest.rsi < RSI_OVERSOLD {
            RsiSignal::Oversold
        } else {
            RsiSignal::Neutral
        };

        let macd_signal = if latest.macd > 0.0 {
            TrendSignal::Bullish
        } else {
            TrendSignal::Bearish
        };

        let ma_signal = if latest.sma20 > latest.sma50 {
            TrendSignal::Bullish
        } else {
            TrendSignal::Bearish
        };

        let tail = &points[points.len().saturating_sub(VOLUME_LOOKBACK)..];
        let volumes: Vec<f64> = tail.iter().map(|p| p.volume as f64).collect();
        let average_volume = stats::mean(&volumes);
        let volume_signal = if latest.volume as f64 > average_volume {
            VolumeSignal::High
        } else {
            VolumeSignal::Low
        };

        Ok(IndicatorSnapshot {
            rsi_value: latest.rsi,
            rsi_signal,
            macd_value: latest.macd,
            macd_signal,
            sma20: latest.sma20,
            sma50: latest.sma50,
            ma_signal,
            volume: latest.volume,
            average_volume,
            volume_signal,
        })
    }
}

#[async_trait]
impl TechnicalAnalyzer for IndicatorEngine {
    async fn analyze(&self, history: &History) -> Result<IndicatorSnapshot, AnalysisError> {
        self.analyze_sync(history)
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
