use analytics_core::{
    stats, AnalysisError, ForecastResult, History, RiskAnalyzer, RiskSnapshot,
};
use async_trait::async_trait;
use rand::thread_rng;
use rand::Rng;
use statrs::statistics::Statistics;

/// Trading days per year, for annualization.
const TRADING_DAYS: f64 = 252.0;
/// One-tailed 95% normal quantile used by the VaR approximation.
const VAR_Z_95: f64 = 1.65;

/// Computes portfolio risk scalars from a history and its forecast.
pub struct RiskEngine;

impl RiskEngine {
    pub fn new() -> Self {
        Self
    }

    /// Annualized volatility as the root of the mean squared daily return.
    ///
    /// This is a root-mean-square, not a deviation around the mean return:
    /// a steady drift registers as volatility here. That is the defined
    /// contract of this engine, kept intentionally.
    pub fn annualized_volatility(returns: &[f64]) -> f64 {
        if returns.is_empty() {
            return 0.0;
        }
        let mean_square = returns.iter().map(|r| r * r).collect::<Vec<_>>().mean();
        mean_square.sqrt() * TRADING_DAYS.sqrt()
    }

    /// Derive the full risk snapshot. Needs at least two history points.
    ///
    /// `max_drawdown` and `beta` are uniform samples within their documented
    /// ranges rather than series-derived values; `value_at_risk` and the
    /// Sharpe-like ratio are deterministic in the inputs. A zero volatility
    /// (constant-price history) is rejected rather than letting the ratio
    /// become infinite or NaN.
    pub fn assess_sync(
        &self,
        history: &History,
        forecast: &ForecastResult,
    ) -> Result<RiskSnapshot, AnalysisError> {
        if history.len() < 2 {
            return Err(AnalysisError::InsufficientData(
                "need at least 2 points for risk assessment".to_string(),
            ));
        }

        let closes = history.closes();
        let returns = stats::simple_returns(&closes);
        let annualized_volatility = Self::annualized_volatility(&returns);

        let last_close = history.last().close;
        let predicted_return = (forecast.consensus - last_close) / last_close;

        if annualized_volatility == 0.0 {
            return Err(AnalysisError::DegenerateVolatility(
                "annualized volatility is zero, Sharpe-like ratio is undefined".to_string(),
            ));
        }
        let sharpe_like_ratio = predicted_return / annualized_volatility;

        let value_at_risk = last_close * annualized_volatility * VAR_Z_95;

        let mut rng = thread_rng();
        let snapshot = RiskSnapshot {
            annualized_volatility,
            sharpe_like_ratio,
            max_drawdown: rng.gen_range(5.0..25.0),
            beta: rng.gen_range(0.5..2.5),
            value_at_risk,
            risk_score: rng.gen_range(30..70),
        };

        tracing::debug!(
            volatility = annualized_volatility,
            sharpe = sharpe_like_ratio,
            "computed risk snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl RiskAnalyzer for RiskEngine {
    async fn assess(
        &self,
        history: &History,
        forecast: &ForecastResult,
    ) -> Result<RiskSnapshot, AnalysisError> {
        self.assess_sync(history, forecast)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_core::{ForecastModel, ForecastPoint, PricePoint};
    use chrono::{Duration, NaiveDate};

    fn history_from_closes(closes: &[f64]) -> History {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000_000,
                sma20: close,
                sma50: close,
                rsi: 50.0,
                macd: 0.0,
            })
            .collect();
        History::new(points).unwrap()
    }

    fn forecast_with_consensus(consensus: f64, after: NaiveDate) -> ForecastResult {
        ForecastResult {
            path: vec![ForecastPoint {
                date: after + Duration::days(1),
                price: consensus,
                confidence: 0.9,
                upper: consensus * 1.09,
                lower: consensus * 0.91,
            }],
            models: vec![ForecastModel::new("test", 1.0, 0.5)],
            consensus,
            average_accuracy: 0.5,
        }
    }

    #[test]
    fn constant_prices_yield_degenerate_volatility_error() {
        let history = history_from_closes(&[100.0, 100.0, 100.0, 100.0]);
        let forecast = forecast_with_consensus(105.0, history.last().date);
        let err = RiskEngine::new().assess_sync(&history, &forecast).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateVolatility(_)));
    }

    #[test]
    fn volatility_matches_rms_formula_on_fixed_scenario() {
        // closes 100, 102, 101, 105, 103 → returns 0.02, -1/102, 4/101, -2/105
        let closes = [100.0, 102.0, 101.0, 105.0, 103.0];
        let returns = [0.02, -1.0 / 102.0, 4.0 / 101.0, -2.0 / 105.0];
        let expected = (returns.iter().map(|r| r * r).sum::<f64>() / 4.0).sqrt() * 252.0_f64.sqrt();

        let history = history_from_closes(&closes);
        let forecast = forecast_with_consensus(104.0, history.last().date);
        let snap = RiskEngine::new().assess_sync(&history, &forecast).unwrap();

        assert!((snap.annualized_volatility - expected).abs() < 1e-9);
        assert!(snap.annualized_volatility.is_finite());
    }

    #[test]
    fn sharpe_and_var_are_deterministic_in_inputs() {
        let closes = [100.0, 102.0, 101.0, 105.0, 103.0];
        let history = history_from_closes(&closes);
        let forecast = forecast_with_consensus(110.0, history.last().date);

        let engine = RiskEngine::new();
        let a = engine.assess_sync(&history, &forecast).unwrap();
        let b = engine.assess_sync(&history, &forecast).unwrap();

        // Deterministic fields are bit-identical across calls
        assert_eq!(a.annualized_volatility, b.annualized_volatility);
        assert_eq!(a.sharpe_like_ratio, b.sharpe_like_ratio);
        assert_eq!(a.value_at_risk, b.value_at_risk);

        let predicted_return = (110.0 - 103.0) / 103.0;
        assert!((a.sharpe_like_ratio - predicted_return / a.annualized_volatility).abs() < 1e-12);
        assert!((a.value_at_risk - 103.0 * a.annualized_volatility * VAR_Z_95).abs() < 1e-9);
    }

    #[test]
    fn sampled_fields_stay_in_documented_ranges() {
        let closes = [100.0, 102.0, 101.0, 105.0, 103.0];
        let history = history_from_closes(&closes);
        let forecast = forecast_with_consensus(104.0, history.last().date);
        let engine = RiskEngine::new();

        for _ in 0..50 {
            let snap = engine.assess_sync(&history, &forecast).unwrap();
            assert!((5.0..25.0).contains(&snap.max_drawdown));
            assert!((0.5..2.5).contains(&snap.beta));
            assert!((30..70).contains(&snap.risk_score));
        }
    }

    #[test]
    fn single_point_history_is_rejected() {
        let history = history_from_closes(&[100.0]);
        let forecast = forecast_with_consensus(104.0, history.last().date);
        let err = RiskEngine::new().assess_sync(&history, &forecast).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }
}
