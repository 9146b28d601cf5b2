use analytics_core::{
    default_model_catalog, AnalysisError, ForecastModel, ForecastPoint, ForecastResult, Forecaster,
    History,
};
use async_trait::async_trait;
use chrono::Duration;
use rand::thread_rng;
use rand::Rng;
use rayon::prelude::*;

/// Reference horizon (days) for the consensus price.
const CONSENSUS_DAY: u32 = 7;
/// Confidence decays linearly per day from this starting level...
const CONFIDENCE_START: f64 = 0.9;
const CONFIDENCE_DECAY: f64 = 0.02;
/// ...down to this floor.
const CONFIDENCE_FLOOR: f64 = 0.3;

/// Weighted-ensemble price forecaster.
///
/// Each catalog model independently samples a target price whose spread
/// grows with sqrt(horizon), and pulls the blended estimate toward it in
/// proportion to its weight. Weights are deliberately not normalized: the
/// blend is a sum of weighted pulls from the base price, not a weighted
/// average, so catalogs whose weights do not sum to 1 scale the total pull
/// accordingly. The path itself is a stochastic simulation; only the
/// ensemble structure (names, weights, accuracies) is static.
pub struct EnsembleForecaster {
    models: Vec<ForecastModel>,
}

impl EnsembleForecaster {
    /// Forecaster over the built-in model catalog.
    pub fn new() -> Self {
        Self {
            models: default_model_catalog(),
        }
    }

    /// Forecaster over a caller-supplied catalog. Emptiness is checked at
    /// forecast time so construction stays infallible.
    pub fn with_models(models: Vec<ForecastModel>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[ForecastModel] {
        &self.models
    }

    /// Produce a `horizon_days`-long forward path from the last close.
    ///
    /// Days are sampled independently given the base price, so the loop is
    /// parallel; each task draws from its own thread-local generator.
    pub fn forecast_sync(
        &self,
        history: &History,
        horizon_days: u32,
    ) -> Result<ForecastResult, AnalysisError> {
        if self.models.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "forecast model catalog must not be empty".to_string(),
            ));
        }
        if horizon_days == 0 {
            return Err(AnalysisError::InvalidParameter(
                "horizon_days must be a positive integer".to_string(),
            ));
        }

        let base_price = history.last().close;
        let last_date = history.last().date;

        let path: Vec<ForecastPoint> = (1..=horizon_days)
            .into_par_iter()
            .map(|day| {
                let mut rng = thread_rng();
                let spread = 0.1 * (day as f64).sqrt();

                let mut price = base_price;
                for model in &self.models {
                    let target = base_price * (1.0 + rng.gen_range(-0.5..0.5) * spread);
                    price += (target - base_price) * model.weight;
                }

                let confidence =
                    (CONFIDENCE_START - CONFIDENCE_DECAY * day as f64).max(CONFIDENCE_FLOOR);

                ForecastPoint {
                    date: last_date + Duration::days(day as i64),
                    price,
                    confidence,
                    upper: price * (1.0 + confidence * 0.1),
                    lower: price * (1.0 - confidence * 0.1),
                }
            })
            .collect();

        let consensus_idx = (CONSENSUS_DAY.min(horizon_days) - 1) as usize;
        let consensus = path[consensus_idx].price;
        let average_accuracy =
            self.models.iter().map(|m| m.accuracy).sum::<f64>() / self.models.len() as f64;

        tracing::debug!(
            horizon_days,
            consensus,
            models = self.models.len(),
            "generated ensemble forecast"
        );

        Ok(ForecastResult {
            path,
            models: self.models.clone(),
            consensus,
            average_accuracy,
        })
    }
}

#[async_trait]
impl Forecaster for EnsembleForecaster {
    async fn forecast(
        &self,
        history: &History,
        horizon_days: u32,
    ) -> Result<ForecastResult, AnalysisError> {
        self.forecast_sync(history, horizon_days)
    }
}

impl Default for EnsembleForecaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_core::PricePoint;
    use chrono::NaiveDate;

    fn flat_history(len: usize, close: f64) -> History {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let points = (0..len)
            .map(|i| PricePoint {
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

    #[test]
    fn path_has_requested_length_and_future_dates() {
        let history = flat_history(10, 100.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 30).unwrap();
        assert_eq!(result.path.len(), 30);

        let last_date = history.last().date;
        for (i, point) in result.path.iter().enumerate() {
            assert_eq!(point.date, last_date + Duration::days(i as i64 + 1));
        }
    }

    #[test]
    fn confidence_is_non_increasing_with_floor() {
        let history = flat_history(5, 100.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 60).unwrap();
        for pair in result.path.windows(2) {
            assert!(pair[1].confidence <= pair[0].confidence);
        }
        for point in &result.path {
            assert!(point.confidence >= CONFIDENCE_FLOOR);
            assert!(point.confidence <= CONFIDENCE_START);
        }
        // Far horizon hits the floor exactly
        assert_eq!(result.path.last().unwrap().confidence, CONFIDENCE_FLOOR);
    }

    #[test]
    fn bounds_bracket_the_price() {
        let history = flat_history(5, 100.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 30).unwrap();
        for point in &result.path {
            assert!(point.upper >= point.price, "upper below price: {point:?}");
            assert!(point.lower <= point.price, "lower above price: {point:?}");
            assert!(point.price > 0.0);
        }
    }

    #[test]
    fn consensus_is_day_seven_price() {
        let history = flat_history(5, 100.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 30).unwrap();
        assert_eq!(result.consensus, result.path[6].price);
    }

    #[test]
    fn consensus_falls_back_to_last_day_for_short_horizons() {
        let history = flat_history(5, 100.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 3).unwrap();
        assert_eq!(result.consensus, result.path[2].price);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let history = flat_history(5, 100.0);
        let err = EnsembleForecaster::with_models(vec![])
            .forecast_sync(&history, 30)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let history = flat_history(5, 100.0);
        let err = EnsembleForecaster::new().forecast_sync(&history, 0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));
    }

    #[test]
    fn sampled_prices_stay_within_model_spread() {
        // With the default catalog (weights sum to 1) the blended day-i price
        // is bounded by base * (1 ± 0.5 * 0.1 * sqrt(i)).
        let history = flat_history(5, 200.0);
        let result = EnsembleForecaster::new().forecast_sync(&history, 30).unwrap();
        for (i, point) in result.path.iter().enumerate() {
            let spread = 0.5 * 0.1 * ((i + 1) as f64).sqrt();
            assert!(point.price <= 200.0 * (1.0 + spread) + 1e-9);
            assert!(point.price >= 200.0 * (1.0 - spread) - 1e-9);
        }
    }

    #[test]
    fn average_accuracy_matches_catalog_mean() {
        let history = flat_history(5, 100.0);
        let models = vec![
            ForecastModel::new("a", 0.5, 0.6),
            ForecastModel::new("b", 0.5, 0.8),
        ];
        let result = EnsembleForecaster::with_models(models)
            .forecast_sync(&history, 10)
            .unwrap();
        assert!((result.average_accuracy - 0.7).abs() < 1e-12);
        assert_eq!(result.models.len(), 2);
    }
}
