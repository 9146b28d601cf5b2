use analytics_core::{AnalysisError, History, PricePoint, SeriesSource};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::thread_rng;
use rand::Rng;

/// Generates synthetic daily OHLCV histories via a bounded random walk.
///
/// Each call draws fresh per-series parameters (seed price, volatility
/// coefficient) from a thread-local generator, so successive calls yield
/// statistically independent series of the same shape. The symbol does not
/// influence the walk; it is carried for the caller only.
pub struct SeriesSynthesizer;

impl SeriesSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Produce `days + 1` points ending today, oldest first.
    ///
    /// The sma20/sma50 fields are jittered proxies of the close rather than
    /// true rolling means, and rsi/macd are uniform draws within their
    /// conventional ranges. The OHLC envelope invariant
    /// (high >= max(open, close), low <= min(open, close)) always holds.
    pub fn synthesize_sync(&self, symbol: &str, days: u32) -> Result<History, AnalysisError> {
        if days == 0 {
            return Err(AnalysisError::InvalidParameter(
                "days must be a positive integer".to_string(),
            ));
        }

        let mut rng = thread_rng();
        let mut price: f64 = rng.gen_range(50.0..250.0);
        let volatility: f64 = rng.gen_range(0.02..0.07);

        let today = Utc::now().date_naive();
        let mut points = Vec::with_capacity(days as usize + 1);

        for offset in (0..=days).rev() {
            let date = today - Duration::days(offset as i64);

            let change = rng.gen_range(-0.5..0.5) * price * volatility;
            price = (price + change).max(1.0);

            let open = price * (1.0 + rng.gen_range(-0.5..0.5) * 0.01);
            let mut high = price * (1.0 + rng.gen_range(0.0..0.03));
            let mut low = price * (1.0 - rng.gen_range(0.0..0.03));
            // Open jitter can escape the raw high/low band; repair the envelope.
            high = high.max(open).max(price);
            low = low.min(open).min(price);

            points.push(PricePoint {
                date,
                open,
                high,
                low,
                close: price,
                volume: rng.gen_range(1_000_000..11_000_000),
                sma20: price * (1.0 + rng.gen_range(-0.5..0.5) * 0.02),
                sma50: price * (1.0 + rng.gen_range(-0.5..0.5) * 0.03),
                rsi: rng.gen_range(0.0..100.0),
                macd: rng.gen_range(-0.5..0.5) * 5.0,
            });
        }

        tracing::debug!(symbol, points = points.len(), "synthesized price history");
        History::new(points)
    }
}

#[async_trait]
impl SeriesSource for SeriesSynthesizer {
    async fn synthesize(&self, symbol: &str, days: u32) -> Result<History, AnalysisError> {
        self.synthesize_sync(symbol, days)
    }
}

impl Default for SeriesSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
