use analytics_core::{SentimentSnapshot, SentimentSource, TrendSignal};
use async_trait::async_trait;
use rand::thread_rng;
use rand::Rng;

/// Institutional flow is drawn from roughly +/- half a billion.
const FLOW_SCALE: f64 = 1_000_000_000.0;

/// Stateless market-mood sampler.
///
/// Every call is an independent draw from a thread-local generator; nothing
/// is conditioned on price history and nothing persists between calls.
pub struct SentimentSampler;

impl SentimentSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn sample_sync(&self) -> SentimentSnapshot {
        let mut rng = thread_rng();
        SentimentSnapshot {
            overall_bias: if rng.gen_bool(0.5) {
                TrendSignal::Bullish
            } else {
                TrendSignal::Bearish
            },
            fear_greed_index: rng.gen_range(0..100),
            volatility_index: rng.gen_range(10.0..50.0),
            news_sentiment: rng.gen_range(0.0..1.0),
            social_sentiment: rng.gen_range(0.0..1.0),
            institutional_flow: rng.gen_range(-0.5..0.5) * FLOW_SCALE,
            analyst_rating: rng.gen_range(0..100),
        }
    }
}

#[async_trait]
impl SentimentSource for SentimentSampler {
    async fn sample(&self) -> SentimentSnapshot {
        self.sample_sync()
    }
}

impl Default for SentimentSampler {
    fn default() -> Self {
        Self::new()
    }
}
