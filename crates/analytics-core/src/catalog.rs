use serde::{Deserialize, Serialize};

use crate::ForecastModel;

/// Default ensemble catalog. The names are labels for fixed weights and
/// declared accuracies, not live models; substituting real models later only
/// requires swapping this table.
pub fn default_model_catalog() -> Vec<ForecastModel> {
    vec![
        ForecastModel::new("LSTM Neural Network", 0.35, 0.78),
        ForecastModel::new("Random Forest", 0.25, 0.72),
        ForecastModel::new("Technical Analysis", 0.20, 0.68),
        ForecastModel::new("Sentiment Analysis", 0.20, 0.65),
    ]
}

/// One entry in the built-in symbol directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

impl StockListing {
    fn new(symbol: &str, name: &str, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        }
    }
}

/// Static symbol directory used for lookup and search in consumer UIs.
///
/// Membership is advisory: analysis accepts any free-form symbol, known or
/// not, and the synthesized series does not depend on it.
#[derive(Debug, Clone)]
pub struct StockUniverse {
    listings: Vec<StockListing>,
}

impl StockUniverse {
    pub fn builtin() -> Self {
        Self {
            listings: vec![
                StockListing::new("AAPL", "Apple Inc.", "Technology"),
                StockListing::new("GOOGL", "Alphabet Inc.", "Technology"),
                StockListing::new("MSFT", "Microsoft Corp.", "Technology"),
                StockListing::new("TSLA", "Tesla Inc.", "Automotive"),
                StockListing::new("AMZN", "Amazon.com Inc.", "E-commerce"),
                StockListing::new("NVDA", "NVIDIA Corp.", "Semiconductors"),
                StockListing::new("META", "Meta Platforms", "Social Media"),
                StockListing::new("NFLX", "Netflix Inc.", "Entertainment"),
            ],
        }
    }

    pub fn listings(&self) -> &[StockListing] {
        &self.listings
    }

    /// Exact symbol lookup, case-insensitive.
    pub fn get(&self, symbol: &str) -> Option<&StockListing> {
        self.listings
            .iter()
            .find(|l| l.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Case-insensitive substring match against symbol or company name.
    pub fn search(&self, query: &str) -> Vec<&StockListing> {
        let q = query.to_lowercase();
        self.listings
            .iter()
            .filter(|l| {
                l.symbol.to_lowercase().contains(&q) || l.name.to_lowercase().contains(&q)
            })
            .collect()
    }
}
