//! Mock market-data collaborators.
//!
//! Stands in for a real search/quote API: search filters a static catalog,
//! quotes are random. The async signatures match what a live integration
//! would expose so callers treat this as an opaque collaborator.

use std::collections::HashMap;

use futures::future::join_all;
use once_cell::sync::Lazy;
use rand::Rng;

use crate::asset::{Asset, AssetKind};
use crate::portfolio::Portfolio;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuote {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
}

static CATALOG: Lazy<Vec<Asset>> = Lazy::new(|| {
    vec![
        Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 0.0),
        Asset::new("Ethereum", "ETH", AssetKind::Crypto, 0.0),
        Asset::new("Apple Inc.", "AAPL", AssetKind::Stock, 0.0),
        Asset::new("Microsoft", "MSFT", AssetKind::Stock, 0.0),
        Asset::new("Tesla", "TSLA", AssetKind::Stock, 0.0),
        Asset::new("Google", "GOOGL", AssetKind::Stock, 0.0),
    ]
});

pub fn catalog_symbols() -> Vec<String> {
    CATALOG
        .iter()
        .map(|a| a.get_symbol().to_string())
        .collect()
}

/// Case-insensitive substring search over the asset catalog. Queries
/// shorter than two characters return nothing.
pub async fn search_assets(query: &str) -> Vec<Asset> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < 2 {
        return Vec::new();
    }
    CATALOG
        .iter()
        .filter(|asset| {
            asset.get_name().to_lowercase().contains(&query)
                || asset.get_symbol().to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Latest mock quote for a symbol.
pub async fn quote_price(symbol: &str) -> AssetQuote {
    let mut rng = rand::thread_rng();
    AssetQuote {
        symbol: symbol.to_string(),
        price: rng.gen_range(0.0..1000.0),
        change_24h: rng.gen_range(-5.0..5.0),
    }
}

/// Fetch quotes for a set of symbols concurrently.
pub async fn latest_quotes(symbols: &[String]) -> HashMap<String, AssetQuote> {
    let tasks: Vec<_> = symbols.iter().map(|s| quote_price(s)).collect();
    join_all(tasks)
        .await
        .into_iter()
        .map(|quote| (quote.symbol.clone(), quote))
        .collect()
}

/// Update every holding in a portfolio with a fresh quote.
pub async fn refresh_prices(portfolio: &mut Portfolio) {
    let symbols: Vec<String> = portfolio
        .assets
        .iter()
        .map(|a| a.get_symbol().to_string())
        .collect();
    let quotes = latest_quotes(&symbols).await;

    for asset in &mut portfolio.assets {
        if let Some(quote) = quotes.get(asset.get_symbol()) {
            asset.update_quote(quote.price, quote.change_24h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_name_and_symbol() {
        let by_name = search_assets("bit").await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].get_symbol(), "BTC");

        let by_symbol = search_assets("aapl").await;
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].get_name(), "Apple Inc.");
    }

    #[tokio::test]
    async fn test_short_queries_return_nothing() {
        assert!(search_assets("").await.is_empty());
        assert!(search_assets("b").await.is_empty());
        assert!(search_assets("  b  ").await.is_empty());
    }

    #[tokio::test]
    async fn test_quote_price_stays_in_mock_bounds() {
        let quote = quote_price("MSFT").await;
        assert_eq!(quote.symbol, "MSFT");
        assert!(quote.price >= 0.0 && quote.price < 1000.0);
        assert!(quote.change_24h >= -5.0 && quote.change_24h < 5.0);
    }

    #[tokio::test]
    async fn test_refresh_prices_touches_every_holding() {
        let mut portfolio = Portfolio::new("Test");
        portfolio.add_asset(Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 2.0));
        portfolio.add_asset(Asset::new("Tesla", "TSLA", AssetKind::Stock, 5.0));

        refresh_prices(&mut portfolio).await;

        for asset in &portfolio.assets {
            assert!(asset.get_price() > 0.0);
        }
    }
}
