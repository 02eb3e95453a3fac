use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stock,
    Crypto,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "stock",
            AssetKind::Crypto => "crypto",
        }
    }
}

/// A single holding inside a portfolio.
///
/// `price` and `change_24h` come from the mock quote source and are not
/// part of the stored JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    name: String,
    symbol: String,
    kind: AssetKind,
    amount: f64,

    #[serde(skip)]
    price: f64,

    #[serde(skip)]
    change_24h: f64,
}

impl Asset {
    pub fn new(name: &str, symbol: &str, kind: AssetKind, amount: f64) -> Self {
        Asset {
            name: name.to_string(),
            symbol: symbol.to_string(),
            kind,
            amount,
            price: 0.0,
            change_24h: 0.0,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }

    pub fn get_kind(&self) -> AssetKind {
        self.kind
    }

    pub fn get_amount(&self) -> f64 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn get_price(&self) -> f64 {
        self.price
    }

    pub fn get_change_24h(&self) -> f64 {
        self.change_24h
    }

    pub fn update_quote(&mut self, price: f64, change_24h: f64) {
        self.price = price;
        self.change_24h = change_24h;
    }

    /// Market value of the holding at the last quoted price.
    pub fn get_balance(&self) -> f64 {
        self.price * self.amount
    }

    /// Value of the holding one day ago, derived from the 24h change.
    pub fn previous_balance(&self) -> f64 {
        let ratio = self.change_24h / 100.0;
        if (1.0 + ratio).abs() > f64::EPSILON {
            self.get_balance() / (1.0 + ratio)
        } else {
            self.get_balance()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_uses_quoted_price() {
        let mut asset = Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 1.5);
        assert_eq!(asset.get_balance(), 0.0);

        asset.update_quote(40_000.0, 2.0);
        assert_eq!(asset.get_balance(), 60_000.0);
    }

    #[test]
    fn test_previous_balance_reverses_daily_change() {
        let mut asset = Asset::new("Apple Inc.", "AAPL", AssetKind::Stock, 10.0);
        asset.update_quote(110.0, 10.0);
        assert!((asset.previous_balance() - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_field_names_are_pascal_case() {
        let json = r#"{"Name":"Tesla","Symbol":"TSLA","Kind":"stock","Amount":3.0}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.get_name(), "Tesla");
        assert_eq!(asset.get_kind(), AssetKind::Stock);
        assert_eq!(asset.get_amount(), 3.0);
        // Quote fields are transient and reset on load.
        assert_eq!(asset.get_price(), 0.0);
    }
}
