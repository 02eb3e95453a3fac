use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Portfolio {
    pub name: String,
    pub assets: Vec<Asset>,
}

impl Portfolio {
    pub fn new(name: &str) -> Portfolio {
        Portfolio {
            name: name.to_string(),
            assets: Vec::new(),
        }
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    pub fn get_total_value(&self) -> f64 {
        let mut sum = 0.0;

        for asset in &self.assets {
            sum += asset.get_balance();
        }
        sum
    }

    /// Portfolio-level 24h change, derived from per-holding changes.
    pub fn change_24h_percent(&self) -> f64 {
        let current = self.get_total_value();
        let previous: f64 = self.assets.iter().map(|a| a.previous_balance()).sum();

        if previous > 0.0 {
            (current - previous) / previous * 100.0
        } else {
            0.0
        }
    }

    /// Percentage of total value held per asset class.
    pub fn get_allocation(&self) -> HashMap<String, f64> {
        let mut allocation: HashMap<String, f64> = HashMap::new();
        let total_value = self.get_total_value();
        if total_value <= 0.0 {
            return allocation;
        }

        for asset in &self.assets {
            let kind = asset.get_kind().as_str();
            let percentage = asset.get_balance() / total_value * 100.0;

            if let Some(value) = allocation.get_mut(kind) {
                *value += percentage;
            } else {
                allocation.insert(kind.to_string(), percentage);
            }
        }
        allocation
    }

    // Print the portfolio as a table
    pub fn print(&self, include_sum: bool) {
        use comfy_table::{
            presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color as TColor,
            ContentArrangement, Table,
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(100);

        table.set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Symbol").add_attribute(Attribute::Bold),
            Cell::new("Class").add_attribute(Attribute::Bold),
            Cell::new("Amount").add_attribute(Attribute::Bold),
            Cell::new("Price").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
            Cell::new("%Day").add_attribute(Attribute::Bold),
        ]);

        let mut total_value = 0.0_f64;
        let mut total_prev_value = 0.0_f64;

        for asset in &self.assets {
            let value = asset.get_balance();
            total_value += value;
            total_prev_value += asset.previous_balance();

            let kind_color = match asset.get_kind() {
                AssetKind::Crypto => TColor::DarkYellow,
                AssetKind::Stock => TColor::DarkBlue,
            };

            let day_var = asset.get_change_24h();
            let day_color = if day_var >= 0.0 {
                TColor::Green
            } else {
                TColor::Red
            };

            table.add_row(vec![
                Cell::new(asset.get_name()),
                Cell::new(asset.get_symbol()),
                Cell::new(asset.get_kind().as_str()).fg(kind_color),
                Cell::new(format!("{:.4}", asset.get_amount())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", asset.get_price())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right),
                Cell::new(format!("{day_var:.2}%"))
                    .set_alignment(CellAlignment::Right)
                    .fg(day_color),
            ]);
        }

        if include_sum {
            let total_day_var = if total_prev_value > 0.0 {
                (total_value - total_prev_value) / total_prev_value * 100.0
            } else {
                0.0
            };
            let total_color = if total_day_var >= 0.0 {
                TColor::Green
            } else {
                TColor::Red
            };
            table.add_row(vec![
                Cell::new("TOTAL").add_attribute(Attribute::Bold),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(format!("{total_value:.2}"))
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Bold),
                Cell::new(format!("{total_day_var:.2}%"))
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Bold)
                    .fg(total_color),
            ]);
        }

        println!("{table}");
    }

    // Print the allocation in descending order %-wise
    pub fn print_allocation(&self) {
        let allocation = self.get_allocation();

        let mut allocation_vec: Vec<(&String, &f64)> = allocation.iter().collect();
        allocation_vec.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

        println!("====================================");
        for (kind, percentage) in allocation_vec {
            println!("{kind: >12} | {percentage: >10.2}");
        }
    }

    pub fn draw_pie_chart(&self) {
        use piechart::{Chart, Color};

        let mut data = vec![];

        let colors = [
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::Yellow,
            Color::Cyan,
            Color::White,
            Color::Purple,
            Color::Black,
        ];

        for (i, asset) in self.assets.iter().enumerate() {
            data.push(piechart::Data {
                label: asset.get_name().to_string(),
                value: asset.get_balance() as f32,
                color: Some(colors[i % colors.len()].into()),
                fill: '•',
            });
        }

        if data.is_empty() {
            return;
        }

        Chart::new().legend(true).radius(9).aspect_ratio(3).draw(&data);
    }
}

pub fn from_string(data: &str) -> Result<Vec<Portfolio>, serde_json::Error> {
    serde_json::from_str::<Vec<Portfolio>>(data)
}

pub fn to_string_pretty(portfolios: &[Portfolio]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(portfolios)
}

/// Built-in demo data, used whenever no portfolios file is configured.
pub fn sample_portfolios() -> Vec<Portfolio> {
    let mut growth = Portfolio::new("Growth Portfolio");
    growth.add_asset(Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 1.5));
    growth.add_asset(Asset::new("Ethereum", "ETH", AssetKind::Crypto, 15.0));
    growth.add_asset(Asset::new("Apple Inc.", "AAPL", AssetKind::Stock, 50.0));

    let mut tech = Portfolio::new("Tech Stocks");
    tech.add_asset(Asset::new("Microsoft", "MSFT", AssetKind::Stock, 40.0));
    tech.add_asset(Asset::new("Google", "GOOGL", AssetKind::Stock, 25.0));

    vec![growth, tech]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted_portfolio() -> Portfolio {
        let mut portfolio = Portfolio::new("Test");
        let mut btc = Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 2.0);
        btc.update_quote(30_000.0, 10.0);
        let mut aapl = Asset::new("Apple Inc.", "AAPL", AssetKind::Stock, 100.0);
        aapl.update_quote(200.0, -2.0);
        portfolio.add_asset(btc);
        portfolio.add_asset(aapl);
        portfolio
    }

    #[test]
    fn test_total_value_sums_balances() {
        let portfolio = quoted_portfolio();
        assert_eq!(portfolio.get_total_value(), 80_000.0);
    }

    #[test]
    fn test_allocation_sums_to_one_hundred() {
        let portfolio = quoted_portfolio();
        let allocation = portfolio.get_allocation();
        let total: f64 = allocation.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(allocation["crypto"] > allocation["stock"]);
    }

    #[test]
    fn test_change_24h_percent_weights_by_balance() {
        let portfolio = quoted_portfolio();
        let previous = 60_000.0 / 1.1 + 20_000.0 / 0.98;
        let expected = (80_000.0 - previous) / previous * 100.0;
        assert!((portfolio.change_24h_percent() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_portfolio_has_no_allocation_or_change() {
        let portfolio = Portfolio::new("Empty");
        assert!(portfolio.get_allocation().is_empty());
        assert_eq!(portfolio.change_24h_percent(), 0.0);
    }

    #[test]
    fn test_load_example_portfolios_file() {
        let data = std::fs::read_to_string("example_portfolios.json").unwrap();
        let portfolios = from_string(&data).unwrap();
        assert_eq!(portfolios.len(), 2);
        assert_eq!(portfolios[0].name, "Growth Portfolio");
        assert_eq!(portfolios[0].assets.len(), 3);
    }

    #[test]
    fn test_portfolios_round_trip_through_json() {
        let portfolios = sample_portfolios();
        let json = to_string_pretty(&portfolios).unwrap();
        let reloaded = from_string(&json).unwrap();
        assert_eq!(reloaded.len(), portfolios.len());
        assert_eq!(reloaded[1].assets[0].get_symbol(), "MSFT");
    }
}
