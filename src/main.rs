use std::fs::read_to_string;

use clap::{arg, Command};
use colored::Colorize;
use serde::Deserialize;
use serde::Serialize;

use crate::chart::{generate_historical_data, project_growth, GrowthRate, TimeFrame};
use crate::portfolio::Portfolio;

mod asset;
mod chart;
mod error;
mod portfolio;
mod search;
mod tui;

#[derive(Serialize, Deserialize)]
struct Config {
    portfolio_file: String,
    currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portfolio_file: String::new(),
            currency: "USD".to_string(),
        }
    }
}

fn cli() -> Command {
    Command::new("folio")
        .about("A terminal dashboard for mock investment portfolios")
        .arg_required_else_help(true)
        .subcommand(Command::new("config").about("Print the path to the config file"))
        .subcommand(
            Command::new("balances")
                .about("Show the current balances of your portfolios")
                .arg(
                    arg!(<FILE> "JSON file with your portfolios")
                        .required(false)
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("allocation")
                .about("Show the current allocation of your portfolios")
                .arg(
                    arg!(<FILE> "JSON file with your portfolios")
                        .required(false)
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("projection")
                .about("Print a projected growth series")
                .arg(
                    arg!(-t --timeframe <TIMEFRAME> "daily, weekly, monthly or yearly")
                        .required(false)
                        .default_value("monthly"),
                )
                .arg(
                    arg!(-g --growth <GROWTH> "current, optimistic or conservative")
                        .required(false)
                        .default_value("current"),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Open the interactive dashboard")
                .arg(
                    arg!(<FILE> "JSON file with your portfolios")
                        .required(false)
                        .default_value(""),
                )
                .arg(
                    arg!(--tab <TAB> "Start on a specific tab (overview, holdings, projection)")
                        .required(false),
                ),
        )
}

// Load portfolios from a file if one is configured, otherwise fall back to
// the built-in sample data, then attach mock quotes to every holding.
async fn create_live_portfolios(portfolios_str: Option<String>) -> Vec<Portfolio> {
    let mut portfolios = match portfolios_str {
        Some(data) => match portfolio::from_string(&data) {
            Ok(portfolios) => portfolios,
            Err(e) => {
                eprintln!("Error parsing portfolios: {e}");
                portfolio::sample_portfolios()
            }
        },
        None => portfolio::sample_portfolios(),
    };

    for portfolio in &mut portfolios {
        search::refresh_prices(portfolio).await;
    }
    portfolios
}

fn print_projection(time_frame: TimeFrame, growth_rate: GrowthRate) {
    use comfy_table::{
        presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table,
    };

    let historical = generate_historical_data(time_frame);
    let projected = project_growth(&historical, growth_rate, time_frame);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(48);
    table.set_header(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
    ]);

    for (i, point) in projected.iter().enumerate() {
        let marker = if i < historical.len() {
            ""
        } else {
            "projected"
        };
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(format!("{:.0}", point.value)).set_alignment(CellAlignment::Right),
            Cell::new(marker),
        ]);
    }
    println!("{table}");

    let last_historical = historical.last().map(|p| p.value).unwrap_or(0.0);
    let last_projected = projected.last().map(|p| p.value).unwrap_or(0.0);
    let gain_percent = if last_historical > 0.0 {
        (last_projected - last_historical) / last_historical * 100.0
    } else {
        0.0
    };
    let summary = format!(
        "{} scenario over {} {} periods: {:.0} ({:+.2}%)",
        growth_rate,
        time_frame.horizon(),
        time_frame,
        last_projected,
        gain_percent
    );
    if gain_percent >= 0.0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn read_portfolios_file(matches: &clap::ArgMatches, cfg: &Config) -> Option<String> {
    let mut filename = String::new();

    // try to get filename as argument
    if let Ok(Some(f)) = matches.try_get_one::<String>("FILE") {
        filename = f.to_string();
    }
    // if no argument is given, try to get filename from config
    if filename.is_empty() {
        filename.clone_from(&cfg.portfolio_file);
    }
    if filename.is_empty() {
        return None;
    }

    match read_to_string(&filename) {
        Ok(s) => Some(s),
        Err(_) => {
            eprintln!("Error reading file: {filename}");
            None
        }
    }
}

// The configured file path, if any, so the dashboard can write edits back.
fn portfolios_file_path(matches: &clap::ArgMatches, cfg: &Config) -> Option<String> {
    let mut filename = String::new();
    if let Ok(Some(f)) = matches.try_get_one::<String>("FILE") {
        filename = f.to_string();
    }
    if filename.is_empty() {
        filename.clone_from(&cfg.portfolio_file);
    }
    if filename.is_empty() {
        None
    } else {
        Some(filename)
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cfg: Config = confy::load("folio", "config")?;

    let matches = cli().get_matches();

    if matches.subcommand_matches("config").is_some() {
        println!(
            "Your config file is located here: \n{}",
            confy::get_configuration_file_path("folio", "config")?.display()
        );
    }

    if let Some(matches) = matches.subcommand_matches("projection") {
        let time_frame: TimeFrame = matches
            .get_one::<String>("timeframe")
            .map(String::as_str)
            .unwrap_or("monthly")
            .parse()?;
        let growth_rate: GrowthRate = matches
            .get_one::<String>("growth")
            .map(String::as_str)
            .unwrap_or("current")
            .parse()?;
        print_projection(time_frame, growth_rate);
    }

    for subcommand in ["balances", "allocation", "dashboard"].iter() {
        if let Some(matches) = matches.subcommand_matches(subcommand) {
            let portfolios_str = read_portfolios_file(matches, &cfg);
            let portfolios = create_live_portfolios(portfolios_str).await;

            match subcommand as &str {
                "balances" => {
                    for portfolio in &portfolios {
                        println!("{}", portfolio.name);
                        portfolio.print(true);
                    }
                }
                "allocation" => {
                    for portfolio in &portfolios {
                        println!("{}", portfolio.name);
                        portfolio.draw_pie_chart();
                        portfolio.print_allocation();
                    }
                }
                "dashboard" => {
                    let tab = matches
                        .get_one::<String>("tab")
                        .and_then(|s| tui::Tab::from_str(s));
                    let data_file_path = portfolios_file_path(matches, &cfg);
                    tui::run_tui(portfolios, cfg.currency.clone(), data_file_path, tab).await?;
                }
                _ => (),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli() {
        let matches =
            cli().get_matches_from(vec!["folio", "balances", "example_portfolios.json"]);
        assert_eq!(matches.subcommand_name(), Some("balances"));
    }

    #[test]
    fn test_cli_projection_flags() {
        let matches = cli().get_matches_from(vec![
            "folio",
            "projection",
            "--timeframe",
            "yearly",
            "--growth",
            "optimistic",
        ]);
        let sub = matches.subcommand_matches("projection").unwrap();
        assert_eq!(sub.get_one::<String>("timeframe").unwrap(), "yearly");
        assert_eq!(sub.get_one::<String>("growth").unwrap(), "optimistic");
    }

    #[tokio::test]
    async fn test_create_live_portfolios_falls_back_to_samples() {
        let portfolios = create_live_portfolios(None).await;
        assert_eq!(portfolios.len(), 2);
        for portfolio in &portfolios {
            assert!(portfolio.get_total_value() > 0.0);
        }
    }

    #[tokio::test]
    async fn test_create_live_portfolios_from_example_file() {
        let data = std::fs::read_to_string("example_portfolios.json").unwrap();
        let portfolios = create_live_portfolios(Some(data)).await;
        assert_eq!(portfolios[1].name, "Tech Stocks");
        assert!(portfolios[1].get_total_value() > 0.0);
    }
}
