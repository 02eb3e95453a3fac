use crate::asset::Asset;
use crate::chart::{
    generate_historical_data, project_growth, ChartDataPoint, GrowthRate, TimeFrame,
};
use crate::error::ValidationError;
use crate::portfolio::{self, Portfolio};
use crate::search::{self, AssetQuote};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, List, ListItem,
        Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tui_big_text::{BigText, PixelSize};

fn format_currency(value: f64, currency: &str) -> String {
    let formatted_number = format_with_commas(value);
    match currency {
        "USD" | "CAD" | "AUD" => format!("${formatted_number}"),
        "EUR" => format!("{formatted_number} €"),
        "GBP" => format!("£{formatted_number}"),
        _ => format!("{formatted_number} {currency}"),
    }
}

fn format_with_commas(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let parts: Vec<&str> = formatted.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    let formatted_integer = integer_part
        .chars()
        .rev()
        .collect::<String>()
        .chars()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect::<String>();

    format!("{formatted_integer}.{decimal_part}")
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else if amount >= 1.0 {
        format!("{amount:.2}")
    } else if amount >= 0.01 {
        format!("{amount:.4}")
    } else {
        format!("{amount:.8}")
    }
}

/// Symbols the background refresher should quote: the whole catalog plus
/// every symbol currently held, so file-loaded holdings outside the
/// catalog still get updates.
fn refresh_symbols(portfolios: &[Portfolio]) -> Vec<String> {
    let mut symbols = search::catalog_symbols();
    for portfolio in portfolios {
        for asset in &portfolio.assets {
            if !symbols.iter().any(|s| s == asset.get_symbol()) {
                symbols.push(asset.get_symbol().to_string());
            }
        }
    }
    symbols
}

/// Parse and validate an amount typed into a form.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AmountRequired);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Overview,
    Holdings,
    Projection,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Holdings => "Holdings",
            Tab::Projection => "Projection",
        }
    }

    fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Holdings, Tab::Projection]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overview" => Some(Tab::Overview),
            "holdings" => Some(Tab::Holdings),
            "projection" => Some(Tab::Projection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    /// Editing the amount of an existing holding.
    EditAmount,
    /// Typing a query into the add-holding search box.
    SearchAsset,
    /// Entering the amount for a holding picked from search results.
    NewHoldingAmount,
    /// Entering the name of a new portfolio.
    NewPortfolio,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

pub struct App {
    pub current_tab: Tab,
    pub portfolios: Vec<Portfolio>,
    pub selected_portfolio: usize,
    pub selected_asset: usize,
    pub should_quit: bool,
    pub currency: String,
    pub mode: AppMode,
    pub edit_input: String,
    pub search_input: String,
    pub search_results: Vec<Asset>,
    pub selected_result: usize,
    pub pending_asset: Option<Asset>,
    pub error_message: Option<String>,
    pub time_frame: TimeFrame,
    pub growth_rate: GrowthRate,
    pub historical: Vec<ChartDataPoint>,
    pub projected: Vec<ChartDataPoint>,
    pub previous_prices: HashMap<String, f64>,
    pub trends: HashMap<String, Trend>,
    pub last_update: Instant,
    pub flash_state: bool,
    pub data_file_path: Option<String>,
    pub quote_receiver: Option<mpsc::UnboundedReceiver<HashMap<String, AssetQuote>>>,
}

impl App {
    pub fn new(portfolios: Vec<Portfolio>, currency: String, data_file_path: Option<String>) -> App {
        let time_frame = TimeFrame::Monthly;
        let growth_rate = GrowthRate::Current;
        let historical = generate_historical_data(time_frame);
        let projected = project_growth(&historical, growth_rate, time_frame);

        App {
            current_tab: Tab::Overview,
            portfolios,
            selected_portfolio: 0,
            selected_asset: 0,
            should_quit: false,
            currency,
            mode: AppMode::Normal,
            edit_input: String::new(),
            search_input: String::new(),
            search_results: Vec::new(),
            selected_result: 0,
            pending_asset: None,
            error_message: None,
            time_frame,
            growth_rate,
            historical,
            projected,
            previous_prices: HashMap::new(),
            trends: HashMap::new(),
            last_update: Instant::now(),
            flash_state: false,
            data_file_path,
            quote_receiver: None,
        }
    }

    pub fn set_quote_receiver(
        &mut self,
        receiver: mpsc::UnboundedReceiver<HashMap<String, AssetQuote>>,
    ) {
        self.quote_receiver = Some(receiver);
    }

    pub fn selected(&self) -> Option<&Portfolio> {
        self.portfolios.get(self.selected_portfolio)
    }

    /// Re-run the projection. Called synchronously whenever the time frame
    /// or growth scenario changes.
    pub fn refresh_projection(&mut self) {
        self.historical = generate_historical_data(self.time_frame);
        self.projected = project_growth(&self.historical, self.growth_rate, self.time_frame);
    }

    pub fn set_time_frame(&mut self, time_frame: TimeFrame) {
        if self.time_frame != time_frame {
            self.time_frame = time_frame;
            self.refresh_projection();
        }
    }

    pub fn cycle_time_frame(&mut self) {
        let frames = TimeFrame::all();
        let current = frames
            .iter()
            .position(|&t| t == self.time_frame)
            .unwrap_or(0);
        self.set_time_frame(frames[(current + 1) % frames.len()]);
    }

    pub fn cycle_growth_rate(&mut self) {
        let rates = GrowthRate::all();
        let current = rates
            .iter()
            .position(|&r| r == self.growth_rate)
            .unwrap_or(0);
        self.growth_rate = rates[(current + 1) % rates.len()];
        // The historical series is independent of the scenario; only the
        // tail needs recomputing.
        self.projected = project_growth(&self.historical, self.growth_rate, self.time_frame);
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_index = tabs
            .iter()
            .position(|&t| t == self.current_tab)
            .unwrap_or(0);
        self.current_tab = tabs[(current_index + 1) % tabs.len()];
    }

    pub fn previous_tab(&mut self) {
        let tabs = Tab::all();
        let current_index = tabs
            .iter()
            .position(|&t| t == self.current_tab)
            .unwrap_or(0);
        self.current_tab = tabs[(current_index + tabs.len() - 1) % tabs.len()];
    }

    pub fn next_portfolio(&mut self) {
        if !self.portfolios.is_empty() {
            self.selected_portfolio = (self.selected_portfolio + 1) % self.portfolios.len();
            self.selected_asset = 0;
        }
    }

    pub fn select_next(&mut self) {
        if let Some(portfolio) = self.selected() {
            if self.selected_asset < portfolio.assets.len().saturating_sub(1) {
                self.selected_asset += 1;
            }
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_asset > 0 {
            self.selected_asset -= 1;
        }
    }

    pub fn try_receive_quote_update(&mut self) -> bool {
        if let Some(receiver) = &mut self.quote_receiver {
            if let Ok(quotes) = receiver.try_recv() {
                self.apply_quotes(&quotes);
                return true;
            }
        }
        false
    }

    pub fn apply_quotes(&mut self, quotes: &HashMap<String, AssetQuote>) {
        self.update_trends(quotes);
        for portfolio in &mut self.portfolios {
            for asset in &mut portfolio.assets {
                if let Some(quote) = quotes.get(asset.get_symbol()) {
                    asset.update_quote(quote.price, quote.change_24h);
                }
            }
        }
        self.mark_refreshed();
    }

    fn update_trends(&mut self, quotes: &HashMap<String, AssetQuote>) {
        for quote in quotes.values() {
            if let Some(&previous) = self.previous_prices.get(&quote.symbol) {
                // Small threshold to avoid noise from tiny changes
                let threshold = 0.01;
                let trend = if quote.price > previous + threshold {
                    Trend::Up
                } else if quote.price < previous - threshold {
                    Trend::Down
                } else {
                    self.trends
                        .get(&quote.symbol)
                        .copied()
                        .unwrap_or(Trend::Neutral)
                };
                self.trends.insert(quote.symbol.clone(), trend);
            } else {
                self.trends.insert(quote.symbol.clone(), Trend::Neutral);
            }

            self.previous_prices
                .insert(quote.symbol.clone(), quote.price);
        }
    }

    pub fn mark_refreshed(&mut self) {
        self.last_update = Instant::now();
        self.flash_state = !self.flash_state;
    }

    pub fn get_trend_color(&self, symbol: &str, base_color: Color) -> Color {
        match self.trends.get(symbol) {
            Some(Trend::Up) => {
                if self.flash_state {
                    Color::LightGreen
                } else {
                    Color::Green
                }
            }
            Some(Trend::Down) => {
                if self.flash_state {
                    Color::LightRed
                } else {
                    Color::Red
                }
            }
            _ => base_color,
        }
    }

    pub fn enter_edit_mode(&mut self) {
        if let Some(portfolio) = self.selected() {
            if self.selected_asset < portfolio.assets.len() {
                let amount = portfolio.assets[self.selected_asset].get_amount();
                self.edit_input = if amount.fract() == 0.0 {
                    format!("{}", amount as i64)
                } else {
                    format!("{amount}")
                };
                self.mode = AppMode::EditAmount;
            }
        }
    }

    pub fn enter_search_mode(&mut self) {
        self.search_input.clear();
        self.search_results.clear();
        self.selected_result = 0;
        self.mode = AppMode::SearchAsset;
    }

    /// Store search results, dropping symbols the selected portfolio
    /// already holds.
    pub fn set_search_results(&mut self, results: Vec<Asset>) {
        let held: Vec<String> = self
            .selected()
            .map(|p| {
                p.assets
                    .iter()
                    .map(|a| a.get_symbol().to_string())
                    .collect()
            })
            .unwrap_or_default();

        self.search_results = results
            .into_iter()
            .filter(|a| !held.iter().any(|h| h == a.get_symbol()))
            .collect();
        self.selected_result = 0;
    }

    pub fn enter_new_portfolio_mode(&mut self) {
        self.edit_input.clear();
        self.mode = AppMode::NewPortfolio;
    }

    pub fn exit_input_mode(&mut self) {
        self.mode = AppMode::Normal;
        self.edit_input.clear();
        self.search_input.clear();
        self.search_results.clear();
        self.pending_asset = None;
    }

    pub fn save_edit(&mut self) -> Result<(), String> {
        let new_amount = parse_amount(&self.edit_input).map_err(|e| e.to_string())?;

        let Some(portfolio) = self.portfolios.get_mut(self.selected_portfolio) else {
            return Err("No portfolio selected".to_string());
        };
        if self.selected_asset >= portfolio.assets.len() {
            return Err("Invalid holding selected".to_string());
        }

        portfolio.assets[self.selected_asset].set_amount(new_amount);
        self.save_to_file()?;
        self.exit_input_mode();
        Ok(())
    }

    /// Remove the selected holding. Out-of-range selections (empty
    /// portfolio) are a no-op.
    pub fn remove_selected_holding(&mut self) -> Result<(), String> {
        let Some(portfolio) = self.portfolios.get_mut(self.selected_portfolio) else {
            return Ok(());
        };
        if self.selected_asset >= portfolio.assets.len() {
            return Ok(());
        }

        portfolio.assets.remove(self.selected_asset);
        let remaining = portfolio.assets.len();
        if self.selected_asset >= remaining {
            self.selected_asset = remaining.saturating_sub(1);
        }

        self.save_to_file()?;
        Ok(())
    }

    /// Attach the picked search result to the selected portfolio with the
    /// amount typed in the form.
    pub fn commit_new_holding(&mut self, quote: AssetQuote) -> Result<(), String> {
        let amount = parse_amount(&self.edit_input).map_err(|e| e.to_string())?;

        let Some(mut asset) = self.pending_asset.take() else {
            return Err("No asset selected".to_string());
        };
        asset.set_amount(amount);
        asset.update_quote(quote.price, quote.change_24h);

        let Some(portfolio) = self.portfolios.get_mut(self.selected_portfolio) else {
            return Err("No portfolio selected".to_string());
        };
        portfolio.add_asset(asset);

        self.save_to_file()?;
        self.exit_input_mode();
        Ok(())
    }

    pub fn commit_new_portfolio(&mut self) -> Result<(), String> {
        let name = self.edit_input.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::NameRequired.to_string());
        }

        self.portfolios.push(Portfolio::new(&name));
        self.selected_portfolio = self.portfolios.len() - 1;
        self.selected_asset = 0;

        self.save_to_file()?;
        self.exit_input_mode();
        Ok(())
    }

    fn save_to_file(&self) -> Result<(), String> {
        let Some(path) = &self.data_file_path else {
            // In-memory session; edits live until the app exits.
            return Ok(());
        };

        let json = portfolio::to_string_pretty(&self.portfolios)
            .map_err(|e| format!("Failed to serialize data: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write to file: {e}"))?;
        Ok(())
    }
}

pub async fn run_tui(
    portfolios: Vec<Portfolio>,
    currency: String,
    data_file_path: Option<String>,
    tab: Option<Tab>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(portfolios, currency, data_file_path);
    if let Some(tab) = tab {
        app.current_tab = tab;
    }

    // Create channel for background quote updates
    let (quote_sender, quote_receiver) = mpsc::unbounded_channel();
    app.set_quote_receiver(quote_receiver);

    // Spawn background task refreshing mock quotes for the catalog plus
    // any file-loaded symbols outside it
    let symbols = refresh_symbols(&app.portfolios);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            let quotes = search::latest_quotes(&symbols).await;
            if quote_sender.send(quotes).is_err() {
                break; // Channel closed, exit task
            }
        }
    });

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app)).map_err(io::Error::other)?;

        // Check for quote updates from background task (non-blocking)
        app.try_receive_quote_update();

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.mode {
                        AppMode::Normal => handle_normal_key(app, key.code),
                        AppMode::EditAmount => match key.code {
                            KeyCode::Esc => app.exit_input_mode(),
                            KeyCode::Enter => {
                                if let Err(e) = app.save_edit() {
                                    app.error_message = Some(e);
                                    app.exit_input_mode();
                                }
                            }
                            KeyCode::Backspace => {
                                app.edit_input.pop();
                            }
                            KeyCode::Char(c) => push_amount_char(&mut app.edit_input, c),
                            _ => {}
                        },
                        AppMode::SearchAsset => match key.code {
                            KeyCode::Esc => app.exit_input_mode(),
                            KeyCode::Down => {
                                if app.selected_result + 1 < app.search_results.len() {
                                    app.selected_result += 1;
                                }
                            }
                            KeyCode::Up => {
                                app.selected_result = app.selected_result.saturating_sub(1);
                            }
                            KeyCode::Enter => {
                                if let Some(asset) =
                                    app.search_results.get(app.selected_result).cloned()
                                {
                                    app.pending_asset = Some(asset);
                                    app.edit_input.clear();
                                    app.mode = AppMode::NewHoldingAmount;
                                }
                            }
                            KeyCode::Backspace => {
                                app.search_input.pop();
                                // one request per keystroke, like the mock API client
                                let results = search::search_assets(&app.search_input).await;
                                app.set_search_results(results);
                            }
                            KeyCode::Char(c) => {
                                app.search_input.push(c);
                                let results = search::search_assets(&app.search_input).await;
                                app.set_search_results(results);
                            }
                            _ => {}
                        },
                        AppMode::NewHoldingAmount => match key.code {
                            KeyCode::Esc => app.exit_input_mode(),
                            KeyCode::Enter => {
                                let symbol = app
                                    .pending_asset
                                    .as_ref()
                                    .map(|a| a.get_symbol().to_string());
                                if let Some(symbol) = symbol {
                                    let quote = search::quote_price(&symbol).await;
                                    if let Err(e) = app.commit_new_holding(quote) {
                                        app.error_message = Some(e);
                                        app.exit_input_mode();
                                    }
                                }
                            }
                            KeyCode::Backspace => {
                                app.edit_input.pop();
                            }
                            KeyCode::Char(c) => push_amount_char(&mut app.edit_input, c),
                            _ => {}
                        },
                        AppMode::NewPortfolio => match key.code {
                            KeyCode::Esc => app.exit_input_mode(),
                            KeyCode::Enter => {
                                if let Err(e) = app.commit_new_portfolio() {
                                    app.error_message = Some(e);
                                    app.exit_input_mode();
                                }
                            }
                            KeyCode::Backspace => {
                                app.edit_input.pop();
                            }
                            KeyCode::Char(c) => app.edit_input.push(c),
                            _ => {}
                        },
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn push_amount_char(input: &mut String, c: char) {
    if c.is_ascii_digit() || (c == '.' && !input.contains('.')) {
        input.push(c);
    }
}

fn handle_normal_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if app.error_message.is_some() {
                app.error_message = None;
            } else {
                app.should_quit = true;
            }
        }
        // Vim navigation - hjkl
        KeyCode::Char('h') | KeyCode::Left => app.previous_tab(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),
        KeyCode::Char('1') => app.current_tab = Tab::Overview,
        KeyCode::Char('2') => app.current_tab = Tab::Holdings,
        KeyCode::Char('3') => app.current_tab = Tab::Projection,
        KeyCode::Char('p') => app.next_portfolio(),
        KeyCode::Char('n') => app.enter_new_portfolio_mode(),
        KeyCode::Char('j') | KeyCode::Down => {
            if app.current_tab == Tab::Holdings {
                app.select_next();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.current_tab == Tab::Holdings {
                app.select_previous();
            }
        }
        KeyCode::Char('e') => {
            if app.current_tab == Tab::Holdings {
                app.enter_edit_mode();
            }
        }
        KeyCode::Char('a') => {
            if app.current_tab == Tab::Holdings {
                app.enter_search_mode();
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if app.current_tab == Tab::Holdings {
                if let Err(e) = app.remove_selected_holding() {
                    app.error_message = Some(e);
                }
            }
        }
        // Projection controls
        KeyCode::Char('d') => {
            if app.current_tab == Tab::Projection {
                app.set_time_frame(TimeFrame::Daily);
            }
        }
        KeyCode::Char('w') => {
            if app.current_tab == Tab::Projection {
                app.set_time_frame(TimeFrame::Weekly);
            }
        }
        KeyCode::Char('m') => {
            if app.current_tab == Tab::Projection {
                app.set_time_frame(TimeFrame::Monthly);
            }
        }
        KeyCode::Char('y') => {
            if app.current_tab == Tab::Projection {
                app.set_time_frame(TimeFrame::Yearly);
            }
        }
        KeyCode::Char('t') => {
            if app.current_tab == Tab::Projection {
                app.cycle_time_frame();
            }
        }
        KeyCode::Char('g') => {
            if app.current_tab == Tab::Projection {
                app.cycle_growth_rate();
            }
        }
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let portfolio_name = app
        .selected()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "no portfolio".to_string());

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("folio - {portfolio_name}")),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow))
        .select(
            Tab::all()
                .iter()
                .position(|&t| t == app.current_tab)
                .unwrap_or(0),
        );

    f.render_widget(tabs, chunks[0]);

    match app.current_tab {
        Tab::Overview => render_overview(f, chunks[1], app),
        Tab::Holdings => render_holdings(f, chunks[1], app),
        Tab::Projection => render_projection(f, chunks[1], app),
    }

    match app.mode {
        AppMode::EditAmount => render_amount_dialog(f, app, " Edit Holding Amount "),
        AppMode::NewHoldingAmount => render_amount_dialog(f, app, " New Holding Amount "),
        AppMode::SearchAsset => render_search_dialog(f, app),
        AppMode::NewPortfolio => render_name_dialog(f, app),
        AppMode::Normal => {}
    }

    if let Some(error) = &app.error_message {
        render_error_popup(f, error);
    }
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let Some(portfolio) = app.selected() else {
        render_empty(f, area, "No portfolios - press 'n' to create one");
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    // Total portfolio value as big text
    let total_value = portfolio.get_total_value();
    let change = portfolio.change_24h_percent();
    let big_text_value = format_currency(total_value, &app.currency);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .lines(vec![big_text_value.clone().into()])
        .build();

    let refresh_indicator = if app.flash_state { "*" } else { " " };
    let change_direction = if change >= 0.0 { "+" } else { "" };
    let value_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            "Total Value ({}) {}{:.2}% 24h | updated {}s ago {}",
            app.currency,
            change_direction,
            change,
            app.last_update.elapsed().as_secs(),
            refresh_indicator
        ))
        .title_alignment(Alignment::Center);

    f.render_widget(value_block, main_chunks[0]);

    let inner = main_chunks[0].inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let big_text_width = big_text_value.len() as u16 * 4;
    let centered_area = if big_text_width < inner.width {
        let margin = (inner.width - big_text_width) / 2;
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(margin),
                Constraint::Min(0),
                Constraint::Length(margin),
            ])
            .split(inner)[1]
    } else {
        inner
    };
    f.render_widget(big_text, centered_area);

    // Allocation: bar chart on the left, per-class list on the right
    let allocation_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    render_allocation_chart(f, allocation_chunks[0], portfolio);
    render_allocation_list(f, allocation_chunks[1], portfolio, app);

    let help_text = Paragraph::new(
        "Navigation: h/l (tabs) | p (portfolio) | n (new portfolio) | 1-3 (direct) | q (quit)",
    )
    .block(Block::default().borders(Borders::ALL).title("Help"))
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    f.render_widget(help_text, main_chunks[2]);
}

fn render_allocation_chart(f: &mut Frame, area: Rect, portfolio: &Portfolio) {
    let allocation = portfolio.get_allocation();
    let mut allocation_vec: Vec<(&String, &f64)> = allocation.iter().collect();
    allocation_vec.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    let data: Vec<(&str, u64)> = allocation_vec
        .iter()
        .map(|(name, percentage)| (name.as_str(), **percentage as u64))
        .collect();

    let barchart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Asset Allocation"),
        )
        .data(&data)
        .bar_width(9)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow));

    f.render_widget(barchart, area);
}

fn render_allocation_list(f: &mut Frame, area: Rect, portfolio: &Portfolio, app: &App) {
    let allocation = portfolio.get_allocation();
    let mut allocation_vec: Vec<(&String, &f64)> = allocation.iter().collect();
    allocation_vec.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    let items: Vec<ListItem> = allocation_vec
        .iter()
        .map(|(kind, percentage)| {
            let trend_color = portfolio
                .assets
                .iter()
                .find(|a| a.get_kind().as_str() == kind.as_str())
                .map(|a| app.get_trend_color(a.get_symbol(), Color::Cyan))
                .unwrap_or(Color::Cyan);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{kind:<15}"), Style::default().fg(trend_color)),
                Span::styled(
                    format!("{percentage:>8.2}%"),
                    Style::default().fg(trend_color),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("By Asset Class"),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(list, area);
}

fn render_holdings(f: &mut Frame, area: Rect, app: &App) {
    let Some(portfolio) = app.selected() else {
        render_empty(f, area, "No portfolios - press 'n' to create one");
        return;
    };

    let header_cells = ["Name", "Symbol", "Class", "Amount", "Price", "Balance"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = portfolio.assets.iter().enumerate().map(|(i, asset)| {
        let balance_color = app.get_trend_color(asset.get_symbol(), Color::White);

        let row_style = if i == app.selected_asset {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(asset.get_name().to_string()).style(Style::default().fg(balance_color)),
            Cell::from(asset.get_symbol().to_string()).style(Style::default().fg(balance_color)),
            Cell::from(asset.get_kind().as_str()).style(Style::default().fg(balance_color)),
            Cell::from(format_amount(asset.get_amount()))
                .style(Style::default().fg(balance_color)),
            Cell::from(format_currency(asset.get_price(), &app.currency))
                .style(Style::default().fg(balance_color)),
            Cell::from(format_currency(asset.get_balance(), &app.currency))
                .style(Style::default().fg(balance_color)),
        ])
        .height(1)
        .style(row_style)
    });

    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(format_currency(portfolio.get_total_value(), &app.currency)).style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ])
    .height(1);

    let help_text = match app.mode {
        AppMode::Normal => "j/k (select) | e (edit) | a (add) | x (remove) | p (portfolio) | q (quit)",
        _ => "Enter (save) | Esc (cancel)",
    };
    let table_title = format!("{} - {help_text}", portfolio.name);

    let constraints = [
        Constraint::Percentage(25),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(15),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows.chain(std::iter::once(total_row)), constraints)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(table_title))
        .style(Style::default().fg(Color::White));

    f.render_widget(table, area);
}

fn render_projection(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    let historical_points: Vec<(f64, f64)> = app
        .historical
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    // Start the projected line at the last historical point so the two
    // segments join up on screen.
    let projected_points: Vec<(f64, f64)> = app
        .projected
        .iter()
        .enumerate()
        .skip(app.historical.len().saturating_sub(1))
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let (min_value, max_value) = app.projected.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), p| (lo.min(p.value), hi.max(p.value)),
    );
    let (min_value, max_value) = if app.projected.is_empty() {
        (0.0, 1.0)
    } else {
        (min_value, max_value)
    };

    let datasets = vec![
        Dataset::default()
            .name("historical")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&historical_points),
        Dataset::default()
            .name(format!("projected ({})", app.growth_rate))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&projected_points),
    ];

    let x_max = app.projected.len().saturating_sub(1) as f64;
    let x_labels: Vec<Span> = vec![
        Span::raw(
            app.historical
                .first()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
        ),
        Span::raw(
            app.historical
                .last()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
        ),
        Span::raw(
            app.projected
                .last()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
        ),
    ];

    let y_labels: Vec<Span> = vec![
        Span::raw(format_with_commas(min_value)),
        Span::raw(format_with_commas((min_value + max_value) / 2.0)),
        Span::raw(format_with_commas(max_value)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Projected Growth"),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_value * 0.95, max_value * 1.05])
                .labels(y_labels),
        );

    f.render_widget(chart, chunks[0]);

    let selector_lines = vec![
        selector_line(
            "Time frame  ",
            TimeFrame::all().iter().map(|t| t.as_str()),
            app.time_frame.as_str(),
        ),
        selector_line(
            "Growth rate ",
            GrowthRate::all().iter().map(|r| r.as_str()),
            app.growth_rate.as_str(),
        ),
    ];
    let selectors = Paragraph::new(selector_lines)
        .block(Block::default().borders(Borders::ALL).title("Scenario"));
    f.render_widget(selectors, chunks[1]);

    let help_text =
        Paragraph::new("d/w/m/y (time frame) | t (cycle) | g (growth rate) | h/l (tabs) | q (quit)")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
    f.render_widget(help_text, chunks[2]);
}

fn selector_line<'a>(
    label: &'a str,
    options: impl Iterator<Item = &'a str>,
    active: &'a str,
) -> Line<'a> {
    let mut spans = vec![Span::styled(label, Style::default().fg(Color::Gray))];
    for option in options {
        let style = if option == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {option} "), style));
    }
    Line::from(spans)
}

fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let placeholder = Paragraph::new(message.to_string())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(placeholder, area);
}

fn render_amount_dialog(f: &mut Frame, app: &App, title: &str) {
    let popup_area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, popup_area);

    let subject = match app.mode {
        AppMode::NewHoldingAmount => app
            .pending_asset
            .as_ref()
            .map(|a| format!("{} ({})", a.get_name(), a.get_symbol())),
        _ => app.selected().and_then(|p| {
            p.assets
                .get(app.selected_asset)
                .map(|a| format!("{} ({})", a.get_name(), a.get_symbol()))
        }),
    }
    .unwrap_or_default();

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(popup_area);

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    f.render_widget(main_block, popup_area);

    let info = Paragraph::new(subject)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(info, popup_layout[0]);

    let cursor = if app.flash_state { "█" } else { "▌" };
    let input_field = Paragraph::new(format!("{}{cursor}", app.edit_input))
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Amount "),
        );
    f.render_widget(input_field, popup_layout[1]);

    let feedback = match parse_amount(&app.edit_input) {
        Ok(amount) => (
            format!("Amount: {}", format_amount(amount)),
            Style::default().fg(Color::Green),
        ),
        Err(e) => (e.to_string(), Style::default().fg(Color::Yellow)),
    };
    let preview = Paragraph::new(feedback.0)
        .style(feedback.1)
        .alignment(Alignment::Center);
    f.render_widget(preview, popup_layout[2]);
}

fn render_search_dialog(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, popup_area);

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .margin(1)
        .split(popup_area);

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Add Holding ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    f.render_widget(main_block, popup_area);

    let cursor = if app.flash_state { "█" } else { "▌" };
    let input_field = Paragraph::new(format!("{}{cursor}", app.search_input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Search name or symbol "),
        );
    f.render_widget(input_field, popup_layout[0]);

    let items: Vec<ListItem> = app
        .search_results
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let style = if i == app.selected_result {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(
                format!(
                    "{:<20} {:<8} {}",
                    asset.get_name(),
                    asset.get_symbol(),
                    asset.get_kind().as_str()
                ),
                style,
            ))
        })
        .collect();

    let results = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Results - Up/Down select, Enter pick, Esc cancel "),
    );
    f.render_widget(results, popup_layout[1]);
}

fn render_name_dialog(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, popup_area);

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" New Portfolio ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    f.render_widget(main_block, popup_area);

    let inner = popup_area.inner(ratatui::layout::Margin {
        horizontal: 2,
        vertical: 2,
    });

    let cursor = if app.flash_state { "█" } else { "▌" };
    let input_field = Paragraph::new(format!("{}{cursor}", app.edit_input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Name - Enter save, Esc cancel "),
        );
    f.render_widget(input_field, inner);
}

fn render_error_popup(f: &mut Frame, error: &str) {
    let popup_area = centered_rect(60, 20, f.area());
    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;

    fn test_app() -> App {
        App::new(portfolio::sample_portfolios(), "USD".to_string(), None)
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = test_app();
        assert_eq!(app.current_tab, Tab::Overview);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Holdings);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Overview);
        app.previous_tab();
        assert_eq!(app.current_tab, Tab::Projection);
    }

    #[test]
    fn test_portfolio_cycling_resets_selection() {
        let mut app = test_app();
        app.selected_asset = 2;
        app.next_portfolio();
        assert_eq!(app.selected_portfolio, 1);
        assert_eq!(app.selected_asset, 0);
        app.next_portfolio();
        assert_eq!(app.selected_portfolio, 0);
    }

    #[test]
    fn test_time_frame_change_recomputes_projection() {
        let mut app = test_app();
        assert_eq!(app.projected.len(), 18); // 12 monthly + 6
        app.set_time_frame(TimeFrame::Yearly);
        assert_eq!(app.historical.len(), 5);
        assert_eq!(app.projected.len(), 8); // 5 yearly + 3
    }

    #[test]
    fn test_growth_cycle_keeps_historical_series() {
        let mut app = test_app();
        let historical = app.historical.clone();
        app.cycle_growth_rate();
        assert_eq!(app.growth_rate, GrowthRate::Optimistic);
        assert_eq!(app.historical, historical);
        assert_eq!(app.projected[..historical.len()], historical[..]);
    }

    #[test]
    fn test_parse_amount_validation() {
        assert!(matches!(
            parse_amount(""),
            Err(ValidationError::AmountRequired)
        ));
        assert!(matches!(
            parse_amount("abc"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("-3"),
            Err(ValidationError::NonPositiveAmount(_))
        ));
        assert_eq!(parse_amount("1.5").unwrap(), 1.5);
    }

    #[test]
    fn test_save_edit_updates_amount() {
        let mut app = test_app();
        app.current_tab = Tab::Holdings;
        app.enter_edit_mode();
        assert_eq!(app.mode, AppMode::EditAmount);
        app.edit_input = "2.5".to_string();
        app.save_edit().unwrap();
        assert_eq!(app.portfolios[0].assets[0].get_amount(), 2.5);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_save_edit_rejects_invalid_input() {
        let mut app = test_app();
        app.enter_edit_mode();
        app.edit_input = "0".to_string();
        assert!(app.save_edit().is_err());
    }

    #[test]
    fn test_commit_new_holding_appends_asset() {
        let mut app = test_app();
        app.pending_asset = Some(Asset::new("Tesla", "TSLA", AssetKind::Stock, 0.0));
        app.edit_input = "4".to_string();
        let before = app.portfolios[0].assets.len();

        let quote = AssetQuote {
            symbol: "TSLA".to_string(),
            price: 250.0,
            change_24h: 1.5,
        };
        app.commit_new_holding(quote).unwrap();

        let assets = &app.portfolios[0].assets;
        assert_eq!(assets.len(), before + 1);
        let added = assets.last().unwrap();
        assert_eq!(added.get_amount(), 4.0);
        assert_eq!(added.get_balance(), 1_000.0);
    }

    #[test]
    fn test_remove_selected_holding() {
        let mut app = test_app();
        let before = app.portfolios[0].assets.len();

        app.selected_asset = 1;
        app.remove_selected_holding().unwrap();
        assert_eq!(app.portfolios[0].assets.len(), before - 1);
        assert_eq!(app.portfolios[0].assets[1].get_symbol(), "AAPL");

        // removing the last row moves the selection up
        app.selected_asset = app.portfolios[0].assets.len() - 1;
        app.remove_selected_holding().unwrap();
        assert_eq!(app.selected_asset, app.portfolios[0].assets.len() - 1);

        // no-op on an empty portfolio
        let mut empty = App::new(vec![Portfolio::new("Empty")], "USD".to_string(), None);
        empty.remove_selected_holding().unwrap();
        assert!(empty.portfolios[0].assets.is_empty());
    }

    #[test]
    fn test_search_results_exclude_held_symbols() {
        let mut app = test_app();
        app.set_search_results(vec![
            Asset::new("Bitcoin", "BTC", AssetKind::Crypto, 0.0),
            Asset::new("Tesla", "TSLA", AssetKind::Stock, 0.0),
        ]);
        assert_eq!(app.search_results.len(), 1);
        assert_eq!(app.search_results[0].get_symbol(), "TSLA");
        assert_eq!(app.selected_result, 0);
    }

    #[tokio::test]
    async fn test_refresh_covers_file_loaded_symbols() {
        let mut portfolios = portfolio::sample_portfolios();
        portfolios[0].add_asset(Asset::new("NVIDIA", "NVDA", AssetKind::Stock, 10.0));
        let mut app = App::new(portfolios, "USD".to_string(), None);

        let symbols = refresh_symbols(&app.portfolios);
        assert!(symbols.iter().any(|s| s == "NVDA"));

        let quotes = search::latest_quotes(&symbols).await;
        app.apply_quotes(&quotes);
        let nvda = app.portfolios[0].assets.last().unwrap();
        assert!(nvda.get_price() > 0.0);
    }

    #[test]
    fn test_commit_new_portfolio_requires_name() {
        let mut app = test_app();
        app.enter_new_portfolio_mode();
        assert!(app.commit_new_portfolio().is_err());

        app.enter_new_portfolio_mode();
        app.edit_input = "Retirement".to_string();
        app.commit_new_portfolio().unwrap();
        assert_eq!(app.portfolios.len(), 3);
        assert_eq!(app.selected_portfolio, 2);
        assert_eq!(app.portfolios[2].name, "Retirement");
    }

    #[test]
    fn test_quote_updates_drive_trends() {
        let mut app = test_app();
        let mut quotes = HashMap::new();
        quotes.insert(
            "BTC".to_string(),
            AssetQuote {
                symbol: "BTC".to_string(),
                price: 100.0,
                change_24h: 0.0,
            },
        );
        app.apply_quotes(&quotes);
        assert_eq!(app.trends["BTC"], Trend::Neutral);

        quotes.get_mut("BTC").unwrap().price = 120.0;
        app.apply_quotes(&quotes);
        assert_eq!(app.trends["BTC"], Trend::Up);
        assert_eq!(app.portfolios[0].assets[0].get_price(), 120.0);

        quotes.get_mut("BTC").unwrap().price = 80.0;
        app.apply_quotes(&quotes);
        assert_eq!(app.trends["BTC"], Trend::Down);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_with_commas(1234567.5), "1,234,567.50");
        assert_eq!(format_currency(1000.0, "USD"), "$1,000.00");
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(0.5), "0.5000");
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!(Tab::from_str("Projection"), Some(Tab::Projection));
        assert_eq!(Tab::from_str("unknown"), None);
    }
}
