//! CLI definition and dispatch.

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::MarketError;
use crate::domain::exchange::{Exchange, TRADE_WINDOW_MINUTES};
use crate::domain::instrument::Instrument;
use crate::domain::trade::{Side, Trade};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;

/// Quote price used for dividend yield and P/E when neither the flag nor the
/// config supplies one.
pub const DEFAULT_QUOTE_PRICE: f64 = 100.0;

#[derive(Parser, Debug)]
#[command(name = "minibourse", about = "Miniature securities exchange valuation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the illustrative sample market and print its metrics
    Demo,
    /// Compute metrics from instrument and trade CSV files
    Report {
        #[arg(short, long)]
        instruments: PathBuf,
        #[arg(short, long)]
        trades: PathBuf,
        /// Quote price for dividend yield and P/E
        #[arg(short, long)]
        price: Option<f64>,
        /// Valuation instant, RFC 3339; defaults to now
        #[arg(long)]
        at: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Demo => run_demo(),
        Command::Report {
            instruments,
            trades,
            price,
            at,
            config,
        } => run_report(&instruments, &trades, price, at.as_deref(), config.as_ref()),
    }
}

/// Register every instrument and append every trade from the data port into a
/// fresh exchange.
pub fn build_exchange(port: &dyn MarketDataPort) -> Result<Exchange, MarketError> {
    let mut exchange = Exchange::new();
    for instrument in port.load_instruments()? {
        exchange.register(instrument);
    }
    for (symbol, trade) in port.load_trades()? {
        exchange.record_trade(&symbol, trade);
    }
    Ok(exchange)
}

/// Parse an RFC 3339 valuation instant, defaulting to the current instant.
/// This is the only place wall-clock time enters the report path.
pub fn parse_valuation_instant(value: Option<&str>) -> Result<DateTime<Utc>, MarketError> {
    match value {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| MarketError::BadTimestamp {
                value: raw.to_string(),
                reason: e.to_string(),
            }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub price: f64,
    pub window: Duration,
}

/// Resolve report settings: the `--price` flag wins over the config value,
/// which wins over [`DEFAULT_QUOTE_PRICE`]; the window comes from the config
/// or defaults to the standard trailing window.
pub fn resolve_settings(
    price_flag: Option<f64>,
    config: Option<&dyn ConfigPort>,
) -> Result<ReportSettings, MarketError> {
    let window_minutes = config.map_or(TRADE_WINDOW_MINUTES, |c| {
        c.get_int("report", "window_minutes", TRADE_WINDOW_MINUTES)
    });
    if window_minutes <= 0 {
        return Err(MarketError::ConfigInvalid {
            section: "report".into(),
            key: "window_minutes".into(),
            reason: format!("must be positive, got {window_minutes}"),
        });
    }

    let price = price_flag.unwrap_or_else(|| {
        config.map_or(DEFAULT_QUOTE_PRICE, |c| {
            c.get_double("report", "price", DEFAULT_QUOTE_PRICE)
        })
    });

    Ok(ReportSettings {
        price,
        window: Duration::minutes(window_minutes),
    })
}

fn fail(err: &MarketError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

fn run_demo() -> ExitCode {
    let now = Utc::now();
    let mut exchange = Exchange::new();

    exchange.register(Instrument::common("TEA", 0.0));
    exchange.register(Instrument::common("POP", 8.0));
    exchange.register(Instrument::common("ALE", 23.0));
    exchange.register(Instrument::preferred("GIN", 8.0, 0.02, 100.0));
    exchange.register(Instrument::common("JOE", 13.0));

    exchange.record_trade("POP", Trade::new(now, Side::Buy, 100, 110.0));
    exchange.record_trade("POP", Trade::new(now, Side::Sell, 200, 105.0));
    exchange.record_trade("POP", Trade::new(now, Side::Buy, 50, 115.0));

    println!(
        "Dividend yield for POP at price 120: {:.4}",
        exchange.dividend_yield("POP", 120.0)
    );
    println!(
        "P/E ratio for POP at price 120: {:.2}",
        exchange.pe_ratio("POP", 120.0)
    );
    println!(
        "Volume-weighted price for POP: {:.2}",
        exchange.volume_weighted_price("POP", now)
    );
    println!("All-share index: {:.2}", exchange.all_share_index(now));

    ExitCode::SUCCESS
}

fn run_report(
    instruments_path: &PathBuf,
    trades_path: &PathBuf,
    price_flag: Option<f64>,
    at: Option<&str>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match FileConfigAdapter::from_file(path) {
                Ok(adapter) => Some(adapter),
                Err(e) => {
                    return fail(&MarketError::ConfigParse {
                        file: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        None => None,
    };

    let settings = match resolve_settings(price_flag, config.as_ref().map(|c| c as &dyn ConfigPort))
    {
        Ok(settings) => settings,
        Err(e) => return fail(&e),
    };

    let valuation_at = match parse_valuation_instant(at) {
        Ok(instant) => instant,
        Err(e) => return fail(&e),
    };

    eprintln!(
        "Loading instruments from {} and trades from {}",
        instruments_path.display(),
        trades_path.display()
    );
    let adapter = CsvAdapter::new(instruments_path.clone(), trades_path.clone());
    let exchange = match build_exchange(&adapter) {
        Ok(exchange) => exchange,
        Err(e) => return fail(&e),
    };
    eprintln!(
        "Loaded {} instrument(s), {} trade(s)",
        exchange.symbols().len(),
        exchange.trade_count()
    );

    println!(
        "{:<8} {:>12} {:>12} {:>12}",
        "symbol", "div yield", "P/E", "VWSP"
    );
    for symbol in exchange.symbols() {
        println!(
            "{:<8} {:>12.4} {:>12.2} {:>12.2}",
            symbol,
            exchange.dividend_yield(symbol, settings.price),
            exchange.pe_ratio(symbol, settings.price),
            exchange.volume_weighted_price_within(symbol, valuation_at, settings.window),
        );
    }
    println!(
        "\nAll-share index: {:.2}",
        exchange.all_share_index_within(valuation_at, settings.window)
    );

    ExitCode::SUCCESS
}
