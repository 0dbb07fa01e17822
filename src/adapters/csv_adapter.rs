//! CSV file data adapter.
//!
//! Reads the instrument catalog and the trade ledger from two CSV files:
//!
//! - instruments: `symbol,kind,last_dividend,fixed_dividend_rate,par_value`
//!   with `kind` one of COMMON or PREFERRED (case-insensitive).
//! - trades: `symbol,timestamp,side,quantity,price` with RFC 3339 timestamps
//!   and `side` one of BUY or SELL (case-insensitive).

use crate::domain::error::MarketError;
use crate::domain::instrument::{Instrument, InstrumentKind};
use crate::domain::trade::{Side, Trade};
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    instruments_path: PathBuf,
    trades_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(instruments_path: PathBuf, trades_path: PathBuf) -> Self {
        Self {
            instruments_path,
            trades_path,
        }
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
) -> Result<&'a str, MarketError> {
    record.get(index).ok_or_else(|| MarketError::Data {
        reason: format!("line {line}: missing {name} column"),
    })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
) -> Result<T, MarketError>
where
    T::Err: std::fmt::Display,
{
    field(record, index, name, line)?
        .trim()
        .parse()
        .map_err(|e| MarketError::Data {
            reason: format!("line {line}: invalid {name} value: {e}"),
        })
}

fn parse_kind(value: &str, line: u64) -> Result<InstrumentKind, MarketError> {
    match value.trim().to_uppercase().as_str() {
        "COMMON" => Ok(InstrumentKind::Common),
        "PREFERRED" => Ok(InstrumentKind::Preferred),
        other => Err(MarketError::Data {
            reason: format!("line {line}: unknown instrument kind {other:?}"),
        }),
    }
}

fn parse_side(value: &str, line: u64) -> Result<Side, MarketError> {
    match value.trim().to_uppercase().as_str() {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        other => Err(MarketError::Data {
            reason: format!("line {line}: unknown trade side {other:?}"),
        }),
    }
}

fn parse_timestamp(value: &str, line: u64) -> Result<DateTime<Utc>, MarketError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| MarketError::BadTimestamp {
            value: value.trim().to_string(),
            reason: format!("line {line}: {e}"),
        })
}

impl MarketDataPort for CsvAdapter {
    fn load_instruments(&self) -> Result<Vec<Instrument>, MarketError> {
        let content = fs::read_to_string(&self.instruments_path).map_err(|e| MarketError::Data {
            reason: format!("failed to read {}: {}", self.instruments_path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut instruments = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MarketError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;
            let line = record.position().map_or(0, |p| p.line());

            instruments.push(Instrument {
                symbol: field(&record, 0, "symbol", line)?.trim().to_string(),
                kind: parse_kind(field(&record, 1, "kind", line)?, line)?,
                last_dividend: parse_field(&record, 2, "last_dividend", line)?,
                fixed_dividend_rate: parse_field(&record, 3, "fixed_dividend_rate", line)?,
                par_value: parse_field(&record, 4, "par_value", line)?,
            });
        }

        Ok(instruments)
    }

    fn load_trades(&self) -> Result<Vec<(String, Trade)>, MarketError> {
        let content = fs::read_to_string(&self.trades_path).map_err(|e| MarketError::Data {
            reason: format!("failed to read {}: {}", self.trades_path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MarketError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;
            let line = record.position().map_or(0, |p| p.line());

            let symbol = field(&record, 0, "symbol", line)?.trim().to_string();
            let timestamp = parse_timestamp(field(&record, 1, "timestamp", line)?, line)?;
            let side = parse_side(field(&record, 2, "side", line)?, line)?;
            let quantity: u64 = parse_field(&record, 3, "quantity", line)?;
            let price: f64 = parse_field(&record, 4, "price", line)?;

            trades.push((symbol, Trade::new(timestamp, side, quantity, price)));
        }

        Ok(trades)
    }
}
