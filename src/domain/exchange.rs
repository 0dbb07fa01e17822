//! Exchange state: instrument catalog, trade ledger, derived metrics.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use super::instrument::Instrument;
use super::trade::Trade;

/// Trailing window for the volume-weighted price, in minutes.
pub const TRADE_WINDOW_MINUTES: i64 = 10;

/// A ledger entry: one trade tagged with the symbol it was recorded against.
///
/// The association is by symbol key only; recording never requires the symbol
/// to be registered in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub symbol: String,
    pub trade: Trade,
}

/// Instrument catalog plus append-only trade ledger.
///
/// All metric queries are pure reads over the current state; `register` and
/// `record_trade` are the only mutators. Missing or degenerate state is
/// absorbed into sentinel `0.0` results rather than errors: unknown symbol,
/// empty window, zero last dividend, and an empty index all report zero.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    catalog: HashMap<String, Instrument>,
    ledger: Vec<TradeRecord>,
}

impl Exchange {
    pub fn new() -> Self {
        Exchange {
            catalog: HashMap::new(),
            ledger: Vec::new(),
        }
    }

    /// Insert or replace the instrument under its symbol key. Last write wins.
    pub fn register(&mut self, instrument: Instrument) {
        self.catalog.insert(instrument.symbol.clone(), instrument);
    }

    pub fn lookup(&self, symbol: &str) -> Option<&Instrument> {
        self.catalog.get(symbol)
    }

    /// Registered symbols in sorted order, for deterministic reporting.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.catalog.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Append to the ledger. Always succeeds; recording and valuation are
    /// decoupled, so the symbol need not exist in the catalog.
    pub fn record_trade(&mut self, symbol: &str, trade: Trade) {
        self.ledger.push(TradeRecord {
            symbol: symbol.to_string(),
            trade,
        });
    }

    pub fn trade_count(&self) -> usize {
        self.ledger.len()
    }

    /// Ledger entries in insertion order.
    pub fn ledger(&self) -> &[TradeRecord] {
        &self.ledger
    }

    /// Dividend yield for `symbol` at the quoted price, `0.0` if the symbol
    /// is not registered.
    pub fn dividend_yield(&self, symbol: &str, price: f64) -> f64 {
        self.catalog
            .get(symbol)
            .map_or(0.0, |instrument| instrument.dividend_yield(price))
    }

    /// P/E ratio for `symbol` at the quoted price, `0.0` if the symbol is not
    /// registered.
    pub fn pe_ratio(&self, symbol: &str, price: f64) -> f64 {
        self.catalog
            .get(symbol)
            .map_or(0.0, |instrument| instrument.pe_ratio(price))
    }

    /// Volume-weighted price over the default trailing window of
    /// [`TRADE_WINDOW_MINUTES`] ending at `now`.
    pub fn volume_weighted_price(&self, symbol: &str, now: DateTime<Utc>) -> f64 {
        self.volume_weighted_price_within(symbol, now, Duration::minutes(TRADE_WINDOW_MINUTES))
    }

    /// Volume-weighted price over an explicit trailing window.
    ///
    /// Qualifying trades carry the symbol, a timestamp strictly after
    /// `now - window`, and a positive price. Ingestion is permissive,
    /// aggregation is defensive: zero/negative-price trades sit in the ledger
    /// but never enter this sum. `0.0` when nothing qualifies or the total
    /// quantity is zero.
    pub fn volume_weighted_price_within(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> f64 {
        let cutoff = now - window;
        let mut turnover = 0.0_f64;
        let mut total_quantity = 0_u64;

        for record in &self.ledger {
            if record.symbol != symbol {
                continue;
            }
            let trade = &record.trade;
            if trade.timestamp > cutoff && trade.price > 0.0 {
                turnover += trade.price * trade.quantity as f64;
                total_quantity += trade.quantity;
            }
        }

        if total_quantity == 0 {
            0.0
        } else {
            turnover / total_quantity as f64
        }
    }

    /// Composite index: geometric mean of the volume-weighted prices of the
    /// participating instruments, i.e. catalog symbols whose VWSP is strictly
    /// positive. Symbols with no qualifying trades are excluded from both the
    /// product and the count. `0.0` when nothing participates.
    ///
    /// Plain f64 arithmetic; the running product can under/overflow for
    /// pathological inputs.
    pub fn all_share_index(&self, now: DateTime<Utc>) -> f64 {
        self.all_share_index_within(now, Duration::minutes(TRADE_WINDOW_MINUTES))
    }

    /// Composite index over an explicit trailing window.
    pub fn all_share_index_within(&self, now: DateTime<Utc>, window: Duration) -> f64 {
        let mut product = 1.0_f64;
        let mut participating = 0_u32;

        for symbol in self.catalog.keys() {
            let vwsp = self.volume_weighted_price_within(symbol, now, window);
            if vwsp > 0.0 {
                product *= vwsp;
                participating += 1;
            }
        }

        if participating == 0 {
            0.0
        } else {
            product.powf(1.0 / f64::from(participating))
        }
    }
}
