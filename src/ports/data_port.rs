//! Market data access port trait.

use crate::domain::error::MarketError;
use crate::domain::instrument::Instrument;
use crate::domain::trade::Trade;

/// Source of an instrument catalog and a symbol-tagged trade ledger.
pub trait MarketDataPort {
    fn load_instruments(&self) -> Result<Vec<Instrument>, MarketError>;
    fn load_trades(&self) -> Result<Vec<(String, Trade)>, MarketError>;
}
