//! Executed-trade records.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// One execution, immutable once recorded.
///
/// No field is validated at construction: a zero quantity or a non-positive
/// price is accepted as given. Windowed aggregations filter defensively
/// instead (see [`Exchange::volume_weighted_price`]).
///
/// [`Exchange::volume_weighted_price`]: super::exchange::Exchange::volume_weighted_price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub side: Side,
    pub quantity: u64,
    pub price: f64,
}

impl Trade {
    /// The timestamp is an explicit parameter so windowed queries stay
    /// deterministic under test; callers wanting wall-clock stamping pass
    /// `Utc::now()` at the outermost boundary.
    pub fn new(timestamp: DateTime<Utc>, side: Side, quantity: u64, price: f64) -> Self {
        Trade {
            timestamp,
            side,
            quantity,
            price,
        }
    }
}
