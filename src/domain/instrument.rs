//! Instrument catalog entries and per-instrument valuation formulas.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Common,
    Preferred,
}

/// Static valuation parameters for one listed symbol.
///
/// Fields do not change after registration; replacing an instrument means
/// re-registering the symbol with a fresh value.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub kind: InstrumentKind,
    pub last_dividend: f64,
    /// Fraction in [0, 1]. Only meaningful for preferred instruments.
    pub fixed_dividend_rate: f64,
    /// Only meaningful for preferred instruments.
    pub par_value: f64,
}

impl Instrument {
    pub fn common(symbol: &str, last_dividend: f64) -> Self {
        Instrument {
            symbol: symbol.to_string(),
            kind: InstrumentKind::Common,
            last_dividend,
            fixed_dividend_rate: 0.0,
            par_value: 0.0,
        }
    }

    pub fn preferred(
        symbol: &str,
        last_dividend: f64,
        fixed_dividend_rate: f64,
        par_value: f64,
    ) -> Self {
        Instrument {
            symbol: symbol.to_string(),
            kind: InstrumentKind::Preferred,
            last_dividend,
            fixed_dividend_rate,
            par_value,
        }
    }

    /// Expected dividend income per unit price.
    ///
    /// Common: `last_dividend / price`. Preferred:
    /// `(fixed_dividend_rate * par_value) / price`. The price is used as
    /// given; zero or negative prices produce the degenerate float result
    /// rather than an error.
    pub fn dividend_yield(&self, price: f64) -> f64 {
        match self.kind {
            InstrumentKind::Common => self.last_dividend / price,
            InstrumentKind::Preferred => (self.fixed_dividend_rate * self.par_value) / price,
        }
    }

    /// `price / last_dividend`, or 0 when the last dividend is zero (P/E is
    /// undefined without earnings).
    pub fn pe_ratio(&self, price: f64) -> f64 {
        if self.last_dividend == 0.0 {
            0.0
        } else {
            price / self.last_dividend
        }
    }
}
