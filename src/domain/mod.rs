//! Core domain types and logic.

pub mod instrument;
pub mod trade;
pub mod exchange;
pub mod error;
