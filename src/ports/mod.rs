//! Port traits decoupling the domain from concrete data sources.

pub mod config_port;
pub mod data_port;
