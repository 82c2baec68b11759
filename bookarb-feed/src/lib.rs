//! Odds snapshots sourced from The Odds API, and scanning of those snapshots for arbitrage.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod print;
pub mod retry;
pub mod scan;
pub mod snapshot;
