//! Data sources behind the domain layer.

pub mod seed;

pub use seed::{load_listings, load_market_rates, SeedError};
