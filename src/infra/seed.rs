//! Seed data embedded from `data/` and validated on load.

use std::collections::HashSet;

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::domain::{CropListing, MarketRate};

const LISTINGS_FILE: &str = "listings.json";
const MARKET_RATES_FILE: &str = "market_rates.json";

#[derive(RustEmbed)]
#[folder = "data"]
struct SeedFiles;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file {0} is not embedded")]
    MissingFile(&'static str),
    #[error("failed to decode seed data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("listing {id}: {reason}")]
    InvalidListing { id: String, reason: String },
    #[error("duplicate listing id {0}")]
    DuplicateListing(String),
    #[error("market rate for {crop}: {reason}")]
    InvalidRate { crop: String, reason: String },
}

pub fn load_listings() -> Result<Vec<CropListing>, SeedError> {
    let listings: Vec<CropListing> = load_embedded(LISTINGS_FILE)?;
    validate_listings(&listings)?;
    debug!(count = listings.len(), "loaded seed listings");
    Ok(listings)
}

pub fn load_market_rates() -> Result<Vec<MarketRate>, SeedError> {
    let rates: Vec<MarketRate> = load_embedded(MARKET_RATES_FILE)?;
    validate_market_rates(&rates)?;
    debug!(count = rates.len(), "loaded seed market rates");
    Ok(rates)
}

/// Parse listings from JSON text in the seed format and validate them.
pub fn listings_from_json(raw: &str) -> Result<Vec<CropListing>, SeedError> {
    let listings: Vec<CropListing> = serde_json::from_str(raw)?;
    validate_listings(&listings)?;
    Ok(listings)
}

pub fn validate_listings(listings: &[CropListing]) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for listing in listings {
        if !seen.insert(listing.id.as_str()) {
            return Err(SeedError::DuplicateListing(listing.id.clone()));
        }
        if !listing.crop.has_variety(&listing.variety) {
            return Err(invalid_listing(
                listing,
                format!("{} is not a known {} variety", listing.variety, listing.crop),
            ));
        }
        if listing.reserved_kg > listing.quantity_kg {
            return Err(invalid_listing(
                listing,
                format!(
                    "reserved {} kg exceeds quantity {} kg",
                    listing.reserved_kg, listing.quantity_kg
                ),
            ));
        }
        if !listing.price_per_kg.is_finite() || listing.price_per_kg < 0.0 {
            return Err(invalid_listing(listing, "price must be a non-negative number".into()));
        }
        if listing.available_to < listing.available_from {
            return Err(invalid_listing(
                listing,
                "availability window ends before it starts".into(),
            ));
        }
    }
    Ok(())
}

pub fn validate_market_rates(rates: &[MarketRate]) -> Result<(), SeedError> {
    for rate in rates {
        if rate.trend.len() != MarketRate::TREND_SAMPLES {
            return Err(SeedError::InvalidRate {
                crop: rate.crop.to_string(),
                reason: format!(
                    "expected {} trend samples, found {}",
                    MarketRate::TREND_SAMPLES,
                    rate.trend.len()
                ),
            });
        }
    }
    Ok(())
}

fn invalid_listing(listing: &CropListing, reason: String) -> SeedError {
    SeedError::InvalidListing {
        id: listing.id.clone(),
        reason,
    }
}

fn load_embedded<T: DeserializeOwned>(name: &'static str) -> Result<T, SeedError> {
    let file = SeedFiles::get(name).ok_or(SeedError::MissingFile(name))?;
    Ok(serde_json::from_slice(file.data.as_ref())?)
}
