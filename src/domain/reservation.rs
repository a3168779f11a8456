//! Reserving part of a listing and quoting its transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::entities::{CropListing, CropType, LogisticsParams};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("reservation quantity must be positive")]
    InvalidQuantity,
    #[error("no listing with id {0:?}")]
    UnknownListing(String),
    #[error("requested {requested} kg but only {available} kg available")]
    ExceedsAvailable { requested: u64, available: u64 },
}

/// Receipt for a successful reservation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub listing_id: String,
    pub crop: CropType,
    pub quantity_kg: u64,
    /// Listing's reserved total after this reservation.
    pub reserved_total_kg: u64,
}

/// Reserve `quantity_kg` of the listing with `listing_id`.
///
/// On error the listings are left exactly as they were.
pub fn reserve(
    listings: &mut [CropListing],
    listing_id: &str,
    quantity_kg: u64,
) -> Result<Reservation, ReservationError> {
    let result = try_reserve(listings, listing_id, quantity_kg);
    match &result {
        Ok(receipt) => info!(
            listing = %receipt.listing_id,
            quantity_kg = receipt.quantity_kg,
            reserved_total_kg = receipt.reserved_total_kg,
            "reservation accepted"
        ),
        Err(err) => warn!(listing = %listing_id, quantity_kg, error = %err, "reservation rejected"),
    }
    result
}

fn try_reserve(
    listings: &mut [CropListing],
    listing_id: &str,
    quantity_kg: u64,
) -> Result<Reservation, ReservationError> {
    if quantity_kg == 0 {
        return Err(ReservationError::InvalidQuantity);
    }

    let listing = listings
        .iter_mut()
        .find(|listing| listing.id == listing_id)
        .ok_or_else(|| ReservationError::UnknownListing(listing_id.to_string()))?;

    let available = listing.available_kg();
    if quantity_kg > available {
        return Err(ReservationError::ExceedsAvailable {
            requested: quantity_kg,
            available,
        });
    }

    listing.reserved_kg = listing
        .reserved_kg
        .saturating_add(quantity_kg)
        .min(listing.quantity_kg);

    Ok(Reservation {
        id: Uuid::new_v4(),
        listing_id: listing.id.clone(),
        crop: listing.crop,
        quantity_kg,
        reserved_total_kg: listing.reserved_kg,
    })
}

/// Parse the reserve box text by its leading digits, so `"12.5"` is 12 and
/// `"250kg"` is 250. Blank, signed-negative or zero input yields `None`.
pub fn parse_quantity(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end]
        .parse::<u64>()
        .ok()
        .filter(|qty| *qty > 0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogisticsQuote {
    pub origin: String,
    pub currency: String,
    pub transport_mode: String,
    /// Cost to move the whole unreserved quantity, rounded to whole currency units.
    pub estimated_cost: u64,
    pub transit_days: (u8, u8),
}

impl LogisticsQuote {
    /// Cost with its currency, e.g. `NPR 9500`.
    pub fn cost_label(&self) -> String {
        format!("{} {}", self.currency, self.estimated_cost)
    }
}

pub fn logistics_quote(
    listing: &CropListing,
    params: &LogisticsParams,
    currency: &str,
) -> LogisticsQuote {
    let cost = (listing.available_kg() as f64 * params.cost_per_kg).round();
    LogisticsQuote {
        origin: listing.origin(),
        currency: currency.to_string(),
        transport_mode: params.transport_mode.clone(),
        estimated_cost: if cost.is_finite() && cost > 0.0 { cost as u64 } else { 0 },
        transit_days: (params.transit_days_min, params.transit_days_max),
    }
}
