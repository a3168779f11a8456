use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    dashboard::{business_summary, farmer_summary, BusinessSummary, FarmerSummary},
    entities::{CropListing, MarketRate},
    listing_query::{filter_listings, search_listings, FilteredListings, ListingFilter},
    market_pulse::{pulse_rows, strongest_mover, PulseRow},
    reservation::{logistics_quote, reserve, LogisticsQuote, Reservation, ReservationError},
};
use crate::{
    infra::seed::{load_listings, load_market_rates, SeedError},
    util::settings::Settings,
};

/// Which side of the marketplace the user is acting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    None,
    Farmer,
    Business,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::None => "None",
            Role::Farmer => "Farmer",
            Role::Business => "Business",
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Role::None)
    }
}

/// Session-scoped marketplace state. Dropped with the session; nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub role: Role,
    pub settings: Settings,
    listings: Vec<CropListing>,
    market_rates: Vec<MarketRate>,
    reservations: Vec<Reservation>,
}

impl AppState {
    pub fn new(
        listings: Vec<CropListing>,
        market_rates: Vec<MarketRate>,
        settings: Settings,
    ) -> Self {
        Self {
            role: Role::None,
            settings,
            listings,
            market_rates,
            reservations: Vec::new(),
        }
    }

    /// Fresh session over the embedded seed data.
    pub fn from_seed(settings: Settings) -> Result<Self, SeedError> {
        let state = Self::new(load_listings()?, load_market_rates()?, settings);
        info!(
            listings = state.listings.len(),
            rates = state.market_rates.len(),
            "session started from seed data"
        );
        Ok(state)
    }

    pub fn select_role(&mut self, role: Role) {
        info!(role = role.name(), "role selected");
        self.role = role;
    }

    pub fn clear_role(&mut self) {
        self.role = Role::None;
    }

    pub fn listings(&self) -> &[CropListing] {
        &self.listings
    }

    pub fn listing(&self, id: &str) -> Option<&CropListing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn market_rates(&self) -> &[MarketRate] {
        &self.market_rates
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Business dashboard query. A filter without a smart-match mode uses the session's.
    pub fn filtered_listings(&self, filter: &ListingFilter) -> FilteredListings<'_> {
        let filter = ListingFilter {
            smart_match: filter.smart_match.or(Some(self.settings.smart_match)),
            ..filter.clone()
        };
        filter_listings(&self.listings, &filter)
    }

    pub fn search_marketplace(&self, text: &str) -> Vec<&CropListing> {
        search_listings(&self.listings, text)
    }

    pub fn reserve(
        &mut self,
        listing_id: &str,
        quantity_kg: u64,
    ) -> Result<Reservation, ReservationError> {
        let receipt = reserve(&mut self.listings, listing_id, quantity_kg)?;
        self.reservations.push(receipt.clone());
        Ok(receipt)
    }

    pub fn logistics_quote(&self, listing_id: &str) -> Option<LogisticsQuote> {
        self.listing(listing_id).map(|listing| {
            logistics_quote(listing, &self.settings.logistics, &self.settings.currency)
        })
    }

    /// Listings owned by the configured farmer, in seed order.
    pub fn farmer_listings(&self) -> Vec<&CropListing> {
        self.listings
            .iter()
            .filter(|listing| self.settings.farmer_listing_ids.contains(&listing.id))
            .collect()
    }

    pub fn farmer_summary(&self) -> FarmerSummary {
        farmer_summary(self.farmer_listings())
    }

    pub fn business_summary(&self) -> BusinessSummary {
        business_summary(&self.listings, &self.reservations)
    }

    pub fn market_pulse(&self) -> Vec<PulseRow> {
        pulse_rows(&self.market_rates)
    }

    pub fn strongest_mover(&self) -> Option<&MarketRate> {
        strongest_mover(&self.market_rates)
    }
}
