//! Shared fixtures for the marketplace integration tests.

#![allow(dead_code)]

use agriconnect::{AppState, CropListing, Settings};

/// Install a test-writer subscriber once so `RUST_LOG=debug cargo test` shows
/// the library's tracing output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fresh session over the embedded seed data.
pub fn seeded_session() -> AppState {
    init_tracing();
    AppState::from_seed(Settings::default()).unwrap()
}

pub fn seeded_listings() -> Vec<CropListing> {
    init_tracing();
    agriconnect::load_listings().unwrap()
}

pub fn reserved_kg(listings: &[CropListing], id: &str) -> u64 {
    listings
        .iter()
        .find(|listing| listing.id == id)
        .map(|listing| listing.reserved_kg)
        .unwrap()
}

pub fn assert_within_capacity(listings: &[CropListing]) {
    for listing in listings {
        assert!(
            listing.reserved_kg <= listing.quantity_kg,
            "listing {} over-reserved: {} > {}",
            listing.id,
            listing.reserved_kg,
            listing.quantity_kg
        );
    }
}
