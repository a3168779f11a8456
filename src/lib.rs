//! Crop listing, reservation and market-rate logic for a farmer/buyer
//! marketplace.
//!
//! Everything runs against session-local data seeded from the JSON files in
//! `data/`; nothing is persisted.
//!
//! ```
//! use agriconnect::{AppState, CropType, ListingFilter, Role, Settings};
//!
//! let mut session = AppState::from_seed(Settings::default()).unwrap();
//! session.select_role(Role::Business);
//!
//! let filter = ListingFilter {
//!     required_crop: Some(CropType::Rice),
//!     ..Default::default()
//! };
//! let first = session.filtered_listings(&filter).matches[0].listing.id.clone();
//! session.reserve(&first, 500).unwrap();
//! ```

pub mod domain;
pub mod infra;
pub mod util;

pub use domain::*;
pub use infra::{load_listings, load_market_rates, SeedError};
pub use util::{load_settings, Settings, SettingsError};
