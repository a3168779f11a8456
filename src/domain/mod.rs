//! Marketplace domain logic lives here.

pub mod app_state;
pub mod dashboard;
pub mod entities;
pub mod estimators;
pub mod listing_query;
pub mod market_pulse;
pub mod reservation;

pub use app_state::{AppState, Role};
pub use dashboard::{business_summary, farmer_summary, BusinessSummary, FarmerSummary};
pub use entities::{
    CropListing, CropType, Location, LogisticsParams, MarketRate, PesticideProfile, QualityGrade,
    StorageCondition, UnknownVariant, LOCATIONS,
};
pub use estimators::{
    estimate_harvest_date, estimate_harvest_from_input, estimate_yield, estimate_yield_from_input,
    HarvestEstimate, SoilQuality, WeatherCondition, YieldEstimate,
};
pub use listing_query::{
    filter_listings, parse_choice, parse_month, search_listings, FilteredListings, ListingFilter,
    ListingMatch, SmartMatchMode,
};
pub use market_pulse::{
    pulse_rows, rate_for, sparkline_points, strongest_mover, Direction, PulseRow,
};
pub use reservation::{
    logistics_quote, parse_quantity, reserve, LogisticsQuote, Reservation, ReservationError,
};
