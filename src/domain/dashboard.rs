use super::{entities::CropListing, reservation::Reservation};

#[derive(Clone, Debug, PartialEq)]
pub struct FarmerSummary {
    pub active_listings: usize,
    pub total_reserved_kg: u64,
    /// Σ reserved kg × price per kg.
    pub estimated_revenue: f64,
}

pub fn farmer_summary<'a, I>(listings: I) -> FarmerSummary
where
    I: IntoIterator<Item = &'a CropListing>,
{
    listings.into_iter().fold(
        FarmerSummary {
            active_listings: 0,
            total_reserved_kg: 0,
            estimated_revenue: 0.0,
        },
        |mut summary, listing| {
            summary.active_listings += 1;
            summary.total_reserved_kg += listing.reserved_kg;
            summary.estimated_revenue += listing.reserved_kg as f64 * listing.price_per_kg;
            summary
        },
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusinessSummary {
    /// Listings with unreserved quantity left.
    pub available_listings: usize,
    pub reservations_made: usize,
    pub reserved_this_session_kg: u64,
}

pub fn business_summary(listings: &[CropListing], reservations: &[Reservation]) -> BusinessSummary {
    BusinessSummary {
        available_listings: listings.iter().filter(|l| l.available_kg() > 0).count(),
        reservations_made: reservations.len(),
        reserved_this_session_kg: reservations.iter().map(|r| r.quantity_kg).sum(),
    }
}
