//! Buyer-side listing search, filtering and smart-match ordering.

use serde::{Deserialize, Serialize};
use time::Month;
use tracing::debug;

use super::entities::{CropListing, CropType, PesticideProfile, QualityGrade, StorageCondition};

/// How a required crop interacts with the other criteria.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmartMatchMode {
    /// Dashboard behaviour as shipped: without search text, listings of other
    /// crops are kept and skip the remaining criteria; with search text they
    /// are excluded.
    #[default]
    Legacy,
    /// The required crop excludes every other crop.
    Strict,
    /// The required crop only affects ordering.
    RankOnly,
}

/// Filter criteria. `None` means "any".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingFilter {
    pub search_text: String,
    pub required_crop: Option<CropType>,
    pub grade: Option<QualityGrade>,
    pub pesticide_profile: Option<PesticideProfile>,
    pub storage_condition: Option<StorageCondition>,
    pub available_month: Option<Month>,
    /// `None` defers to the session setting, or `Legacy` outside a session.
    pub smart_match: Option<SmartMatchMode>,
}

impl ListingFilter {
    /// True when no criterion restricts or reorders the input.
    pub fn is_unrestricted(&self) -> bool {
        self.search_text.is_empty()
            && self.required_crop.is_none()
            && self.grade.is_none()
            && self.pesticide_profile.is_none()
            && self.storage_condition.is_none()
            && self.available_month.is_none()
    }

    pub fn mode(&self) -> SmartMatchMode {
        self.smart_match.unwrap_or_default()
    }

    pub fn is_top_match(&self, listing: &CropListing) -> bool {
        self.required_crop == Some(listing.crop)
    }

    pub fn matches(&self, listing: &CropListing) -> bool {
        // matched as typed; whitespace-only text is still a search
        let needle = self.search_text.to_lowercase();
        let mode = self.mode();
        let crop_mismatch = self
            .required_crop
            .map(|crop| crop != listing.crop)
            .unwrap_or(false);

        if crop_mismatch && mode == SmartMatchMode::Legacy && needle.is_empty() {
            debug!(
                listing = %listing.id,
                crop = %listing.crop,
                "required crop bypassed: listing kept without applying other criteria"
            );
            return true;
        }
        if !needle.is_empty() && !listing.search_haystack().contains(&needle) {
            return false;
        }
        if crop_mismatch && mode != SmartMatchMode::RankOnly {
            return false;
        }
        if let Some(grade) = self.grade {
            if listing.grade != grade {
                return false;
            }
        }
        if let Some(profile) = self.pesticide_profile {
            if listing.pesticide_profile != profile {
                return false;
            }
        }
        if let Some(storage) = self.storage_condition {
            if listing.storage_condition != storage {
                return false;
            }
        }
        if let Some(month) = self.available_month {
            if listing.available_from.month() != month {
                return false;
            }
        }

        true
    }
}

/// A listing that passed the filter, tagged for smart-match display.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingMatch<'a> {
    pub listing: &'a CropListing,
    pub is_top_match: bool,
}

/// Filter output. `filter_applied` separates "nothing matched" from "nothing asked".
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredListings<'a> {
    pub matches: Vec<ListingMatch<'a>>,
    pub filter_applied: bool,
}

impl<'a> FilteredListings<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Filter was active and excluded everything.
    pub fn is_no_match(&self) -> bool {
        self.filter_applied && self.matches.is_empty()
    }

    pub fn listings(&self) -> impl Iterator<Item = &'a CropListing> + '_ {
        self.matches.iter().map(|m| m.listing)
    }
}

/// Filter listings and move top matches to the front, keeping relative order
/// within both groups.
pub fn filter_listings<'a>(
    listings: &'a [CropListing],
    filter: &ListingFilter,
) -> FilteredListings<'a> {
    let mut matches: Vec<ListingMatch<'a>> = listings
        .iter()
        .filter(|listing| filter.matches(listing))
        .map(|listing| ListingMatch {
            listing,
            is_top_match: filter.is_top_match(listing),
        })
        .collect();

    // sort_by_key is stable
    matches.sort_by_key(|m| !m.is_top_match);

    debug!(
        total = listings.len(),
        matched = matches.len(),
        required_crop = ?filter.required_crop,
        mode = ?filter.mode(),
        "filtered listings"
    );

    FilteredListings {
        matches,
        filter_applied: !filter.is_unrestricted(),
    }
}

/// Marketplace search box: matches crop, variety, farmer, location and district.
pub fn search_listings<'a>(listings: &'a [CropListing], text: &str) -> Vec<&'a CropListing> {
    let needle = text.to_lowercase();
    listings
        .iter()
        .filter(|listing| {
            needle.is_empty()
                || format!("{} {}", listing.search_haystack(), listing.district.to_lowercase())
                    .contains(&needle)
        })
        .collect()
}

/// Parse a month picker value. "All", "any" and blank mean no restriction.
pub fn parse_month(input: &str) -> Option<Month> {
    let trimmed = input.trim();
    if means_any(trimmed) {
        return None;
    }
    let mut month = Month::January;
    for _ in 0..12 {
        if month.to_string().eq_ignore_ascii_case(trimmed) {
            return Some(month);
        }
        month = month.next();
    }
    None
}

/// Parse an enum picker value where "All"/"any"/blank mean no restriction.
pub fn parse_choice<T: std::str::FromStr>(input: &str) -> Option<T> {
    let trimmed = input.trim();
    if means_any(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

fn means_any(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("any")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::seed::load_listings;

    fn ids(result: &FilteredListings<'_>) -> Vec<String> {
        result.listings().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn unrestricted_filter_keeps_order_without_top_matches() {
        let listings = load_listings().unwrap();
        let result = filter_listings(&listings, &ListingFilter::default());

        assert_eq!(result.len(), listings.len());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert!(result.matches.iter().all(|m| !m.is_top_match));
        assert!(!result.filter_applied);
    }

    #[test]
    fn required_crop_partitions_stably() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            required_crop: Some(CropType::Rice),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);

        assert_eq!(ids(&result), vec!["1", "6", "2", "3", "4", "5", "7", "8"]);
        assert!(result.matches[0].is_top_match && result.matches[1].is_top_match);
        assert!(result.matches[2..].iter().all(|m| !m.is_top_match));
    }

    #[test]
    fn legacy_mode_excludes_other_crops_once_search_text_is_present() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            search_text: "a".into(),
            required_crop: Some(CropType::Wheat),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);

        assert!(result.listings().all(|l| l.crop == CropType::Wheat));
        assert_eq!(ids(&result), vec!["2", "7"]);
    }

    #[test]
    fn legacy_bypass_skips_other_criteria_for_other_crops() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            required_crop: Some(CropType::Rice),
            grade: Some(QualityGrade::C),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);

        // both rice listings are grade A/B, so only non-rice survive via the bypass
        assert!(result.listings().all(|l| l.crop != CropType::Rice));
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn strict_mode_treats_crop_as_exclusion() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            required_crop: Some(CropType::Potato),
            smart_match: Some(SmartMatchMode::Strict),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);
        assert_eq!(ids(&result), vec!["4", "8"]);
        assert!(result.matches.iter().all(|m| m.is_top_match));
    }

    #[test]
    fn rank_only_mode_applies_other_criteria_to_everyone() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            required_crop: Some(CropType::Potato),
            pesticide_profile: Some(PesticideProfile::Organic),
            smart_match: Some(SmartMatchMode::RankOnly),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);
        assert_eq!(ids(&result), vec!["4", "1", "5"]);
    }

    #[test]
    fn month_and_storage_criteria() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            storage_condition: Some(StorageCondition::ColdStorage),
            available_month: Some(Month::March),
            ..Default::default()
        };
        assert_eq!(ids(&filter_listings(&listings, &filter)), vec!["2", "4", "8"]);
    }

    #[test]
    fn empty_result_is_distinct_from_no_filter() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            search_text: "no such farmer".into(),
            ..Default::default()
        };
        let result = filter_listings(&listings, &filter);
        assert!(result.is_empty());
        assert!(result.is_no_match());

        let none: Vec<CropListing> = Vec::new();
        let untouched = filter_listings(&none, &ListingFilter::default());
        assert!(untouched.is_empty());
        assert!(!untouched.is_no_match());
    }

    #[test]
    fn search_is_case_insensitive() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            search_text: "POKHARA".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_listings(&listings, &filter)), vec!["2"]);
    }

    #[test]
    fn marketplace_search_includes_district() {
        let listings = load_listings().unwrap();
        let hits: Vec<_> = search_listings(&listings, "kailali")
            .into_iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(hits, vec!["8"]);
        assert_eq!(search_listings(&listings, "").len(), listings.len());
    }

    #[test]
    fn whitespace_search_is_matched_literally() {
        let listings = load_listings().unwrap();
        assert!(search_listings(&listings, "  ").is_empty());
        // single spaces appear inside names and the joined haystack
        assert_eq!(search_listings(&listings, " ").len(), listings.len());
    }

    #[test]
    fn whitespace_search_does_not_trigger_crop_bypass() {
        let listings = load_listings().unwrap();
        let filter = ListingFilter {
            search_text: "  ".into(),
            required_crop: Some(CropType::Rice),
            ..Default::default()
        };
        assert!(!filter.is_unrestricted());
        let result = filter_listings(&listings, &filter);
        assert!(result.is_empty());
        assert!(result.is_no_match());
    }

    #[test]
    fn unset_mode_behaves_as_legacy() {
        let listings = load_listings().unwrap();
        let unset = ListingFilter {
            required_crop: Some(CropType::Millet),
            ..Default::default()
        };
        let legacy = ListingFilter {
            smart_match: Some(SmartMatchMode::Legacy),
            ..unset.clone()
        };
        assert_eq!(unset.mode(), SmartMatchMode::Legacy);
        assert_eq!(
            ids(&filter_listings(&listings, &unset)),
            ids(&filter_listings(&listings, &legacy))
        );
    }

    #[test]
    fn picker_values_parse() {
        assert_eq!(parse_month("april"), Some(Month::April));
        assert_eq!(parse_month("All"), None);
        assert_eq!(parse_month("Smarch"), None);
        assert_eq!(parse_choice::<QualityGrade>("B"), Some(QualityGrade::B));
        assert_eq!(parse_choice::<CropType>("any"), None);
    }
}
