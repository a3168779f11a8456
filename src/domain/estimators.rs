//! Farmer-side planning tools: harvest date and yield estimates.

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use super::entities::{iso_date, CropType};

/// Weather outlook applied on top of a crop's normal growth period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Normal,
    UnusualCold,
    HeavyRain,
    Drought,
    ExtendedMonsoon,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 5] = [
        WeatherCondition::Normal,
        WeatherCondition::UnusualCold,
        WeatherCondition::HeavyRain,
        WeatherCondition::Drought,
        WeatherCondition::ExtendedMonsoon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Normal => "Normal",
            WeatherCondition::UnusualCold => "Unusual Cold",
            WeatherCondition::HeavyRain => "Heavy Rain",
            WeatherCondition::Drought => "Drought",
            WeatherCondition::ExtendedMonsoon => "Extended Monsoon",
        }
    }

    pub fn offset_days(&self) -> i64 {
        match self {
            WeatherCondition::Normal => 0,
            WeatherCondition::UnusualCold => 5,
            WeatherCondition::HeavyRain => 7,
            WeatherCondition::Drought => -3,
            WeatherCondition::ExtendedMonsoon => 10,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilQuality {
    Poor,
    Average,
    #[default]
    Good,
    Excellent,
}

impl SoilQuality {
    pub const ALL: [SoilQuality; 4] = [
        SoilQuality::Poor,
        SoilQuality::Average,
        SoilQuality::Good,
        SoilQuality::Excellent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SoilQuality::Poor => "Poor",
            SoilQuality::Average => "Average",
            SoilQuality::Good => "Good",
            SoilQuality::Excellent => "Excellent",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            SoilQuality::Poor => 0.6,
            SoilQuality::Average => 0.85,
            SoilQuality::Good => 1.0,
            SoilQuality::Excellent => 1.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HarvestEstimate {
    pub harvest_date: Date,
    pub base_days: i64,
    pub adjustment_days: i64,
    pub weather: WeatherCondition,
}

impl HarvestEstimate {
    pub fn total_days(&self) -> i64 {
        self.base_days + self.adjustment_days
    }
}

/// `plant_date + growth days + weather offset`. No date, no estimate.
pub fn estimate_harvest_date(
    crop: CropType,
    plant_date: Option<Date>,
    weather: WeatherCondition,
) -> Option<HarvestEstimate> {
    let plant_date = plant_date?;
    let base_days = crop.growth_days();
    let adjustment_days = weather.offset_days();
    let harvest_date = plant_date.checked_add(Duration::days(base_days + adjustment_days))?;

    Some(HarvestEstimate {
        harvest_date,
        base_days,
        adjustment_days,
        weather,
    })
}

/// Same as [`estimate_harvest_date`] but takes the form inputs as entered:
/// a `YYYY-MM-DD` date and an optional variety that must belong to the crop.
pub fn estimate_harvest_from_input(
    crop: CropType,
    variety: Option<&str>,
    plant_date: &str,
    weather: WeatherCondition,
) -> Option<HarvestEstimate> {
    if let Some(variety) = variety {
        if !crop.has_variety(variety) {
            return None;
        }
    }
    estimate_harvest_date(crop, iso_date::parse(plant_date), weather)
}

#[derive(Clone, Debug, PartialEq)]
pub struct YieldEstimate {
    pub estimated_kg: u64,
    pub base_kg_per_ha: f64,
    pub field_size_ha: f64,
    pub soil: SoilQuality,
}

/// `field size × base yield × soil multiplier`, rounded to whole kg.
/// Non-positive or non-finite field sizes produce no estimate.
pub fn estimate_yield(
    crop: CropType,
    field_size_ha: f64,
    soil: SoilQuality,
) -> Option<YieldEstimate> {
    if !field_size_ha.is_finite() || field_size_ha <= 0.0 {
        return None;
    }
    let base_kg_per_ha = crop.base_yield_kg_per_ha();
    let estimated = (field_size_ha * base_kg_per_ha * soil.multiplier()).round();

    Some(YieldEstimate {
        estimated_kg: estimated as u64,
        base_kg_per_ha,
        field_size_ha,
        soil,
    })
}

pub fn estimate_yield_from_input(
    crop: CropType,
    field_size: &str,
    soil: SoilQuality,
) -> Option<YieldEstimate> {
    let size = field_size.trim().parse::<f64>().ok()?;
    estimate_yield(crop, size, soil)
}
