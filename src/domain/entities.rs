use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

/// Crops traded on the marketplace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    Rice,
    Maize,
    Wheat,
    Potato,
    Millet,
}

impl CropType {
    pub const ALL: [CropType; 5] = [
        CropType::Rice,
        CropType::Maize,
        CropType::Wheat,
        CropType::Potato,
        CropType::Millet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CropType::Rice => "Rice",
            CropType::Maize => "Maize",
            CropType::Wheat => "Wheat",
            CropType::Potato => "Potato",
            CropType::Millet => "Millet",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CropType::Rice => "🌾",
            CropType::Maize => "🌽",
            CropType::Wheat => "🌿",
            CropType::Potato => "🥔",
            CropType::Millet => "🫘",
        }
    }

    /// Days from planting to harvest under normal weather.
    pub fn growth_days(&self) -> i64 {
        match self {
            CropType::Rice => 120,
            CropType::Maize => 90,
            CropType::Wheat => 110,
            CropType::Potato => 80,
            CropType::Millet => 100,
        }
    }

    /// Expected yield in kg per hectare on good soil.
    pub fn base_yield_kg_per_ha(&self) -> f64 {
        match self {
            CropType::Rice => 4500.0,
            CropType::Maize => 3200.0,
            CropType::Wheat => 3800.0,
            CropType::Potato => 15000.0,
            CropType::Millet => 2000.0,
        }
    }

    /// Varieties farmers may list for this crop.
    pub fn varieties(&self) -> &'static [&'static str] {
        match self {
            CropType::Rice => &["Basmati", "Mansuli", "Radha-4", "Sabitri", "Hardinath-1"],
            CropType::Maize => &["Rampur Composite", "Arun-2", "Manakamana-3", "Deuti"],
            CropType::Wheat => &["NL-971", "Vijay", "Gautam", "Aditya"],
            CropType::Potato => &["Janakdev", "Kufri Jyoti", "Cardinal", "Desiree"],
            CropType::Millet => &["Dalle", "Okhle", "Kabre Kodo-1", "Sailung"],
        }
    }

    pub fn has_variety(&self, variety: &str) -> bool {
        self.varieties()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(variety.trim()))
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CropType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &CropType::ALL, CropType::label, "crop")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub const ALL: [QualityGrade; 3] = [QualityGrade::A, QualityGrade::B, QualityGrade::C];

    pub fn label(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityGrade {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &QualityGrade::ALL, QualityGrade::label, "grade")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PesticideProfile {
    Organic,
    #[serde(rename = "Low-Pesticide")]
    LowPesticide,
    Conventional,
}

impl PesticideProfile {
    pub const ALL: [PesticideProfile; 3] = [
        PesticideProfile::Organic,
        PesticideProfile::LowPesticide,
        PesticideProfile::Conventional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PesticideProfile::Organic => "Organic",
            PesticideProfile::LowPesticide => "Low-Pesticide",
            PesticideProfile::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for PesticideProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PesticideProfile {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &PesticideProfile::ALL, PesticideProfile::label, "pesticide profile")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageCondition {
    #[serde(rename = "Cold Storage")]
    ColdStorage,
    #[serde(rename = "Dry Warehouse")]
    DryWarehouse,
    #[serde(rename = "Open Air")]
    OpenAir,
}

impl StorageCondition {
    pub const ALL: [StorageCondition; 3] = [
        StorageCondition::ColdStorage,
        StorageCondition::DryWarehouse,
        StorageCondition::OpenAir,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StorageCondition::ColdStorage => "Cold Storage",
            StorageCondition::DryWarehouse => "Dry Warehouse",
            StorageCondition::OpenAir => "Open Air",
        }
    }
}

impl fmt::Display for StorageCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StorageCondition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &StorageCondition::ALL, StorageCondition::label, "storage condition")
    }
}

/// Returned when text does not name a known enum value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

fn parse_label<T: Copy>(
    input: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
    kind: &'static str,
) -> Result<T, UnknownVariant> {
    let trimmed = input.trim();
    all.iter()
        .copied()
        .find(|candidate| label(candidate).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownVariant {
            kind,
            value: input.to_string(),
        })
}

/// A district and its market town.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub district: &'static str,
    pub location: &'static str,
}

/// Districts sellers list from.
pub const LOCATIONS: [Location; 12] = [
    Location {
        district: "Chitwan",
        location: "Bharatpur",
    },
    Location {
        district: "Kaski",
        location: "Pokhara",
    },
    Location {
        district: "Rupandehi",
        location: "Butwal",
    },
    Location {
        district: "Morang",
        location: "Biratnagar",
    },
    Location {
        district: "Jhapa",
        location: "Birtamod",
    },
    Location {
        district: "Sunsari",
        location: "Dharan",
    },
    Location {
        district: "Bara",
        location: "Kalaiya",
    },
    Location {
        district: "Parsa",
        location: "Birgunj",
    },
    Location {
        district: "Banke",
        location: "Nepalgunj",
    },
    Location {
        district: "Kailali",
        location: "Dhangadhi",
    },
    Location {
        district: "Dang",
        location: "Ghorahi",
    },
    Location {
        district: "Kapilvastu",
        location: "Taulihawa",
    },
];

/// One farmer's offer of a crop. `reserved_kg` never exceeds `quantity_kg`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropListing {
    pub id: String,
    pub farmer_id: String,
    pub farmer_name: String,
    pub crop: CropType,
    pub variety: String,
    pub grade: QualityGrade,
    pub pesticide_profile: PesticideProfile,
    pub storage_condition: StorageCondition,
    pub location: String,
    pub district: String,
    pub quantity_kg: u64,
    pub reserved_kg: u64,
    pub price_per_kg: f64,
    #[serde(with = "iso_date")]
    pub harvest_date: Date,
    #[serde(with = "iso_date")]
    pub available_from: Date,
    #[serde(with = "iso_date")]
    pub available_to: Date,
    #[serde(with = "iso_date")]
    pub plant_date: Date,
}

impl CropListing {
    pub fn available_kg(&self) -> u64 {
        self.quantity_kg.saturating_sub(self.reserved_kg)
    }

    /// Share of the listing already reserved, 0..=100. An empty listing reports 0.
    pub fn reserved_percent(&self) -> f64 {
        if self.quantity_kg == 0 {
            return 0.0;
        }
        self.reserved_kg as f64 / self.quantity_kg as f64 * 100.0
    }

    pub fn origin(&self) -> String {
        format!("{}, {}", self.location, self.district)
    }

    /// Text the buyer-side search box matches against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.crop, self.variety, self.farmer_name, self.location
        )
        .to_lowercase()
    }
}

/// Wholesale price and seven-sample trend for one crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRate {
    pub crop: CropType,
    pub price_per_kg: f64,
    /// Percent change over the trend window.
    #[serde(rename = "change")]
    pub change_pct: f64,
    pub trend: Vec<f64>,
    pub unit: String,
}

impl MarketRate {
    pub const TREND_SAMPLES: usize = 7;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticsParams {
    pub cost_per_kg: f64,
    pub transport_mode: String,
    pub transit_days_min: u8,
    pub transit_days_max: u8,
}

impl Default for LogisticsParams {
    fn default() -> Self {
        Self {
            cost_per_kg: 2.5,
            transport_mode: "Road (Truck)".to_string(),
            transit_days_min: 2,
            transit_days_max: 4,
        }
    }
}

/// `YYYY-MM-DD` dates as used throughout the seed data.
pub mod iso_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

    pub const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn parse(value: &str) -> Option<Date> {
        Date::parse(value.trim(), FORMAT).ok()
    }

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, FORMAT).map_err(de::Error::custom)
    }
}
