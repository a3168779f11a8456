//! Read-only market rate views.

use super::entities::{CropType, MarketRate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

impl Direction {
    pub fn of(change_pct: f64) -> Self {
        if change_pct >= 0.0 {
            Direction::Rising
        } else {
            Direction::Falling
        }
    }
}

/// Sparkline box size used by the pulse table.
pub const SPARKLINE_WIDTH: f64 = 80.0;
pub const SPARKLINE_HEIGHT: f64 = 32.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PulseRow {
    pub crop: CropType,
    pub emoji: &'static str,
    pub price_per_kg: f64,
    pub unit: String,
    pub change_pct: f64,
    pub direction: Direction,
    pub sparkline: Vec<(f64, f64)>,
}

impl PulseRow {
    /// Change formatted with an explicit sign, e.g. `+3.2%`.
    pub fn change_label(&self) -> String {
        match self.direction {
            Direction::Rising => format!("+{}%", self.change_pct),
            Direction::Falling => format!("{}%", self.change_pct),
        }
    }
}

/// Polyline points for `trend` inside a `width` × `height` box, y growing downwards.
pub fn sparkline_points(trend: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let Some(min) = trend.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = trend.iter().copied().fold(min, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let step = if trend.len() > 1 {
        width / (trend.len() - 1) as f64
    } else {
        0.0
    };

    trend
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64 * step, height - (value - min) / range * height))
        .collect()
}

pub fn pulse_rows(rates: &[MarketRate]) -> Vec<PulseRow> {
    rates
        .iter()
        .map(|rate| PulseRow {
            crop: rate.crop,
            emoji: rate.crop.emoji(),
            price_per_kg: rate.price_per_kg,
            unit: rate.unit.clone(),
            change_pct: rate.change_pct,
            direction: Direction::of(rate.change_pct),
            sparkline: sparkline_points(&rate.trend, SPARKLINE_WIDTH, SPARKLINE_HEIGHT),
        })
        .collect()
}

pub fn rate_for(rates: &[MarketRate], crop: CropType) -> Option<&MarketRate> {
    rates.iter().find(|rate| rate.crop == crop)
}

/// Rate with the largest positive change, if any crop is rising.
pub fn strongest_mover(rates: &[MarketRate]) -> Option<&MarketRate> {
    rates
        .iter()
        .filter(|rate| rate.change_pct > 0.0)
        .max_by(|a, b| {
            a.change_pct
                .partial_cmp(&b.change_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::seed::load_market_rates;

    #[test]
    fn maize_is_the_strongest_mover() {
        let rates = load_market_rates().unwrap();
        let mover = strongest_mover(&rates).unwrap();
        assert_eq!(mover.crop, CropType::Maize);
        assert_eq!(mover.change_pct, 5.1);
    }

    #[test]
    fn falling_rates_are_labelled_without_plus() {
        let rates = load_market_rates().unwrap();
        let rows = pulse_rows(&rates);
        let potato = rows.iter().find(|r| r.crop == CropType::Potato).unwrap();
        assert_eq!(potato.direction, Direction::Falling);
        assert_eq!(potato.change_label(), "-2.8%");
        let rice = rows.iter().find(|r| r.crop == CropType::Rice).unwrap();
        assert_eq!(rice.change_label(), "+3.2%");
        assert_eq!(rice.sparkline.len(), 7);
        assert_eq!(rice.emoji, "🌾");
    }

    #[test]
    fn sparkline_spans_the_box() {
        let points = sparkline_points(&[75.0, 78.0, 76.0, 80.0, 82.0, 79.0, 82.0], 60.0, 32.0);
        assert_eq!(points[0], (0.0, 32.0));
        assert_eq!(points[4], (40.0, 0.0));
        assert_eq!(points[6].0, 60.0);
    }

    #[test]
    fn flat_and_degenerate_trends() {
        assert_eq!(
            sparkline_points(&[5.0, 5.0], 80.0, 32.0),
            vec![(0.0, 32.0), (80.0, 32.0)]
        );
        assert_eq!(sparkline_points(&[5.0], 80.0, 32.0), vec![(0.0, 32.0)]);
        assert!(sparkline_points(&[], 80.0, 32.0).is_empty());
    }

    #[test]
    fn lookup_by_crop() {
        let rates = load_market_rates().unwrap();
        assert_eq!(rate_for(&rates, CropType::Wheat).map(|r| r.price_per_kg), Some(50.0));
    }
}
