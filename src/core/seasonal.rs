use crate::models::CargoCategory;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Named pricing season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Harvest,
    Rainy,
    Planting,
    Standard,
}

/// A set of calendar months carrying one price multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalWindow {
    pub season: Season,
    pub months: Vec<u32>,
    pub multiplier: f64,
    /// Restricts the window to these categories; `None` applies to all
    #[serde(default)]
    pub categories: Option<Vec<CargoCategory>>,
}

impl SeasonalWindow {
    fn new(season: Season, months: &[u32], multiplier: f64) -> Self {
        Self {
            season,
            months: months.to_vec(),
            multiplier,
            categories: None,
        }
    }

    fn applies(&self, category: CargoCategory, month: u32) -> bool {
        self.months.contains(&month)
            && self
                .categories
                .as_ref()
                .map_or(true, |cats| cats.contains(&category))
    }
}

/// Seasonal multiplier plus the window that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    pub season: Season,
    pub multiplier: f64,
}

impl SeasonalAdjustment {
    pub const STANDARD: SeasonalAdjustment = SeasonalAdjustment {
        season: Season::Standard,
        multiplier: 1.0,
    };
}

/// Ordered seasonal windows; the first window covering a month wins.
///
/// December sits in both the rainy and planting windows. Rainy is checked
/// first, so December loads carry the 1.15 rainy premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalCalendar {
    pub windows: Vec<SeasonalWindow>,
}

impl SeasonalCalendar {
    pub fn new(windows: Vec<SeasonalWindow>) -> Self {
        Self { windows }
    }

    pub fn adjustment<D: Datelike>(&self, category: CargoCategory, date: &D) -> SeasonalAdjustment {
        let month = date.month();
        self.windows
            .iter()
            .find(|window| window.applies(category, month))
            .map(|window| SeasonalAdjustment {
                season: window.season,
                multiplier: window.multiplier,
            })
            .unwrap_or(SeasonalAdjustment::STANDARD)
    }

    #[inline]
    pub fn multiplier<D: Datelike>(&self, category: CargoCategory, date: &D) -> f64 {
        self.adjustment(category, date).multiplier
    }
}

impl Default for SeasonalCalendar {
    fn default() -> Self {
        Self::new(vec![
            SeasonalWindow::new(Season::Harvest, &[4, 5, 6], 0.90),
            SeasonalWindow::new(Season::Rainy, &[12, 1, 2, 3], 1.15),
            SeasonalWindow::new(Season::Planting, &[11, 12], 1.10),
        ])
    }
}

/// Multiplier from the default calendar
pub fn get_seasonal_multiplier<D: Datelike>(category: CargoCategory, date: &D) -> f64 {
    SeasonalCalendar::default().multiplier(category, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 15).unwrap()
    }

    #[test]
    fn test_harvest_rainy_standard() {
        for category in CargoCategory::ALL {
            assert_eq!(get_seasonal_multiplier(category, &month(5)), 0.90);
            assert_eq!(get_seasonal_multiplier(category, &month(1)), 1.15);
            assert_eq!(get_seasonal_multiplier(category, &month(7)), 1.00);
        }
    }

    #[test]
    fn test_every_month() {
        let expected = [1.15, 1.15, 1.15, 0.90, 0.90, 0.90, 1.0, 1.0, 1.0, 1.0, 1.10, 1.15];
        for (i, want) in expected.iter().enumerate() {
            let got = get_seasonal_multiplier(CargoCategory::General, &month(i as u32 + 1));
            assert_eq!(got, *want, "month {}", i + 1);
        }
    }

    #[test]
    fn test_december_prefers_rainy() {
        let adj = SeasonalCalendar::default().adjustment(CargoCategory::Maize, &month(12));
        assert_eq!(adj.season, Season::Rainy);
        assert_eq!(adj.multiplier, 1.15);
    }

    #[test]
    fn test_category_scoped_window() {
        let mut harvest = SeasonalWindow::new(Season::Harvest, &[4, 5, 6], 0.85);
        harvest.categories = Some(vec![CargoCategory::Maize, CargoCategory::Tobacco]);
        let calendar = SeasonalCalendar::new(vec![harvest]);

        assert_eq!(calendar.multiplier(CargoCategory::Maize, &month(5)), 0.85);
        assert_eq!(calendar.multiplier(CargoCategory::Fuel, &month(5)), 1.0);
        assert_eq!(
            calendar.adjustment(CargoCategory::Fuel, &month(5)).season,
            Season::Standard
        );
    }
}
