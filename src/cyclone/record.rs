use std::fmt;

use anyhow::{Result, anyhow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormationDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for FormationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    TropicalDepression,
    TropicalStorm,
    SevereTropicalStorm,
    Typhoon,
    SevereTyphoon,
    SuperTyphoon,
}

impl Category {
    /// Strict `<` at every cutoff: a wind of exactly 63 km/h is a Tropical Storm.
    pub fn classify(max_wind_speed: f32) -> Self {
        if max_wind_speed < 63.0 {
            Self::TropicalDepression
        } else if max_wind_speed < 88.0 {
            Self::TropicalStorm
        } else if max_wind_speed < 118.0 {
            Self::SevereTropicalStorm
        } else if max_wind_speed < 150.0 {
            Self::Typhoon
        } else if max_wind_speed < 185.0 {
            Self::SevereTyphoon
        } else {
            Self::SuperTyphoon
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TropicalDepression => "Tropical Depression",
            Self::TropicalStorm => "Tropical Storm",
            Self::SevereTropicalStorm => "Severe Tropical Storm",
            Self::Typhoon => "Typhoon",
            Self::SevereTyphoon => "Severe Typhoon",
            Self::SuperTyphoon => "Super Typhoon",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Self::TropicalDepression => "TD",
            Self::TropicalStorm => "TS",
            Self::SevereTropicalStorm => "STS",
            Self::Typhoon => "TY",
            Self::SevereTyphoon => "STY",
            Self::SuperTyphoon => "Super TY",
        }
    }

    pub fn wind_range_label(self) -> &'static str {
        match self {
            Self::TropicalDepression => "< 63 km/h",
            Self::TropicalStorm => "63-87 km/h",
            Self::SevereTropicalStorm => "88-117 km/h",
            Self::Typhoon => "118-149 km/h",
            Self::SevereTyphoon => "150-184 km/h",
            Self::SuperTyphoon => "185+ km/h",
        }
    }

    pub fn all() -> [Self; 6] {
        [
            Self::TropicalDepression,
            Self::TropicalStorm,
            Self::SevereTropicalStorm,
            Self::Typhoon,
            Self::SevereTyphoon,
            Self::SuperTyphoon,
        ]
    }
}

/// Marker area for a seed, on the same `<` convention as [`Category::classify`].
pub fn seed_size(max_wind_speed: f32) -> f32 {
    if max_wind_speed < 63.0 {
        40.0
    } else if max_wind_speed < 88.0 {
        70.0
    } else if max_wind_speed < 118.0 {
        110.0
    } else if max_wind_speed < 150.0 {
        160.0
    } else if max_wind_speed < 185.0 {
        220.0
    } else {
        290.0
    }
}

#[derive(Clone, Debug)]
pub struct CycloneRecord {
    pub id: String,
    pub name: String,
    pub formation_date: FormationDate,
    pub max_wind_speed: f32,
    pub min_pressure: f32,
    pub category: Category,
    pub year: i32,
    pub is_prediction: bool,
}

impl CycloneRecord {
    pub fn new(
        id: String,
        name: String,
        formation_date: FormationDate,
        max_wind_speed: f32,
        min_pressure: f32,
        current_year: i32,
    ) -> Self {
        let year = formation_date.year;
        Self {
            id,
            name,
            formation_date,
            max_wind_speed,
            min_pressure,
            category: Category::classify(max_wind_speed),
            year,
            is_prediction: year > current_year,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("record {} has an empty name", self.id));
        }
        if !self.max_wind_speed.is_finite() || self.max_wind_speed < 0.0 {
            return Err(anyhow!(
                "record {} has invalid max wind speed {}",
                self.id,
                self.max_wind_speed
            ));
        }
        if !self.min_pressure.is_finite() {
            return Err(anyhow!("record {} has a non-finite pressure", self.id));
        }
        if self.formation_date.month == 0 || self.formation_date.month > 12 {
            return Err(anyhow!(
                "record {} has invalid month {}",
                self.id,
                self.formation_date.month
            ));
        }
        if self.formation_date.day == 0 || self.formation_date.day > 31 {
            return Err(anyhow!(
                "record {} has invalid day {}",
                self.id,
                self.formation_date.day
            ));
        }
        if self.year != self.formation_date.year {
            return Err(anyhow!(
                "record {} groups under year {} but formed in {}",
                self.id,
                self.year,
                self.formation_date.year
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(wind: f32, year: i32, current_year: i32) -> CycloneRecord {
        CycloneRecord::new(
            format!("{year}01"),
            "Yagi".to_owned(),
            FormationDate {
                year,
                month: 8,
                day: 12,
            },
            wind,
            945.0,
            current_year,
        )
    }

    #[test]
    fn classify_covers_every_boundary_with_strict_less_than() {
        assert_eq!(Category::classify(0.0), Category::TropicalDepression);
        assert_eq!(Category::classify(62.9), Category::TropicalDepression);
        assert_eq!(Category::classify(63.0), Category::TropicalStorm);
        assert_eq!(Category::classify(87.9), Category::TropicalStorm);
        assert_eq!(Category::classify(88.0), Category::SevereTropicalStorm);
        assert_eq!(Category::classify(117.9), Category::SevereTropicalStorm);
        assert_eq!(Category::classify(118.0), Category::Typhoon);
        assert_eq!(Category::classify(149.9), Category::Typhoon);
        assert_eq!(Category::classify(150.0), Category::SevereTyphoon);
        assert_eq!(Category::classify(184.9), Category::SevereTyphoon);
        assert_eq!(Category::classify(185.0), Category::SuperTyphoon);
        assert_eq!(Category::classify(320.0), Category::SuperTyphoon);
    }

    #[test]
    fn classify_is_total_over_sampled_speeds() {
        let mut speed = 0.0_f32;
        while speed < 400.0 {
            let category = Category::classify(speed);
            assert!(Category::all().contains(&category));
            speed += 0.5;
        }
    }

    #[test]
    fn seed_size_steps_match_category_cutoffs() {
        assert_eq!(seed_size(40.0), 40.0);
        assert_eq!(seed_size(63.0), 70.0);
        assert_eq!(seed_size(88.0), 110.0);
        assert_eq!(seed_size(118.0), 160.0);
        assert_eq!(seed_size(150.0), 220.0);
        assert_eq!(seed_size(185.0), 290.0);
        assert_eq!(seed_size(250.0), 290.0);
    }

    #[test]
    fn prediction_flag_tracks_current_year() {
        assert!(!record(120.0, 2024, 2026).is_prediction);
        assert!(!record(120.0, 2026, 2026).is_prediction);
        assert!(record(120.0, 2027, 2026).is_prediction);
    }

    #[test]
    fn validate_rejects_malformed_records() {
        let mut bad = record(120.0, 2024, 2026);
        bad.name = "  ".to_owned();
        assert!(bad.validate().is_err());

        let mut bad = record(120.0, 2024, 2026);
        bad.max_wind_speed = -5.0;
        assert!(bad.validate().is_err());

        let mut bad = record(120.0, 2024, 2026);
        bad.formation_date.month = 13;
        assert!(bad.validate().is_err());

        let mut bad = record(120.0, 2024, 2026);
        bad.year = 2023;
        assert!(bad.validate().is_err());

        assert!(record(120.0, 2024, 2026).validate().is_ok());
    }
}
