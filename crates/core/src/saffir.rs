//! Saffir-Simpson categories from sustained wind speed.

/// Saffir-Simpson hurricane scale, plus the sub-hurricane classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SaffirCategory {
    TropicalDepression,
    TropicalStorm,
    Cat1,
    Cat2,
    Cat3,
    Cat4,
    Cat5,
}

/// Category thresholds, highest first, with minimum wind speed in mph.
const THRESHOLDS: &[(SaffirCategory, f64)] = &[
    (SaffirCategory::Cat5, 157.0),
    (SaffirCategory::Cat4, 130.0),
    (SaffirCategory::Cat3, 111.0),
    (SaffirCategory::Cat2, 96.0),
    (SaffirCategory::Cat1, 74.0),
    (SaffirCategory::TropicalStorm, 39.0),
];

const MPH_PER_MPS: f64 = 2.236_936;

impl SaffirCategory {
    /// Category for a wind speed in mph.
    pub fn from_mph(wind_mph: f64) -> Self {
        for &(cat, min_mph) in THRESHOLDS {
            if wind_mph >= min_mph {
                return cat;
            }
        }
        SaffirCategory::TropicalDepression
    }

    /// Category for a wind speed in m/s.
    pub fn from_mps(wind_mps: f64) -> Self {
        Self::from_mph(wind_mps * MPH_PER_MPS)
    }

    /// Short label, e.g. "3" or "TS".
    pub fn label(&self) -> &'static str {
        match self {
            SaffirCategory::TropicalDepression => "TD",
            SaffirCategory::TropicalStorm => "TS",
            SaffirCategory::Cat1 => "1",
            SaffirCategory::Cat2 => "2",
            SaffirCategory::Cat3 => "3",
            SaffirCategory::Cat4 => "4",
            SaffirCategory::Cat5 => "5",
        }
    }
}
