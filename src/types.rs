//! `RINEX` types description
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown RINEX type \"{0}\"")]
pub struct Error(pub String);

/// Describes `RINEX` file types, as found in "RINEX VERSION / TYPE".
/// Only [Type::ObservationData] content is decoded by this crate,
/// other types are identified so they can be reported.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// Describes Observation Data (OBS),
    /// Phase & Pseudo range measurements
    #[default]
    ObservationData,
    /// Describes Navigation Data (NAV)
    NavigationData,
    /// Describes Meteorological data (MET)
    MeteoData,
    /// Clock Data (CLK)
    ClockData,
}

impl std::fmt::Display for Type {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ObservationData => write!(fmt, "OBSERVATION DATA"),
            Self::NavigationData => write!(fmt, "NAVIGATION DATA"),
            Self::MeteoData => write!(fmt, "METEOROLOGICAL DATA"),
            Self::ClockData => write!(fmt, "CLOCK DATA"),
        }
    }
}

impl std::str::FromStr for Type {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // first letter is enough in V3+, older revisions spell it out
        if s.eq("O") || s.starts_with("OBSERVATION DATA") {
            Ok(Self::ObservationData)
        } else if s.eq("N") || s.starts_with("NAVIGATION DATA") || s.contains("NAV DATA") {
            Ok(Self::NavigationData)
        } else if s.eq("M") || s.starts_with("METEOROLOGICAL DATA") {
            Ok(Self::MeteoData)
        } else if s.eq("C") || s.starts_with("CLOCK DATA") {
            Ok(Self::ClockData)
        } else {
            Err(Error(s.to_string()))
        }
    }
}
