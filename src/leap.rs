//! Describes `leap` second information, contained in `header`
use crate::{columns::columns, epoch::timescale_from_code};
use hifitime::TimeScale;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `Leap` to describe leap seconds.
/// GLO = UTC = GPS - ΔtLS
/// GPS = UTC + ΔtLS
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leap {
    /// current number
    pub leap: u32,
    /// ΔtLS : "future or past leap second(s)",
    /// actual number of leap seconds between GPS/GAL and GLO,
    /// or BDS and UTC.
    pub delta_tls: Option<u32>,
    /// weeks counter
    pub week: Option<u32>,
    /// days counter
    pub day: Option<u32>,
    pub timescale: Option<TimeScale>,
}

/// `Leap` parsing related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse leap integer number")]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error("unknown leap time system \"{0}\"")]
    TimeSystem(String),
}

impl Leap {
    /// Builds a new `Leap` object to describe leap seconds
    pub fn new(
        leap: u32,
        delta_tls: Option<u32>,
        week: Option<u32>,
        day: Option<u32>,
        timescale: Option<TimeScale>,
    ) -> Self {
        Self {
            leap,
            delta_tls,
            week,
            day,
            timescale,
        }
    }
}

fn optional_u32(content: &str) -> Result<Option<u32>, Error> {
    let content = content.trim();
    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content.parse::<u32>()?))
    }
}

impl std::str::FromStr for Leap {
    type Err = Error;
    /// Builds `Leap` from the standard 4xI6,A3 descriptor.
    /// Only the first field is mandatory.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let leap = columns(s, 0, 6).trim().parse::<u32>()?;
        let delta_tls = optional_u32(columns(s, 6, 12))?;
        let week = optional_u32(columns(s, 12, 18))?;
        let day = optional_u32(columns(s, 18, 24))?;

        let system = columns(s, 24, 60).trim();
        let timescale = match system {
            "" => None,
            "BDS" => Some(TimeScale::BDT),
            code => Some(timescale_from_code(code).ok_or(Error::TimeSystem(code.to_string()))?),
        };

        Ok(Self {
            leap,
            delta_tls,
            week,
            day,
            timescale,
        })
    }
}
