//! Epoch flag
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown epoch flag \"{0}\"")]
    UnknownValue(String),
}

/// `EpochFlag` validates an epoch,
/// or describes possible events that occurred
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochFlag {
    /// Epoch is sane
    #[default]
    Ok,
    /// Power failure since previous epoch
    PowerFailure,
    /// Antenna is being moved at current epoch
    AntennaBeingMoved,
    /// Site has changed, received has moved since last epoch
    NewSiteOccupation,
    /// New information to come after this epoch
    HeaderInformationFollows,
    /// External event - significant event in this epoch
    ExternalEvent,
    /// Cycle slip at this epoch
    CycleSlip,
}

impl EpochFlag {
    /// Returns True if self is a valid epoch
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
    /// Event flags announce special records instead of satellite lines
    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::AntennaBeingMoved
                | Self::NewSiteOccupation
                | Self::HeaderInformationFollows
                | Self::ExternalEvent
        )
    }
}

impl FromStr for EpochFlag {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Ok),
            "1" => Ok(Self::PowerFailure),
            "2" => Ok(Self::AntennaBeingMoved),
            "3" => Ok(Self::NewSiteOccupation),
            "4" => Ok(Self::HeaderInformationFollows),
            "5" => Ok(Self::ExternalEvent),
            "6" => Ok(Self::CycleSlip),
            other => Err(Error::UnknownValue(other.to_string())),
        }
    }
}

impl std::fmt::Display for EpochFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let value = match self {
            Self::Ok => "0",
            Self::PowerFailure => "1",
            Self::AntennaBeingMoved => "2",
            Self::NewSiteOccupation => "3",
            Self::HeaderInformationFollows => "4",
            Self::ExternalEvent => "5",
            Self::CycleSlip => "6",
        };
        f.write_str(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn flag_parsing() {
        assert_eq!(EpochFlag::from_str("0"), Ok(EpochFlag::Ok));
        assert_eq!(EpochFlag::from_str("6"), Ok(EpochFlag::CycleSlip));
        assert!(EpochFlag::from_str("7").is_err());
        assert!(EpochFlag::from_str("").is_err());
        for value in 0..7 {
            let flag = EpochFlag::from_str(&value.to_string()).unwrap();
            assert_eq!(flag.to_string(), value.to_string());
            assert_eq!(flag.is_event(), (2..=5).contains(&value));
        }
        assert!(EpochFlag::default().is_ok());
    }
}
