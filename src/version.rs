//! `RINEX` revision description
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latest `RINEX` revision this decoder fully understands
pub const SUPPORTED_VERSION: Version = Version { major: 4, minor: 0 };

/// Version is used to describe RINEX standards revisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number
    pub minor: u8,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParsingError {
    #[error("empty version descriptor")]
    Empty,
    #[error("failed to parse version")]
    ParseIntError(#[from] std::num::ParseIntError),
}

impl Default for Version {
    fn default() -> Self {
        SUPPORTED_VERSION
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> Self {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParsingError::Empty);
        }
        match s.split_once('.') {
            Some((major, minor)) => {
                let minor = minor.trim();
                Ok(Self {
                    major: major.trim().parse::<u8>()?,
                    minor: if minor.is_empty() {
                        0
                    } else {
                        minor.parse::<u8>()?
                    },
                })
            },
            None => Ok(Self {
                major: s.parse::<u8>()?,
                minor: 0,
            }),
        }
    }
}

impl Version {
    /// Builds a new `Version` object
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns true if this version is supported
    pub fn is_supported(&self) -> bool {
        *self <= SUPPORTED_VERSION
    }
    /// Returns true for pre V3 revisions, which use the legacy layout
    pub fn is_legacy(&self) -> bool {
        self.major < 3
    }
}
