//! Observation codes
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("malformed observable \"{0}\"")]
    MalformedDescriptor(String),
}

/// Measurement family an [Observable] belongs to.
/// Selects the default field width on data lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservableKind {
    /// Carrier phase, in cycles
    Phase,
    /// Doppler shift, in Hz
    Doppler,
    /// Signal strength
    SSI,
    /// Pseudo range, in meters
    PseudoRange,
}

/// Observable describes one observation code declared in the header,
/// for instance "C1C" or "L1C". Declaration order defines
/// the field position on each satellite line.
#[derive(Debug, Clone, PartialEq, PartialOrd, Hash, Ord, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Observable {
    /// Carrier phase observation
    Phase(String),
    /// Doppler shift observation
    Doppler(String),
    /// SSI observation
    SSI(String),
    /// Pseudo range observation
    PseudoRange(String),
    /// Well formed code this decoder has no measurement family for
    /// (for example GLONASS channel numbers "X1").
    Unknown(String),
}

impl Default for Observable {
    fn default() -> Self {
        Self::Phase("L1C".to_string())
    }
}

impl Observable {
    pub fn is_phase_observable(&self) -> bool {
        matches!(self, Self::Phase(_))
    }
    pub fn is_pseudorange_observable(&self) -> bool {
        matches!(self, Self::PseudoRange(_))
    }
    pub fn is_doppler_observable(&self) -> bool {
        matches!(self, Self::Doppler(_))
    }
    pub fn is_ssi_observable(&self) -> bool {
        matches!(self, Self::SSI(_))
    }
    /// Returns the code, as declared in the header
    pub fn code(&self) -> &str {
        match self {
            Self::Phase(c)
            | Self::Doppler(c)
            | Self::SSI(c)
            | Self::PseudoRange(c)
            | Self::Unknown(c) => c,
        }
    }
    /// Returns the measurement family, if known
    pub fn kind(&self) -> Option<ObservableKind> {
        match self {
            Self::Phase(_) => Some(ObservableKind::Phase),
            Self::Doppler(_) => Some(ObservableKind::Doppler),
            Self::SSI(_) => Some(ObservableKind::SSI),
            Self::PseudoRange(_) => Some(ObservableKind::PseudoRange),
            Self::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Observable {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let content = content.trim();
        let len = content.len();
        if !(2..=3).contains(&len) || !content.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::MalformedDescriptor(content.to_string()));
        }
        let code = content.to_uppercase();
        match code.chars().next() {
            Some('L') => Ok(Self::Phase(code)),
            Some('C') | Some('P') => Ok(Self::PseudoRange(code)),
            Some('D') => Ok(Self::Doppler(code)),
            Some('S') => Ok(Self::SSI(code)),
            _ => Ok(Self::Unknown(code)),
        }
    }
}
