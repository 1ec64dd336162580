//! Signal strength indication
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, PartialEq, Debug, Clone)]
pub enum Error {
    #[error("invalid signal strength indicator {0}")]
    InvalidSNRCode(u8),
}

/// Signal to noise ratio buckets, as encoded by the
/// single digit signal strength indicator of each observation.
#[derive(Default, PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SNR {
    /// SNR ~= 0 dB/Hz
    DbHz0,
    /// SNR < 12 dB/Hz
    DbHz12,
    /// 12 dB/Hz <= SNR < 17 dB/Hz
    DbHz12_17,
    /// 18 dB/Hz <= SNR < 23 dB/Hz
    DbHz18_23,
    /// 24 dB/Hz <= SNR < 29 dB/Hz
    #[default]
    DbHz24_29,
    /// 30 dB/Hz <= SNR < 35 dB/Hz
    DbHz30_35,
    /// 36 dB/Hz <= SNR < 41 dB/Hz
    DbHz36_41,
    /// 42 dB/Hz <= SNR < 47 dB/Hz
    DbHz42_47,
    /// 48 dB/Hz <= SNR < 53 dB/Hz
    DbHz48_53,
    /// SNR >= 54 dB/Hz
    DbHz54,
}

impl TryFrom<u8> for SNR {
    type Error = Error;
    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Self::DbHz0),
            1 => Ok(Self::DbHz12),
            2 => Ok(Self::DbHz12_17),
            3 => Ok(Self::DbHz18_23),
            4 => Ok(Self::DbHz24_29),
            5 => Ok(Self::DbHz30_35),
            6 => Ok(Self::DbHz36_41),
            7 => Ok(Self::DbHz42_47),
            8 => Ok(Self::DbHz48_53),
            9 => Ok(Self::DbHz54),
            _ => Err(Error::InvalidSNRCode(digit)),
        }
    }
}

impl std::fmt::LowerExp for SNR {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let descriptor = match self {
            Self::DbHz0 => "<< 12 dB",
            Self::DbHz12 => "< 12 dB",
            Self::DbHz12_17 => "[12, 17[ dB",
            Self::DbHz18_23 => "[18, 23[ dB",
            Self::DbHz24_29 => "[24, 29[ dB",
            Self::DbHz30_35 => "[30, 35[ dB",
            Self::DbHz36_41 => "[36, 41[ dB",
            Self::DbHz42_47 => "[42, 47[ dB",
            Self::DbHz48_53 => "[48, 53[ dB",
            Self::DbHz54 => "> 54 dB",
        };
        f.write_str(descriptor)
    }
}

impl SNR {
    /// Returns true if this is considered a strong signal
    pub fn strong(self) -> bool {
        self >= Self::DbHz30_35
    }
    /// Returns true if this is considered a weak signal
    pub fn weak(self) -> bool {
        self < Self::DbHz30_35
    }
}
