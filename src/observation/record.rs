//! Decoded observations
use crate::{
    observation::{LliFlags, SNR},
    prelude::{Constellation, Epoch, EpochFlag, Observable, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one epoch: a sampling instant and its flag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsKey {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// [EpochFlag] describing sampling conditions
    pub flag: EpochFlag,
}

/// Epoch, as described by an epoch line
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsEpoch {
    pub key: ObsKey,
    /// Number of satellites (or special records) announced
    pub num_sat: u16,
    /// Receiver clock offset, in seconds
    pub clock_offset: Option<f64>,
}

impl ObsEpoch {
    /// Epoch with no satellite announced
    pub fn new(key: ObsKey) -> Self {
        Self {
            key,
            num_sat: 0,
            clock_offset: None,
        }
    }
}

/// Decoded (value, lock loss, signal strength) triplet.
/// Every part is optional, a blank field decodes to None.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationValue {
    /// Observed value
    pub value: Option<f64>,
    /// Lock loss indicator digit
    pub lli: Option<u8>,
    /// Signal strength indicator digit
    pub snr: Option<u8>,
}

impl ObservationValue {
    /// Returns true if nothing was decoded
    pub fn is_absent(&self) -> bool {
        self.value.is_none() && self.lli.is_none() && self.snr.is_none()
    }
    /// Lock loss indicator, interpreted
    pub fn lli_flags(&self) -> Option<LliFlags> {
        self.lli.map(LliFlags::from_bits_truncate)
    }
    /// Signal strength indicator, interpreted
    pub fn snr_bucket(&self) -> Option<SNR> {
        self.snr.and_then(|digit| SNR::try_from(digit).ok())
    }
}

/// Unique identifier of an [ObservationRecord]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordKey {
    pub epoch: ObsKey,
    pub constellation: Constellation,
    pub sv: SV,
    pub observable: Observable,
}

/// One observation code, for one satellite, at one epoch
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationRecord {
    pub key: RecordKey,
    pub value: ObservationValue,
}

impl ObservationRecord {
    pub fn new(epoch: ObsKey, sv: SV, observable: Observable, value: ObservationValue) -> Self {
        Self {
            key: RecordKey {
                epoch,
                constellation: sv.constellation,
                sv,
                observable,
            },
            value,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn observation_flags() {
        let value = ObservationValue {
            value: Some(1.0),
            lli: Some(1),
            snr: Some(7),
        };
        assert!(!value.is_absent());
        assert_eq!(value.lli_flags(), Some(LliFlags::LOCK_LOSS));
        assert_eq!(value.snr_bucket(), Some(SNR::DbHz42_47));
        assert!(ObservationValue::default().is_absent());
        assert!(ObservationValue::default().snr_bucket().is_none());
    }
}
