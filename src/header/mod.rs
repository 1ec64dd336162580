//! Describes a `RINEX` header, includes
//! rinex header parser and associated methods
use crate::{
    constellation::letter,
    hardware::{Antenna, Receiver},
    leap::Leap,
    marker::GeodeticMarker,
    observation::SchemaRegistry,
    prelude::{Constellation, Duration, Epoch, TimeScale},
    types::Type,
    version::Version,
};

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod parsing;

pub(crate) use parsing::{Continuation, HeaderParser, HeaderStep};

/// Describes `RINEX` file header
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// revision for this `RINEX`
    pub version: Version,
    /// type of `RINEX` file
    pub rinex_type: Type,
    /// specific `GNSS` constellation system,
    /// [Constellation::Mixed] for multi constellation files
    pub constellation: Option<Constellation>,
    /// program name
    pub program: Option<String>,
    /// program `run by`
    pub run_by: Option<String>,
    /// program's `date`
    pub date: Option<String>,
    /// observer name
    pub observer: Option<String>,
    /// observer's agency
    pub agency: Option<String>,
    /// Possible Geodetic Marker
    pub geodetic_marker: Option<GeodeticMarker>,
    /// optionnal receiver infos
    pub rcvr: Option<Receiver>,
    /// optionnal receiver antenna infos
    pub rcvr_antenna: Option<Antenna>,
    /// Approximate receiver position, ECEF in meters
    pub rx_position: Option<(f64, f64, f64)>,
    /// optionnal leap seconds infos
    pub leap: Option<Leap>,
    /// Optional sampling interval
    pub sampling_interval: Option<Duration>,
    /// Number of satellites with observations, as declared
    pub num_satellites: Option<u32>,
    /// Time of first observation, also sets the record [TimeScale]
    pub timeof_first_obs: Option<Epoch>,
    /// Time of last observation
    pub timeof_last_obs: Option<Epoch>,
    /// Unit of the signal strength observations, like "DBHZ"
    pub signal_strength_unit: Option<String>,
    /// True if receiver clock offsets were applied
    /// to epochs, code and phase observations
    pub clock_offset_applied: bool,
    /// True when the header was closed by "END OF HEADER"
    pub explicit_end: bool,
    /// Header comments, in order of appearance
    pub comments: Vec<String>,
    /// Observation schema, frozen at the end of the header
    pub(crate) registry: Arc<SchemaRegistry>,
}

impl Header {
    /// Observation schema declared by this header
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }
    /// [TimeScale] in which epochs of this section are expressed.
    /// "TIME OF FIRST OBS" prevails, then the file constellation,
    /// GPS time otherwise.
    pub fn timescale(&self) -> TimeScale {
        if let Some(t0) = self.timeof_first_obs {
            return t0.time_scale;
        }
        default_timescale(self.constellation)
    }
    /// Constellation descriptor, as a single letter
    pub fn constellation_letter(&self) -> Option<char> {
        self.constellation.map(letter)
    }
}

/// [TimeScale] to use when the time system was not specified
pub(crate) fn default_timescale(constellation: Option<Constellation>) -> TimeScale {
    match constellation {
        Some(Constellation::Galileo) => TimeScale::GST,
        Some(Constellation::BeiDou) => TimeScale::BDT,
        Some(Constellation::Glonass) => TimeScale::UTC,
        _ => TimeScale::GPST,
    }
}
