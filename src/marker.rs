//! Geodetic marker description
use strum::EnumString;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticMarker {
    /// Marker name
    pub name: String,
    /// Marker number, as found in "MARKER NUMBER"
    pub number: Option<String>,
    /// Marker type
    pub marker_type: Option<MarkerType>,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkerType {
    /// Earth fixed & high precision
    #[strum(serialize = "GEODETIC", serialize = "Geodetic")]
    #[default]
    Geodetic,
    /// Earth fixed & low precision
    #[strum(serialize = "NON_GEODETIC", serialize = "NON GEODETIC")]
    NonGeodetic,
    /// Generated from network
    #[strum(serialize = "NON_PHYSICAL", serialize = "NON PHYSICAL")]
    NonPhysical,
    /// Orbiting space vehicle
    #[strum(serialize = "SPACEBORNE", serialize = "SPACE BORNE")]
    Spaceborne,
    /// Aircraft, balloon..
    #[strum(serialize = "AIRBORNE", serialize = "AIR BORNE")]
    Airborne,
    /// Mobile water craft
    #[strum(serialize = "WATER_CRAFT", serialize = "WATER CRAFT")]
    Watercraft,
    /// Mobile terrestrial vehicle
    #[strum(serialize = "GROUND_CRAFT", serialize = "GROUND CRAFT")]
    Groundcraft,
    /// Fixed on water surface
    #[strum(serialize = "FIXED_BUOY", serialize = "FIXED BUOY")]
    FixedBuoy,
    /// Floating on water surface
    #[strum(serialize = "FLOATING_BUOY", serialize = "FLOATING BUOY")]
    FloatingBuoy,
    /// Floating on ice
    #[strum(serialize = "FLOATING_ICE", serialize = "FLOATING ICE")]
    FloatingIce,
    /// Fixed on glacier
    #[strum(serialize = "GLACIER")]
    Glacier,
    /// Rockets, shells, etc..
    #[strum(serialize = "BALLISTIC")]
    Ballistic,
    /// Animal carrying a receiver
    #[strum(serialize = "ANIMAL")]
    Animal,
    /// Human being carrying a receiver
    #[strum(serialize = "HUMAN")]
    Human,
}

impl GeodeticMarker {
    /// Returns a GeodeticMarker with given "name".
    pub fn with_name(&self, name: &str) -> Self {
        let mut s = self.clone();
        s.name = name.to_string();
        s
    }
    /// Returns a GeodeticMarker with given "number".
    pub fn with_number(&self, number: &str) -> Self {
        let mut s = self.clone();
        s.number = Some(number.to_string());
        s
    }
    /// Returns a GeodeticMarker with given [MarkerType].
    pub fn with_marker_type(&self, marker_type: MarkerType) -> Self {
        let mut s = self.clone();
        s.marker_type = Some(marker_type);
        s
    }
}
