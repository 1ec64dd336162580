//! Hardware: receiver, antenna informations
use crate::columns::columns;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GNSS receiver description, from "REC # / TYPE / VERS"
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Receiver {
    /// Receiver (hardware) model
    pub model: String,
    /// Receiver (hardware) identification info
    pub sn: String,
    /// Receiver embedded software info
    pub firmware: String,
}

impl Receiver {
    /// Parses the three 20 column fields of the receiver descriptor.
    /// Short lines leave the trailing fields empty.
    pub(crate) fn from_columns(content: &str) -> Self {
        Self {
            sn: columns(content, 0, 20).trim().to_string(),
            model: columns(content, 20, 40).trim().to_string(),
            firmware: columns(content, 40, 60).trim().to_string(),
        }
    }
}

/// Receiver antenna description
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Antenna {
    /// Hardware model / make descriptor
    pub model: String,
    /// Serial number / identification number
    pub sn: String,
    /// Optionnal `h` eccentricity (height component),
    /// referenced to base/reference point, in meter
    pub height: Option<f64>,
    /// Optionnal `eastern` eccentricity (eastern component),
    /// referenced to base/reference point, in meter
    pub eastern: Option<f64>,
    /// Optionnal `northern` eccentricity (northern component),
    /// referenced to base/reference point, in meter
    pub northern: Option<f64>,
}

impl Antenna {
    /// Sets desired model
    pub fn with_model(&self, m: &str) -> Self {
        let mut s = self.clone();
        s.model = m.to_string();
        s
    }
    /// Sets desired Serial Number
    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = sn.to_string();
        s
    }
    /// Sets antenna `h` eccentricity component
    pub fn with_height(&self, h: f64) -> Self {
        let mut s = self.clone();
        s.height = Some(h);
        s
    }
    /// Sets antenna `eastern` coordinates component
    pub fn with_eastern_component(&self, e: f64) -> Self {
        let mut s = self.clone();
        s.eastern = Some(e);
        s
    }
    /// Sets antenna `northern` coordinates component
    pub fn with_northern_component(&self, n: f64) -> Self {
        let mut s = self.clone();
        s.northern = Some(n);
        s
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn receiver_columns() {
        let content = "3001376             SEPT POLARX4TR      2.9.0               ";
        let rcvr = Receiver::from_columns(content);
        assert_eq!(rcvr.sn, "3001376");
        assert_eq!(rcvr.model, "SEPT POLARX4TR");
        assert_eq!(rcvr.firmware, "2.9.0");

        let rcvr = Receiver::from_columns("3001376             SEPT");
        assert_eq!(rcvr.model, "SEPT");
        assert!(rcvr.firmware.is_empty());
    }
    #[test]
    fn antenna_builder() {
        let antenna = Antenna::default()
            .with_model("TRM57971.00     NONE")
            .with_serial_number("1441112501")
            .with_height(0.0)
            .with_eastern_component(0.1)
            .with_northern_component(-0.2);
        assert_eq!(antenna.sn, "1441112501");
        assert_eq!(antenna.northern, Some(-0.2));
    }
}
