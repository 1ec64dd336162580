//! Per constellation observation schema, declared in the header
use crate::prelude::{Constellation, Observable, SV};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carrier phase shift correction, from "SYS / PHASE SHIFT"
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseShift {
    /// Correction, in cycles
    pub correction: f64,
    /// Satellites this applies to: all of them when empty
    pub satellites: Vec<SV>,
}

impl PhaseShift {
    /// Returns true if this correction applies to given satellite
    pub fn applies_to(&self, sv: &SV) -> bool {
        self.satellites.is_empty() || self.satellites.contains(sv)
    }
}

/// Average phase center offset, from "ANTENNA: PHASECENTER", in meters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseCenter {
    pub north: f64,
    pub east: f64,
    pub up: f64,
}

/// Schema of the observation records: which codes each constellation
/// reports, in which order, and how their values are to be corrected.
/// This is built while the header is parsed, and read only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaRegistry {
    codes: HashMap<Constellation, Vec<Observable>>,
    scaling: HashMap<(Constellation, Observable), u16>,
    system_scaling: HashMap<Constellation, u16>,
    phase_shifts: HashMap<(Constellation, Observable), PhaseShift>,
    phase_centers: HashMap<(Constellation, Observable), PhaseCenter>,
    glo_channels: BTreeMap<SV, i8>,
    glo_biases: BTreeMap<Observable, Option<f64>>,
    obs_counts: BTreeMap<SV, Vec<Option<u32>>>,
}

impl SchemaRegistry {
    /// Declared code order for this constellation.
    /// None when the header never declared it.
    pub fn observables(&self, constellation: &Constellation) -> Option<&[Observable]> {
        self.codes.get(constellation).map(|codes| codes.as_slice())
    }
    /// Constellations declared in the header, sorted
    pub fn constellations(&self) -> Vec<Constellation> {
        let mut constellations = self.codes.keys().copied().collect::<Vec<_>>();
        constellations.sort();
        constellations
    }
    /// Scaling factor applying to this (constellation, code) pair, if any.
    /// Code specific factors prevail over system wide ones.
    pub fn scaling(&self, constellation: Constellation, observable: &Observable) -> Option<u16> {
        self.scaling
            .get(&(constellation, observable.clone()))
            .or(self.system_scaling.get(&constellation))
            .copied()
    }
    pub fn phase_shift(
        &self,
        constellation: Constellation,
        observable: &Observable,
    ) -> Option<&PhaseShift> {
        self.phase_shifts.get(&(constellation, observable.clone()))
    }
    pub fn phase_center(
        &self,
        constellation: Constellation,
        observable: &Observable,
    ) -> Option<&PhaseCenter> {
        self.phase_centers.get(&(constellation, observable.clone()))
    }
    /// GLONASS frequency channel of this slot
    pub fn glonass_channel(&self, sv: &SV) -> Option<i8> {
        self.glo_channels.get(sv).copied()
    }
    /// Iterates over GLONASS (slot, frequency channel) pairs
    pub fn glonass_channels(&self) -> impl Iterator<Item = (&SV, &i8)> + '_ {
        self.glo_channels.iter()
    }
    /// GLONASS code/phase bias for this code.
    /// `Some(None)` means declared, but unknown.
    pub fn glonass_bias(&self, observable: &Observable) -> Option<Option<f64>> {
        self.glo_biases.get(observable).copied()
    }
    /// Number of observations per code for this satellite,
    /// in declared code order, from "PRN / # OF OBS"
    pub fn observation_counts(&self, sv: &SV) -> Option<&[Option<u32>]> {
        self.obs_counts.get(sv).map(|counts| counts.as_slice())
    }
}

/// Mutable [SchemaRegistry], only exists during the header pass.
/// [RegistryBuilder::freeze] is the only way out.
#[derive(Debug, Default)]
pub(crate) struct RegistryBuilder {
    inner: SchemaRegistry,
}

impl RegistryBuilder {
    pub fn has_codes(&self, constellation: &Constellation) -> bool {
        self.inner.codes.contains_key(constellation)
    }
    /// Number of codes declared for this constellation, if declared
    pub fn code_count(&self, constellation: &Constellation) -> Option<usize> {
        self.inner.codes.get(constellation).map(|codes| codes.len())
    }
    /// Declares a complete code list. A constellation is declared only once:
    /// returns false and leaves the registry untouched otherwise.
    pub fn declare_codes(&mut self, constellation: Constellation, codes: Vec<Observable>) -> bool {
        if self.has_codes(&constellation) {
            return false;
        }
        self.inner.codes.insert(constellation, codes);
        true
    }
    pub fn set_scaling(&mut self, constellation: Constellation, observable: Observable, factor: u16) {
        self.inner
            .scaling
            .insert((constellation, observable), factor);
    }
    pub fn set_system_scaling(&mut self, constellation: Constellation, factor: u16) {
        self.inner.system_scaling.insert(constellation, factor);
    }
    pub fn set_phase_shift(
        &mut self,
        constellation: Constellation,
        observable: Observable,
        shift: PhaseShift,
    ) {
        self.inner
            .phase_shifts
            .insert((constellation, observable), shift);
    }
    pub fn set_phase_center(
        &mut self,
        constellation: Constellation,
        observable: Observable,
        center: PhaseCenter,
    ) {
        self.inner
            .phase_centers
            .insert((constellation, observable), center);
    }
    pub fn set_glonass_channel(&mut self, sv: SV, channel: i8) {
        self.inner.glo_channels.insert(sv, channel);
    }
    pub fn set_glonass_bias(&mut self, observable: Observable, bias: Option<f64>) {
        self.inner.glo_biases.insert(observable, bias);
    }
    pub fn set_observation_counts(&mut self, sv: SV, counts: Vec<Option<u32>>) {
        self.inner.obs_counts.insert(sv, counts);
    }
    /// Ends the header pass for this registry
    pub fn freeze(self) -> SchemaRegistry {
        self.inner
    }
}
