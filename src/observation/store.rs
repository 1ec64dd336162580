//! Observation storage
use crate::{
    observation::{ObsEpoch, ObsKey, ObservationRecord, RecordKey},
    prelude::{Constellation, Observable, SV},
};

use itertools::Itertools;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("record already exists, delete its epoch first")]
    DuplicateRecord(ObservationRecord),
}

/// Record selection: every criterion left to None matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub epoch: Option<ObsKey>,
    pub constellation: Option<Constellation>,
    pub sv: Option<SV>,
    pub observable: Option<Observable>,
}

impl Query {
    pub fn with_epoch(&self, epoch: ObsKey) -> Self {
        let mut s = self.clone();
        s.epoch = Some(epoch);
        s
    }
    pub fn with_constellation(&self, constellation: Constellation) -> Self {
        let mut s = self.clone();
        s.constellation = Some(constellation);
        s
    }
    pub fn with_sv(&self, sv: SV) -> Self {
        let mut s = self.clone();
        s.sv = Some(sv);
        s
    }
    pub fn with_observable(&self, observable: Observable) -> Self {
        let mut s = self.clone();
        s.observable = Some(observable);
        s
    }
    fn matches(&self, record: &ObservationRecord) -> bool {
        let key = &record.key;
        self.epoch.map_or(true, |e| e == key.epoch)
            && self.constellation.map_or(true, |c| c == key.constellation)
            && self.sv.map_or(true, |sv| sv == key.sv)
            && self
                .observable
                .as_ref()
                .map_or(true, |obs| *obs == key.observable)
    }
}

/// Append only collection of [ObservationRecord]s, with epochs kept
/// in order of appearance. Records are never modified: a correction
/// means deleting the epoch and inserting it again.
#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    epochs: Vec<ObsEpoch>,
    slots: Vec<Option<ObservationRecord>>,
    keys: HashMap<RecordKey, usize>,
    by_epoch: HashMap<ObsKey, Vec<usize>>,
    by_constellation: HashMap<Constellation, HashMap<ObsKey, Vec<usize>>>,
}

impl ObservationStore {
    /// Appends this epoch to the epoch list, unless already listed.
    /// Returns false in the latter case.
    pub fn register_epoch(&mut self, epoch: ObsEpoch) -> bool {
        if self.epochs.iter().rev().any(|e| e.key == epoch.key) {
            return false;
        }
        self.epochs.push(epoch);
        true
    }
    /// Appends a record. Its epoch is registered if need be.
    pub fn insert(&mut self, record: ObservationRecord) -> Result<(), Error> {
        if self.keys.contains_key(&record.key) {
            return Err(Error::DuplicateRecord(record));
        }

        let epoch = record.key.epoch;
        if !self.by_epoch.contains_key(&epoch) {
            self.register_epoch(ObsEpoch::new(epoch));
        }

        let index = self.slots.len();
        self.keys.insert(record.key.clone(), index);
        self.by_epoch.entry(epoch).or_default().push(index);
        self.by_constellation
            .entry(record.key.constellation)
            .or_default()
            .entry(epoch)
            .or_default()
            .push(index);
        self.slots.push(Some(record));
        Ok(())
    }
    /// Removes this epoch and all of its records.
    /// Returns the number of records that were removed.
    pub fn delete_by_epoch(&mut self, epoch: &ObsKey) -> usize {
        self.epochs.retain(|e| e.key != *epoch);

        let indexes = match self.by_epoch.remove(epoch) {
            Some(indexes) => indexes,
            None => return 0,
        };

        let mut removed = 0;
        for index in indexes {
            if let Some(record) = self.slots.get_mut(index).and_then(|slot| slot.take()) {
                self.keys.remove(&record.key);
                if let Some(epochs) = self.by_constellation.get_mut(&record.key.constellation) {
                    epochs.remove(epoch);
                }
                removed += 1;
            }
        }

        self.by_constellation.retain(|_, epochs| !epochs.is_empty());
        removed
    }
    /// Records matching this [Query], in epoch order
    /// then order of insertion. The iterator only borrows the store.
    pub fn query<'a>(
        &'a self,
        query: &Query,
    ) -> impl Iterator<Item = &'a ObservationRecord> + 'a {
        let query = query.clone();
        let epochs: Box<dyn Iterator<Item = ObsKey> + 'a> = match query.epoch {
            Some(epoch) => Box::new(std::iter::once(epoch)),
            None => Box::new(self.epochs.iter().map(|e| e.key)),
        };
        let constellation = query.constellation;
        epochs
            .flat_map(move |epoch| {
                let indexes = match constellation {
                    Some(constellation) => self
                        .by_constellation
                        .get(&constellation)
                        .and_then(|epochs| epochs.get(&epoch)),
                    None => self.by_epoch.get(&epoch),
                };
                indexes.into_iter().flatten()
            })
            .filter_map(move |index| self.slots[*index].as_ref())
            .filter(move |record| query.matches(record))
    }
    /// All records, in epoch order
    pub fn iter(&self) -> impl Iterator<Item = &ObservationRecord> + '_ {
        self.epochs
            .iter()
            .filter_map(move |e| self.by_epoch.get(&e.key))
            .flatten()
            .filter_map(move |index| self.slots[*index].as_ref())
    }
    /// Record stored under this key
    pub fn get(&self, key: &RecordKey) -> Option<&ObservationRecord> {
        let index = self.keys.get(key)?;
        self.slots[*index].as_ref()
    }
    /// Epochs, in order of appearance
    pub fn epochs(&self) -> &[ObsEpoch] {
        &self.epochs
    }
    /// Number of records
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    /// Constellations that have records, sorted
    pub fn constellations(&self) -> Vec<Constellation> {
        self.by_constellation.keys().copied().sorted().collect()
    }
    /// Satellites that have records, sorted
    pub fn satellites(&self) -> Vec<SV> {
        self.keys.keys().map(|k| k.sv).unique().sorted().collect()
    }
    /// Codes that have records for this constellation, sorted
    pub fn observables(&self, constellation: Constellation) -> Vec<Observable> {
        self.keys
            .keys()
            .filter(|k| k.constellation == constellation)
            .map(|k| k.observable.clone())
            .unique()
            .sorted()
            .collect()
    }
}
