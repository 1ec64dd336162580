//! Record section scanner: tracks the current epoch
//! and hands satellite lines over to the decoder.
use crate::{
    columns::columns,
    constellation::{parse_sv, Error as SvError},
    diagnostic::{Diagnostic, Diagnostics},
    epoch::parse_in_timescale,
    header::Header,
    observation::{
        decoder::decode_observations, store::Error as StoreError, widths::SVNN_SIZE, ObsEpoch,
        ObsKey, ObservationRecord, ObservationStore, SchemaRegistry,
    },
    options::ParsingOptions,
    prelude::{Constellation, EpochFlag, ParsingError, TimeScale, Version},
};

use std::{collections::HashMap, str::FromStr, sync::Arc};

#[cfg(feature = "log")]
use log::debug;

/// Leading character of every epoch line
pub(crate) const EPOCH_MARKER: char = '>';

/// Returns true if this line opens a new epoch
pub(crate) fn is_new_epoch(line: &str) -> bool {
    line.trim_start().starts_with(EPOCH_MARKER)
}

/// Outcome of one body line
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScanStep {
    Continue,
    /// Too many invalid lines before any epoch: scanning must stop
    Corrupted,
}

/// Epoch currently receiving satellite lines
#[derive(Debug, Clone, Copy)]
struct CurrentEpoch {
    key: ObsKey,
    declared: u16,
    found: u16,
    line: usize,
}

/// Content of an epoch line
#[derive(Debug, Clone, PartialEq)]
enum EpochLine {
    /// Sampling epoch, followed by satellite lines
    Sampling(ObsEpoch),
    /// Event, followed by special records
    Event { flag: EpochFlag, num_records: u16 },
}

/// Scans the record section that follows one header
#[derive(Debug)]
pub(crate) struct Scanner {
    registry: Arc<SchemaRegistry>,
    timescale: TimeScale,
    layouts: HashMap<Constellation, Vec<Option<usize>>>,
    apply_scaling: bool,
    orphan_threshold: usize,
    current: Option<CurrentEpoch>,
    /// Special records still to be skipped
    event_records: usize,
    /// True once a first valid epoch was found
    established: bool,
    /// Invalid lines before establishment
    invalid_lines: usize,
}

/// Parses an epoch line, marker included
fn parse_epoch_line(line: &str, timescale: TimeScale) -> Result<EpochLine, ParsingError> {
    let content = line.trim_start();
    let content = content.strip_prefix(EPOCH_MARKER).unwrap_or(content);
    let items = content.split_ascii_whitespace().collect::<Vec<_>>();

    let parse_count = |item: &str| {
        item.parse::<u16>()
            .map_err(|_| ParsingError::Integer(item.to_string()))
    };

    // events may leave their date blank
    if items.len() == 2 {
        let flag = EpochFlag::from_str(items[0])?;
        if flag.is_event() {
            return Ok(EpochLine::Event {
                flag,
                num_records: parse_count(items[1])?,
            });
        }
    }

    if items.len() < 8 {
        return Err(ParsingError::MissingField);
    }

    let flag = EpochFlag::from_str(items[6])?;
    let num_sat = parse_count(items[7])?;

    if flag.is_event() {
        return Ok(EpochLine::Event {
            flag,
            num_records: num_sat,
        });
    }

    let epoch = parse_in_timescale(&items[..6], timescale)?;
    let clock_offset = match items.get(8) {
        Some(item) => Some(
            item.parse::<f64>()
                .map_err(|_| ParsingError::Float(item.to_string()))?,
        ),
        None => None,
    };

    Ok(EpochLine::Sampling(ObsEpoch {
        key: ObsKey { epoch, flag },
        num_sat,
        clock_offset,
    }))
}

impl Scanner {
    /// Prepares the scanning of the section described by this [Header]
    pub fn new(header: &Header, opts: &ParsingOptions) -> Self {
        let registry = Arc::clone(&header.registry);
        let version: Version = header.version;
        let layouts = registry
            .constellations()
            .into_iter()
            .filter_map(|constellation| {
                let codes = registry.observables(&constellation)?;
                Some((constellation, opts.widths.layout(version, codes)))
            })
            .collect();
        Self {
            registry,
            timescale: header.timescale(),
            layouts,
            apply_scaling: opts.apply_scaling,
            orphan_threshold: opts.orphan_threshold,
            current: None,
            event_records: 0,
            established: false,
            invalid_lines: 0,
        }
    }

    /// Consumes one body line
    pub fn scan(
        &mut self,
        line: &str,
        lineno: usize,
        store: &mut ObservationStore,
        diags: &mut Diagnostics,
    ) -> ScanStep {
        if line.trim().is_empty() {
            return ScanStep::Continue;
        }

        if self.event_records > 0 {
            self.event_records -= 1;
            return ScanStep::Continue;
        }

        if is_new_epoch(line) {
            return self.scan_epoch(line, lineno, store, diags);
        }

        let current = match self.current.as_mut() {
            Some(current) => current,
            None => {
                return self.invalid(Diagnostic::OrphanObservation { line: lineno }, diags);
            },
        };

        if line.len() < SVNN_SIZE {
            diags.push(Diagnostic::StructuralCorruption {
                line: lineno,
                reason: "line shorter than satellite identifier".to_string(),
            });
            return ScanStep::Continue;
        }

        current.found = current.found.saturating_add(1);
        let key = current.key;

        self.scan_satellite(key, line, lineno, store, diags);
        ScanStep::Continue
    }

    /// Ends the section: the last epoch is verified
    pub fn finish(&mut self, lineno: usize, diags: &mut Diagnostics) {
        self.close_epoch(lineno, diags);
    }

    /// Reports an invalid line, escalates when no epoch was ever found
    fn invalid(&mut self, diag: Diagnostic, diags: &mut Diagnostics) -> ScanStep {
        let line = diag.line();
        diags.push(diag);
        if self.established {
            return ScanStep::Continue;
        }
        self.invalid_lines += 1;
        if self.invalid_lines > self.orphan_threshold {
            diags.push(Diagnostic::CorruptFile {
                line,
                count: self.invalid_lines,
            });
            ScanStep::Corrupted
        } else {
            ScanStep::Continue
        }
    }

    /// Verifies the satellite count of the current epoch
    fn close_epoch(&mut self, lineno: usize, diags: &mut Diagnostics) {
        if let Some(current) = self.current.take() {
            if current.found != current.declared {
                diags.push(Diagnostic::SatelliteCountMismatch {
                    line: lineno.max(current.line),
                    epoch: current.key.epoch,
                    declared: current.declared,
                    found: current.found,
                });
            }
        }
    }

    fn scan_epoch(
        &mut self,
        line: &str,
        lineno: usize,
        store: &mut ObservationStore,
        diags: &mut Diagnostics,
    ) -> ScanStep {
        self.close_epoch(lineno, diags);

        match parse_epoch_line(line, self.timescale) {
            Ok(EpochLine::Sampling(epoch)) => {
                self.established = true;
                store.register_epoch(epoch);
                self.current = Some(CurrentEpoch {
                    key: epoch.key,
                    declared: epoch.num_sat,
                    found: 0,
                    line: lineno,
                });
                ScanStep::Continue
            },
            Ok(EpochLine::Event { flag, num_records }) => {
                #[cfg(feature = "log")]
                debug!("line {}: {} event, {} records", lineno, flag, num_records);
                #[cfg(not(feature = "log"))]
                let _ = flag;

                self.established = true;
                self.event_records = num_records as usize;
                ScanStep::Continue
            },
            Err(e) => self.invalid(
                Diagnostic::StructuralCorruption {
                    line: lineno,
                    reason: format!("invalid epoch: {}", e),
                },
                diags,
            ),
        }
    }

    fn scan_satellite(
        &self,
        key: ObsKey,
        line: &str,
        lineno: usize,
        store: &mut ObservationStore,
        diags: &mut Diagnostics,
    ) {
        // "G 1" is tolerated for "G01"
        let svnn = columns(line, 0, SVNN_SIZE).replace(' ', "0");
        let sv = match parse_sv(&svnn) {
            Ok(sv) => sv,
            Err(SvError::UnknownConstellation(letter)) => {
                diags.push(Diagnostic::UnknownConstellation {
                    line: lineno,
                    letter,
                });
                return;
            },
            Err(SvError::MalformedIdentifier(id)) => {
                diags.push(Diagnostic::InvalidSatellite { line: lineno, id });
                return;
            },
        };

        let (codes, layout) = match (
            self.registry.observables(&sv.constellation),
            self.layouts.get(&sv.constellation),
        ) {
            (Some(codes), Some(layout)) => (codes, layout),
            _ => {
                diags.push(Diagnostic::UnknownConstellation {
                    line: lineno,
                    letter: svnn.chars().next().unwrap_or('?'),
                });
                return;
            },
        };

        let decoded = decode_observations(line, layout);

        for index in decoded.truncated.iter() {
            diags.push(Diagnostic::TruncatedField {
                line: lineno,
                sv,
                code: codes[*index].clone(),
            });
        }

        if let Some(index) = decoded.unknown {
            diags.push(Diagnostic::UnknownObservationCode {
                line: lineno,
                sv,
                code: codes[index].clone(),
            });
        }

        for (observable, mut value) in codes.iter().zip(decoded.fields.into_iter()) {
            if self.apply_scaling {
                if let Some(factor) = self.registry.scaling(sv.constellation, observable) {
                    if factor > 0 {
                        value.value = value.value.map(|v| v / factor as f64);
                    }
                }
            }
            let record = ObservationRecord::new(key, sv, observable.clone(), value);
            if let Err(StoreError::DuplicateRecord(record)) = store.insert(record) {
                diags.push(Diagnostic::DuplicateRecord {
                    line: lineno,
                    sv: record.key.sv,
                    code: record.key.observable,
                });
            }
        }
    }
}
