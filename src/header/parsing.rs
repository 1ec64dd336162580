//! Header section parser
use crate::{
    columns::{columns, label, LABEL_OFFSET},
    constellation::{from_letter, parse_sv},
    diagnostic::{Diagnostic, Diagnostics},
    epoch::{parse_in_timescale, timescale_from_code},
    hardware::Receiver,
    header::{default_timescale, Header},
    leap::Leap,
    marker::MarkerType,
    observation::{PhaseCenter, PhaseShift, RegistryBuilder},
    prelude::{Constellation, Duration, Epoch, Observable, ParsingError, SV},
    types::Type,
    version::Version,
};

use std::{str::FromStr, sync::Arc};

#[cfg(feature = "log")]
use log::debug;

const OBS_TYPES: &str = "SYS / # / OBS TYPES";
const SCALE_FACTOR: &str = "SYS / SCALE FACTOR";
const PHASE_SHIFT: &str = "SYS / PHASE SHIFT";
const OBS_COUNTS: &str = "PRN / # OF OBS";

/// Largest code count the I3 count field can hold
const MAX_OBSERVABLES: usize = 999;

/// Header records that may span several lines.
/// Carried from one line to the next, until the declared
/// number of items has been collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Continuation {
    #[default]
    Idle,
    ObservationCodes {
        constellation: Constellation,
        remaining: usize,
        codes: Vec<Observable>,
    },
    ScaleFactor {
        constellation: Constellation,
        factor: u16,
        remaining: usize,
    },
    PhaseShift {
        constellation: Constellation,
        observable: Observable,
        shift: PhaseShift,
        remaining: usize,
    },
    ObservationCounts {
        sv: SV,
        expected: Option<usize>,
        counts: Vec<Option<u32>>,
    },
}

impl Continuation {
    /// Label of the record being accumulated
    fn label(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::ObservationCodes { .. } => Some(OBS_TYPES),
            Self::ScaleFactor { .. } => Some(SCALE_FACTOR),
            Self::PhaseShift { .. } => Some(PHASE_SHIFT),
            Self::ObservationCounts { .. } => Some(OBS_COUNTS),
        }
    }
}

/// Outcome of one header line
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HeaderStep {
    /// Header goes on, with this state carried to the next line
    Continue(Continuation),
    /// "END OF HEADER" was consumed
    End,
}

/// Builds one [Header] and its schema, line by line.
/// [HeaderParser::finish] freezes the schema.
#[derive(Debug, Default)]
pub(crate) struct HeaderParser {
    header: Header,
    registry: RegistryBuilder,
}

/// Parses a trimmed floating point field
fn parse_float(content: &str) -> Result<f64, ParsingError> {
    let content = content.trim();
    content
        .parse::<f64>()
        .map_err(|_| ParsingError::Float(content.to_string()))
}

/// Parses a trimmed unsigned field, blank being None
fn parse_count(content: &str) -> Result<Option<usize>, ParsingError> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }
    content
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ParsingError::Integer(content.to_string()))
}

/// Parses a single letter system descriptor. [Constellation::Mixed] is not a system.
fn parse_system(content: &str) -> Result<Constellation, ParsingError> {
    let content = content.trim();
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match from_letter(c) {
            Some(Constellation::Mixed) | None => Err(ParsingError::Constellation(content.to_string())),
            Some(constellation) => Ok(constellation),
        },
        (None, _) => Err(ParsingError::MissingField),
        _ => Err(ParsingError::Constellation(content.to_string())),
    }
}

/// Parses a "TIME OF FIRST/LAST OBS" content
fn parse_time_of_obs(
    content: &str,
    constellation: Option<Constellation>,
) -> Result<Epoch, ParsingError> {
    let items = columns(content, 0, 43)
        .split_ascii_whitespace()
        .collect::<Vec<_>>();
    let code = columns(content, 48, 51).trim();
    let ts = if code.is_empty() {
        default_timescale(constellation)
    } else {
        timescale_from_code(code).ok_or_else(|| ParsingError::TimeSystem(code.to_string()))?
    };
    Ok(parse_in_timescale(&items, ts)?)
}

impl HeaderParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one header line. `continuation` is the state returned
    /// by the previous call. Never fails: field errors are reported in `diags`.
    pub fn consume(
        &mut self,
        continuation: Continuation,
        line: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> HeaderStep {
        let marker = label(line);
        let content = columns(line, 0, LABEL_OFFSET);

        // a pending record stops as soon as another label shows up
        let continuation = match continuation.label() {
            Some(pending) if pending != marker => {
                self.flush(continuation, lineno, diags);
                Continuation::Idle
            },
            _ => continuation,
        };

        let result = match marker {
            "END OF HEADER" => {
                self.flush(continuation, lineno, diags);
                self.header.explicit_end = true;
                return HeaderStep::End;
            },
            OBS_TYPES => self.parse_observables(continuation, content, lineno, diags),
            SCALE_FACTOR => self.parse_scale_factor(continuation, content, lineno, diags),
            PHASE_SHIFT => self.parse_phase_shift(continuation, content, lineno, diags),
            OBS_COUNTS => self.parse_observation_counts(continuation, content, lineno, diags),
            _ => self
                .parse_single_line(marker, content, lineno, diags)
                .map(|_| Continuation::Idle),
        };

        match result {
            Ok(continuation) => HeaderStep::Continue(continuation),
            Err(e) => {
                diags.push(Diagnostic::malformed(lineno, marker, e));
                HeaderStep::Continue(Continuation::Idle)
            },
        }
    }

    /// Ends this header section. Whatever was still being
    /// accumulated is committed as is.
    pub fn finish(
        mut self,
        continuation: Continuation,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Header {
        self.flush(continuation, lineno, diags);
        self.header.registry = Arc::new(self.registry.freeze());
        self.header
    }

    /// Commits an interrupted record
    fn flush(&mut self, continuation: Continuation, lineno: usize, diags: &mut Diagnostics) {
        match continuation {
            Continuation::Idle => {},
            Continuation::ObservationCodes {
                constellation,
                remaining,
                codes,
            } => {
                diags.push(Diagnostic::malformed(
                    lineno,
                    OBS_TYPES,
                    format!(
                        "{} codes missing for {}, declared list truncated",
                        remaining, constellation
                    ),
                ));
                self.declare_codes(constellation, codes, lineno, diags);
            },
            Continuation::ScaleFactor {
                constellation,
                remaining,
                ..
            } => {
                diags.push(Diagnostic::malformed(
                    lineno,
                    SCALE_FACTOR,
                    format!("{} codes missing for {}", remaining, constellation),
                ));
            },
            Continuation::PhaseShift {
                constellation,
                observable,
                shift,
                remaining,
            } => {
                diags.push(Diagnostic::malformed(
                    lineno,
                    PHASE_SHIFT,
                    format!("{} satellites missing for {} {}", remaining, constellation, observable),
                ));
                self.registry
                    .set_phase_shift(constellation, observable, shift);
            },
            Continuation::ObservationCounts { sv, counts, .. } => {
                self.commit_counts(sv, counts);
            },
        }
    }

    fn declare_codes(
        &mut self,
        constellation: Constellation,
        codes: Vec<Observable>,
        lineno: usize,
        diags: &mut Diagnostics,
    ) {
        #[cfg(feature = "log")]
        debug!("{} observables: {:?}", constellation, codes);

        if !self.registry.declare_codes(constellation, codes) {
            diags.push(Diagnostic::malformed(
                lineno,
                OBS_TYPES,
                format!("{} codes declared twice, first list kept", constellation),
            ));
        }
    }

    fn commit_counts(&mut self, sv: SV, mut counts: Vec<Option<u32>>) {
        while counts.last() == Some(&None) {
            counts.pop();
        }
        self.registry.set_observation_counts(sv, counts);
    }

    /// "SYS / # / OBS TYPES": system letter, declared count, then codes.
    /// Continuation lines leave the system column blank.
    fn parse_observables(
        &mut self,
        continuation: Continuation,
        content: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Result<Continuation, ParsingError> {
        let mut items = content.split_ascii_whitespace();

        let (constellation, mut remaining, mut codes) = if columns(content, 0, 1).trim().is_empty() {
            match continuation {
                Continuation::ObservationCodes {
                    constellation,
                    remaining,
                    codes,
                } => (constellation, remaining, codes),
                _ => return Err(ParsingError::OrphanContinuation),
            }
        } else {
            self.flush(continuation, lineno, diags);
            let constellation = parse_system(items.next().unwrap_or_default())?;
            let count = items.next().ok_or(ParsingError::MissingField)?;
            let count = count
                .parse::<usize>()
                .ok()
                .filter(|n| *n <= MAX_OBSERVABLES)
                .ok_or_else(|| ParsingError::Integer(count.to_string()))?;
            (constellation, count, Vec::new())
        };

        for item in items {
            if remaining == 0 {
                diags.push(Diagnostic::malformed(
                    lineno,
                    OBS_TYPES,
                    format!("more codes than declared for {}, \"{}\" ignored", constellation, item),
                ));
                break;
            }
            let observable = Observable::from_str(item).unwrap_or_else(|e| {
                diags.push(Diagnostic::malformed(lineno, OBS_TYPES, e));
                Observable::Unknown(item.to_uppercase())
            });
            codes.push(observable);
            remaining -= 1;
        }

        if remaining == 0 {
            self.declare_codes(constellation, codes, lineno, diags);
            Ok(Continuation::Idle)
        } else {
            Ok(Continuation::ObservationCodes {
                constellation,
                remaining,
                codes,
            })
        }
    }

    /// "SYS / SCALE FACTOR": system [0,1), factor [2,6), count [8,10), codes after.
    /// Zero or blank count means every code of that system.
    fn parse_scale_factor(
        &mut self,
        continuation: Continuation,
        content: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Result<Continuation, ParsingError> {
        let (constellation, factor, mut remaining) = if columns(content, 0, 1).trim().is_empty() {
            match continuation {
                Continuation::ScaleFactor {
                    constellation,
                    factor,
                    remaining,
                } => (constellation, factor, remaining),
                _ => return Err(ParsingError::OrphanContinuation),
            }
        } else {
            self.flush(continuation, lineno, diags);
            let constellation = parse_system(columns(content, 0, 1))?;
            let factor = columns(content, 2, 6).trim();
            let factor = factor
                .parse::<u16>()
                .map_err(|_| ParsingError::Integer(factor.to_string()))?;
            match parse_count(columns(content, 8, 10))?.unwrap_or(0) {
                0 => {
                    self.registry.set_system_scaling(constellation, factor);
                    return Ok(Continuation::Idle);
                },
                count => (constellation, factor, count),
            }
        };

        for item in columns(content, 10, LABEL_OFFSET).split_ascii_whitespace() {
            if remaining == 0 {
                break;
            }
            let observable = Observable::from_str(item)?;
            self.registry
                .set_scaling(constellation, observable, factor);
            remaining -= 1;
        }

        if remaining == 0 {
            Ok(Continuation::Idle)
        } else {
            Ok(Continuation::ScaleFactor {
                constellation,
                factor,
                remaining,
            })
        }
    }

    /// "SYS / PHASE SHIFT": system [0,1), code [2,5), correction [6,14),
    /// satellite count [16,18), satellites from column 18.
    fn parse_phase_shift(
        &mut self,
        continuation: Continuation,
        content: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Result<Continuation, ParsingError> {
        let (constellation, observable, mut shift, mut remaining) =
            if columns(content, 0, 1).trim().is_empty() {
                match continuation {
                    Continuation::PhaseShift {
                        constellation,
                        observable,
                        shift,
                        remaining,
                    } => (constellation, observable, shift, remaining),
                    _ => return Err(ParsingError::OrphanContinuation),
                }
            } else {
                self.flush(continuation, lineno, diags);
                let constellation = parse_system(columns(content, 0, 1))?;
                let code = columns(content, 2, 5).trim();
                if code.is_empty() {
                    // no correction applied for this system
                    return Ok(Continuation::Idle);
                }
                let observable = Observable::from_str(code)?;
                let correction = parse_float(columns(content, 6, 14))?;
                let count = parse_count(columns(content, 16, 18))?.unwrap_or(0);
                let shift = PhaseShift {
                    correction,
                    satellites: Vec::with_capacity(count),
                };
                (constellation, observable, shift, count)
            };

        for item in columns(content, 18, LABEL_OFFSET).split_ascii_whitespace() {
            if remaining == 0 {
                break;
            }
            shift.satellites.push(parse_sv(item)?);
            remaining -= 1;
        }

        if remaining == 0 {
            self.registry
                .set_phase_shift(constellation, observable, shift);
            Ok(Continuation::Idle)
        } else {
            Ok(Continuation::PhaseShift {
                constellation,
                observable,
                shift,
                remaining,
            })
        }
    }

    /// "PRN / # OF OBS": satellite [3,6), then up to 9 counts of 6 columns.
    /// One count per declared code, continuation lines leave the satellite blank.
    fn parse_observation_counts(
        &mut self,
        continuation: Continuation,
        content: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Result<Continuation, ParsingError> {
        let svnn = columns(content, 3, 6).trim();
        let (sv, expected, mut counts) = if svnn.is_empty() {
            match continuation {
                Continuation::ObservationCounts {
                    sv,
                    expected,
                    counts,
                } => (sv, expected, counts),
                _ => return Err(ParsingError::OrphanContinuation),
            }
        } else {
            self.flush(continuation, lineno, diags);
            let sv = parse_sv(svnn)?;
            let expected = self.registry.code_count(&sv.constellation);
            (sv, expected, Vec::with_capacity(expected.unwrap_or(9)))
        };

        for i in 0..9 {
            if expected.map_or(false, |n| counts.len() >= n) {
                break;
            }
            let field = columns(content, 6 + i * 6, 12 + i * 6);
            if field.is_empty() {
                break;
            }
            let field = field.trim();
            if field.is_empty() {
                counts.push(None);
            } else {
                let count = field
                    .parse::<u32>()
                    .map_err(|_| ParsingError::Integer(field.to_string()))?;
                counts.push(Some(count));
            }
        }

        if expected.map_or(false, |n| counts.len() >= n) {
            self.commit_counts(sv, counts);
            Ok(Continuation::Idle)
        } else {
            Ok(Continuation::ObservationCounts {
                sv,
                expected,
                counts,
            })
        }
    }

    /// Every label that fits on a single line
    fn parse_single_line(
        &mut self,
        marker: &str,
        content: &str,
        lineno: usize,
        diags: &mut Diagnostics,
    ) -> Result<(), ParsingError> {
        match marker {
            "RINEX VERSION / TYPE" => {
                self.header.version = Version::from_str(columns(content, 0, 9))?;

                let rinex_type = Type::from_str(columns(content, 20, 40))?;
                if rinex_type != Type::ObservationData {
                    diags.push(Diagnostic::malformed(
                        lineno,
                        marker,
                        format!("{} is not supported, parsing as observation data", rinex_type),
                    ));
                }
                self.header.rinex_type = rinex_type;

                let system = columns(content, 40, 41).trim();
                self.header.constellation = match system.chars().next() {
                    None => None,
                    Some(c) => Some(
                        from_letter(c).ok_or_else(|| ParsingError::Constellation(system.to_string()))?,
                    ),
                };
            },
            "PGM / RUN BY / DATE" => {
                let field = |start: usize, end: usize| {
                    let value = columns(content, start, end).trim();
                    if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    }
                };
                self.header.program = field(0, 20);
                self.header.run_by = field(20, 40);
                self.header.date = field(40, 60);
            },
            "COMMENT" => {
                self.header
                    .comments
                    .push(content.trim_end().to_string());
            },
            "MARKER NAME" => {
                let name = content.trim();
                let marker = self.header.geodetic_marker.clone().unwrap_or_default();
                self.header.geodetic_marker = Some(marker.with_name(name));
            },
            "MARKER NUMBER" => {
                let number = columns(content, 0, 20).trim();
                let marker = self.header.geodetic_marker.clone().unwrap_or_default();
                self.header.geodetic_marker = Some(marker.with_number(number));
            },
            "MARKER TYPE" => {
                let code = columns(content, 0, 20).trim();
                let marker_type = MarkerType::from_str(code)
                    .map_err(|_| ParsingError::MarkerType(code.to_string()))?;
                let marker = self.header.geodetic_marker.clone().unwrap_or_default();
                self.header.geodetic_marker = Some(marker.with_marker_type(marker_type));
            },
            "OBSERVER / AGENCY" => {
                let observer = columns(content, 0, 20).trim();
                let agency = columns(content, 20, 60).trim();
                self.header.observer = Some(observer.to_string());
                self.header.agency = Some(agency.to_string());
            },
            "REC # / TYPE / VERS" => {
                self.header.rcvr = Some(Receiver::from_columns(content));
            },
            "ANT # / TYPE" => {
                let antenna = self.header.rcvr_antenna.clone().unwrap_or_default();
                self.header.rcvr_antenna = Some(
                    antenna
                        .with_serial_number(columns(content, 0, 20).trim())
                        .with_model(columns(content, 20, 40).trim()),
                );
            },
            "APPROX POSITION XYZ" => {
                let x = parse_float(columns(content, 0, 14))?;
                let y = parse_float(columns(content, 14, 28))?;
                let z = parse_float(columns(content, 28, 42))?;
                self.header.rx_position = Some((x, y, z));
            },
            "ANTENNA: DELTA H/E/N" => {
                let items = columns(content, 0, 43)
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>();
                if items.len() < 3 {
                    return Err(ParsingError::MissingField);
                }
                let (h, e, n) = (
                    parse_float(items[0])?,
                    parse_float(items[1])?,
                    parse_float(items[2])?,
                );
                let antenna = self.header.rcvr_antenna.clone().unwrap_or_default();
                self.header.rcvr_antenna = Some(
                    antenna
                        .with_height(h)
                        .with_eastern_component(e)
                        .with_northern_component(n),
                );
            },
            "ANTENNA: PHASECENTER" => {
                let constellation = parse_system(columns(content, 0, 1))?;
                let observable = Observable::from_str(columns(content, 2, 5).trim())?;
                let center = PhaseCenter {
                    north: parse_float(columns(content, 5, 14))?,
                    east: parse_float(columns(content, 14, 28))?,
                    up: parse_float(columns(content, 28, 42))?,
                };
                self.registry
                    .set_phase_center(constellation, observable, center);
            },
            "GLONASS SLOT / FRQ #" => {
                let slots = columns(content, 4, LABEL_OFFSET);
                for i in 0..8 {
                    let slot = columns(slots, i * 7, i * 7 + 7);
                    if slot.trim().is_empty() {
                        continue;
                    }
                    let channel = columns(slot, 3, 7).trim();
                    let parsed = parse_sv(columns(slot, 0, 3).trim())
                        .map_err(ParsingError::from)
                        .and_then(|sv| {
                            let channel = channel
                                .parse::<i8>()
                                .map_err(|_| ParsingError::Integer(channel.to_string()))?;
                            Ok((sv, channel))
                        });
                    match parsed {
                        Ok((sv, channel)) => self.registry.set_glonass_channel(sv, channel),
                        Err(e) => diags.push(Diagnostic::malformed(lineno, marker, e)),
                    }
                }
            },
            "GLONASS COD/PHS/BIS" => {
                for i in 0..4 {
                    let code = columns(content, i * 13 + 1, i * 13 + 4).trim();
                    if code.is_empty() {
                        continue;
                    }
                    let observable = match Observable::from_str(code) {
                        Ok(observable) => observable,
                        Err(e) => {
                            diags.push(Diagnostic::malformed(lineno, marker, e));
                            continue;
                        },
                    };
                    let value = columns(content, i * 13 + 5, i * 13 + 13).trim();
                    let bias = if value.is_empty() {
                        None
                    } else {
                        match parse_float(value) {
                            Ok(bias) => Some(bias),
                            Err(e) => {
                                diags.push(Diagnostic::malformed(lineno, marker, e));
                                None
                            },
                        }
                    };
                    self.registry.set_glonass_bias(observable, bias);
                }
            },
            "LEAP SECONDS" => {
                self.header.leap = Some(Leap::from_str(content)?);
            },
            "# OF SATELLITES" => {
                let content = columns(content, 0, 6).trim();
                let count = content
                    .parse::<u32>()
                    .map_err(|_| ParsingError::Integer(content.to_string()))?;
                self.header.num_satellites = Some(count);
            },
            "INTERVAL" => {
                let interval = parse_float(columns(content, 0, 10))?;
                if interval > 0.0 {
                    self.header.sampling_interval = Some(Duration::from_seconds(interval));
                }
            },
            "TIME OF FIRST OBS" => {
                self.header.timeof_first_obs =
                    Some(parse_time_of_obs(content, self.header.constellation)?);
            },
            "TIME OF LAST OBS" => {
                self.header.timeof_last_obs =
                    Some(parse_time_of_obs(content, self.header.constellation)?);
            },
            "SIGNAL STRENGTH UNIT" => {
                let unit = columns(content, 0, 20).trim();
                if !unit.is_empty() {
                    self.header.signal_strength_unit = Some(unit.to_string());
                }
            },
            "RCV CLOCK OFFS APPL" => {
                let content = columns(content, 0, 6).trim();
                let applied = content
                    .parse::<i32>()
                    .map_err(|_| ParsingError::Integer(content.to_string()))?;
                self.header.clock_offset_applied = applied > 0;
            },
            _ => {
                #[cfg(feature = "log")]
                debug!("line {}: \"{}\" ignored", lineno, marker);
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::TimeScale;

    /// Formats a header line, label at column 60
    fn line(content: &str, label: &str) -> String {
        format!("{:<60}{}", content, label)
    }

    fn parse(lines: &[String]) -> (Header, Diagnostics) {
        let mut diags = Diagnostics::default();
        let mut parser = HeaderParser::new();
        let mut continuation = Continuation::Idle;
        for (i, l) in lines.iter().enumerate() {
            match parser.consume(continuation, l, i + 1, &mut diags) {
                HeaderStep::Continue(c) => continuation = c,
                HeaderStep::End => {
                    continuation = Continuation::Idle;
                    break;
                },
            }
        }
        let header = parser.finish(continuation, lines.len(), &mut diags);
        (header, diags)
    }

    fn obs(code: &str) -> Observable {
        Observable::from_str(code).unwrap()
    }

    #[test]
    fn version_type_line() {
        let (header, diags) = parse(&[line(
            "     3.04           OBSERVATION DATA    M",
            "RINEX VERSION / TYPE",
        )]);
        assert!(diags.is_empty());
        assert_eq!(header.version, Version::new(3, 4));
        assert_eq!(header.rinex_type, Type::ObservationData);
        assert_eq!(header.constellation, Some(Constellation::Mixed));
        assert!(!header.explicit_end);
    }

    #[test]
    fn codes_split_over_two_lines() {
        let (header, diags) = parse(&[
            line("G    4 C1C L1C", OBS_TYPES),
            line("       D1C S1C", OBS_TYPES),
            line("", "END OF HEADER"),
        ]);
        assert!(diags.is_empty());
        assert!(header.explicit_end);
        assert_eq!(
            header.registry().observables(&Constellation::GPS),
            Some([obs("C1C"), obs("L1C"), obs("D1C"), obs("S1C")].as_slice())
        );
    }

    #[test]
    fn interrupted_code_list() {
        let (header, diags) = parse(&[
            line("E    3 C1C L1C", OBS_TYPES),
            line("GPS", "TIME OF FIRST OBS"),
            line("", "END OF HEADER"),
        ]);
        assert_eq!(
            header.registry().observables(&Constellation::Galileo),
            Some([obs("C1C"), obs("L1C")].as_slice())
        );
        // interrupted list, then malformed time of first obs
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.line() == 2));
    }

    #[test]
    fn redeclared_constellation() {
        let (header, diags) = parse(&[
            line("G    1 C1C", OBS_TYPES),
            line("G    1 L1C", OBS_TYPES),
        ]);
        assert_eq!(diags.len(), 1);
        assert_eq!(
            header.registry().observables(&Constellation::GPS),
            Some([obs("C1C")].as_slice())
        );
    }

    #[test]
    fn malformed_fields_are_recovered() {
        let (header, diags) = parse(&[
            line("  abc.def     12.0    13.0", "APPROX POSITION XYZ"),
            line("    18", "LEAP SECONDS"),
            line("X    2 C1C L1C", OBS_TYPES),
        ]);
        assert!(header.rx_position.is_none());
        assert_eq!(header.leap.map(|l| l.leap), Some(18));
        assert_eq!(diags.len(), 2);
        assert!(header.registry().constellations().is_empty());
    }

    #[test]
    fn oversized_code_count() {
        let (header, diags) = parse(&[
            line("G 99999999999999 C1C", OBS_TYPES),
            line("E 1000 C1C", OBS_TYPES),
            line("R    1 C1C", OBS_TYPES),
            line("", "END OF HEADER"),
        ]);
        assert_eq!(diags.len(), 2);
        assert!(diags
            .iter()
            .all(|d| matches!(d, Diagnostic::MalformedHeaderField { .. })));
        assert_eq!(diags.iter().map(|d| d.line()).collect::<Vec<_>>(), vec![1, 2]);
        let registry = header.registry();
        assert!(registry.observables(&Constellation::GPS).is_none());
        assert!(registry.observables(&Constellation::Galileo).is_none());
        assert_eq!(
            registry.observables(&Constellation::Glonass),
            Some([obs("C1C")].as_slice())
        );
    }

    #[test]
    fn scale_factors() {
        let (header, diags) = parse(&[
            line("G    4 C1C L1C D1C S1C", OBS_TYPES),
            line("G   10  2 L1C D1C", SCALE_FACTOR),
            line("E  100", SCALE_FACTOR),
        ]);
        assert!(diags.is_empty());
        let registry = header.registry();
        assert_eq!(registry.scaling(Constellation::GPS, &obs("L1C")), Some(10));
        assert_eq!(registry.scaling(Constellation::GPS, &obs("C1C")), None);
        assert_eq!(registry.scaling(Constellation::Galileo, &obs("C5Q")), Some(100));
    }

    #[test]
    fn phase_shifts() {
        let (header, diags) = parse(&[
            line("G L2S -0.25000  2 G01 G02", PHASE_SHIFT),
            line("E L1C  0.00000", PHASE_SHIFT),
            line("R", PHASE_SHIFT),
        ]);
        assert!(diags.is_empty());
        let shift = header
            .registry()
            .phase_shift(Constellation::GPS, &obs("L2S"))
            .unwrap();
        assert_eq!(shift.correction, -0.25);
        assert_eq!(shift.satellites.len(), 2);
        assert!(header
            .registry()
            .phase_shift(Constellation::Galileo, &obs("L1C"))
            .is_some());
    }

    #[test]
    fn glonass_slots_and_biases() {
        let (header, diags) = parse(&[
            line(" 22 R01  1 R02 -4 R03  5 R04  6 R05  1 R06 -4 R07  5 R08  6", "GLONASS SLOT / FRQ #"),
            line(" C1C  -10.000 C1P  -10.123 C2C  -10.432 C2P         ", "GLONASS COD/PHS/BIS"),
        ]);
        assert!(diags.is_empty());
        let registry = header.registry();
        assert_eq!(registry.glonass_channel(&SV::from_str("R02").unwrap()), Some(-4));
        assert_eq!(registry.glonass_channels().count(), 8);
        assert_eq!(registry.glonass_bias(&obs("C1P")), Some(Some(-10.123)));
        assert_eq!(registry.glonass_bias(&obs("C2P")), Some(None));
        assert_eq!(registry.glonass_bias(&obs("L1C")), None);
    }

    #[test]
    fn observation_counts() {
        let (header, diags) = parse(&[
            line("G    2 C1C L1C", OBS_TYPES),
            line("R    2 C1C L1C", OBS_TYPES),
            line("   G01   100    98", OBS_COUNTS),
            line("   R05   120", OBS_COUNTS),
            line("   G03    12    12", OBS_COUNTS),
        ]);
        assert!(diags.is_empty());
        let registry = header.registry();
        let g01 = SV::from_str("G01").unwrap();
        let r05 = SV::from_str("R05").unwrap();
        assert_eq!(registry.observation_counts(&g01), Some([Some(100), Some(98)].as_slice()));
        assert_eq!(registry.observation_counts(&r05), Some([Some(120)].as_slice()));
    }

    #[test]
    fn phase_centers() {
        let content = format!("G L1C{:>9.4}{:>14.4}{:>14.4}", 0.0123, -0.0005, 0.0871);
        let (header, diags) = parse(&[
            line(&content, "ANTENNA: PHASECENTER"),
            line("X L1C   0.0000        0.0000        0.0000", "ANTENNA: PHASECENTER"),
        ]);
        assert_eq!(diags.len(), 1);
        let center = header
            .registry()
            .phase_center(Constellation::GPS, &obs("L1C"))
            .unwrap();
        assert_eq!(center.north, 0.0123);
        assert_eq!(center.east, -0.0005);
        assert_eq!(center.up, 0.0871);
        assert!(header
            .registry()
            .phase_center(Constellation::Galileo, &obs("L1C"))
            .is_none());
    }

    #[test]
    fn time_of_first_obs() {
        let (header, diags) = parse(&[
            line("  2021     1     1     0     0    0.0000000     GAL", "TIME OF FIRST OBS"),
            line("  2021     1     1    23    59   30.0000000", "TIME OF LAST OBS"),
        ]);
        assert!(diags.is_empty());
        assert_eq!(header.timescale(), TimeScale::GST);
        let t1 = header.timeof_last_obs.unwrap();
        assert_eq!(t1.time_scale, TimeScale::GPST);
    }

    #[test]
    fn station_description() {
        let (header, diags) = parse(&[
            line("ESBC00DNK", "MARKER NAME"),
            line("10118M001", "MARKER NUMBER"),
            line("GEODETIC", "MARKER TYPE"),
            line("SGX                 SDFE", "OBSERVER / AGENCY"),
            line("3704C02144          SEPT POLARX5        5.3.2", "REC # / TYPE / VERS"),
            line("        0.0000        0.0000        0.0000", "ANTENNA: DELTA H/E/N"),
            line("30517581            TRM57971.00     NONE", "ANT # / TYPE"),
            line("    30.000", "INTERVAL"),
            line("     1", "RCV CLOCK OFFS APPL"),
            line("DBHZ", "SIGNAL STRENGTH UNIT"),
            line("a free comment", "COMMENT"),
            line("", "UNKNOWN LABEL"),
        ]);
        assert!(diags.is_empty());
        let marker = header.geodetic_marker.unwrap();
        assert_eq!(marker.name, "ESBC00DNK");
        assert_eq!(marker.number.as_deref(), Some("10118M001"));
        assert_eq!(marker.marker_type, Some(MarkerType::Geodetic));
        assert_eq!(header.agency.as_deref(), Some("SDFE"));
        assert_eq!(header.rcvr.unwrap().model, "SEPT POLARX5");
        let antenna = header.rcvr_antenna.unwrap();
        assert_eq!(antenna.model, "TRM57971.00     NONE");
        assert_eq!(antenna.height, Some(0.0));
        assert_eq!(header.sampling_interval, Some(Duration::from_seconds(30.0)));
        assert!(header.clock_offset_applied);
        assert_eq!(header.signal_strength_unit.as_deref(), Some("DBHZ"));
        assert_eq!(header.comments, vec!["a free comment".to_string()]);
    }
}
