#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]

extern crate gnss_rs as gnss;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[macro_use]
extern crate lazy_static;

pub mod hardware;
pub mod header;
pub mod marker;
pub mod observation;
pub mod types;
pub mod version;

mod columns;
mod constellation;
mod diagnostic;
mod epoch;
mod error;
mod leap;
mod observable;
mod options;

#[cfg(test)]
mod tests;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use columns::label;
use header::{Continuation, HeaderParser, HeaderStep};
use observation::scanner::{is_new_epoch, ScanStep, Scanner};

#[cfg(feature = "log")]
use log::{debug, error};

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        diagnostic::{Diagnostic, Diagnostics, DEFAULT_ORPHAN_THRESHOLD},
        epoch::EpochFlag,
        error::{Error, ParsingError},
        hardware::{Antenna, Receiver},
        header::Header,
        leap::Leap,
        marker::{GeodeticMarker, MarkerType},
        observable::{Observable, ObservableKind},
        observation::{
            FieldWidths, LliFlags, ObsEpoch, ObsKey, ObservationRecord, ObservationStore,
            ObservationValue, Query, SchemaRegistry, SNR,
        },
        options::ParsingOptions,
        types::Type as RinexType,
        version::Version,
        ParseStatus, Rinex,
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

use prelude::*;

/// How a parse attempt ended
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseStatus {
    /// Input was consumed entirely
    #[default]
    Complete,
    /// Parsing stopped on a terminal [Diagnostic]
    Corrupted,
    /// Parsing stopped on the cancellation signal
    Cancelled,
}

/// One decoded observation, as exposed by [Rinex::record_iter]:
/// (epoch, constellation, satellite, code, value, lock flag, signal strength)
pub type RecordTuple<'a> = (
    &'a ObsKey,
    Constellation,
    SV,
    &'a Observable,
    Option<f64>,
    Option<u8>,
    Option<u8>,
);

/// Result of a parse attempt: possibly partial content
/// and everything that was recovered from along the way.
///
/// ```
/// use rinex_obs::prelude::*;
/// let content = concat!(
///     "     3.04           OBSERVATION DATA    G                   RINEX VERSION / TYPE\n",
///     "G    2 C1C L1C                                              SYS / # / OBS TYPES\n",
///     "                                                            END OF HEADER\n",
///     "> 2022 03 04 00 00  0.0000000  0  1\n",
///     "G01  20176608.780     106028802.118 8\n",
/// );
/// let rinex = Rinex::parse(content.as_bytes()).unwrap();
/// assert!(rinex.is_complete());
/// assert!(rinex.diagnostics.is_empty());
/// assert_eq!(rinex.store.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rinex {
    /// First (or only) header of this file
    pub header: Header,
    /// Headers of concatenated files, in order of appearance
    pub embedded_headers: Vec<Header>,
    /// Decoded observations
    pub store: ObservationStore,
    /// Everything that was recovered from, in order
    pub diagnostics: Diagnostics,
    /// How parsing ended
    pub status: ParseStatus,
}

/// Section of the file being parsed
enum Section {
    Header(HeaderParser, Continuation),
    Body(Scanner),
}

impl Rinex {
    /// Parses [Rinex] from any readable content, with default options
    pub fn parse<R: Read>(reader: R) -> Result<Self, Error> {
        Self::parse_with_options(reader, &ParsingOptions::default())
    }

    /// Parses [Rinex] from any readable content.
    /// Only I/O errors are fatal: everything else is reported
    /// in [Rinex::diagnostics].
    pub fn parse_with_options<R: Read>(reader: R, opts: &ParsingOptions) -> Result<Self, Error> {
        let mut reader = BufReader::new(reader);
        Self::from_reader(&mut reader, opts)
    }

    /// Parses [Rinex] from a buffered reader, consuming it entirely
    pub fn from_reader<B: BufRead>(reader: &mut B, opts: &ParsingOptions) -> Result<Self, Error> {
        let mut rinex = Self::default();
        let mut headers = 0;
        let mut lineno = 0;
        let mut buf = Vec::<u8>::with_capacity(128);

        let mut section = Section::Header(HeaderParser::new(), Continuation::Idle);

        loop {
            if opts.is_cancelled() {
                #[cfg(feature = "log")]
                debug!("line {}: parsing cancelled", lineno);
                rinex.status = ParseStatus::Cancelled;
                break;
            }

            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            lineno += 1;

            let content = String::from_utf8_lossy(&buf);
            let line = content.trim_end_matches(['\n', '\r']);

            let (next, step) = match section {
                Section::Header(mut parser, continuation) => {
                    if is_new_epoch(line) {
                        rinex
                            .diagnostics
                            .push(Diagnostic::ImplicitHeaderEnd { line: lineno });
                        let header = parser.finish(continuation, lineno, &mut rinex.diagnostics);
                        let mut scanner = Scanner::new(&header, opts);
                        rinex.push_header(header, &mut headers);
                        let step =
                            scanner.scan(line, lineno, &mut rinex.store, &mut rinex.diagnostics);
                        (Section::Body(scanner), step)
                    } else {
                        match parser.consume(continuation, line, lineno, &mut rinex.diagnostics) {
                            HeaderStep::Continue(continuation) => {
                                (Section::Header(parser, continuation), ScanStep::Continue)
                            },
                            HeaderStep::End => {
                                let header = parser.finish(
                                    Continuation::Idle,
                                    lineno,
                                    &mut rinex.diagnostics,
                                );
                                let scanner = Scanner::new(&header, opts);
                                rinex.push_header(header, &mut headers);
                                (Section::Body(scanner), ScanStep::Continue)
                            },
                        }
                    }
                },
                Section::Body(mut scanner) => {
                    if label(line) == "RINEX VERSION / TYPE" {
                        #[cfg(feature = "log")]
                        debug!("line {}: embedded header", lineno);

                        scanner.finish(lineno, &mut rinex.diagnostics);
                        let mut parser = HeaderParser::new();
                        let continuation = match parser.consume(
                            Continuation::Idle,
                            line,
                            lineno,
                            &mut rinex.diagnostics,
                        ) {
                            HeaderStep::Continue(continuation) => continuation,
                            HeaderStep::End => Continuation::Idle,
                        };
                        (Section::Header(parser, continuation), ScanStep::Continue)
                    } else {
                        let step =
                            scanner.scan(line, lineno, &mut rinex.store, &mut rinex.diagnostics);
                        (Section::Body(scanner), step)
                    }
                },
            };

            section = next;

            if step == ScanStep::Corrupted {
                #[cfg(feature = "log")]
                error!("line {}: corrupt content, parsing aborted", lineno);
                rinex.status = ParseStatus::Corrupted;
                break;
            }
        }

        match section {
            Section::Header(parser, continuation) => {
                if rinex.status == ParseStatus::Complete {
                    rinex
                        .diagnostics
                        .push(Diagnostic::MissingHeaderEnd { line: lineno });
                }
                let header = parser.finish(continuation, lineno, &mut rinex.diagnostics);
                rinex.push_header(header, &mut headers);
            },
            Section::Body(mut scanner) => {
                if rinex.status == ParseStatus::Complete {
                    scanner.finish(lineno, &mut rinex.diagnostics);
                }
            },
        }

        Ok(rinex)
    }

    fn push_header(&mut self, header: Header, count: &mut usize) {
        if *count == 0 {
            self.header = header;
        } else {
            self.embedded_headers.push(header);
        }
        *count += 1;
    }

    /// Parses [Rinex] from local readable file, with default options.
    /// See [Self::from_gzip_file] for seamless Gzip support.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Rinex, Error> {
        Self::from_file_with_options(path, &ParsingOptions::default())
    }

    /// Parses [Rinex] from local readable file
    pub fn from_file_with_options<P: AsRef<Path>>(
        path: P,
        opts: &ParsingOptions,
    ) -> Result<Rinex, Error> {
        let fd = File::open(path.as_ref())?;
        let mut reader = BufReader::new(fd);
        Self::from_reader(&mut reader, opts)
    }

    /// Parses [Rinex] from local gzip compressed file
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(path: P) -> Result<Rinex, Error> {
        Self::from_gzip_file_with_options(path, &ParsingOptions::default())
    }

    /// Parses [Rinex] from local gzip compressed file
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file_with_options<P: AsRef<Path>>(
        path: P,
        opts: &ParsingOptions,
    ) -> Result<Rinex, Error> {
        let fd = File::open(path.as_ref())?;
        let mut reader = BufReader::new(GzDecoder::new(fd));
        Self::from_reader(&mut reader, opts)
    }

    /// Returns true if input was entirely consumed
    pub fn is_complete(&self) -> bool {
        self.status == ParseStatus::Complete
    }

    /// Returns all header comments, embedded headers included,
    /// in order of appearance
    pub fn comments(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(&self.header)
            .chain(self.embedded_headers.iter())
            .flat_map(|header| header.comments.iter().map(|c| c.as_str()))
    }

    /// Sampling epochs, in order of appearance
    pub fn epochs(&self) -> &[ObsEpoch] {
        self.store.epochs()
    }

    /// Iterates every decoded observation, in epoch order
    pub fn record_iter(&self) -> impl Iterator<Item = RecordTuple<'_>> + '_ {
        self.store.iter().map(|record| {
            (
                &record.key.epoch,
                record.key.constellation,
                record.key.sv,
                &record.key.observable,
                record.value.value,
                record.value.lli,
                record.value.snr,
            )
        })
    }
}
