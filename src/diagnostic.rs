//! Recovered parsing conditions
use crate::prelude::{Epoch, Observable, SV};
use thiserror::Error;

#[cfg(feature = "log")]
use log::{error, warn};

/// Default number of data lines tolerated after the header
/// before a first valid epoch shows up.
pub const DEFAULT_ORPHAN_THRESHOLD: usize = 10;

/// Every condition a parse attempt recovered from, in order of appearance.
/// All variants refer to the 1-based line number they were raised on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A known header label carried an invalid value:
    /// the field was left to its default
    #[error("line {line}: malformed \"{label}\": {reason}")]
    MalformedHeaderField {
        line: usize,
        label: String,
        reason: String,
    },
    /// Header declared a code with no known field width:
    /// this code and the following ones were not decoded on this line
    #[error("line {line}: {sv}: no field width known for \"{code}\"")]
    UnknownObservationCode {
        line: usize,
        sv: SV,
        code: Observable,
    },
    /// Satellite belongs to a constellation the header never declared
    #[error("line {line}: constellation '{letter}' not declared in header")]
    UnknownConstellation { line: usize, letter: char },
    /// Data line does not start with a valid satellite identifier
    #[error("line {line}: invalid satellite identifier \"{id}\"")]
    InvalidSatellite { line: usize, id: String },
    /// Value field shorter than its declared width
    #[error("line {line}: {sv}: \"{code}\" field is truncated")]
    TruncatedField {
        line: usize,
        sv: SV,
        code: Observable,
    },
    /// Header ended on an epoch line without "END OF HEADER"
    #[error("line {line}: header ended without END OF HEADER marker")]
    ImplicitHeaderEnd { line: usize },
    /// Input ended before the header did
    #[error("line {line}: input ended within header section")]
    MissingHeaderEnd { line: usize },
    /// Line too short to contain its mandatory content, skipped
    #[error("line {line}: {reason}")]
    StructuralCorruption { line: usize, reason: String },
    /// Data line found before any epoch, discarded
    #[error("line {line}: observation outside of any epoch")]
    OrphanObservation { line: usize },
    /// Too many invalid lines right after the header:
    /// parsing stopped at this point
    #[error("line {line}: {count} invalid lines before any epoch, content is corrupt")]
    CorruptFile { line: usize, count: usize },
    /// Epoch announced a number of satellites that did not follow
    #[error("line {line}: epoch {epoch} declared {declared} satellites, {found} found")]
    SatelliteCountMismatch {
        line: usize,
        epoch: Epoch,
        declared: u16,
        found: u16,
    },
    /// Same (epoch, satellite, code) decoded twice: first value is kept
    #[error("line {line}: {sv} \"{code}\" already defined for this epoch")]
    DuplicateRecord {
        line: usize,
        sv: SV,
        code: Observable,
    },
}

impl Diagnostic {
    /// Line number this was raised on
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedHeaderField { line, .. }
            | Self::UnknownObservationCode { line, .. }
            | Self::UnknownConstellation { line, .. }
            | Self::InvalidSatellite { line, .. }
            | Self::TruncatedField { line, .. }
            | Self::ImplicitHeaderEnd { line }
            | Self::MissingHeaderEnd { line }
            | Self::StructuralCorruption { line, .. }
            | Self::OrphanObservation { line }
            | Self::CorruptFile { line, .. }
            | Self::SatelliteCountMismatch { line, .. }
            | Self::DuplicateRecord { line, .. } => *line,
        }
    }
    /// True when parsing could not go on past this point
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CorruptFile { .. })
    }
    pub(crate) fn malformed(line: usize, label: &str, reason: impl ToString) -> Self {
        Self::MalformedHeaderField {
            line,
            label: label.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Ordered list of [Diagnostic]s, filled as parsing goes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn push(&mut self, diag: Diagnostic) {
        #[cfg(feature = "log")]
        trace_diagnostic(&diag);
        self.0.push(diag);
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns true if a terminal condition was met
    pub fn has_terminal(&self) -> bool {
        self.0.iter().any(|d| d.is_terminal())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(feature = "log")]
fn trace_diagnostic(diag: &Diagnostic) {
    if diag.is_terminal() {
        error!("{}", diag);
    } else {
        warn!("{}", diag);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Constellation;
    #[test]
    fn diagnostics_list() {
        let mut diags = Diagnostics::default();
        assert!(diags.is_empty());
        diags.push(Diagnostic::ImplicitHeaderEnd { line: 12 });
        diags.push(Diagnostic::TruncatedField {
            line: 14,
            sv: SV {
                constellation: Constellation::GPS,
                prn: 1,
            },
            code: Observable::SSI("S1C".to_string()),
        });
        assert!(!diags.has_terminal());
        diags.push(Diagnostic::CorruptFile { line: 30, count: 11 });
        assert!(diags.has_terminal());

        let lines = diags.iter().map(|d| d.line()).collect::<Vec<_>>();
        assert_eq!(lines, vec![12, 14, 30]);

        let message = diags.iter().nth(1).unwrap().to_string();
        assert_eq!(message, "line 14: G01: \"S1C\" field is truncated");
    }
}
