//! Value field widths on satellite lines
use crate::prelude::{Observable, ObservableKind, Version};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier field width: "G01"
pub const SVNN_SIZE: usize = 3;

/// Lock loss indicator width, following each value field
pub const LLI_WIDTH: usize = 1;

/// Signal strength indicator width, following the LLI
pub const SSI_WIDTH: usize = 1;

/// Standard F14.3 value field
pub const OBSERVABLE_F14_WIDTH: usize = 14;

/// Value field of phase observations
pub const PHASE_F16_WIDTH: usize = 16;

lazy_static! {
    /// Revisions declaring codes with "SYS / # / OBS TYPES"
    static ref STANDARD_WIDTHS: FieldWidths = {
        let mut widths = FieldWidths::empty();
        for major in 3..=4 {
            for kind in [
                ObservableKind::PseudoRange,
                ObservableKind::Doppler,
                ObservableKind::SSI,
            ] {
                widths.set_kind(major, kind, OBSERVABLE_F14_WIDTH);
            }
            widths.set_kind(major, ObservableKind::Phase, PHASE_F16_WIDTH);
        }
        widths
    };
}

/// One entry of the [FieldWidths] table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthKey {
    /// Applies to every code of this measurement family
    Kind(ObservableKind),
    /// Applies to this exact code, prevails over [WidthKey::Kind]
    Code(String),
}

/// Serializable form of one table entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldWidth {
    /// RINEX major revision
    pub major: u8,
    pub key: WidthKey,
    /// Value field width, lock and strength indicators excluded
    pub width: usize,
}

/// Value field width table, keyed by RINEX major revision
/// and observation code. Codes that resolve to nothing
/// cannot be decoded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<FieldWidth>", into = "Vec<FieldWidth>")
)]
pub struct FieldWidths {
    kinds: HashMap<(u8, ObservableKind), usize>,
    codes: HashMap<u8, HashMap<String, usize>>,
}

impl Default for FieldWidths {
    /// Standard table: F14.3 everywhere, except 16 column phase fields.
    fn default() -> Self {
        STANDARD_WIDTHS.clone()
    }
}

impl FieldWidths {
    /// Table that knows no code at all
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
            codes: HashMap::new(),
        }
    }
    fn set_kind(&mut self, major: u8, kind: ObservableKind, width: usize) {
        self.kinds.insert((major, kind), width);
    }
    fn set_code(&mut self, major: u8, code: &str, width: usize) {
        self.codes
            .entry(major)
            .or_default()
            .insert(code.trim().to_uppercase(), width);
    }
    /// Returns a table where this measurement family uses given width
    pub fn with_kind_width(&self, major: u8, kind: ObservableKind, width: usize) -> Self {
        let mut s = self.clone();
        s.set_kind(major, kind, width);
        s
    }
    /// Returns a table where this exact code uses given width
    pub fn with_code_width(&self, major: u8, code: &str, width: usize) -> Self {
        let mut s = self.clone();
        s.set_code(major, code, width);
        s
    }
    /// Value field width of this [Observable] in this revision
    pub fn value_width(&self, version: Version, observable: &Observable) -> Option<usize> {
        if let Some(width) = self
            .codes
            .get(&version.major)
            .and_then(|codes| codes.get(observable.code()))
        {
            return Some(*width);
        }
        let kind = observable.kind()?;
        self.kinds.get(&(version.major, kind)).copied()
    }
    /// Full slot width (value and both indicators)
    pub fn slot_width(&self, version: Version, observable: &Observable) -> Option<usize> {
        Some(self.value_width(version, observable)? + LLI_WIDTH + SSI_WIDTH)
    }
    /// Value field widths of a declared code list, in declared order
    pub(crate) fn layout(&self, version: Version, observables: &[Observable]) -> Vec<Option<usize>> {
        observables
            .iter()
            .map(|obs| self.value_width(version, obs))
            .collect()
    }
}

impl From<Vec<FieldWidth>> for FieldWidths {
    fn from(entries: Vec<FieldWidth>) -> Self {
        let mut widths = Self::empty();
        for entry in entries {
            match entry.key {
                WidthKey::Kind(kind) => widths.set_kind(entry.major, kind, entry.width),
                WidthKey::Code(code) => widths.set_code(entry.major, &code, entry.width),
            }
        }
        widths
    }
}

impl From<FieldWidths> for Vec<FieldWidth> {
    fn from(widths: FieldWidths) -> Self {
        let mut entries = widths
            .kinds
            .into_iter()
            .map(|((major, kind), width)| FieldWidth {
                major,
                key: WidthKey::Kind(kind),
                width,
            })
            .collect::<Vec<_>>();
        for (major, codes) in widths.codes {
            for (code, width) in codes {
                entries.push(FieldWidth {
                    major,
                    key: WidthKey::Code(code),
                    width,
                });
            }
        }
        entries.sort_by(|a, b| (a.major, &a.key).cmp(&(b.major, &b.key)));
        entries
    }
}
