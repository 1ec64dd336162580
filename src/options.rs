//! Parser configuration
use crate::{diagnostic::DEFAULT_ORPHAN_THRESHOLD, observation::FieldWidths};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that tune a parse attempt.
/// Defaults suit standard RINEX files.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParsingOptions {
    /// Value field widths
    pub widths: FieldWidths,
    /// Number of invalid lines tolerated right after the header,
    /// before any epoch, until the file is declared corrupt
    pub orphan_threshold: usize,
    /// Divide decoded values by "SYS / SCALE FACTOR" when declared
    pub apply_scaling: bool,
    /// Polled once per line: parsing stops when raised
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ParsingOptions {
    fn default() -> Self {
        Self {
            widths: FieldWidths::default(),
            orphan_threshold: DEFAULT_ORPHAN_THRESHOLD,
            apply_scaling: true,
            cancel: None,
        }
    }
}

impl PartialEq for ParsingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.widths == other.widths
            && self.orphan_threshold == other.orphan_threshold
            && self.apply_scaling == other.apply_scaling
            && match (&self.cancel, &other.cancel) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl ParsingOptions {
    /// Copies and returns with custom field widths
    pub fn with_widths(&self, widths: FieldWidths) -> Self {
        let mut s = self.clone();
        s.widths = widths;
        s
    }
    /// Copies and returns with a custom orphan line threshold
    pub fn with_orphan_threshold(&self, threshold: usize) -> Self {
        let mut s = self.clone();
        s.orphan_threshold = threshold;
        s
    }
    /// Copies and returns with scaling enabled or disabled
    pub fn with_scaling(&self, apply: bool) -> Self {
        let mut s = self.clone();
        s.apply_scaling = apply;
        s
    }
    /// Copies and returns with a cancellation signal
    pub fn with_cancel_signal(&self, signal: Arc<AtomicBool>) -> Self {
        let mut s = self.clone();
        s.cancel = Some(signal);
        s
    }
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |signal| signal.load(Ordering::Relaxed))
    }
}
