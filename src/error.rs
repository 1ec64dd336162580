use thiserror::Error;

use crate::{
    constellation::Error as SvError, epoch::FlagError as EpochFlagError,
    epoch::ParsingError as EpochParsingError, leap::Error as LeapError,
    observable::Error as ObservableError, types::Error as TypeError,
    version::ParsingError as VersionParsingError,
};

/// Fatal errors: nothing can be returned to the caller.
/// Anything that happens once content is flowing ends up
/// as a [crate::Diagnostic] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Input stream could not be opened or read
    #[error("unreadable input: {0}")]
    UnreadableInput(#[from] std::io::Error),
}

/// Errors that may rise when interpreting a single field.
/// These never abort a parse attempt, they are turned
/// into diagnostics by the header parser and scanner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("version: {0}")]
    Version(#[from] VersionParsingError),
    #[error("file type: {0}")]
    Type(#[from] TypeError),
    #[error("leap seconds: {0}")]
    Leap(#[from] LeapError),
    #[error("observable: {0}")]
    Observable(#[from] ObservableError),
    #[error("epoch: {0}")]
    Epoch(#[from] EpochParsingError),
    #[error("epoch flag: {0}")]
    EpochFlag(#[from] EpochFlagError),
    #[error("satellite: {0}")]
    Satellite(#[from] SvError),
    #[error("unknown constellation \"{0}\"")]
    Constellation(String),
    #[error("invalid integer \"{0}\"")]
    Integer(String),
    #[error("invalid number \"{0}\"")]
    Float(String),
    #[error("unknown marker type \"{0}\"")]
    MarkerType(String),
    #[error("unknown time system \"{0}\"")]
    TimeSystem(String),
    #[error("missing field")]
    MissingField,
    #[error("continuation line without opening line")]
    OrphanContinuation,
}
