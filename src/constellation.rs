//! Constellation letters and satellite identifiers
use crate::prelude::{Constellation, SV};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("malformed satellite identifier \"{0}\"")]
    MalformedIdentifier(String),
    #[error("unknown constellation '{0}'")]
    UnknownConstellation(char),
}

/// Maps a single RINEX system letter to its [Constellation].
/// 'M' describes a mixed file and is only valid in headers.
pub fn from_letter(letter: char) -> Option<Constellation> {
    match letter.to_ascii_uppercase() {
        'G' => Some(Constellation::GPS),
        'R' => Some(Constellation::Glonass),
        'S' => Some(Constellation::SBAS),
        'E' => Some(Constellation::Galileo),
        'J' => Some(Constellation::QZSS),
        'C' => Some(Constellation::BeiDou),
        'I' => Some(Constellation::IRNSS),
        'M' => Some(Constellation::Mixed),
        _ => None,
    }
}

/// Returns the RINEX system letter of given [Constellation].
/// SBAS augmentation systems all share 'S'.
pub fn letter(constellation: Constellation) -> char {
    match constellation {
        Constellation::GPS => 'G',
        Constellation::Glonass => 'R',
        Constellation::Galileo => 'E',
        Constellation::QZSS => 'J',
        Constellation::BeiDou => 'C',
        Constellation::IRNSS => 'I',
        Constellation::Mixed => 'M',
        c if c.is_sbas() => 'S',
        _ => '?',
    }
}

/// Parses a strict satellite identifier: one system letter
/// followed by exactly two decimal digits ("G01", "R24", "S23").
pub fn parse_sv(content: &str) -> Result<SV, Error> {
    let bytes = content.as_bytes();
    if bytes.len() != 3 || !bytes[1].is_ascii_digit() || !bytes[2].is_ascii_digit() {
        return Err(Error::MalformedIdentifier(content.to_string()));
    }
    let letter = bytes[0] as char;
    if !letter.is_ascii_alphabetic() {
        return Err(Error::MalformedIdentifier(content.to_string()));
    }
    let constellation = match from_letter(letter) {
        Some(Constellation::Mixed) | None => return Err(Error::UnknownConstellation(letter)),
        Some(c) => c,
    };
    let prn = (bytes[1] - b'0') * 10 + (bytes[2] - b'0');
    Ok(SV { constellation, prn })
}
