//! Epoch parsing helpers
use hifitime::{Epoch, TimeScale};
use thiserror::Error;

mod flag;
pub use flag::{EpochFlag, Error as FlagError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("expecting \"yyyy mm dd hh mm ss.sssssss\" format")]
    FormatError,
    #[error("failed to parse years from \"{0}\"")]
    YearField(String),
    #[error("failed to parse months from \"{0}\"")]
    MonthField(String),
    #[error("failed to parse days from \"{0}\"")]
    DayField(String),
    #[error("failed to parse hours from \"{0}\"")]
    HoursField(String),
    #[error("failed to parse minutes field from \"{0}\"")]
    MinutesField(String),
    #[error("failed to parse seconds field from \"{0}\"")]
    SecondsField(String),
    #[error("invalid calendar date")]
    InvalidDate,
}

/// Maps the three letter time system code found in
/// "TIME OF FIRST OBS" to a [TimeScale].
/// GLONASS time is UTC based, QZSS and IRNSS time are GPS aligned.
pub fn timescale_from_code(code: &str) -> Option<TimeScale> {
    match code.trim() {
        "GPS" | "QZS" | "IRN" => Some(TimeScale::GPST),
        "GAL" => Some(TimeScale::GST),
        "BDT" => Some(TimeScale::BDT),
        "GLO" | "UTC" => Some(TimeScale::UTC),
        "TAI" => Some(TimeScale::TAI),
        _ => None,
    }
}

/// Splits fractional seconds "30.0000000" into (seconds, nanoseconds).
/// Sub nanosecond digits are truncated.
fn parse_seconds(content: &str) -> Result<(u8, u32), ParsingError> {
    let err = || ParsingError::SecondsField(content.to_string());
    let (secs, frac) = content.split_once('.').unwrap_or((content, ""));
    if secs.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    let secs = secs.parse::<u8>().map_err(|_| err())?;
    let mut nanos = 0_u32;
    for (i, digit) in frac.bytes().chain(std::iter::repeat(b'0')).take(9).enumerate() {
        nanos += (digit - b'0') as u32 * 10_u32.pow(8 - i as u32);
    }
    Ok((secs, nanos))
}

/// Parses an epoch from whitespace separated "y m d hh mm ss.ssss" items,
/// expressed in given [TimeScale].
/// Two digit years are accepted (< 80 means 20xx).
pub(crate) fn parse_in_timescale(items: &[&str], ts: TimeScale) -> Result<Epoch, ParsingError> {
    if items.len() < 6 {
        return Err(ParsingError::FormatError);
    }

    let mut y = items[0]
        .parse::<i32>()
        .map_err(|_| ParsingError::YearField(items[0].to_string()))?;

    if y < 100 {
        if y < 80 {
            y += 2000;
        } else {
            y += 1900;
        }
    }

    let m = items[1]
        .parse::<u8>()
        .map_err(|_| ParsingError::MonthField(items[1].to_string()))?;

    let d = items[2]
        .parse::<u8>()
        .map_err(|_| ParsingError::DayField(items[2].to_string()))?;

    let hh = items[3]
        .parse::<u8>()
        .map_err(|_| ParsingError::HoursField(items[3].to_string()))?;

    let mm = items[4]
        .parse::<u8>()
        .map_err(|_| ParsingError::MinutesField(items[4].to_string()))?;

    let (ss, ns) = parse_seconds(items[5])?;

    Epoch::maybe_from_gregorian(y, m, d, hh, mm, ss, ns, ts).map_err(|_| ParsingError::InvalidDate)
}
