//! Fixed width satellite line decoding
use crate::{
    columns::columns,
    observation::{
        widths::{LLI_WIDTH, SSI_WIDTH, SVNN_SIZE},
        ObservationValue,
    },
};

/// Result of slicing one satellite line
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DecodedLine {
    /// One triplet per declared code, in declared order
    pub fields: Vec<ObservationValue>,
    /// Indexes of the value fields that were cut short
    pub truncated: Vec<usize>,
    /// Index of the first code without a known width.
    /// That field and all following ones are absent.
    pub unknown: Option<usize>,
}

/// Removes the zero padding of a numeric field, keeping
/// at least one digit ahead of the decimal point.
fn strip_leading_zeros(content: &str) -> String {
    let (sign, digits) = match content.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", content.strip_prefix('+').unwrap_or(content)),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() || digits.starts_with('.') {
        format!("{}0{}", sign, digits)
    } else {
        format!("{}{}", sign, digits)
    }
}

/// Parses one value field. Blank or non numeric content is absent,
/// a field needs at least one digit.
pub(crate) fn parse_value(content: &str) -> Option<f64> {
    let content = content.trim();
    if !content.chars().any(|c| c.is_ascii_digit())
        || !content
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    strip_leading_zeros(content).parse::<f64>().ok()
}

/// Parses one single column indicator: only decimal digits are valid
pub(crate) fn parse_indicator(content: &str) -> Option<u8> {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c as u8 - b'0'),
        _ => None,
    }
}

/// Decodes `line` (identifier included) against the value field widths
/// of the declared codes. Never fails: what cannot be decoded is absent.
pub(crate) fn decode_observations(line: &str, layout: &[Option<usize>]) -> DecodedLine {
    let mut decoded = DecodedLine {
        fields: Vec::with_capacity(layout.len()),
        ..Default::default()
    };

    let mut offset = SVNN_SIZE;

    for (index, width) in layout.iter().enumerate() {
        let width = match width {
            Some(width) => *width,
            None => {
                decoded.unknown = Some(index);
                break;
            },
        };

        let value_str = columns(line, offset, offset + width);
        let value = if value_str.len() < width {
            if !value_str.trim().is_empty() {
                decoded.truncated.push(index);
            }
            None
        } else {
            parse_value(value_str)
        };

        let lli = parse_indicator(columns(line, offset + width, offset + width + LLI_WIDTH));
        let snr = parse_indicator(columns(
            line,
            offset + width + LLI_WIDTH,
            offset + width + LLI_WIDTH + SSI_WIDTH,
        ));

        decoded.fields.push(ObservationValue { value, lli, snr });
        offset += width + LLI_WIDTH + SSI_WIDTH;
    }

    // explicit absent records for what could not be reached
    decoded
        .fields
        .resize(layout.len(), ObservationValue::default());

    decoded
}
