use chrono::NaiveDate;

use crate::error::{RateError, Result};

const EXTERNAL_FORMAT: &str = "%d.%m.%Y";
const INTERNAL_FORMAT: &str = "%Y-%m-%d";

/// Parses a `DD.MM.YYYY` date. chrono alone is lenient about field widths,
/// so the exact shape is checked first.
pub fn parse(external: &str) -> Result<NaiveDate> {
    if !has_external_shape(external) {
        return Err(RateError::InvalidDateFormat(external.to_owned()));
    }

    NaiveDate::parse_from_str(external, EXTERNAL_FORMAT)
        .map_err(|_| RateError::InvalidDateFormat(external.to_owned()))
}

/// `DD.MM.YYYY` -> `YYYY-MM-DD`.
pub fn normalize(external: &str) -> Result<String> {
    parse(external).map(|date| date.format(INTERNAL_FORMAT).to_string())
}

fn has_external_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}
