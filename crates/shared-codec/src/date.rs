//! # Packed Dates
//!
//! Dates travel as the decimal number `MMDDYYYY` in 3 big-endian bytes;
//! timestamps as `MMDDYYYYHHMMSS` in 6 bytes. Masked dates prepend a byte
//! whose bit `7 - i` marks position `i` of `MMDDYYYY` as unknown.

use crate::errors::{CodecError, CodecResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Encoded size of a date.
pub const DATE_LEN: usize = 3;
/// Encoded size of a timestamp.
pub const DATE_TIME_LEN: usize = 6;
/// Encoded size of a masked date (mask byte + date).
pub const MASKED_DATE_LEN: usize = 4;

const UNKNOWN_DIGIT: char = 'x';

// =============================================================================
// DATES
// =============================================================================

/// Pack a calendar date.
pub fn encode_date(date: NaiveDate) -> CodecResult<[u8; DATE_LEN]> {
    check_year(date.year())?;
    let value = date.month() * 1_000_000 + date.day() * 10_000 + date.year() as u32;
    let bytes = value.to_be_bytes();
    Ok([bytes[1], bytes[2], bytes[3]])
}

/// Unpack a calendar date.
pub fn decode_date(data: &[u8]) -> CodecResult<NaiveDate> {
    let value = read_be_exact(data, DATE_LEN)? as u32;
    let day = (value % 1_000_000) / 10_000;
    let month = value / 1_000_000;
    let year = value % 10_000;
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .filter(|d| d.year() >= 1)
        .ok_or_else(|| CodecError::InvalidDate(format!("{value:08}")))
}

/// Pack a date and time of day (seconds precision).
pub fn encode_date_time(date_time: NaiveDateTime) -> CodecResult<[u8; DATE_TIME_LEN]> {
    check_year(date_time.year())?;
    let value = u64::from(date_time.month()) * 1_000_000_000_000
        + u64::from(date_time.day()) * 10_000_000_000
        + date_time.year() as u64 * 1_000_000
        + u64::from(date_time.hour()) * 10_000
        + u64::from(date_time.minute()) * 100
        + u64::from(date_time.second());
    let bytes = value.to_be_bytes();
    let mut out = [0u8; DATE_TIME_LEN];
    out.copy_from_slice(&bytes[2..]);
    Ok(out)
}

/// Unpack a date and time of day.
pub fn decode_date_time(data: &[u8]) -> CodecResult<NaiveDateTime> {
    let value = read_be_exact(data, DATE_TIME_LEN)?;
    let month = (value / 1_000_000_000_000) as u32;
    let day = ((value / 10_000_000_000) % 100) as u32;
    let year = ((value / 1_000_000) % 10_000) as i32;
    let hour = ((value / 10_000) % 100) as u32;
    let minute = ((value / 100) % 100) as u32;
    let second = (value % 100) as u32;

    NaiveDate::from_ymd_opt(year, month, day)
        .filter(|d| d.year() >= 1)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| CodecError::InvalidDate(format!("{value:014}")))
}

fn check_year(year: i32) -> CodecResult<()> {
    if (1..=9999).contains(&year) {
        Ok(())
    } else {
        Err(CodecError::InvalidDate(format!("year {year} outside 1..=9999")))
    }
}

fn read_be_exact(data: &[u8], len: usize) -> CodecResult<u64> {
    if data.len() < len {
        return Err(CodecError::TruncatedInput {
            offset: 0,
            needed: len,
            available: data.len(),
        });
    }
    if data.len() > len {
        return Err(CodecError::InvalidDate(format!(
            "expected {len} bytes, got {}",
            data.len()
        )));
    }
    Ok(data.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

// =============================================================================
// MASKED DATES
// =============================================================================

/// Pack a `yyyy-MM-dd` string in which any digit may be `x` (unknown).
pub fn encode_masked_date(masked: &str) -> CodecResult<[u8; MASKED_DATE_LEN]> {
    let mmddyyyy = to_mmddyyyy(masked)?;

    let mut mask = 0u8;
    let mut value = 0u32;
    for (i, c) in mmddyyyy.iter().enumerate() {
        let digit = if *c == UNKNOWN_DIGIT {
            mask |= 1 << (7 - i);
            0
        } else {
            c.to_digit(10)
                .ok_or_else(|| CodecError::MalformedMaskedDate(masked.to_string()))?
        };
        value = value * 10 + digit;
    }

    let bytes = value.to_be_bytes();
    Ok([mask, bytes[1], bytes[2], bytes[3]])
}

/// Unpack a masked date back to `yyyy-MM-dd` with `x` for unknown digits.
pub fn decode_masked_date(data: &[u8]) -> CodecResult<String> {
    let value = read_be_exact(data, MASKED_DATE_LEN)?;
    let mask = (value >> 24) as u8;
    let date = (value & 0x00FF_FFFF) as u32;

    let mut chars: Vec<char> = format!("{date:08}").chars().collect();
    if chars.len() != 8 {
        return Err(CodecError::InvalidDate(format!("{date}")));
    }
    for (i, c) in chars.iter_mut().enumerate() {
        if mask & (1 << (7 - i)) != 0 {
            *c = UNKNOWN_DIGIT;
        }
    }

    let month: String = chars[0..2].iter().collect();
    let day: String = chars[2..4].iter().collect();
    let year: String = chars[4..8].iter().collect();
    Ok(format!("{year}-{month}-{day}"))
}

/// Validate `yyyy-MM-dd` (digits or `x`) and reorder to `MMDDYYYY`.
fn to_mmddyyyy(masked: &str) -> CodecResult<Vec<char>> {
    let malformed = || CodecError::MalformedMaskedDate(masked.to_string());

    let chars: Vec<char> = masked.chars().map(|c| c.to_ascii_lowercase()).collect();
    if chars.len() != 10 || chars[4] != '-' || chars[7] != '-' {
        return Err(malformed());
    }
    let valid = chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, c)| c.is_ascii_digit() || *c == UNKNOWN_DIGIT);
    if !valid {
        return Err(malformed());
    }

    let mut out = Vec::with_capacity(8);
    out.extend_from_slice(&chars[5..7]);
    out.extend_from_slice(&chars[8..10]);
    out.extend_from_slice(&chars[0..4]);
    Ok(out)
}
