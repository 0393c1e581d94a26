//! # C40 Text Packing
//!
//! DataMatrix C40 packing as used by seal headers and text messages: three
//! characters in two bytes, with an unlatch-to-ASCII escape for a single
//! trailing character.
//!
//! ## Alphabet
//!
//! | Value    | Character |
//! |----------|-----------|
//! | 0        | Shift 1 (filler, produces no output) |
//! | 3        | space (`<` is read as space) |
//! | 4..=13   | `0`..`9`  |
//! | 14..=39  | `A`..`Z`  |

use crate::errors::{CodecError, CodecResult};

/// Escape byte introducing a single ASCII character.
pub const UNLATCH: u8 = 0xFE;

const SHIFT1: u16 = 0;

// =============================================================================
// ENCODING
// =============================================================================

/// Pack a string into C40 bytes. Input is upper-cased and `<` becomes space.
pub fn encode(text: &str) -> CodecResult<Vec<u8>> {
    let normalized: Vec<char> = text
        .to_uppercase()
        .chars()
        .map(|c| if c == '<' { ' ' } else { c })
        .collect();

    let mut out = Vec::with_capacity(normalized.len().div_ceil(3) * 2);
    for chunk in normalized.chunks(3) {
        match *chunk {
            [c1, c2, c3] => push_word(&mut out, c40_value(c1)?, c40_value(c2)?, c40_value(c3)?),
            [c1, c2] => push_word(&mut out, c40_value(c1)?, c40_value(c2)?, SHIFT1),
            [c1] => {
                c40_value(c1)?;
                out.push(UNLATCH);
                out.push(c1 as u8 + 1);
            }
            _ => unreachable!("chunks(3) yields 1..=3 elements"),
        }
    }
    Ok(out)
}

fn push_word(out: &mut Vec<u8>, c1: u16, c2: u16, c3: u16) {
    let word = 1600 * c1 + 40 * c2 + c3 + 1;
    out.extend_from_slice(&word.to_be_bytes());
}

fn c40_value(c: char) -> CodecResult<u16> {
    match c {
        ' ' => Ok(3),
        '0'..='9' => Ok(c as u16 - '0' as u16 + 4),
        'A'..='Z' => Ok(c as u16 - 'A' as u16 + 14),
        _ => Err(CodecError::InvalidC40Character(c)),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Unpack C40 bytes.
///
/// A zero digit inside a word emits nothing. Issued seals rely on this, so an
/// intentionally empty slot and a padding slot decode identically.
pub fn decode(data: &[u8]) -> CodecResult<String> {
    if data.len() % 2 != 0 {
        return Err(CodecError::TruncatedInput {
            offset: data.len() - 1,
            needed: 2,
            available: 1,
        });
    }

    let mut out = String::with_capacity(data.len() / 2 * 3);
    for pair in data.chunks_exact(2) {
        if pair[0] == UNLATCH {
            let ascii = pair[1]
                .checked_sub(1)
                .ok_or(CodecError::InvalidC40Value(u16::from_be_bytes([pair[0], pair[1]])))?;
            out.push(ascii as char);
            continue;
        }

        let word = u16::from_be_bytes([pair[0], pair[1]]);
        let v = word.checked_sub(1).ok_or(CodecError::InvalidC40Value(word))?;
        for digit in [v / 1600, (v % 1600) / 40, v % 40] {
            if digit == SHIFT1 {
                continue;
            }
            out.push(c40_char(digit).ok_or(CodecError::InvalidC40Value(word))?);
        }
    }
    Ok(out)
}

fn c40_char(digit: u16) -> Option<char> {
    match digit {
        3 => Some(' '),
        4..=13 => char::from_u32(u32::from(digit - 4) + '0' as u32),
        14..=39 => char::from_u32(u32::from(digit - 14) + 'A' as u32),
        _ => None,
    }
}

// =============================================================================
// MRZ FORMATTING
// =============================================================================

/// Lay out decoded MRZ text as OCR lines.
///
/// Pads with `<` to `total_length`, maps space to `<` and splits into two
/// equal lines, or three when `total_length` is 90 (TD1). Characters beyond
/// `total_length` stay on the last line.
pub fn format_mrz(raw: &str, total_length: usize) -> String {
    let mut chars: Vec<char> = raw
        .chars()
        .map(|c| if c == ' ' { '<' } else { c })
        .collect();
    if chars.len() < total_length {
        chars.resize(total_length, '<');
    }

    let line_count = if total_length == 90 { 3 } else { 2 };
    let line_len = total_length / line_count;

    let mut lines = Vec::with_capacity(line_count);
    for i in 0..line_count {
        let start = i * line_len;
        let end = if i + 1 == line_count {
            chars.len()
        } else {
            start + line_len
        };
        lines.push(chars[start..end].iter().collect::<String>());
    }
    lines.join("\n")
}
