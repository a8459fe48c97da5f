//! String to bool/int/float conversion used by the typed accessors

use std::num::IntErrorKind;

use thiserror::Error;

/// Why a string could not be converted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid syntax")]
    InvalidSyntax,

    #[error("value out of range")]
    OutOfRange,
}

/// Parse a boolean
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Result<bool, ConvertError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConvertError::InvalidSyntax),
    }
}

/// Parse a signed 64-bit integer, inferring the base from its prefix
///
/// `0x`/`0X` selects base 16, `0o`/`0O` base 8, `0b`/`0B` base 2, and a
/// bare leading `0` followed by more digits base 8. Anything else is
/// base 10. Single underscores may separate digits (`1_000`, `0x_ff`).
pub fn parse_int(s: &str) -> Result<i64, ConvertError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = split_radix(body);
    let cleaned = strip_separators(digits, prefixed)?;
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ConvertError::InvalidSyntax);
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ConvertError::OutOfRange,
        _ => ConvertError::InvalidSyntax,
    })?;

    let signed = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };
    i64::try_from(signed).map_err(|_| ConvertError::OutOfRange)
}

/// Parse a 64-bit float
///
/// Standard decimal and exponent notation plus `inf`, `infinity` and `nan`
/// in any case. Finite literals that overflow to infinity are rejected.
pub fn parse_float(s: &str) -> Result<f64, ConvertError> {
    let value: f64 = s.parse().map_err(|_| ConvertError::InvalidSyntax)?;
    if value.is_infinite() && !names_infinity(s) {
        return Err(ConvertError::OutOfRange);
    }
    Ok(value)
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let bytes = body.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &body[2..], true),
            b'o' | b'O' => return (8, &body[2..], true),
            b'b' | b'B' => return (2, &body[2..], true),
            _ => return (8, &body[1..], true),
        }
    }
    (10, body, false)
}

// A base prefix counts as a digit, so `0x_1` is accepted.
fn strip_separators(digits: &str, prefixed: bool) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(digits.len());
    let mut after_digit = prefixed;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return Err(ConvertError::InvalidSyntax);
            }
            after_digit = false;
        } else {
            out.push(c);
            after_digit = true;
        }
    }
    if !after_digit {
        return Err(ConvertError::InvalidSyntax);
    }
    Ok(out)
}

fn names_infinity(s: &str) -> bool {
    let unsigned = s.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
