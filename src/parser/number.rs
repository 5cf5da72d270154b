//! Conversion of numeric literal text into [`Number`] values
//!
//! The lexer only classifies literals as int or float and keeps their text.
//! Values are extracted here, at parse time. Integers wrap to 32 bits;
//! out-of-range values are not diagnosed.

use super::ast::Number;

/// Why a literal could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    Malformed,
    MissingHexExponent,
}

/// Convert an `int_const` token's text.
///
/// `0x`/`0X` prefixes select base 16, any other leading `0` selects base 8.
/// Digits are folded modulo 2^32, so any length of valid digits converts.
#[allow(clippy::cast_possible_wrap)]
pub fn parse_int(text: &str) -> Result<Number, NumberError> {
    let (digits, radix) = if let Some(hex) = strip_hex_prefix(text) {
        (hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };
    if digits.is_empty() {
        return Err(NumberError::Malformed);
    }

    let mut value = 0u32;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix).ok_or(NumberError::Malformed)?;
        value = value.wrapping_mul(radix).wrapping_add(digit);
    }
    Ok(Number::Int(value as i32))
}

/// Convert a `float_const` token's text, decimal or hexadecimal.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_float(text: &str) -> Result<Number, NumberError> {
    if let Some(hex) = strip_hex_prefix(text) {
        return parse_hex_float(hex).map(|value| Number::Float(value as f32));
    }

    text.parse::<f32>()
        .map(Number::Float)
        .map_err(|_| NumberError::Malformed)
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// `mantissa` is everything after the `0x` prefix, e.g. `1.8p3`.
fn parse_hex_float(body: &str) -> Result<f64, NumberError> {
    let (mantissa, exponent) = body
        .split_once(['p', 'P'])
        .ok_or(NumberError::MissingHexExponent)?;

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(NumberError::Malformed);
    }

    let mut value = 0.0_f64;
    for ch in whole.chars() {
        let digit = ch.to_digit(16).ok_or(NumberError::Malformed)?;
        value = value * 16.0 + f64::from(digit);
    }
    let mut scale = 1.0 / 16.0;
    for ch in fraction.chars() {
        let digit = ch.to_digit(16).ok_or(NumberError::Malformed)?;
        value += f64::from(digit) * scale;
        scale /= 16.0;
    }

    let exponent: i32 = exponent.parse().map_err(|_| NumberError::Malformed)?;
    Ok(value * 2.0_f64.powi(exponent))
}
