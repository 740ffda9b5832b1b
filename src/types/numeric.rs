//! Numeric text helpers shared by the vector types.
//!
//! Floats are written as the shortest decimal that parses back to the same
//! `f32`, without an exponent and without a trailing `.0`, so `1.0` becomes
//! `1` and `0.5` stays `0.5`.

use std::fmt::Write;

use crate::error::ParseError;

#[inline]
pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Strips the whitespace Postgres allows around literals and tokens.
#[inline]
pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Append the shortest round-trip decimal form of `v`.
#[inline]
pub(crate) fn push_f32(buf: &mut String, v: f32) {
    // Writing to a String cannot fail.
    let _ = write!(buf, "{}", v);
}

/// Append an integer in decimal.
#[inline]
pub(crate) fn push_int(buf: &mut String, v: i64) {
    let _ = write!(buf, "{}", v);
}

/// Parse one float token, tolerating surrounding whitespace.
pub(crate) fn parse_f32(token: &str, type_name: &'static str) -> Result<f32, ParseError> {
    trim(token)
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidFloat {
            type_name,
            token: token.to_string(),
        })
}

/// Parse one integer token, tolerating surrounding whitespace.
pub(crate) fn parse_int(token: &str, type_name: &'static str) -> Result<i64, ParseError> {
    trim(token)
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger {
            type_name,
            token: token.to_string(),
        })
}

/// Parse `[v1,v2,...]` into its elements.
///
/// An empty body is an error: splitting it yields one empty token.
pub(crate) fn parse_dense_text(lit: &str, type_name: &'static str) -> Result<Vec<f32>, ParseError> {
    let body = trim(lit)
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ParseError::InvalidSyntax {
            type_name,
            input: lit.to_string(),
        })?;

    body.split(',').map(|token| parse_f32(token, type_name)).collect()
}

/// Write `[v1,v2,...]`. An empty slice gives `[]`.
pub(crate) fn write_dense_text(buf: &mut String, values: &[f32]) {
    buf.reserve(2 + values.len() * 10);
    buf.push('[');
    for (i, &v) in values.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_f32(buf, v);
    }
    buf.push(']');
}
