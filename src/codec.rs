//! The codec contract shared by every vector type.
//!
//! Drivers talk to the vector types through two narrow entry points: scanning
//! a raw column value into a vector, and producing bytes or a display string
//! from one. [`VectorCodec`] exposes both, on top of the four primitive
//! text/binary encoders each type implements.

use crate::constants::{BINARY_FORMAT_CODE, TEXT_FORMAT_CODE};
use crate::error::{ParseError, Result, UnsupportedTypeError};

/// Wire format of a column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    Binary,
}

impl Format {
    /// Postgres format code.
    pub const fn code(self) -> i16 {
        match self {
            Format::Text => TEXT_FORMAT_CODE,
            Format::Binary => BINARY_FORMAT_CODE,
        }
    }

    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            TEXT_FORMAT_CODE => Some(Format::Text),
            BINARY_FORMAT_CODE => Some(Format::Binary),
            _ => None,
        }
    }
}

/// A column value as handed over by a driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
}

impl SqlValue {
    /// Name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "int64",
            SqlValue::Float(_) => "float64",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Text(_) => "string",
        }
    }
}

/// Text and binary codecs for one vector type.
pub trait VectorCodec: Sized {
    /// Name of the database type, e.g. `vector`.
    const TYPE_NAME: &'static str;

    /// Format a driver should ask for when it can choose.
    const PREFERRED_FORMAT: Format = Format::Binary;

    /// Append the text form to `buf`.
    fn encode_text(&self, buf: &mut String);

    /// Parse the text form.
    fn decode_text(s: &str) -> Result<Self>;

    /// Append the binary form to `buf`.
    fn encode_binary(&self, buf: &mut Vec<u8>) -> Result<()>;

    /// Decode a complete binary payload.
    fn decode_binary(buf: &[u8]) -> Result<Self>;

    /// Both formats are always supported.
    fn format_supported(format: Format) -> bool {
        matches!(format, Format::Text | Format::Binary)
    }

    fn to_text(&self) -> String {
        let mut buf = String::new();
        self.encode_text(&mut buf);
        buf
    }

    fn to_binary(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_binary(&mut buf)?;
        Ok(buf)
    }

    /// Append the value in the requested format.
    fn encode(&self, format: Format, buf: &mut Vec<u8>) -> Result<()> {
        match format {
            Format::Text => {
                buf.extend_from_slice(self.to_text().as_bytes());
                Ok(())
            }
            Format::Binary => self.encode_binary(buf),
        }
    }

    /// Decode a value received in `format`.
    fn decode(format: Format, src: &[u8]) -> Result<Self> {
        match format {
            Format::Text => Self::decode_text(text_from_bytes(src, Self::TYPE_NAME)?),
            Format::Binary => Self::decode_binary(src),
        }
    }

    /// Scan a driver value. Only text, given as bytes or a string, is accepted.
    fn scan(src: &SqlValue) -> Result<Self> {
        match src {
            SqlValue::Bytes(bytes) => Self::decode_text(text_from_bytes(bytes, Self::TYPE_NAME)?),
            SqlValue::Text(s) => Self::decode_text(s),
            other => Err(UnsupportedTypeError { kind: other.kind() }.into()),
        }
    }

    /// The value a driver should bind as a query parameter.
    fn value(&self) -> SqlValue {
        SqlValue::Text(self.to_text())
    }
}

fn text_from_bytes<'a>(
    bytes: &'a [u8],
    type_name: &'static str,
) -> Result<&'a str, ParseError> {
    std::str::from_utf8(bytes).map_err(|_| ParseError::NotUtf8 { type_name })
}
