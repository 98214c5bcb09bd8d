//! Typed values and their canonical byte encoding.
//!
//! The encoding is one type byte followed by a type-specific payload. It is
//! canonical: equal values always produce equal bytes, which is what lets the
//! dictionary deduplicate on the encoded form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_VALUE_PAYLOAD_LENGTH;

/// Value type discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueType {
    Null = 0x01,
    Boolean = 0x02,
    Integer = 0x03,
    Float = 0x04,
    String = 0x05,
    Bytes = 0x06,
}

impl TryFrom<u8> for ValueType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Null),
            0x02 => Ok(Self::Boolean),
            0x03 => Ok(Self::Integer),
            0x04 => Ok(Self::Float),
            0x05 => Ok(Self::String),
            0x06 => Ok(Self::Bytes),
            _ => Err(value),
        }
    }
}

/// A value that can appear in any position of a triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

/// Errors that can occur while encoding or decoding a value.
#[derive(Debug, PartialEq, Eq)]
pub enum ValueError {
    /// No bytes to decode.
    Empty,
    /// The type byte is not a known `ValueType`.
    UnknownType(u8),
    /// The payload ended early.
    Truncated { expected: usize, actual: usize },
    /// A string payload was not valid UTF-8.
    InvalidUtf8,
    /// Bytes were left over after a complete value.
    TrailingBytes(usize),
    /// A string or byte payload does not fit the 32-bit length prefix.
    TooLong(usize),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty value encoding"),
            Self::UnknownType(t) => write!(f, "unknown value type: {t:#04x}"),
            Self::Truncated { expected, actual } => {
                write!(f, "truncated value: expected {expected} bytes, got {actual}")
            }
            Self::InvalidUtf8 => write!(f, "string value is not valid UTF-8"),
            Self::TrailingBytes(n) => write!(f, "{n} trailing bytes after value"),
            Self::TooLong(len) => write!(
                f,
                "value payload too long: {len} bytes (max {MAX_VALUE_PAYLOAD_LENGTH})"
            ),
        }
    }
}

impl std::error::Error for ValueError {}

impl Value {
    /// Get the value type discriminant.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::Bytes(_) => ValueType::Bytes,
        }
    }

    /// Calculate the encoded size of this value.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::len() is not const-stable
    pub fn encoded_size(&self) -> usize {
        match self {
            Self::Null => 1,
            Self::Boolean(_) => 1 + 1,
            Self::Integer(_) | Self::Float(_) => 1 + 8,
            Self::String(s) => 1 + 4 + s.len(),
            Self::Bytes(b) => 1 + 4 + b.len(),
        }
    }

    /// Encode this value, appending to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), ValueError> {
        out.push(self.value_type() as u8);

        match self {
            Self::Null => {}
            Self::Boolean(b) => out.push(u8::from(*b)),
            Self::Integer(n) => out.extend_from_slice(&n.to_le_bytes()),
            Self::Float(n) => out.extend_from_slice(&n.to_bits().to_le_bytes()),
            Self::String(s) => put_payload(out, s.as_bytes())?,
            Self::Bytes(b) => put_payload(out, b)?,
        }

        Ok(())
    }

    /// Encode this value to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ValueError> {
        let mut bytes = Vec::with_capacity(self.encoded_size());
        self.encode_into(&mut bytes)?;
        Ok(bytes)
    }

    /// Decode a value from the front of `bytes`.
    ///
    /// Returns the value and the number of bytes consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), ValueError> {
        let (&type_byte, payload) = bytes.split_first().ok_or(ValueError::Empty)?;
        let value_type = ValueType::try_from(type_byte).map_err(ValueError::UnknownType)?;

        match value_type {
            ValueType::Null => Ok((Self::Null, 1)),
            ValueType::Boolean => {
                let b = take::<1>(payload)?;
                Ok((Self::Boolean(b[0] != 0), 2))
            }
            ValueType::Integer => {
                let n = i64::from_le_bytes(take::<8>(payload)?);
                Ok((Self::Integer(n), 9))
            }
            ValueType::Float => {
                let bits = u64::from_le_bytes(take::<8>(payload)?);
                Ok((Self::Float(f64::from_bits(bits)), 9))
            }
            ValueType::String => {
                let data = take_payload(payload)?;
                let s = std::str::from_utf8(data).map_err(|_| ValueError::InvalidUtf8)?;
                Ok((Self::String(s.to_owned()), 1 + 4 + data.len()))
            }
            ValueType::Bytes => {
                let data = take_payload(payload)?;
                Ok((Self::Bytes(data.to_vec()), 1 + 4 + data.len()))
            }
        }
    }

    /// Decode a value that must occupy all of `bytes`.
    pub fn from_bytes_exact(bytes: &[u8]) -> Result<Self, ValueError> {
        let (value, consumed) = Self::from_bytes(bytes)?;
        if consumed != bytes.len() {
            return Err(ValueError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(value)
    }

    /// Create a string value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }
}

fn put_payload(out: &mut Vec<u8>, data: &[u8]) -> Result<(), ValueError> {
    let len = u32::try_from(data.len()).map_err(|_| ValueError::TooLong(data.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(data);
    Ok(())
}

fn take<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ValueError> {
    bytes
        .get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(ValueError::Truncated {
            expected: N,
            actual: bytes.len(),
        })
}

fn take_payload(bytes: &[u8]) -> Result<&[u8], ValueError> {
    let len = u32::from_le_bytes(take::<4>(bytes)?) as usize;
    bytes.get(4..4 + len).ok_or(ValueError::Truncated {
        expected: 4 + len,
        actual: bytes.len(),
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}
