//! Re-interpretation of stored doc-value bytes.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use byteorder::{BigEndian, ByteOrder};
use marple_common::{Error, Result};

use crate::model::DocScalar;

/// Encodings under which textual doc values may be displayed.
///
/// The numeric variants read the stored bytes as a single big-endian value and
/// only apply to values of exactly the right width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Base64,
    Hex,
    Int,
    Long,
    Float,
    Double,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 7] = [
        TextEncoding::Utf8,
        TextEncoding::Base64,
        TextEncoding::Hex,
        TextEncoding::Int,
        TextEncoding::Long,
        TextEncoding::Float,
        TextEncoding::Double,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Base64 => "base64",
            TextEncoding::Hex => "hex",
            TextEncoding::Int => "int",
            TextEncoding::Long => "long",
            TextEncoding::Float => "float",
            TextEncoding::Double => "double",
        }
    }

    /// Names of all encodings, in the order they are offered to the operator.
    pub fn names() -> Vec<&'static str> {
        TextEncoding::ALL.iter().map(TextEncoding::name).collect()
    }

    /// Decodes `bytes`, or returns `None` if they are not valid under this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<DocScalar> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .ok()
                .map(|s| DocScalar::Text(s.to_string())),
            TextEncoding::Base64 => Some(DocScalar::Text(STANDARD.encode(bytes))),
            TextEncoding::Hex => Some(DocScalar::Text(hex::encode(bytes))),
            TextEncoding::Int => {
                (bytes.len() == 4).then(|| DocScalar::Integer(BigEndian::read_i32(bytes) as i64))
            }
            TextEncoding::Long => {
                (bytes.len() == 8).then(|| DocScalar::Integer(BigEndian::read_i64(bytes)))
            }
            TextEncoding::Float => {
                (bytes.len() == 4).then(|| DocScalar::Float(BigEndian::read_f32(bytes) as f64))
            }
            TextEncoding::Double => {
                (bytes.len() == 8).then(|| DocScalar::Float(BigEndian::read_f64(bytes)))
            }
        }
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<TextEncoding> {
        TextEncoding::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| Error::invalid_arg("encoding", format!("unknown encoding '{s}'")))
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
