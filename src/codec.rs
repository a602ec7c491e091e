//! Value codec
//!
//! Turns caller values into stored bytes and back.
//!
//! ## Common Flags
//! The format of a stored value travels next to it as a 32-bit flags word;
//! only the top byte is significant:
//! ```text
//! ┌──────────┬──────────────────────────┐
//! │ Fmt (1)  │     Reserved (3)         │
//! └──────────┴──────────────────────────┘
//! ```
//! - 0x02: JSON
//! - 0x03: bincode (opaque binary)
//!
//! A flags word of zero carries no format information and is decoded with
//! whatever format the caller asks for.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::{ErrorContext, KvError, Result};

const FORMAT_MASK: u32 = 0xff00_0000;

/// Failure turning a value into bytes or back
///
/// Carries no operation context of its own; accessors attach one with
/// [`CodecError::into_kv_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0}")]
    Encode(String),

    #[error("{0}")]
    Decode(String),
}

impl CodecError {
    pub fn into_kv_error(self, context: ErrorContext) -> KvError {
        match self {
            CodecError::Encode(_) => KvError::Encode {
                context,
                source: self,
            },
            CodecError::Decode(_) => KvError::Decode {
                context,
                source: self,
            },
        }
    }
}

/// Stored bytes plus the flags describing how they were encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    pub flags: u32,
    pub content: Bytes,
}

impl EncodedDocument {
    pub fn new(flags: u32, content: impl Into<Bytes>) -> Self {
        Self {
            flags,
            content: content.into(),
        }
    }
}

/// Value serialization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Json,
    Bincode,
}

impl Encoding {
    /// Common flags written next to values of this encoding
    pub fn flags(&self) -> u32 {
        match self {
            Encoding::Json => 0x0200_0000,
            Encoding::Bincode => 0x0300_0000,
        }
    }

    /// Parse an encoding name (`json` / `bincode`)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            "bincode" => Ok(Encoding::Bincode),
            other => Err(KvError::InvalidArgument(format!(
                "Unknown encoding: {}",
                other
            ))),
        }
    }

    pub fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> std::result::Result<EncodedDocument, CodecError> {
        let content = match self {
            Encoding::Json => {
                serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))?
            }
            Encoding::Bincode => {
                bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))?
            }
        };
        Ok(EncodedDocument::new(self.flags(), content))
    }

    pub fn decode<T: DeserializeOwned>(
        &self,
        encoded: &EncodedDocument,
    ) -> std::result::Result<T, CodecError> {
        let stored_format = encoded.flags & FORMAT_MASK;
        if stored_format != 0 && stored_format != self.flags() {
            return Err(CodecError::Decode(format!(
                "Document flags 0x{:08x} do not match {} encoding",
                encoded.flags, self
            )));
        }

        match self {
            Encoding::Json => serde_json::from_slice(&encoded.content)
                .map_err(|e| CodecError::Decode(e.to_string())),
            Encoding::Bincode => bincode::deserialize(&encoded.content)
                .map_err(|e| CodecError::Decode(e.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => f.write_str("json"),
            Encoding::Bincode => f.write_str("bincode"),
        }
    }
}
