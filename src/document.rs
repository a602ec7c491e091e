//! Typed results of successful operations

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::codec::{CodecError, EncodedDocument, Encoding};
use crate::protocol::MutationToken;

/// A fetched document
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    id: String,
    content: T,
    cas: u64,
    expiry: Option<Duration>,
}

impl<T> Document<T> {
    pub fn new(id: impl Into<String>, content: T, cas: u64, expiry: Option<Duration>) -> Self {
        Self {
            id: id.into(),
            content,
            cas,
            expiry,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn cas(&self) -> u64 {
        self.cas
    }

    pub fn expiry(&self) -> Option<Duration> {
        self.expiry
    }
}

impl<T: DeserializeOwned> Document<T> {
    /// Decode stored bytes into a typed document
    ///
    /// Fails with a decode error if the bytes do not fit `T`.
    pub fn from_encoded(
        id: impl Into<String>,
        encoded: &EncodedDocument,
        cas: u64,
        expiry: Option<Duration>,
        decoder: Encoding,
    ) -> Result<Self, CodecError> {
        let content = decoder.decode(encoded)?;
        Ok(Self::new(id, content, cas, expiry))
    }
}

/// Outcome of a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    cas: u64,
    mutation_token: Option<MutationToken>,
}

impl MutationResult {
    pub fn new(cas: u64, mutation_token: Option<MutationToken>) -> Self {
        Self {
            cas,
            mutation_token,
        }
    }

    pub fn cas(&self) -> u64 {
        self.cas
    }

    pub fn mutation_token(&self) -> Option<&MutationToken> {
        self.mutation_token.as_ref()
    }
}
