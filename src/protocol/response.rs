//! Response definitions
//!
//! A response is produced exactly once per request and never changes
//! after that.

use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::ResponseStatus;

/// Ordering marker returned by a mutation
///
/// Identifies the partition the write landed in and the sequence number it
/// was assigned there, so a follow-up read can ask for consistency with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationToken {
    pub partition_id: u16,
    pub partition_uuid: u64,
    pub sequence_number: u64,
    pub bucket: String,
}

/// A response to a dispatched request
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code
    pub status: ResponseStatus,

    /// CAS of the document after the operation (0 when not applicable)
    pub cas: u64,

    /// Raw document content (GET only)
    pub content: Option<Bytes>,

    /// Common flags stored alongside the content (GET only)
    pub flags: u32,

    /// Remaining time-to-live of the document, if it has one (GET only)
    pub expiry: Option<Duration>,

    /// Mutation token (mutations only, and only when the server hands one out)
    pub mutation_token: Option<MutationToken>,
}

impl Response {
    /// Create a response carrying nothing but a status
    pub fn status(status: ResponseStatus) -> Self {
        Self {
            status,
            cas: 0,
            content: None,
            flags: 0,
            expiry: None,
            mutation_token: None,
        }
    }

    /// Create a successful GET response
    pub fn document(content: Bytes, flags: u32, cas: u64, expiry: Option<Duration>) -> Self {
        Self {
            content: Some(content),
            flags,
            cas,
            expiry,
            ..Self::status(ResponseStatus::Success)
        }
    }

    /// Create a successful mutation response
    pub fn mutation(cas: u64, mutation_token: Option<MutationToken>) -> Self {
        Self {
            cas,
            mutation_token,
            ..Self::status(ResponseStatus::Success)
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self::status(ResponseStatus::NotFound)
    }
}
