//! Error types for kvbridge
//!
//! Provides a unified error type for all operations, plus the mapping from a
//! failed [`ResponseStatus`] to the error a caller sees.

use std::fmt;

use thiserror::Error;

use crate::codec::CodecError;
use crate::protocol::{CollectionId, RequestKind, ResponseStatus};

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Everything needed to understand a failed operation without re-running it
///
/// `status` is the server's answer; it is `None` when the operation failed
/// before a request was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub kind: RequestKind,
    pub key: String,
    pub collection: CollectionId,
    pub status: Option<ResponseStatus>,
}

impl ErrorContext {
    pub fn new(kind: RequestKind, key: impl Into<String>, collection: CollectionId) -> Self {
        Self {
            kind,
            key: key.into(),
            collection,
            status: None,
        }
    }

    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "op={} key={:?} collection={}",
            self.kind, self.key, self.collection
        )?;
        match self.status {
            Some(status) => write!(f, " status={}", status),
            None => f.write_str(" status=none"),
        }
    }
}

/// Unified error type for kvbridge operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Document not found ({0})")]
    DocumentNotFound(ErrorContext),

    #[error("CAS mismatch ({0})")]
    CasMismatch(ErrorContext),

    #[error("Server out of memory ({0})")]
    ServerOutOfMemory(ErrorContext),

    #[error("Temporary failure ({0})")]
    TemporaryFailure(ErrorContext),

    #[error("Durable write re-commit in progress ({0})")]
    DurableWriteReCommitInProgress(ErrorContext),

    #[error("{kind} operation failed ({0})", kind = .0.kind)]
    OperationFailed(ErrorContext),

    #[error("Unmapped response status ({0})")]
    UnmappedStatus(ErrorContext),

    // -------------------------------------------------------------------------
    // Completion Errors
    // -------------------------------------------------------------------------
    #[error("Request canceled before a response arrived ({0})")]
    RequestCanceled(ErrorContext),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {source} ({context})")]
    Decode {
        context: ErrorContext,
        source: CodecError,
    },

    #[error("Encode error: {source} ({context})")]
    Encode {
        context: ErrorContext,
        source: CodecError,
    },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error kinds, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DocumentNotFound,
    CasMismatch,
    ServerOutOfMemory,
    TemporaryFailure,
    DurableWriteReCommitInProgress,
    OperationFailed,
    UnmappedStatus,
    RequestCanceled,
    Decode,
    Encode,
    InvalidArgument,
    Io,
}

impl KvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::DocumentNotFound(_) => ErrorKind::DocumentNotFound,
            KvError::CasMismatch(_) => ErrorKind::CasMismatch,
            KvError::ServerOutOfMemory(_) => ErrorKind::ServerOutOfMemory,
            KvError::TemporaryFailure(_) => ErrorKind::TemporaryFailure,
            KvError::DurableWriteReCommitInProgress(_) => ErrorKind::DurableWriteReCommitInProgress,
            KvError::OperationFailed(_) => ErrorKind::OperationFailed,
            KvError::UnmappedStatus(_) => ErrorKind::UnmappedStatus,
            KvError::RequestCanceled(_) => ErrorKind::RequestCanceled,
            KvError::Decode { .. } => ErrorKind::Decode,
            KvError::Encode { .. } => ErrorKind::Encode,
            KvError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            KvError::Io(_) => ErrorKind::Io,
        }
    }

    /// Context of the operation that failed, when the error came from one
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            KvError::DocumentNotFound(ctx)
            | KvError::CasMismatch(ctx)
            | KvError::ServerOutOfMemory(ctx)
            | KvError::TemporaryFailure(ctx)
            | KvError::DurableWriteReCommitInProgress(ctx)
            | KvError::OperationFailed(ctx)
            | KvError::UnmappedStatus(ctx)
            | KvError::RequestCanceled(ctx) => Some(ctx),
            KvError::Decode { context, .. } | KvError::Encode { context, .. } => Some(context),
            KvError::InvalidArgument(_) | KvError::Io(_) => None,
        }
    }

    /// Whether retrying the same operation later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TemporaryFailure | ErrorKind::DurableWriteReCommitInProgress
        )
    }
}

/// Map a failed status to the error the caller sees.
///
/// Pure and total. `status` is recorded into the returned error's context,
/// replacing whatever status `context` carried. Callers handle `SUCCESS`
/// (and absence, where the operation tolerates it) before reaching here; a
/// success status that still ends up here is reported as a generic failure.
pub fn map_error(status: ResponseStatus, context: ErrorContext) -> KvError {
    let context = context.with_status(status);
    match status {
        ResponseStatus::NotFound => KvError::DocumentNotFound(context),
        ResponseStatus::Locked => KvError::CasMismatch(context),
        ResponseStatus::OutOfMemory => KvError::ServerOutOfMemory(context),
        ResponseStatus::TemporaryFailure | ResponseStatus::ServerBusy => {
            KvError::TemporaryFailure(context)
        }
        ResponseStatus::SyncWriteReCommitInProgress => {
            KvError::DurableWriteReCommitInProgress(context)
        }
        ResponseStatus::Unknown(_) => KvError::UnmappedStatus(context),
        ResponseStatus::Success
        | ResponseStatus::Exists
        | ResponseStatus::TooBig
        | ResponseStatus::NotLocked
        | ResponseStatus::NoAccess
        | ResponseStatus::DurabilityImpossible
        | ResponseStatus::SyncWriteInProgress
        | ResponseStatus::SyncWriteAmbiguous
        | ResponseStatus::Timeout
        | ResponseStatus::Canceled => KvError::OperationFailed(context),
    }
}
