//! Status taxonomy
//!
//! Every outcome the server (or the dispatcher on its behalf) can report
//! for a single KV operation.

use std::fmt;

/// Server-reported outcome of a KV operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Success,
    NotFound,
    /// Document exists with a different CAS
    Exists,
    TooBig,
    /// Document is locked and the supplied CAS does not match the lock
    Locked,
    /// Unlock was attempted on a document that is not locked
    NotLocked,
    NoAccess,
    OutOfMemory,
    ServerBusy,
    TemporaryFailure,
    DurabilityImpossible,
    SyncWriteInProgress,
    SyncWriteAmbiguous,
    SyncWriteReCommitInProgress,
    /// Dispatcher gave up waiting for the server
    Timeout,
    /// Dispatcher cancelled the request before it was answered
    Canceled,
    /// A raw code this client does not know about
    Unknown(u16),
}

impl ResponseStatus {
    /// True only for [`ResponseStatus::Success`]
    pub fn success(&self) -> bool {
        matches!(self, ResponseStatus::Success)
    }

    /// Convert a raw KV engine status code
    pub fn from_code(code: u16) -> Self {
        match code {
            0x00 => ResponseStatus::Success,
            0x01 => ResponseStatus::NotFound,
            0x02 => ResponseStatus::Exists,
            0x03 => ResponseStatus::TooBig,
            0x09 => ResponseStatus::Locked,
            0x0e => ResponseStatus::NotLocked,
            0x24 => ResponseStatus::NoAccess,
            0x82 => ResponseStatus::OutOfMemory,
            0x85 => ResponseStatus::ServerBusy,
            0x86 => ResponseStatus::TemporaryFailure,
            0xa1 => ResponseStatus::DurabilityImpossible,
            0xa2 => ResponseStatus::SyncWriteInProgress,
            0xa3 => ResponseStatus::SyncWriteAmbiguous,
            0xa4 => ResponseStatus::SyncWriteReCommitInProgress,
            other => ResponseStatus::Unknown(other),
        }
    }

    /// Raw KV engine status code.
    ///
    /// `Timeout` and `Canceled` never travel on the wire and have no code.
    pub fn code(&self) -> Option<u16> {
        let code = match self {
            ResponseStatus::Success => 0x00,
            ResponseStatus::NotFound => 0x01,
            ResponseStatus::Exists => 0x02,
            ResponseStatus::TooBig => 0x03,
            ResponseStatus::Locked => 0x09,
            ResponseStatus::NotLocked => 0x0e,
            ResponseStatus::NoAccess => 0x24,
            ResponseStatus::OutOfMemory => 0x82,
            ResponseStatus::ServerBusy => 0x85,
            ResponseStatus::TemporaryFailure => 0x86,
            ResponseStatus::DurabilityImpossible => 0xa1,
            ResponseStatus::SyncWriteInProgress => 0xa2,
            ResponseStatus::SyncWriteAmbiguous => 0xa3,
            ResponseStatus::SyncWriteReCommitInProgress => 0xa4,
            ResponseStatus::Timeout | ResponseStatus::Canceled => return None,
            ResponseStatus::Unknown(code) => *code,
        };
        Some(code)
    }

    /// Parse the upper-snake-case name used in logs and by the CLI
    pub fn from_name(name: &str) -> Option<Self> {
        let status = match name.to_ascii_uppercase().as_str() {
            "SUCCESS" => ResponseStatus::Success,
            "NOT_FOUND" => ResponseStatus::NotFound,
            "EXISTS" => ResponseStatus::Exists,
            "TOO_BIG" => ResponseStatus::TooBig,
            "LOCKED" => ResponseStatus::Locked,
            "NOT_LOCKED" => ResponseStatus::NotLocked,
            "NO_ACCESS" => ResponseStatus::NoAccess,
            "OUT_OF_MEMORY" => ResponseStatus::OutOfMemory,
            "SERVER_BUSY" => ResponseStatus::ServerBusy,
            "TEMPORARY_FAILURE" => ResponseStatus::TemporaryFailure,
            "DURABILITY_IMPOSSIBLE" => ResponseStatus::DurabilityImpossible,
            "SYNC_WRITE_IN_PROGRESS" => ResponseStatus::SyncWriteInProgress,
            "SYNC_WRITE_AMBIGUOUS" => ResponseStatus::SyncWriteAmbiguous,
            "SYNC_WRITE_RE_COMMIT_IN_PROGRESS" => ResponseStatus::SyncWriteReCommitInProgress,
            "TIMEOUT" => ResponseStatus::Timeout,
            "CANCELED" => ResponseStatus::Canceled,
            _ => return None,
        };
        Some(status)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStatus::Success => "SUCCESS",
            ResponseStatus::NotFound => "NOT_FOUND",
            ResponseStatus::Exists => "EXISTS",
            ResponseStatus::TooBig => "TOO_BIG",
            ResponseStatus::Locked => "LOCKED",
            ResponseStatus::NotLocked => "NOT_LOCKED",
            ResponseStatus::NoAccess => "NO_ACCESS",
            ResponseStatus::OutOfMemory => "OUT_OF_MEMORY",
            ResponseStatus::ServerBusy => "SERVER_BUSY",
            ResponseStatus::TemporaryFailure => "TEMPORARY_FAILURE",
            ResponseStatus::DurabilityImpossible => "DURABILITY_IMPOSSIBLE",
            ResponseStatus::SyncWriteInProgress => "SYNC_WRITE_IN_PROGRESS",
            ResponseStatus::SyncWriteAmbiguous => "SYNC_WRITE_AMBIGUOUS",
            ResponseStatus::SyncWriteReCommitInProgress => "SYNC_WRITE_RE_COMMIT_IN_PROGRESS",
            ResponseStatus::Timeout => "TIMEOUT",
            ResponseStatus::Canceled => "CANCELED",
            ResponseStatus::Unknown(code) => return write!(f, "UNKNOWN(0x{:02x})", code),
        };
        f.write_str(name)
    }
}
