//! Options Module
//!
//! Per-operation options, each assembled with a builder and frozen by
//! `build()`. A built options value is immutable and may be shared across
//! calls and threads.
//!
//! ## Defaults
//! Every field starts out unset:
//! - `timeout`: `None` → the collection's configured KV timeout
//! - `cas`: `0` → no CAS check
//! - `persist_to` / `replicate_to`: `None` → no durability requirement
//! - `expiry`: `None` → document does not expire
//! - `encoder`: the collection's configured default encoding
//!
//! A CAS belongs to one version of one document; do not carry an options
//! value with a CAS over to an unrelated document.

mod get;
mod remove;
mod replace;
mod unlock;

use std::time::Duration;

use crate::error::{KvError, Result};

pub use get::{GetOptions, GetOptionsBuilder};
pub use remove::{RemoveOptions, RemoveOptionsBuilder};
pub use replace::{ReplaceOptions, ReplaceOptionsBuilder};
pub use unlock::{UnlockOptions, UnlockOptionsBuilder};

/// Largest expiry the server accepts (seconds stored as u32)
pub const MAX_EXPIRY: Duration = Duration::from_secs(u32::MAX as u64);

/// Minimum number of nodes that must persist a write before it succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistTo {
    #[default]
    None,
    /// Persisted on the active node
    Active,
    One,
    Two,
    Three,
    Four,
}

impl PersistTo {
    /// Number of nodes that must have persisted the write
    pub fn nodes(&self) -> u8 {
        match self {
            PersistTo::None => 0,
            PersistTo::Active | PersistTo::One => 1,
            PersistTo::Two => 2,
            PersistTo::Three => 3,
            PersistTo::Four => 4,
        }
    }
}

/// Minimum number of replicas that must hold a write before it succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicateTo {
    #[default]
    None,
    One,
    Two,
    Three,
}

impl ReplicateTo {
    /// Number of replicas that must have received the write
    pub fn replicas(&self) -> u8 {
        match self {
            ReplicateTo::None => 0,
            ReplicateTo::One => 1,
            ReplicateTo::Two => 2,
            ReplicateTo::Three => 3,
        }
    }
}

/// Persistence and replication requirement of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Durability {
    pub persist_to: PersistTo,
    pub replicate_to: ReplicateTo,
}

impl Durability {
    pub fn new(persist_to: PersistTo, replicate_to: ReplicateTo) -> Self {
        Self {
            persist_to,
            replicate_to,
        }
    }

    /// True when neither persistence nor replication is required
    pub fn is_none(&self) -> bool {
        self.persist_to == PersistTo::None && self.replicate_to == ReplicateTo::None
    }

    /// Whether a cluster with `num_replicas` replicas can ever satisfy this
    pub fn satisfiable_with(&self, num_replicas: u8) -> bool {
        self.replicate_to.replicas() <= num_replicas
            && self.persist_to.nodes() <= num_replicas.saturating_add(1)
    }
}

fn validate_timeout(timeout: Option<Duration>) -> Result<()> {
    match timeout {
        Some(t) if t.is_zero() => Err(KvError::InvalidArgument(
            "Timeout must be greater than zero".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_expiry(expiry: Option<Duration>) -> Result<()> {
    match expiry {
        Some(e) if e > MAX_EXPIRY => Err(KvError::InvalidArgument(format!(
            "Expiry {:?} exceeds maximum of {} seconds",
            e,
            MAX_EXPIRY.as_secs()
        ))),
        _ => Ok(()),
    }
}
