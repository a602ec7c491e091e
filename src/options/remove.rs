//! Remove options

use std::time::Duration;

use super::{validate_timeout, Durability, PersistTo, ReplicateTo};
use crate::error::Result;

/// Options for a remove
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    timeout: Option<Duration>,
    durability: Durability,
    cas: u64,
}

impl RemoveOptions {
    /// Create a new options builder
    pub fn builder() -> RemoveOptionsBuilder {
        RemoveOptionsBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// CAS to match, 0 for none
    pub fn cas(&self) -> u64 {
        self.cas
    }
}

/// Builder for RemoveOptions
#[derive(Default)]
pub struct RemoveOptionsBuilder {
    options: RemoveOptions,
}

impl RemoveOptionsBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn persist_to(mut self, persist_to: PersistTo) -> Self {
        self.options.durability.persist_to = persist_to;
        self
    }

    pub fn replicate_to(mut self, replicate_to: ReplicateTo) -> Self {
        self.options.durability.replicate_to = replicate_to;
        self
    }

    /// Only remove if the document still has this CAS
    pub fn cas(mut self, cas: u64) -> Self {
        self.options.cas = cas;
        self
    }

    pub fn build(self) -> Result<RemoveOptions> {
        validate_timeout(self.options.timeout)?;
        Ok(self.options)
    }
}
