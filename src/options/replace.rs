//! Replace options

use std::time::Duration;

use super::{validate_expiry, validate_timeout, Durability, PersistTo, ReplicateTo};
use crate::codec::Encoding;
use crate::error::Result;

/// Options for a replace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
    timeout: Option<Duration>,
    expiry: Option<Duration>,
    durability: Durability,
    encoder: Option<Encoding>,
    cas: u64,
}

impl ReplaceOptions {
    /// Create a new options builder
    pub fn builder() -> ReplaceOptionsBuilder {
        ReplaceOptionsBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn expiry(&self) -> Option<Duration> {
        self.expiry
    }

    pub fn persist_to(&self) -> PersistTo {
        self.durability.persist_to
    }

    pub fn replicate_to(&self) -> ReplicateTo {
        self.durability.replicate_to
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// Explicitly selected encoder, if any
    pub fn encoder(&self) -> Option<Encoding> {
        self.encoder
    }

    /// CAS to match, 0 for none
    pub fn cas(&self) -> u64 {
        self.cas
    }
}

/// Builder for ReplaceOptions
#[derive(Default)]
pub struct ReplaceOptionsBuilder {
    options: ReplaceOptions,
}

impl ReplaceOptionsBuilder {
    /// Set the operation timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set the document time-to-live
    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.options.expiry = Some(expiry);
        self
    }

    /// Set the minimum number of nodes that must persist the write
    pub fn persist_to(mut self, persist_to: PersistTo) -> Self {
        self.options.durability.persist_to = persist_to;
        self
    }

    /// Set the minimum number of replicas that must receive the write
    pub fn replicate_to(mut self, replicate_to: ReplicateTo) -> Self {
        self.options.durability.replicate_to = replicate_to;
        self
    }

    /// Set the value encoder
    pub fn encoder(mut self, encoder: Encoding) -> Self {
        self.options.encoder = Some(encoder);
        self
    }

    /// Only replace if the document still has this CAS
    pub fn cas(mut self, cas: u64) -> Self {
        self.options.cas = cas;
        self
    }

    pub fn build(self) -> Result<ReplaceOptions> {
        validate_timeout(self.options.timeout)?;
        validate_expiry(self.options.expiry)?;
        Ok(self.options)
    }
}
