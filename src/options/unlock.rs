//! Unlock options

use std::time::Duration;

use super::validate_timeout;
use crate::error::Result;

/// Options for an unlock. The lock token itself is passed to `unlock` directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockOptions {
    timeout: Option<Duration>,
}

impl UnlockOptions {
    pub fn builder() -> UnlockOptionsBuilder {
        UnlockOptionsBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for UnlockOptions
#[derive(Default)]
pub struct UnlockOptionsBuilder {
    options: UnlockOptions,
}

impl UnlockOptionsBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<UnlockOptions> {
        validate_timeout(self.options.timeout)?;
        Ok(self.options)
    }
}
