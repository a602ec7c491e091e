//! Get options

use std::time::Duration;

use super::validate_timeout;
use crate::codec::Encoding;
use crate::error::Result;

/// Options for a get
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    timeout: Option<Duration>,
    decoder: Option<Encoding>,
}

impl GetOptions {
    /// Create a new options builder
    pub fn builder() -> GetOptionsBuilder {
        GetOptionsBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Explicitly selected decoder, if any
    pub fn decoder(&self) -> Option<Encoding> {
        self.decoder
    }
}

/// Builder for GetOptions
#[derive(Default)]
pub struct GetOptionsBuilder {
    options: GetOptions,
}

impl GetOptionsBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn decoder(mut self, decoder: Encoding) -> Self {
        self.options.decoder = Some(decoder);
        self
    }

    pub fn build(self) -> Result<GetOptions> {
        validate_timeout(self.options.timeout)?;
        Ok(self.options)
    }
}
