//! Dispatch Module
//!
//! The seam between accessors and whatever carries requests to a server.
//!
//! ## Contract
//! - `send` returns immediately
//! - every request handed to `send` is completed exactly once, either with
//!   a server response or with a `TIMEOUT`/`CANCELED` status
//! - dropping a request without completing it is reported to the caller as
//!   a canceled request
//!
//! [`MemoryDispatcher`] answers requests from an in-process document store.

mod memory;

use std::sync::Arc;

use crate::protocol::Request;

pub use memory::{MemoryDispatcher, NUM_PARTITIONS};

/// Carries requests to the server
pub trait Dispatcher: Send + Sync {
    /// Hand a request over for execution
    fn send(&self, request: Request);
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn send(&self, request: Request) {
        (**self).send(request)
    }
}
