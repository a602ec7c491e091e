//! Protocol Module
//!
//! The request/response model shared by accessors and dispatchers.
//!
//! ## Request Lifecycle
//! ```text
//! ┌──────────┐  submit   ┌────────────┐  complete (once)  ┌──────────┐
//! │ Accessor │ ────────▶ │ Dispatcher │ ────────────────▶ │ Response │
//! └────┬─────┘           └────────────┘                   └────┬─────┘
//!      │                  await receiver                       │
//!      └───────────────────────────────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: SUCCESS
//! - 0x01: NOT_FOUND
//! - 0x02: EXISTS
//! - 0x09: LOCKED
//! - 0x82: OUT_OF_MEMORY
//! - 0x85: SERVER_BUSY
//! - 0x86: TEMPORARY_FAILURE
//! - 0xa4: SYNC_WRITE_RE_COMMIT_IN_PROGRESS
//! - anything else known is listed on [`ResponseStatus`]; the rest is `Unknown`

mod request;
mod response;
mod status;

pub use request::{Command, Completion, CollectionId, Request, RequestKind, ResponseReceiver};
pub use response::{MutationToken, Response};
pub use status::ResponseStatus;
