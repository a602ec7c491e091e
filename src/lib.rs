//! # kvbridge
//!
//! The asynchronous request/response accessor layer of a key-value
//! document database client:
//! - Typed get/remove/unlock/replace over a pluggable dispatcher
//! - Total mapping from server status to typed error
//! - CAS and durability options frozen by builders
//! - Single-resolution completion for every request
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Collection                             │
//! │             (get / remove / unlock / replace)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Options → Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Accessor                               │
//! │          (execute, await, project or map error)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Dispatcher  │          │ Error Mapper│
//!   │   (send)    │          │ (status →   │
//!   └──────┬──────┘          │   KvError)  │
//!          │                 └─────────────┘
//!          ▼
//!   ┌─────────────┐
//!   │  Response   │
//!   │  (oneshot)  │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod codec;
pub mod document;
pub mod options;
pub mod dispatch;
pub mod accessor;
pub mod collection;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{map_error, ErrorContext, ErrorKind, KvError, Result};
pub use config::Config;
pub use codec::{CodecError, Encoding};
pub use collection::Collection;
pub use dispatch::{Dispatcher, MemoryDispatcher};
pub use document::{Document, MutationResult};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvbridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
