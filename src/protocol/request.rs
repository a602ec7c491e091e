//! Request definitions
//!
//! A request names one document, carries the operation payload, and owns
//! both halves of its completion channel: the handle the dispatcher resolves
//! exactly once, and the receiver the issuing accessor takes before sending.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;

use super::Response;
use crate::codec::EncodedDocument;
use crate::options::Durability;

/// Receiving half of a request's completion handle
pub type ResponseReceiver = oneshot::Receiver<Response>;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Get,
    Remove,
    Unlock,
    Replace,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::Get => "Get",
            RequestKind::Remove => "Remove",
            RequestKind::Unlock => "Unlock",
            RequestKind::Replace => "Replace",
        };
        f.write_str(name)
    }
}

/// Fully qualified collection a document lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionId {
    pub bucket: String,
    pub scope: String,
    pub collection: String,
}

impl CollectionId {
    pub fn new(
        bucket: impl Into<String>,
        scope: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            scope: scope.into(),
            collection: collection.into(),
        }
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new("default", "_default", "_default")
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.bucket, self.scope, self.collection)
    }
}

/// Operation payload
#[derive(Debug, Clone)]
pub enum Command {
    /// Fetch a document
    Get,

    /// Remove a document, optionally guarded by CAS
    Remove { cas: u64, durability: Durability },

    /// Release a lock taken with the given lock token (the CAS returned by the lock)
    Unlock { cas: u64 },

    /// Replace the content of an existing document
    Replace {
        content: EncodedDocument,
        cas: u64,
        expiry: Option<Duration>,
        durability: Durability,
    },
}

impl Command {
    /// Get the operation kind
    pub fn kind(&self) -> RequestKind {
        match self {
            Command::Get => RequestKind::Get,
            Command::Remove { .. } => RequestKind::Remove,
            Command::Unlock { .. } => RequestKind::Unlock,
            Command::Replace { .. } => RequestKind::Replace,
        }
    }
}

/// Single-resolution completion handle
///
/// The first call to [`Completion::complete`] delivers the response; every
/// later call is rejected and leaves the delivered response untouched.
#[derive(Debug)]
pub struct Completion {
    sender: Option<oneshot::Sender<Response>>,
}

impl Completion {
    fn new(sender: oneshot::Sender<Response>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Resolve the handle. Returns `false` if it was already resolved.
    pub fn complete(&mut self, response: Response) -> bool {
        match self.sender.take() {
            Some(sender) => {
                if sender.send(response).is_err() {
                    // Caller stopped waiting; the request still counts as completed.
                    tracing::debug!("completion receiver dropped before response arrived");
                }
                true
            }
            None => {
                tracing::warn!(status = %response.status, "rejected second completion of a request");
                false
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.sender.is_none()
    }
}

/// A request ready to be handed to a dispatcher
#[derive(Debug)]
pub struct Request {
    id: u64,
    key: String,
    collection: CollectionId,
    command: Command,
    timeout: Duration,
    completion: Completion,
    receiver: Option<ResponseReceiver>,
}

impl Request {
    pub fn new(
        key: impl Into<String>,
        collection: CollectionId,
        command: Command,
        timeout: Duration,
    ) -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            key: key.into(),
            collection,
            command,
            timeout,
            completion: Completion::new(sender),
            receiver: Some(receiver),
        }
    }

    /// Detach the receiver this request's response will arrive on
    ///
    /// Only the first call yields it.
    pub fn take_receiver(&mut self) -> Option<ResponseReceiver> {
        self.receiver.take()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn collection(&self) -> &CollectionId {
        &self.collection
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn kind(&self) -> RequestKind {
        self.command.kind()
    }

    /// Deadline the dispatcher must answer within, reporting `TIMEOUT` otherwise
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve this request. Returns `false` if it was already resolved.
    pub fn complete(&mut self, response: Response) -> bool {
        self.completion.complete(response)
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }
}
