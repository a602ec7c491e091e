//! In-process dispatcher
//!
//! Answers requests from a HashMap-backed document store guarded by a
//! single mutex, the way a KV engine node would answer them.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::Mutex;

use super::Dispatcher;
use crate::codec::EncodedDocument;
use crate::config::Config;
use crate::options::Durability;
use crate::protocol::{
    CollectionId, Command, MutationToken, Request, Response, ResponseStatus,
};

/// Number of partitions keys are hashed into
pub const NUM_PARTITIONS: u16 = 1024;

/// Document as held by the store
#[derive(Debug, Clone)]
struct StoredDocument {
    content: Bytes,
    flags: u32,
    cas: u64,
    expires_at: Option<Instant>,
    locked_until: Option<Instant>,
}

impl StoredDocument {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

#[derive(Default)]
struct StoreState {
    documents: HashMap<(CollectionId, String), StoredDocument>,
    sequences: HashMap<u16, u64>,
    injected: VecDeque<ResponseStatus>,
    last_cas: u64,
}

impl StoreState {
    fn next_cas(&mut self) -> u64 {
        self.last_cas += 1;
        self.last_cas
    }

    fn next_sequence(&mut self, partition: u16) -> u64 {
        let seq = self.sequences.entry(partition).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Look up a live document, dropping it if it has expired
    fn live(&mut self, id: &(CollectionId, String), now: Instant) -> Option<&mut StoredDocument> {
        if self.documents.get(id).is_some_and(|doc| doc.is_expired(now)) {
            self.documents.remove(id);
        }
        self.documents.get_mut(id)
    }
}

/// Dispatcher backed by an in-memory document store
///
/// Requests are executed inline inside `send`, so the completion handle is
/// already resolved when `send` returns.
pub struct MemoryDispatcher {
    bucket: String,
    num_replicas: u8,
    partition_uuid: u64,
    state: Mutex<StoreState>,
    dispatched: AtomicU64,
}

impl MemoryDispatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            bucket: config.bucket.clone(),
            num_replicas: config.num_replicas,
            partition_uuid: partition_uuid_for(&config.bucket),
            state: Mutex::new(StoreState::default()),
            dispatched: AtomicU64::new(0),
        }
    }

    /// Partition a key hashes into
    pub fn partition_for(key: &str) -> u16 {
        let hash = crc32fast::hash(key.as_bytes());
        (((hash >> 16) & 0x7fff) % NUM_PARTITIONS as u32) as u16
    }

    /// Store a document unconditionally, returning its new CAS
    pub fn seed(&self, collection: &CollectionId, key: &str, encoded: EncodedDocument) -> u64 {
        let mut state = self.state.lock();
        let cas = state.next_cas();
        state.documents.insert(
            (collection.clone(), key.to_string()),
            StoredDocument {
                content: encoded.content,
                flags: encoded.flags,
                cas,
                expires_at: None,
                locked_until: None,
            },
        );
        cas
    }

    /// Lock a document for `lock_time`, returning the lock token
    ///
    /// The token is the document's new CAS; mutations and unlocks must
    /// present it until the lock is released or expires.
    pub fn lock(&self, collection: &CollectionId, key: &str, lock_time: Duration) -> Option<u64> {
        let now = Instant::now();
        let mut state = self.state.lock();
        let id = (collection.clone(), key.to_string());
        state.live(&id, now)?;
        let cas = state.next_cas();
        let doc = state.documents.get_mut(&id)?;
        doc.cas = cas;
        doc.locked_until = Some(now + lock_time);
        Some(cas)
    }

    /// Answer the next request with `status` instead of executing it
    pub fn inject_status(&self, status: ResponseStatus) {
        self.state.lock().injected.push_back(status);
    }

    /// Number of requests received so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Number of live documents across all collections
    pub fn document_count(&self) -> usize {
        let now = Instant::now();
        self.state
            .lock()
            .documents
            .values()
            .filter(|doc| !doc.is_expired(now))
            .count()
    }

    fn execute(&self, request: &Request) -> Response {
        let now = Instant::now();
        let mut state = self.state.lock();

        if let Some(status) = state.injected.pop_front() {
            return Response::status(status);
        }

        let id = (request.collection().clone(), request.key().to_string());
        match request.command() {
            Command::Get => match state.live(&id, now) {
                Some(doc) => {
                    // A locked document does not reveal its CAS.
                    let cas = if doc.is_locked(now) { u64::MAX } else { doc.cas };
                    let expiry = doc.expires_at.map(|at| at.saturating_duration_since(now));
                    Response::document(doc.content.clone(), doc.flags, cas, expiry)
                }
                None => Response::not_found(),
            },

            Command::Remove { cas, durability } => {
                if let Some(status) = self.check_mutation(&mut state, &id, *cas, *durability, now)
                {
                    return Response::status(status);
                }
                state.documents.remove(&id);
                let new_cas = state.next_cas();
                let token = self.mutation_token(&mut state, request.key());
                Response::mutation(new_cas, Some(token))
            }

            Command::Unlock { cas } => match state.live(&id, now) {
                None => Response::not_found(),
                Some(doc) if !doc.is_locked(now) => Response::status(ResponseStatus::NotLocked),
                Some(doc) if doc.cas != *cas => Response::status(ResponseStatus::Locked),
                Some(doc) => {
                    doc.locked_until = None;
                    Response::mutation(doc.cas, None)
                }
            },

            Command::Replace {
                content,
                cas,
                expiry,
                durability,
            } => {
                if let Some(status) = self.check_mutation(&mut state, &id, *cas, *durability, now)
                {
                    return Response::status(status);
                }
                let new_cas = state.next_cas();
                if let Some(doc) = state.documents.get_mut(&id) {
                    doc.content = content.content.clone();
                    doc.flags = content.flags;
                    doc.cas = new_cas;
                    doc.expires_at = expiry.map(|e| now + e);
                    doc.locked_until = None;
                }
                let token = self.mutation_token(&mut state, request.key());
                Response::mutation(new_cas, Some(token))
            }
        }
    }

    /// Preconditions shared by every mutation of an existing document
    fn check_mutation(
        &self,
        state: &mut StoreState,
        id: &(CollectionId, String),
        cas: u64,
        durability: Durability,
        now: Instant,
    ) -> Option<ResponseStatus> {
        if !durability.satisfiable_with(self.num_replicas) {
            return Some(ResponseStatus::DurabilityImpossible);
        }
        let doc = match state.live(id, now) {
            Some(doc) => doc,
            None => return Some(ResponseStatus::NotFound),
        };
        if doc.is_locked(now) {
            if cas != doc.cas {
                return Some(ResponseStatus::Locked);
            }
        } else if cas != 0 && cas != doc.cas {
            return Some(ResponseStatus::Exists);
        }
        None
    }

    fn mutation_token(&self, state: &mut StoreState, key: &str) -> MutationToken {
        let partition_id = Self::partition_for(key);
        MutationToken {
            partition_id,
            partition_uuid: self.partition_uuid,
            sequence_number: state.next_sequence(partition_id),
            bucket: self.bucket.clone(),
        }
    }
}

impl Dispatcher for MemoryDispatcher {
    fn send(&self, mut request: Request) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            id = request.id(),
            op = %request.kind(),
            key = request.key(),
            "executing request in memory"
        );

        let response = self.execute(&request);
        tracing::trace!(id = request.id(), status = %response.status, "request executed");
        request.complete(response);
    }
}

fn partition_uuid_for(bucket: &str) -> u64 {
    let hash = crc32fast::hash(bucket.as_bytes()) as u64;
    (hash << 32) | (!hash & 0xffff_ffff)
}
