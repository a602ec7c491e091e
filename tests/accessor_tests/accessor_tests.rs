//! Accessor Tests
//!
//! These tests verify:
//! - Success projection per operation
//! - NOT_FOUND is a value for get and an error for everything else
//! - Failed statuses surface as the mapped error with full context
//! - Exactly one dispatch per call
//! - Deadlines are the dispatcher's: accessors run on a runtime without timers

use std::time::Duration;

use bytes::Bytes;
use kvbridge::accessor;
use kvbridge::codec::EncodedDocument;
use kvbridge::options::Durability;
use kvbridge::protocol::{
    CollectionId, Command, MutationToken, Request, RequestKind, Response, ResponseStatus,
};
use kvbridge::{Dispatcher, Document, Encoding, ErrorKind};
use parking_lot::Mutex;
use serde_json::{json, Value};

const TIMEOUT: Duration = Duration::from_secs(1);

// =============================================================================
// Helper Functions
// =============================================================================

/// Dispatcher answering every request with a fixed response
struct StubDispatcher {
    response: Response,
    seen: Mutex<Vec<(RequestKind, String)>>,
}

impl StubDispatcher {
    fn new(response: Response) -> Self {
        Self {
            response,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn with_status(status: ResponseStatus) -> Self {
        Self::new(Response::status(status))
    }

    fn dispatch_count(&self) -> usize {
        self.seen.lock().len()
    }
}

impl Dispatcher for StubDispatcher {
    fn send(&self, mut request: Request) {
        self.seen
            .lock()
            .push((request.kind(), request.key().to_string()));
        request.complete(self.response.clone());
    }
}

/// Dispatcher that records each request's deadline and answers it as overdue
struct DeadlineDispatcher {
    deadlines: Mutex<Vec<Duration>>,
}

impl Dispatcher for DeadlineDispatcher {
    fn send(&self, mut request: Request) {
        self.deadlines.lock().push(request.timeout());
        request.complete(Response::status(ResponseStatus::Timeout));
    }
}

fn request(key: &str, command: Command) -> Request {
    Request::new(key, CollectionId::default(), command, TIMEOUT)
}

fn remove_command() -> Command {
    Command::Remove {
        cas: 0,
        durability: Durability::default(),
    }
}

fn replace_command(cas: u64) -> Command {
    Command::Replace {
        content: EncodedDocument::new(0x0200_0000, br#"{"b":2}"#.to_vec()),
        cas,
        expiry: None,
        durability: Durability::default(),
    }
}

fn token() -> MutationToken {
    MutationToken {
        partition_id: 115,
        partition_uuid: 0xfeed,
        sequence_number: 7,
        bucket: "default".to_string(),
    }
}

// =============================================================================
// Get Tests
// =============================================================================

#[tokio::test]
async fn test_get_success_returns_document() {
    let dispatcher = StubDispatcher::new(Response::document(
        Bytes::from_static(br#"{"a":1}"#),
        0x0200_0000,
        42,
        None,
    ));
    let req = request("k1", Command::Get);

    let result: Option<Document<Value>> = accessor::get(&dispatcher, req, Encoding::Json)
        .await
        .unwrap();

    let doc = result.expect("document should be present");
    assert_eq!(doc, Document::new("k1", json!({"a": 1}), 42, None));
    assert_eq!(dispatcher.dispatch_count(), 1);
}

#[tokio::test]
async fn test_get_not_found_returns_none() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::NotFound);
    let req = request("missing", Command::Get);

    let result = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_get_failure_is_mapped() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::OutOfMemory);
    let req = request("k1", Command::Get);

    let err = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerOutOfMemory);
    let ctx = err.context().unwrap();
    assert_eq!(ctx.kind, RequestKind::Get);
    assert_eq!(ctx.key, "k1");
}

#[tokio::test]
async fn test_get_undecodable_content_is_decode_error() {
    let dispatcher = StubDispatcher::new(Response::document(
        Bytes::from_static(b"not json"),
        0x0200_0000,
        1,
        None,
    ));
    let req = request("user::42", Command::Get);

    let err = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    let ctx = err.context().expect("decode errors carry context");
    assert_eq!(ctx.kind, RequestKind::Get);
    assert_eq!(ctx.key, "user::42");
    assert_eq!(ctx.status, Some(ResponseStatus::Success));
}

#[tokio::test]
async fn test_get_unknown_status_is_unmapped() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::Unknown(0xd0));
    let req = request("k1", Command::Get);

    let err = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnmappedStatus);
}

#[tokio::test]
async fn test_get_success_without_content_fails() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::Success);
    let req = request("k1", Command::Get);

    let err = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    let ctx = err.context().unwrap();
    assert_eq!(ctx.kind, RequestKind::Get);
    assert_eq!(ctx.key, "k1");
    assert_eq!(ctx.status, Some(ResponseStatus::Success));
}

#[tokio::test]
async fn test_get_empty_content_is_decoded_not_rejected() {
    let dispatcher = StubDispatcher::new(Response::document(Bytes::new(), 0x0200_0000, 1, None));
    let req = request("k1", Command::Get);

    let err = accessor::get::<_, Value>(&dispatcher, req, Encoding::Json)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[tokio::test]
async fn test_replace_success_returns_cas_and_token() {
    let dispatcher = StubDispatcher::new(Response::mutation(77, Some(token())));
    let req = request("k1", replace_command(5));

    let result = accessor::replace(&dispatcher, req).await.unwrap();

    assert_eq!(result.cas(), 77);
    assert_eq!(result.mutation_token(), Some(&token()));
}

#[tokio::test]
async fn test_replace_locked_is_cas_mismatch_with_context() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::Locked);
    let req = request("k1", replace_command(5));

    let err = accessor::replace(&dispatcher, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CasMismatch);
    let ctx = err.context().unwrap();
    assert_eq!(ctx.kind, RequestKind::Replace);
    assert_eq!(ctx.key, "k1");
    assert_eq!(ctx.status, Some(ResponseStatus::Locked));
}

#[tokio::test]
async fn test_remove_success_without_token() {
    let dispatcher = StubDispatcher::new(Response::mutation(9, None));
    let req = request("k1", remove_command());

    let result = accessor::remove(&dispatcher, req).await.unwrap();

    assert_eq!(result.cas(), 9);
    assert!(result.mutation_token().is_none());
}

#[tokio::test]
async fn test_remove_re_commit_in_progress() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::SyncWriteReCommitInProgress);
    let req = request("k1", remove_command());

    let err = accessor::remove(&dispatcher, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DurableWriteReCommitInProgress);
    assert!(err.is_retryable());
}

// =============================================================================
// Unlock Tests
// =============================================================================

#[tokio::test]
async fn test_unlock_success() {
    let dispatcher = StubDispatcher::new(Response::mutation(3, None));
    let req = request("k1", Command::Unlock { cas: 3 });

    accessor::unlock(&dispatcher, req).await.unwrap();
}

#[tokio::test]
async fn test_unlock_server_busy_is_temporary_failure() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::ServerBusy);
    let req = request("k1", Command::Unlock { cas: 3 });

    let err = accessor::unlock(&dispatcher, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemporaryFailure);
    assert_eq!(err.context().unwrap().status, Some(ResponseStatus::ServerBusy));
}

// =============================================================================
// Absence Asymmetry
// =============================================================================

#[tokio::test]
async fn test_not_found_is_an_error_for_every_non_read() {
    let commands = [remove_command(), Command::Unlock { cas: 1 }, replace_command(0)];

    for command in commands {
        let dispatcher = StubDispatcher::with_status(ResponseStatus::NotFound);
        let kind = command.kind();
        let req = request("gone", command);

        let err = match kind {
            RequestKind::Remove => accessor::remove(&dispatcher, req).await.map(|_| ()),
            RequestKind::Replace => accessor::replace(&dispatcher, req).await.map(|_| ()),
            RequestKind::Unlock => accessor::unlock(&dispatcher, req).await,
            RequestKind::Get => unreachable!(),
        }
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DocumentNotFound, "op {}", kind);
        assert_eq!(err.context().unwrap().kind, kind);
        assert_eq!(dispatcher.dispatch_count(), 1);
    }
}

// =============================================================================
// Timeout Tests
// =============================================================================

#[tokio::test]
async fn test_dispatcher_reported_timeout_is_operation_failure() {
    let dispatcher = StubDispatcher::with_status(ResponseStatus::Timeout);
    let req = request("k1", remove_command());

    let err = accessor::remove(&dispatcher, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(!err.is_retryable());
    assert_eq!(err.context().unwrap().status, Some(ResponseStatus::Timeout));
}

#[tokio::test]
async fn test_request_deadline_is_left_to_the_dispatcher() {
    let dispatcher = DeadlineDispatcher {
        deadlines: Mutex::new(Vec::new()),
    };
    let req = Request::new(
        "slow",
        CollectionId::default(),
        Command::Unlock { cas: 1 },
        Duration::from_millis(50),
    );

    let err = accessor::unlock(&dispatcher, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert_eq!(*dispatcher.deadlines.lock(), vec![Duration::from_millis(50)]);
}

#[test]
fn test_accessors_run_on_a_runtime_without_timers() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let dispatcher = StubDispatcher::with_status(ResponseStatus::NotFound);

    let result = runtime.block_on(accessor::get::<_, Value>(
        &dispatcher,
        request("k1", Command::Get),
        Encoding::Json,
    ));

    assert!(result.unwrap().is_none());
    assert_eq!(dispatcher.dispatch_count(), 1);
}
