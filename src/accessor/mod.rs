//! Accessor Module
//!
//! Bridges one in-flight request to a typed result or error.
//!
//! ## Flow
//! 1. Detach the request's receiver, then hand the request to the dispatcher (exactly once)
//! 2. Await the completion handle
//! 3. `SUCCESS` → the accessor's projection
//! 4. `NOT_FOUND` → the accessor's absent value, if it has one
//! 5. anything else → [`map_error`]
//!
//! Only reads treat a missing document as a value. Every other operation
//! reports it as `DocumentNotFound`.
//!
//! Accessors own no timer. The dispatcher enforces [`Request::timeout`] and
//! completes an overdue request with `TIMEOUT`; a request it drops without
//! answering resolves as `RequestCanceled`.

mod get;
mod mutation;
mod unlock;

use crate::dispatch::Dispatcher;
use crate::error::{map_error, ErrorContext, KvError, Result};
use crate::protocol::{Request, Response, ResponseStatus};

pub use get::{get, GetAccessor};
pub use mutation::{remove, replace, MutationAccessor};
pub use unlock::{unlock, UnlockAccessor};

/// Per-operation half of the execute-and-project skeleton
pub trait Accessor {
    /// Successful outcome of the operation
    type Output;

    /// Value returned for `NOT_FOUND`, when a missing document is not an error
    fn absent(&self) -> Option<Self::Output> {
        None
    }

    /// Turn a successful response into the operation's output
    ///
    /// `context` identifies the request and is used for any error raised here.
    fn project(&self, context: &ErrorContext, response: Response) -> Result<Self::Output>;
}

/// Dispatch `request` and resolve it through `accessor`
///
/// Fails with `InvalidArgument`, without dispatching, if the request's
/// receiver was already taken.
pub async fn execute<D, A>(dispatcher: &D, mut request: Request, accessor: &A) -> Result<A::Output>
where
    D: Dispatcher + ?Sized,
    A: Accessor,
{
    let kind = request.kind();
    let context = ErrorContext::new(kind, request.key(), request.collection().clone());

    let receiver = request.take_receiver().ok_or_else(|| {
        KvError::InvalidArgument(format!(
            "request {} has no receiver left to await ({})",
            request.id(),
            context
        ))
    })?;

    tracing::debug!(id = request.id(), op = %kind, key = %context.key, "dispatching request");
    dispatcher.send(request);

    let response = match receiver.await {
        Ok(response) => response,
        Err(_) => {
            return Err(KvError::RequestCanceled(
                context.with_status(ResponseStatus::Canceled),
            ))
        }
    };

    let status = response.status;
    tracing::trace!(op = %kind, key = %context.key, status = %status, "response received");

    if status.success() {
        return accessor.project(&context, response);
    }

    if status == ResponseStatus::NotFound {
        if let Some(absent) = accessor.absent() {
            return Ok(absent);
        }
    }

    if let ResponseStatus::Unknown(code) = status {
        tracing::warn!(op = %kind, key = %context.key, code, "response status has no mapping");
    }

    Err(map_error(status, context))
}
