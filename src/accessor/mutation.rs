//! Remove and replace accessors

use super::{execute, Accessor};
use crate::dispatch::Dispatcher;
use crate::document::MutationResult;
use crate::error::{ErrorContext, Result};
use crate::protocol::{Request, Response};

/// Projects a mutation response into its CAS and mutation token
pub struct MutationAccessor;

impl Accessor for MutationAccessor {
    type Output = MutationResult;

    fn project(&self, _context: &ErrorContext, response: Response) -> Result<MutationResult> {
        Ok(MutationResult::new(response.cas, response.mutation_token))
    }
}

/// Dispatch a remove
pub async fn remove<D>(dispatcher: &D, request: Request) -> Result<MutationResult>
where
    D: Dispatcher + ?Sized,
{
    execute(dispatcher, request, &MutationAccessor).await
}

/// Dispatch a replace
pub async fn replace<D>(dispatcher: &D, request: Request) -> Result<MutationResult>
where
    D: Dispatcher + ?Sized,
{
    execute(dispatcher, request, &MutationAccessor).await
}
