//! Unlock accessor

use super::{execute, Accessor};
use crate::dispatch::Dispatcher;
use crate::error::{ErrorContext, Result};
use crate::protocol::{Request, Response};

pub struct UnlockAccessor;

impl Accessor for UnlockAccessor {
    type Output = ();

    fn project(&self, _context: &ErrorContext, _response: Response) -> Result<()> {
        Ok(())
    }
}

/// Dispatch an unlock
pub async fn unlock<D>(dispatcher: &D, request: Request) -> Result<()>
where
    D: Dispatcher + ?Sized,
{
    execute(dispatcher, request, &UnlockAccessor).await
}
