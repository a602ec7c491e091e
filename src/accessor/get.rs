//! Get accessor

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::{execute, Accessor};
use crate::codec::{EncodedDocument, Encoding};
use crate::dispatch::Dispatcher;
use crate::document::Document;
use crate::error::{map_error, ErrorContext, Result};
use crate::protocol::{Request, Response, ResponseStatus};

/// Decodes a fetched document; a missing document is `None`
pub struct GetAccessor<T> {
    decoder: Encoding,
    _target: PhantomData<fn() -> T>,
}

impl<T> GetAccessor<T> {
    pub fn new(decoder: Encoding) -> Self {
        Self {
            decoder,
            _target: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Accessor for GetAccessor<T> {
    type Output = Option<Document<T>>;

    fn absent(&self) -> Option<Self::Output> {
        Some(None)
    }

    fn project(&self, context: &ErrorContext, response: Response) -> Result<Self::Output> {
        let content = match response.content {
            Some(content) => content,
            None => {
                tracing::warn!(key = %context.key, "successful get response carried no content");
                return Err(map_error(ResponseStatus::Success, context.clone()));
            }
        };

        let encoded = EncodedDocument::new(response.flags, content);
        let document = Document::from_encoded(
            context.key.as_str(),
            &encoded,
            response.cas,
            response.expiry,
            self.decoder,
        )
        .map_err(|e| e.into_kv_error(context.clone().with_status(ResponseStatus::Success)))?;
        Ok(Some(document))
    }
}

/// Dispatch a get and decode the document with `decoder`
pub async fn get<D, T>(
    dispatcher: &D,
    request: Request,
    decoder: Encoding,
) -> Result<Option<Document<T>>>
where
    D: Dispatcher + ?Sized,
    T: DeserializeOwned,
{
    execute(dispatcher, request, &GetAccessor::new(decoder)).await
}
