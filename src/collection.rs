//! Collection Module
//!
//! Caller-facing asynchronous KV API. Each call builds one request from the
//! given options, hands it to the matching accessor, and returns the typed
//! outcome.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::accessor;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::document::{Document, MutationResult};
use crate::error::{ErrorContext, Result};
use crate::options::{GetOptions, RemoveOptions, ReplaceOptions, UnlockOptions};
use crate::protocol::{CollectionId, Command, Request, RequestKind};

/// Handle to one collection, bound to a dispatcher
pub struct Collection<D: Dispatcher + ?Sized> {
    config: Config,
    id: CollectionId,
    dispatcher: Arc<D>,
}

impl<D: Dispatcher + ?Sized> Clone for Collection<D> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            id: self.id.clone(),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<D: Dispatcher + ?Sized> Collection<D> {
    pub fn new(config: Config, dispatcher: Arc<D>) -> Self {
        let id = config.collection_id();
        Self {
            config,
            id,
            dispatcher,
        }
    }

    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<D> {
        &self.dispatcher
    }

    /// Fetch a document; `Ok(None)` if it does not exist
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        options: &GetOptions,
    ) -> Result<Option<Document<T>>> {
        let decoder = options.decoder().unwrap_or(self.config.default_encoding);
        let request = self.request(key, Command::Get, options.timeout());
        accessor::get(&*self.dispatcher, request, decoder).await
    }

    /// Remove a document
    pub async fn remove(&self, key: &str, options: &RemoveOptions) -> Result<MutationResult> {
        let command = Command::Remove {
            cas: options.cas(),
            durability: options.durability(),
        };
        let request = self.request(key, command, options.timeout());
        accessor::remove(&*self.dispatcher, request).await
    }

    /// Release a lock using the token returned when it was taken
    pub async fn unlock(&self, key: &str, lock_token: u64, options: &UnlockOptions) -> Result<()> {
        let command = Command::Unlock { cas: lock_token };
        let request = self.request(key, command, options.timeout());
        accessor::unlock(&*self.dispatcher, request).await
    }

    /// Replace the content of an existing document
    pub async fn replace<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: &ReplaceOptions,
    ) -> Result<MutationResult> {
        let encoder = options.encoder().unwrap_or(self.config.default_encoding);
        let content = encoder.encode(value).map_err(|e| {
            e.into_kv_error(ErrorContext::new(RequestKind::Replace, key, self.id.clone()))
        })?;
        let command = Command::Replace {
            content,
            cas: options.cas(),
            expiry: options.expiry(),
            durability: options.durability(),
        };
        let request = self.request(key, command, options.timeout());
        accessor::replace(&*self.dispatcher, request).await
    }

    fn request(&self, key: &str, command: Command, timeout: Option<Duration>) -> Request {
        let timeout = timeout.unwrap_or(self.config.kv_timeout);
        Request::new(key, self.id.clone(), command, timeout)
    }
}
