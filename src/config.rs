//! Configuration for kvbridge
//!
//! Centralized client configuration with sensible defaults.

use std::time::Duration;

use crate::codec::Encoding;
use crate::protocol::CollectionId;

/// Main configuration for a client collection handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Keyspace Configuration
    // -------------------------------------------------------------------------
    /// Bucket the collection belongs to
    pub bucket: String,

    /// Scope within the bucket
    pub scope: String,

    /// Collection within the scope
    pub collection: String,

    // -------------------------------------------------------------------------
    // Operation Configuration
    // -------------------------------------------------------------------------
    /// Timeout applied when an operation's options do not set one
    pub kv_timeout: Duration,

    /// Encoding used when an operation's options do not select one
    pub default_encoding: Encoding,

    // -------------------------------------------------------------------------
    // Cluster Configuration
    // -------------------------------------------------------------------------
    /// Number of replicas configured for the bucket
    pub num_replicas: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: "default".to_string(),
            scope: "_default".to_string(),
            collection: "_default".to_string(),
            kv_timeout: Duration::from_millis(2500),
            default_encoding: Encoding::Json,
            num_replicas: 1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Fully qualified collection this config points at
    pub fn collection_id(&self) -> CollectionId {
        CollectionId::new(&self.bucket, &self.scope, &self.collection)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the bucket name
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.bucket = bucket.into();
        self
    }

    /// Set the scope name
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.config.scope = scope.into();
        self
    }

    /// Set the collection name
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.config.collection = collection.into();
        self
    }

    /// Set the default KV operation timeout
    pub fn kv_timeout(mut self, timeout: Duration) -> Self {
        self.config.kv_timeout = timeout;
        self
    }

    /// Set the default value encoding
    pub fn default_encoding(mut self, encoding: Encoding) -> Self {
        self.config.default_encoding = encoding;
        self
    }

    /// Set the number of bucket replicas
    pub fn num_replicas(mut self, count: u8) -> Self {
        self.config.num_replicas = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
