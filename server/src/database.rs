//! # Submission store
//!
//! Accepted submissions are kept in Redis as an insert-only list: each
//! record is serialized to JSON and `RPUSH`ed onto one key, so reading
//! them back in arrival order is a plain `LRANGE`.
//!
//! Storage is a best-effort side effect of the pipeline. The email relay
//! is the success signal the visitor cares about, so a store failure is
//! logged and the request continues; see [`store_best_effort`].

use std::time::Duration;

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use thiserror::Error;
use tracing::{error, info};

use crate::models::{ContactSubmission, StoredSubmission};

pub const SUBMISSIONS_KEY: &str = "contact:messages";

#[derive(Debug, Error)]
#[error("submission store error: {0}")]
pub struct StoreError(pub String);

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, record: &StoredSubmission) -> Result<(), StoreError>;
}

pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Self {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(100));

        let client = Client::open(redis_url).unwrap();
        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .unwrap();

        Self { connection }
    }
}

#[async_trait]
impl SubmissionStore for RedisStore {
    async fn insert(&self, record: &StoredSubmission) -> Result<(), StoreError> {
        let payload = serde_json::to_string(record).map_err(|e| StoreError(e.to_string()))?;

        let mut connection = self.connection.clone();
        let _len: i64 = connection
            .rpush(SUBMISSIONS_KEY, payload)
            .await
            .map_err(|e| StoreError(e.to_string()))?;

        Ok(())
    }
}

/// The one place where a store error is allowed to disappear. Anything
/// that goes wrong here ends up in the logs and nowhere else.
pub async fn store_best_effort(store: &dyn SubmissionStore, submission: &ContactSubmission) {
    let record = StoredSubmission::record(submission);

    match store.insert(&record).await {
        Ok(()) => info!("Message saved to store"),
        Err(e) => error!("Failed to save submission: {e}"),
    }
}
