//! Persistence collaborator seam.
//!
//! Handlers talk to storage only through [`Repository`]; the query core never
//! sees a repository at all, it receives plain slices of records.

pub mod memory;
pub mod mongo;

use crate::error::AppError;
use crate::query::{Record, RecordId};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use memory::InMemoryRepository;
pub use mongo::{MongoDb, MongoRepository};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Record {0} not found")]
    NotFound(RecordId),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            StoreError::NotFound(_) => AppError::not_found(),
        }
    }
}

/// A record type that can be stored in a named collection.
pub trait Entity:
    Record + Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    const COLLECTION: &'static str;

    fn assign_id(&mut self, id: RecordId);
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every record, ordered by id.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<T>, StoreError>;

    /// Stores `record` under a freshly assigned id and returns it.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Replaces the stored record with the same id.
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Returns false when no record had that id.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
