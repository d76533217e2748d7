use super::{Entity, Repository, StoreError};
use crate::query::RecordId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local repository used in development and tests.
pub struct InMemoryRepository<T> {
    state: RwLock<MemoryState<T>>,
}

struct MemoryState<T> {
    records: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seeds the repository, keeping the ids the records already carry.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let records: BTreeMap<RecordId, T> = records.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = records.keys().next_back().map_or(1, |id| id + 1);

        Self {
            state: RwLock::new(MemoryState { records, next_id }),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.state.read().await.records.values().cloned().collect())
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, StoreError> {
        Ok(self.state.read().await.records.get(&id).cloned())
    }

    async fn insert(&self, mut record: T) -> Result<T, StoreError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        record.assign_id(id);
        state.records.insert(id, record.clone());
        tracing::debug!(collection = T::COLLECTION, id, "Inserted record");
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let mut state = self.state.write().await;
        let id = record.id();
        match state.records.get_mut(&id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.records.remove(&id).is_some())
    }
}
