use super::{Entity, Repository, StoreError};
use crate::query::RecordId;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client as MongoClient, Collection, Database, IndexModel,
    bson::doc,
    options::{FindOneOptions, FindOptions, IndexOptions},
};

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            StoreError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Repository over the entity's collection, with a unique index on `id`.
    pub async fn repository<T: Entity>(&self) -> Result<MongoRepository<T>, StoreError> {
        let repository = MongoRepository {
            db: self.clone(),
            collection: self.db.collection::<T>(T::COLLECTION),
        };
        repository.ensure_indexes().await?;
        Ok(repository)
    }
}

pub struct MongoRepository<T: Entity> {
    db: MongoDb,
    collection: Collection<T>,
}

impl<T: Entity> MongoRepository<T> {
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name(format!("{}_id_unique", T::COLLECTION))
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index, None).await.map_err(|e| {
            tracing::error!(
                "Failed to create id index on {} collection: {}",
                T::COLLECTION,
                e
            );
            StoreError::from(e)
        })?;
        tracing::info!("Created index on {}.id", T::COLLECTION);
        Ok(())
    }

    async fn next_id(&self) -> Result<RecordId, StoreError> {
        let options = FindOneOptions::builder().sort(doc! { "id": -1 }).build();
        let last = self.collection.find_one(None, options).await?;
        Ok(last.map_or(1, |record| record.id() + 1))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self.collection.find(None, options).await?;
        let records: Vec<T> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, StoreError> {
        Ok(self.collection.find_one(doc! { "id": id }, None).await?)
    }

    async fn insert(&self, mut record: T) -> Result<T, StoreError> {
        record.assign_id(self.next_id().await?);
        self.collection.insert_one(&record, None).await?;
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let id = record.id();
        let result = self
            .collection
            .replace_one(doc! { "id": id }, &record, None)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(record)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.db.health_check().await
    }
}
