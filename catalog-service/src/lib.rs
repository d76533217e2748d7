pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod startup;

use models::{default_categories, Artist, Category, Drink, Question, Show, Venue};
use service_core::auth::CredentialVerifier;
use service_core::query::DEFAULT_PAGE_SIZE;
use service_core::store::{InMemoryRepository, MongoDb, Repository, StoreError};
use std::sync::Arc;

/// Repositories and collaborators every handler receives.
///
/// Built once by the entry point and cloned into each request; nothing here
/// is a process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn Repository<Category>>,
    pub questions: Arc<dyn Repository<Question>>,
    pub drinks: Arc<dyn Repository<Drink>>,
    pub venues: Arc<dyn Repository<Venue>>,
    pub artists: Arc<dyn Repository<Artist>>,
    pub shows: Arc<dyn Repository<Show>>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub page_size: i64,
}

impl AppState {
    /// State backed by in-memory repositories, seeded with the default trivia categories.
    pub fn in_memory(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            categories: Arc::new(InMemoryRepository::with_records(default_categories())),
            questions: Arc::new(InMemoryRepository::<Question>::new()),
            drinks: Arc::new(InMemoryRepository::<Drink>::new()),
            venues: Arc::new(InMemoryRepository::<Venue>::new()),
            artists: Arc::new(InMemoryRepository::<Artist>::new()),
            shows: Arc::new(InMemoryRepository::<Show>::new()),
            verifier,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// State backed by MongoDB collections.
    pub async fn mongo(
        db: &MongoDb,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            categories: Arc::new(db.repository::<Category>().await?),
            questions: Arc::new(db.repository::<Question>().await?),
            drinks: Arc::new(db.repository::<Drink>().await?),
            venues: Arc::new(db.repository::<Venue>().await?),
            artists: Arc::new(db.repository::<Artist>().await?),
            shows: Arc::new(db.repository::<Show>().await?),
            verifier,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }
}
