pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use models::{Author, AuthorId, NewStory, NewsStory, StoryId};

pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use postgres::PgDataStore;

/// Errors surfaced by any `DataStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence port for stories and the authors that own them.
///
/// Implementations provide atomic single-record create/delete; callers issue
/// one logical operation per request and never compose transactions.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert a story and return its freshly assigned key
    async fn create_story(&self, story: NewStory) -> StoreResult<StoryId>;

    async fn get_story(&self, id: StoryId) -> StoreResult<NewsStory>;

    /// All stories in creation order
    async fn list_stories(&self) -> StoreResult<Vec<NewsStory>>;

    async fn delete_story(&self, story: &NewsStory) -> StoreResult<()>;

    async fn get_author(&self, id: AuthorId) -> StoreResult<Author>;

    async fn find_author_by_username(&self, username: &str) -> StoreResult<Option<Author>>;

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
