use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::manager::DatabaseManager;
use super::models::{Author, AuthorId, AuthorRow, NewStory, NewsStory, StoryId, StoryRow};
use super::{DataStore, StoreError, StoreResult};

const STORY_COLUMNS: &str = "id, headline, category, region, author_id, creation_date, details";
const AUTHOR_COLUMNS: &str = "id, username, name, password_hash, is_superuser";

/// Postgres-backed store.
///
/// Expects existing tables (no migrations are run from here):
///
/// ```sql
/// authors(id BIGSERIAL PRIMARY KEY, username VARCHAR(32) UNIQUE, name VARCHAR(32),
///         password_hash TEXT, is_superuser BOOLEAN)
/// news_stories(id BIGSERIAL PRIMARY KEY, headline VARCHAR(64), category VARCHAR(6),
///              region VARCHAR(2), author_id BIGINT REFERENCES authors(id) ON DELETE CASCADE,
///              creation_date DATE, details VARCHAR(512))
/// ```
pub struct PgDataStore {
    pool: PgPool,
}

impl PgDataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn story_from_row(row: StoryRow) -> StoreResult<NewsStory> {
        let id = row.id;
        NewsStory::try_from(row).map_err(|e| StoreError::QueryError(format!("story {} has {}", id, e)))
    }

    fn map_write_error(err: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() || db_err.is_unique_violation() || db_err.is_check_violation() {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
        }
        StoreError::Sqlx(err)
    }
}

#[async_trait]
impl DataStore for PgDataStore {
    async fn create_story(&self, story: NewStory) -> StoreResult<StoryId> {
        let query = r#"
            INSERT INTO news_stories (headline, category, region, author_id, creation_date, details)
            VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE), $6)
            RETURNING id
        "#;

        let id: i64 = sqlx::query_scalar(query)
            .bind(&story.headline)
            .bind(story.category.as_str())
            .bind(story.region.as_str())
            .bind(story.author_id.0)
            .bind(story.creation_date)
            .bind(&story.details)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        debug!("Inserted news_stories row {}", id);
        Ok(StoryId(id))
    }

    async fn get_story(&self, id: StoryId) -> StoreResult<NewsStory> {
        let query = format!("SELECT {} FROM news_stories WHERE id = $1", STORY_COLUMNS);
        let row = sqlx::query_as::<_, StoryRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("story {}", id)))?;
        Self::story_from_row(row)
    }

    async fn list_stories(&self) -> StoreResult<Vec<NewsStory>> {
        let query = format!("SELECT {} FROM news_stories ORDER BY id", STORY_COLUMNS);
        sqlx::query_as::<_, StoryRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Self::story_from_row)
            .collect()
    }

    async fn delete_story(&self, story: &NewsStory) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM news_stories WHERE id = $1")
            .bind(story.id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("story {}", story.id)));
        }
        Ok(())
    }

    async fn get_author(&self, id: AuthorId) -> StoreResult<Author> {
        let query = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        sqlx::query_as::<_, AuthorRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .map(Author::from)
            .ok_or_else(|| StoreError::NotFound(format!("author {}", id)))
    }

    async fn find_author_by_username(&self, username: &str) -> StoreResult<Option<Author>> {
        let query = format!("SELECT {} FROM authors WHERE username = $1", AUTHOR_COLUMNS);
        let row = sqlx::query_as::<_, AuthorRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Author::from))
    }

    async fn health_check(&self) -> StoreResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}
