use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Author, AuthorId, NewStory, NewsStory, StoryId, AUTHOR_FIELD_MAX_LEN};
use super::{DataStore, StoreError, StoreResult};
use crate::validation::date::server_today;

/// Process-local store used for development, fixtures and tests.
/// Keys start at 1 and are never reused.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    authors: Vec<Author>,
    stories: Vec<NewsStory>,
    next_author_id: i64,
    next_story_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                authors: Vec::new(),
                stories: Vec::new(),
                next_author_id: 1,
                next_story_id: 1,
            }),
        }
    }

    /// Register an author. Registration is not part of the HTTP surface; this
    /// is how fixtures and tests provision accounts.
    pub async fn insert_author(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
        is_superuser: bool,
    ) -> StoreResult<Author> {
        if username.is_empty() || username.chars().count() > AUTHOR_FIELD_MAX_LEN {
            return Err(StoreError::ConstraintViolation(format!("invalid username length: {}", username)));
        }
        if name.chars().count() > AUTHOR_FIELD_MAX_LEN {
            return Err(StoreError::ConstraintViolation(format!("invalid name length: {}", name)));
        }

        let mut inner = self.inner.write().await;
        if inner.authors.iter().any(|a| a.username == username) {
            return Err(StoreError::ConstraintViolation(format!("username already taken: {}", username)));
        }

        let author = Author {
            id: AuthorId(inner.next_author_id),
            username: username.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            is_superuser,
        };
        inner.next_author_id += 1;
        inner.authors.push(author.clone());
        Ok(author)
    }

    pub async fn story_count(&self) -> usize {
        self.inner.read().await.stories.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn create_story(&self, story: NewStory) -> StoreResult<StoryId> {
        let mut inner = self.inner.write().await;
        if !inner.authors.iter().any(|a| a.id == story.author_id) {
            return Err(StoreError::ConstraintViolation(format!("author {} does not exist", story.author_id)));
        }

        let id = StoryId(inner.next_story_id);
        inner.next_story_id += 1;
        inner.stories.push(NewsStory {
            id,
            headline: story.headline,
            category: story.category,
            region: story.region,
            author_id: story.author_id,
            creation_date: story.creation_date.unwrap_or_else(server_today),
            details: story.details,
        });
        debug!("Stored story {}", id);
        Ok(id)
    }

    async fn get_story(&self, id: StoryId) -> StoreResult<NewsStory> {
        self.inner
            .read()
            .await
            .stories
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("story {}", id)))
    }

    async fn list_stories(&self) -> StoreResult<Vec<NewsStory>> {
        Ok(self.inner.read().await.stories.clone())
    }

    async fn delete_story(&self, story: &NewsStory) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let position = inner
            .stories
            .iter()
            .position(|s| s.id == story.id)
            .ok_or_else(|| StoreError::NotFound(format!("story {}", story.id)))?;
        inner.stories.remove(position);
        Ok(())
    }

    async fn get_author(&self, id: AuthorId) -> StoreResult<Author> {
        self.inner
            .read()
            .await
            .authors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("author {}", id)))
    }

    async fn find_author_by_username(&self, username: &str) -> StoreResult<Option<Author>> {
        Ok(self.inner.read().await.authors.iter().find(|a| a.username == username).cloned())
    }
}
