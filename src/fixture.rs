//! YAML seed data for the in-memory store.
//!
//! ```yaml
//! authors:
//!   - username: ada
//!     name: Ada Lovelace
//!     password: engine
//!     superuser: false
//! stories:
//!   - headline: Analytical engine unveiled
//!     category: tech
//!     region: uk
//!     details: A general purpose computing machine.
//!     author: ada
//!     date: 01/06/2020
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::auth::hash_password;
use crate::database::models::{AuthorId, NewStory};
use crate::database::{DataStore, MemoryStore, StoreError};
use crate::validation::{parse_story_date, PublishStoryCommand, RawPayload};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to hash password for {username}: {message}")]
    Hash { username: String, message: String },

    #[error("Story {index}: {message}")]
    InvalidStory { index: usize, message: String },

    #[error("Store rejected fixture: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorFixture {
    pub username: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub superuser: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoryFixture {
    pub headline: String,
    pub category: String,
    pub region: String,
    pub details: String,
    /// Username of an author declared in the same file
    pub author: String,
    /// `DD/MM/YYYY`; defaults to the load date
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub authors: Vec<AuthorFixture>,
    #[serde(default)]
    pub stories: Vec<StoryFixture>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub authors: usize,
    pub stories: usize,
}

impl FixtureFile {
    pub fn from_yaml(source: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Insert authors first, then stories in file order. Stories are checked
    /// with the same rules as a published story.
    pub async fn apply(&self, store: &MemoryStore) -> Result<FixtureSummary, FixtureError> {
        let mut usernames: HashMap<&str, AuthorId> = HashMap::new();

        for author in &self.authors {
            let hash = hash_password(&author.password).map_err(|e| FixtureError::Hash {
                username: author.username.clone(),
                message: e.to_string(),
            })?;
            let stored = store
                .insert_author(&author.username, &author.name, &hash, author.superuser)
                .await?;
            usernames.insert(author.username.as_str(), stored.id);
        }

        for (index, story) in self.stories.iter().enumerate() {
            let invalid = |message: String| FixtureError::InvalidStory { index, message };

            let author_id = *usernames
                .get(story.author.as_str())
                .ok_or_else(|| invalid(format!("unknown author {}", story.author)))?;

            let creation_date = match story.date.as_deref() {
                Some(raw) => Some(parse_story_date(raw).ok_or_else(|| invalid(format!("invalid date {}", raw)))?),
                None => None,
            };

            let payload: RawPayload = [
                ("headline", &story.headline),
                ("category", &story.category),
                ("region", &story.region),
                ("details", &story.details),
            ]
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.clone())))
            .collect();
            let command = PublishStoryCommand::parse(&payload).map_err(|e| invalid(e.message().to_string()))?;

            store
                .create_story(NewStory {
                    headline: command.headline,
                    category: command.category,
                    region: command.region,
                    author_id,
                    details: command.details,
                    creation_date,
                })
                .await?;
        }

        let summary = FixtureSummary {
            authors: self.authors.len(),
            stories: self.stories.len(),
        };
        info!("Loaded {} authors and {} stories from fixtures", summary.authors, summary.stories);
        Ok(summary)
    }
}

pub fn load_fixtures(path: &Path) -> Result<FixtureFile, FixtureError> {
    let source = std::fs::read_to_string(path)?;
    FixtureFile::from_yaml(&source)
}
