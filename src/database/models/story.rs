use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use super::author::AuthorId;

pub const HEADLINE_MAX_LEN: usize = 64;
pub const DETAILS_MAX_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub i64);

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value outside one of the closed story enumerations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value} is not a valid {kind}")]
pub struct InvalidEnum {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pol,
    Art,
    Tech,
    Trivia,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Pol, Category::Art, Category::Tech, Category::Trivia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pol => "pol",
            Category::Art => "art",
            Category::Tech => "tech",
            Category::Trivia => "trivia",
        }
    }
}

impl FromStr for Category {
    type Err = InvalidEnum;

    /// Exact match against the stored codes; callers normalize first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidEnum { kind: "category", value: s.to_string() })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "uk")]
    Uk,
    #[serde(rename = "eu")]
    Eu,
    #[serde(rename = "w")]
    World,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Uk, Region::Eu, Region::World];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::Eu => "eu",
            Region::World => "w",
        }
    }
}

impl FromStr for Region {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| InvalidEnum { kind: "region", value: s.to_string() })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published story as held by the data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsStory {
    pub id: StoryId,
    pub headline: String,
    pub category: Category,
    pub region: Region,
    pub author_id: AuthorId,
    pub creation_date: NaiveDate,
    pub details: String,
}

/// Insert payload for a story. The store assigns `id`, and `creation_date`
/// when it is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    pub headline: String,
    pub category: Category,
    pub region: Region,
    pub author_id: AuthorId,
    pub details: String,
    pub creation_date: Option<NaiveDate>,
}

/// Row shape of the `news_stories` table
#[derive(Debug, Clone, FromRow)]
pub struct StoryRow {
    pub id: i64,
    pub headline: String,
    pub category: String,
    pub region: String,
    pub author_id: i64,
    pub creation_date: NaiveDate,
    pub details: String,
}

impl TryFrom<StoryRow> for NewsStory {
    type Error = InvalidEnum;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StoryId(row.id),
            headline: row.headline,
            category: row.category.parse()?,
            region: row.region.parse()?,
            author_id: AuthorId(row.author_id),
            creation_date: row.creation_date,
            details: row.details,
        })
    }
}
