use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum length of both `username` and `name`
pub const AUTHOR_FIELD_MAX_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered author. `password_hash` is an argon2 PHC string and is never
/// serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_superuser: bool,
}

/// Row shape of the `authors` table
#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub is_superuser: bool,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: AuthorId(row.id),
            username: row.username,
            name: row.name,
            password_hash: row.password_hash,
            is_superuser: row.is_superuser,
        }
    }
}
