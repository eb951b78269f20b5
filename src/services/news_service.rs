use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;
use tracing::{error, info, warn};

use crate::api::format::{story_to_view, StoriesResponse};
use crate::auth::AuthService;
use crate::database::models::{Author, AuthorId, NewStory, StoryId};
use crate::database::{DataStore, StoreError};
use crate::error::{ApiError, AuthError, Resource};
use crate::filter::StoryFilter;
use crate::guard::{require_authenticated, require_owner_or_elevated, require_unauthenticated, RequestContext};
use crate::validation::payload::{parse_json_object, parse_utf8_json_object, JSON_ONLY, UTF8_JSON_ONLY};
use crate::validation::{server_today, DeleteStoryCommand, ListStoriesCommand, LoginCommand, PublishStoryCommand};

pub const LOGIN_METHOD_ONLY: &str = "This resource only expects POST requests with accompanying username and password";
pub const POST_ONLY: &str = "Resource only expects POST requests";
pub const GET_ONLY: &str = "Resource only expects GET requests";

pub const NOT_LOGGED_IN: &str = "User is not logged in";
pub const LOGIN_TO_POST: &str = "User must be logged in to add a news story";
pub const LOGIN_TO_DELETE: &str = "User must be logged in to delete a news story";

pub const LOGIN_FAILED: &str = "Failed to login user";
pub const LOGOUT_FAILED: &str = "Failed to log user out";
pub const STORY_NOT_STORED: &str = "Unable to add story to database";
pub const NO_MATCHING_STORIES: &str = "No news stories with those search fields were returned";

pub const LOGGED_OUT: &str = "User successfully logged out";
pub const STORY_ADDED: &str = "News story successfully added to account";
pub const STORY_DELETED: &str = "News story successfully deleted";

/// Successful login: the greeting plus the token of the freshly bound session
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub message: String,
    pub session_token: String,
}

fn require_method(method: &Method, expected: Method, message: &str) -> Result<(), ApiError> {
    if *method == expected {
        Ok(())
    } else {
        Err(ApiError::method_not_allowed(message))
    }
}

/// The five request handlers. Each call runs one request to a single terminal
/// outcome; preconditions are checked in a fixed order so the first failing one
/// decides the error.
#[derive(Clone)]
pub struct NewsService {
    store: Arc<dyn DataStore>,
    auth: Arc<dyn AuthService>,
}

impl NewsService {
    pub fn new(store: Arc<dyn DataStore>, auth: Arc<dyn AuthService>) -> Self {
        Self { store, auth }
    }

    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.auth
    }

    /// Anonymous only, then POST, then form fields, then credentials
    pub async fn login(&self, ctx: &RequestContext, method: &Method, body: &[u8]) -> Result<LoginOutcome, ApiError> {
        require_unauthenticated(ctx)?;
        require_method(method, Method::POST, LOGIN_METHOD_ONLY)?;

        let command = LoginCommand::parse_form(body)?;

        let author = self
            .auth
            .verify(&command.username, &command.password)
            .await
            .map_err(|e| {
                error!("Credential check failed for {}: {}", command.username, e);
                ApiError::internal_server_error(LOGIN_FAILED)
            })?
            .ok_or_else(|| {
                warn!("Rejected credentials for username {}", command.username);
                AuthError::invalid_credentials(format!("Could not return user with username ({})", command.username))
            })?;

        let session_token = self.auth.bind_session(&author).await.map_err(|e| {
            error!("Could not open session for author {}: {}", author.id, e);
            ApiError::internal_server_error(LOGIN_FAILED)
        })?;

        info!("Author {} logged in", author.id);
        Ok(LoginOutcome {
            message: format!("Welcome, {}, you are logged in", author.name),
            session_token,
        })
    }

    pub async fn logout(&self, ctx: &RequestContext, method: &Method) -> Result<&'static str, ApiError> {
        let identity = require_authenticated(ctx, NOT_LOGGED_IN)?;
        require_method(method, Method::POST, POST_ONLY)?;

        let Some(token) = ctx.session_token.as_deref() else {
            error!("Author {} has no session token to close", identity.author_id);
            return Err(ApiError::internal_server_error(LOGOUT_FAILED));
        };
        self.auth.clear_session(token).await.map_err(|e| {
            error!("Could not close session for author {}: {}", identity.author_id, e);
            ApiError::internal_server_error(LOGOUT_FAILED)
        })?;

        info!("Author {} logged out", identity.author_id);
        Ok(LOGGED_OUT)
    }

    /// The new story is always owned by the caller
    pub async fn publish_story(
        &self,
        ctx: &RequestContext,
        method: &Method,
        body: &[u8],
    ) -> Result<StoryId, ApiError> {
        let identity = require_authenticated(ctx, LOGIN_TO_POST)?;
        require_method(method, Method::POST, POST_ONLY)?;

        let payload = parse_json_object(body, JSON_ONLY)?;
        let command = PublishStoryCommand::parse(&payload)?;

        let id = self
            .store
            .create_story(NewStory {
                headline: command.headline,
                category: command.category,
                region: command.region,
                author_id: identity.author_id,
                details: command.details,
                creation_date: None,
            })
            .await
            .map_err(|e| {
                error!("Failed to store story for author {}: {}", identity.author_id, e);
                ApiError::internal_server_error(STORY_NOT_STORED)
            })?;

        info!("Author {} published story {}", identity.author_id, id);
        Ok(id)
    }

    /// Open to anonymous callers. An empty result is reported as not found.
    pub async fn list_stories(&self, method: &Method, body: &[u8]) -> Result<StoriesResponse, ApiError> {
        require_method(method, Method::GET, GET_ONLY)?;

        let payload = parse_utf8_json_object(body, UTF8_JSON_ONLY)?;
        let query = ListStoriesCommand::parse(&payload, server_today())?;

        let stories = StoryFilter::new(query).apply(self.store.list_stories().await?);
        if stories.is_empty() {
            return Err(ApiError::not_found(Resource::StoryQuery, NO_MATCHING_STORIES));
        }

        let mut authors: HashMap<AuthorId, Author> = HashMap::new();
        let mut views = Vec::with_capacity(stories.len());
        for story in &stories {
            if !authors.contains_key(&story.author_id) {
                let author = self.store.get_author(story.author_id).await?;
                authors.insert(story.author_id, author);
            }
            if let Some(author) = authors.get(&story.author_id) {
                views.push(story_to_view(story, author));
            }
        }

        Ok(StoriesResponse { stories: views })
    }

    /// Only the owner, or an elevated author, may delete
    pub async fn delete_story(&self, ctx: &RequestContext, method: &Method, body: &[u8]) -> Result<&'static str, ApiError> {
        let identity = require_authenticated(ctx, LOGIN_TO_DELETE)?;
        require_method(method, Method::POST, POST_ONLY)?;

        let payload = parse_json_object(body, JSON_ONLY)?;
        let key = DeleteStoryCommand::parse(&payload)?.story_key;

        let story = self.store.get_story(key).await.map_err(|e| match e {
            StoreError::NotFound(_) => {
                ApiError::not_found(Resource::Story, format!("News Story with key {} does not exist", key))
            }
            other => ApiError::from(other),
        })?;

        require_owner_or_elevated(
            &identity,
            story.author_id,
            format!("story {}", key),
            format!("Could not delete story with key {}; you are not the valid owner", key),
        )?;

        self.store.delete_story(&story).await.map_err(|e| match e {
            StoreError::NotFound(_) => {
                ApiError::not_found(Resource::Story, format!("News Story with key {} does not exist", key))
            }
            other => {
                error!("Failed to delete story {}: {}", key, other);
                ApiError::internal_server_error(format!("Failed to delete story with key {}", key))
            }
        })?;

        info!("Author {} deleted story {}", identity.author_id, key);
        Ok(STORY_DELETED)
    }

    pub async fn health(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }
}
