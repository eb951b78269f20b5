#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, Response};

use news_agency_api::auth::hash_password;
use news_agency_api::config::AppConfig;
use news_agency_api::database::models::{Author, Category, NewStory, Region, StoryId};
use news_agency_api::database::{DataStore, MemoryStore};
use news_agency_api::{app, AppState};

pub const PASSWORD: &str = "password";

// Hashing is the slow part of seeding; every test author shares one hash
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).expect("hash test password"))
}

/// A server bound to a free local port, backed by an in-memory store the test
/// can seed directly. Lives as long as the test's runtime.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());

        let mut security = AppConfig::development().security;
        security.enable_cors = false;
        let state = AppState::new(store.clone(), security);

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn add_author(&self, username: &str, name: &str, superuser: bool) -> Result<Author> {
        Ok(self.store.insert_author(username, name, password_hash(), superuser).await?)
    }

    pub async fn add_story(
        &self,
        author: &Author,
        headline: &str,
        category: Category,
        region: Region,
        date: Option<NaiveDate>,
    ) -> Result<StoryId> {
        let id = self
            .store
            .create_story(NewStory {
                headline: headline.to_string(),
                category,
                region,
                author_id: author.id,
                details: format!("{} details", headline),
                creation_date: date,
            })
            .await?;
        Ok(id)
    }

    pub async fn login(&self, client: &Client, username: &str) -> Result<Response> {
        Ok(client
            .post(self.url("/api/login/"))
            .form(&[("username", username), ("password", PASSWORD)])
            .send()
            .await?)
    }

    /// New cookie-keeping client already logged in as `username`
    pub async fn session(&self, username: &str) -> Result<Client> {
        let client = client()?;
        let res = self.login(&client, username).await?;
        anyhow::ensure!(res.status().is_success(), "login as {} failed: {}", username, res.status());
        Ok(client)
    }
}

pub fn client() -> Result<Client> {
    Ok(Client::builder().cookie_store(true).build()?)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
