mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use news_agency_api::database::models::{Category, Region};

use common::{client, TestServer};

#[tokio::test]
async fn owner_deletes_own_story() -> Result<()> {
    let server = TestServer::spawn().await?;
    let ada = server.add_author("ada", "Ada", false).await?;
    let id = server.add_story(&ada, "mine", Category::Tech, Region::Uk, None).await?;
    let session = server.session("ada").await?;

    let res = session
        .post(server.url("/api/deletestory/"))
        .json(&json!({"story_key": id.0}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await?, "News story successfully deleted");
    assert_eq!(server.store.story_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_delete() -> Result<()> {
    let server = TestServer::spawn().await?;
    let ada = server.add_author("ada", "Ada", false).await?;
    server.add_author("bob", "Bob", false).await?;
    let id = server.add_story(&ada, "mine", Category::Tech, Region::Uk, None).await?;
    let session = server.session("bob").await?;

    let res = session
        .post(server.url("/api/deletestory/"))
        .json(&json!({"story_key": id.0}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.text().await?,
        format!("Could not delete story with key {}; you are not the valid owner", id.0)
    );
    assert_eq!(server.store.story_count().await, 1);

    Ok(())
}

#[tokio::test]
async fn superuser_deletes_any_story() -> Result<()> {
    let server = TestServer::spawn().await?;
    let ada = server.add_author("ada", "Ada", false).await?;
    server.add_author("root", "Root", true).await?;
    let id = server.add_story(&ada, "mine", Category::Tech, Region::Uk, None).await?;
    let session = server.session("root").await?;

    let res = session
        .post(server.url("/api/deletestory/"))
        .json(&json!({"story_key": id.0.to_string()}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(server.store.story_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn delete_validates_key_and_existence() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;
    let session = server.session("ada").await?;

    let cases = [
        (json!({}), "Resource must accept a story key to delete".to_string()),
        (json!({"story_key": "seven"}), "Story key must be in Integer format".to_string()),
        (json!({"story_key": 99}), "News Story with key 99 does not exist".to_string()),
    ];
    for (body, expected) in cases {
        let res = session.post(server.url("/api/deletestory/")).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(res.text().await?, expected);
    }

    Ok(())
}

#[tokio::test]
async fn delete_requires_session_then_post() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;

    let res = client()?.post(server.url("/api/deletestory/")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await?, "User must be logged in to delete a news story");

    let session = server.session("ada").await?;
    let res = session.get(server.url("/api/deletestory/")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.text().await?, "Resource only expects POST requests");

    Ok(())
}
