mod common;

use anyhow::Result;
use reqwest::StatusCode;

use common::{client, TestServer};

#[tokio::test]
async fn login_greets_author_and_sets_cookie() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada Lovelace", false).await?;

    let res = server.login(&client()?, "ada").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("sessionid="), "unexpected cookie: {}", cookie);
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(res.text().await?, "Welcome, Ada Lovelace, you are logged in");

    Ok(())
}

#[tokio::test]
async fn second_login_on_same_session_is_forbidden() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;
    let session = server.session("ada").await?;

    // Identity is checked before the method
    let res = session.get(server.url("/api/login/")).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.text().await?, "User is already logged in");

    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_method_missing_fields_and_bad_credentials() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;
    let client = client()?;

    let res = client.get(server.url("/api/login/")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        res.text().await?,
        "This resource only expects POST requests with accompanying username and password"
    );

    let res = client
        .post(server.url("/api/login/"))
        .form(&[("username", "ada"), ("password", "  ")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "This resource expects valid 'username' and 'password' parameters");

    let res = client
        .post(server.url("/api/login/"))
        .form(&[("username", "ada"), ("password", "wrong")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(res.text().await?, "Could not return user with username (ada)");

    Ok(())
}

#[tokio::test]
async fn logout_ends_session_and_second_logout_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;
    let session = server.session("ada").await?;

    let res = session.post(server.url("/api/logout/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "User successfully logged out");

    let res = session.post(server.url("/api/logout/")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await?, "User is not logged in");

    Ok(())
}

#[tokio::test]
async fn replayed_cookie_after_logout_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.add_author("ada", "Ada", false).await?;

    let res = server.login(&client()?, "ada").await?;
    let cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap_or_default()
        .to_string();

    let bare = reqwest::Client::new();
    let res = bare.post(server.url("/api/logout/")).header("cookie", &cookie).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = bare.post(server.url("/api/logout/")).header("cookie", &cookie).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn logout_without_session_is_unauthorized_even_with_wrong_method() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = client()?.get(server.url("/api/logout/")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn health_and_root_respond() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = client()?;

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");

    let res = client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["endpoints"]["getstories"].is_string());

    Ok(())
}
