mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn signup(server: &common::TestServer, prefix: &str) -> Result<(String, String)> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/auth/signup", server.base_url))
        .json(&json!({
            "email": common::unique_email(prefix),
            "password": "Abc123!cd",
            "fullName": format!("{} Tester", prefix)
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "signup failed");
    let body = res.json::<serde_json::Value>().await?;
    Ok((
        body["data"]["token"].as_str().unwrap().to_string(),
        body["data"]["user"]["id"].as_str().unwrap().to_string(),
    ))
}

#[tokio::test]
async fn plain_users_cannot_administer() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, user_id) = signup(server, "plain").await?;
    let (_, target_id) = signup(server, "target").await?;

    // Listing users needs admin or superUser
    let res = client
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Mutations and association reads need admin, even against yourself
    let res = client
        .patch(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "fullName": "Sneaky Rename" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/api/users/{}/block", server.base_url, target_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/api/users/{}/items", server.base_url, target_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn role_gate_runs_before_roles_filter_parsing() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _) = signup(server, "roles-q").await?;

    // The role gate runs before the filter is parsed, so a plain user sees
    // the 403 even with a bogus role name
    let res = client
        .get(format!("{}/api/users?roles=wizard", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}
