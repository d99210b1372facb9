mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn signup(server: &common::TestServer, prefix: &str) -> Result<String> {
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
    Ok(body["data"]["token"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn item_crud_round_trip() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "item-crud").await?;

    // Create
    let res = client
        .post(format!("{}/api/items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Oat milk" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["name"], "Oat milk");

    // Read back
    let res = client
        .get(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Update
    let res = client
        .patch(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Soy milk" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["name"], "Soy milk");

    // List with search should find it
    let res = client
        .get(format!("{}/api/items?search=soy", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"Soy milk".to_string()));

    // Remove returns the deleted item, then reads 404
    let res = client
        .delete(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["name"], "Soy milk");

    let res = client
        .get(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn items_are_owner_scoped() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner_token = signup(server, "owner").await?;
    let other_token = signup(server, "other").await?;

    let res = client
        .post(format!("{}/api/items", server.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({ "name": "Private thing" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    // Another user cannot see, update, or delete it; absence and
    // out-of-scope are indistinguishable
    for res in [
        client
            .get(format!("{}/api/items/{}", server.base_url, item_id))
            .bearer_auth(&other_token)
            .send()
            .await?,
        client
            .patch(format!("{}/api/items/{}", server.base_url, item_id))
            .bearer_auth(&other_token)
            .json(&json!({ "name": "hijacked" }))
            .send()
            .await?,
        client
            .delete(format!("{}/api/items/{}", server.base_url, item_id))
            .bearer_auth(&other_token)
            .send()
            .await?,
    ] {
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    // Listing as the other user never includes it
    let res = client
        .get(format!("{}/api/items", server.base_url))
        .bearer_auth(&other_token)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["id"] != json!(item_id)));

    Ok(())
}

#[tokio::test]
async fn item_validation_rejects_blank_name() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "blank-item").await?;

    let res = client
        .post(format!("{}/api/items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "   " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
