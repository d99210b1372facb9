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

async fn create_named(
    server: &common::TestServer,
    token: &str,
    path: &str,
    name: &str,
) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}{}", server.base_url, path))
        .bearer_auth(token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create {} failed", path);
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn list_with_items_flow() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "list-flow").await?;

    let list_id = create_named(server, &token, "/api/lists", "Groceries").await?;
    let milk_id = create_named(server, &token, "/api/items", "Milk").await?;
    let bread_id = create_named(server, &token, "/api/items", "Bread").await?;

    // Attach both items to the list
    let res = client
        .post(format!("{}/api/list-items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "quantity": 2,
            "completed": false,
            "listId": list_id,
            "itemId": milk_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let list_item_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["quantity"], 2);

    let res = client
        .post(format!("{}/api/list-items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "quantity": 1,
            "completed": true,
            "listId": list_id,
            "itemId": bread_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The list reports both associations
    let res = client
        .get(format!("{}/api/lists/{}/item-count", server.base_url, list_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"], 2);

    // Searching the list's entries by item name narrows to one
    let res = client
        .get(format!(
            "{}/api/lists/{}/items?search=milk",
            server.base_url, list_id
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["itemId"], json!(milk_id));

    // Toggle completion and bump quantity on the milk entry
    let res = client
        .patch(format!("{}/api/list-items/{}", server.base_url, list_item_id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 3, "completed": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["quantity"], 3);
    assert_eq!(body["data"]["completed"], true);

    // Detach milk, count drops to one
    let res = client
        .delete(format!("{}/api/list-items/{}", server.base_url, list_item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/lists/{}/item-count", server.base_url, list_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"], 1);

    Ok(())
}

#[tokio::test]
async fn deleting_list_cascades_to_entries() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "cascade").await?;

    let list_id = create_named(server, &token, "/api/lists", "Doomed list").await?;
    let item_id = create_named(server, &token, "/api/items", "Survivor").await?;

    let res = client
        .post(format!("{}/api/list-items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "quantity": 1,
            "completed": false,
            "listId": list_id,
            "itemId": item_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let entry_id = body["data"]["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!("{}/api/lists/{}", server.base_url, list_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // The entry went with the list, the item itself survives
    let res = client
        .get(format!("{}/api/list-items/{}", server.base_url, entry_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn deleting_referenced_item_is_rejected() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "restrict").await?;

    let list_id = create_named(server, &token, "/api/lists", "Holding list").await?;
    let item_id = create_named(server, &token, "/api/items", "Pinned item").await?;

    let res = client
        .post(format!("{}/api/list-items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "quantity": 1,
            "completed": false,
            "listId": list_id,
            "itemId": item_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Item is still referenced by a list entry
    let res = client
        .delete(format!("{}/api/items/{}", server.base_url, item_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn negative_quantity_is_rejected() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = signup(server, "neg-qty").await?;

    let list_id = create_named(server, &token, "/api/lists", "Sane list").await?;
    let item_id = create_named(server, &token, "/api/items", "Sane item").await?;

    let res = client
        .post(format!("{}/api/list-items", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "quantity": -1,
            "completed": false,
            "listId": list_id,
            "itemId": item_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
