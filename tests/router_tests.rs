use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use district_registry::model::{Block, BlockFields, District, DistrictFields, Id};
use district_registry::store::{BlockStore, DistrictStore, StoreError, StoreResult};
use district_registry::{create_router, MemoryStore};

fn app() -> Router {
    create_router::<MemoryStore>().with_state(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

#[tokio::test]
async fn test_district_block_lifecycle() {
    let app = app();

    let (status, body) = post(&app, "/districts", json!({"name": "Alpha"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "District created successfully");
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = post(&app, "/blocks", json!({"name": "A1", "district_id": 1})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Block created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["district_name"], "Alpha");

    let (status, body) = post(&app, "/blocks", json!({"name": "A1", "district_id": 1})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Block with this name already exists in the district");

    let (status, body) = put(&app, "/blocks/1", json!({"population": 500})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Block updated successfully");
    assert_eq!(body["data"]["population"], 500);
    assert_eq!(body["data"]["name"], "A1");
    assert_eq!(body["data"]["district_id"], 1);

    let (status, body) = delete(&app, "/districts/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "message": "District with ID 1 deleted successfully"}));

    // The bundled schema cascades
    let (status, _) = get(&app, "/blocks/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_echoes_fields_and_get_matches() {
    let app = app();

    let (status, created) = post(
        &app,
        "/districts",
        json!({"name": "Beta", "population": 120000, "area": 455.25}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created["data"],
        json!({"id": 1, "name": "Beta", "population": 120000, "area": 455.25, "headquarters": null})
    );

    let (status, fetched) = get(&app, "/districts/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"status": "success", "data": created["data"].clone()}));

    let (_, created) = post(
        &app,
        "/blocks",
        json!({"name": "B1", "district_id": 1, "headquarters": "Riverside"}),
    )
    .await;
    assert_eq!(
        created["data"],
        json!({
            "id": 1,
            "name": "B1",
            "district_id": 1,
            "population": null,
            "headquarters": "Riverside",
            "district_name": "Beta"
        })
    );

    let (_, fetched) = get(&app, "/blocks/1").await;
    assert_eq!(fetched["data"], created["data"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();

    let (status, body) = post(&app, "/districts", json!({"population": 10})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error", "message": "District name is required"}));

    let (status, _) = post(&app, "/districts", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/districts", json!({"name": 42})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, body) = post(&app, "/blocks", json!({"name": "A1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Block name and district_id are required");

    let (status, _) = post(&app, "/blocks", json!({"name": "A1", "district_id": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/districts").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_block_requires_existing_district() {
    let app = app();

    let (status, body) = post(&app, "/blocks", json!({"name": "Orphan", "district_id": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "District with ID 99 not found");

    let (_, body) = get(&app, "/blocks").await;
    assert_eq!(body["results"], 0);

    post(&app, "/districts", json!({"name": "Alpha"})).await;
    post(&app, "/blocks", json!({"name": "A1", "district_id": 1})).await;

    let (status, body) = put(&app, "/blocks/1", json!({"district_id": 7})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "District with ID 7 not found");

    let (_, body) = get(&app, "/blocks/1").await;
    assert_eq!(body["data"]["district_id"], 1);
}

#[tokio::test]
async fn test_duplicate_names_conflict() {
    let app = app();

    post(&app, "/districts", json!({"name": "Alpha"})).await;
    post(&app, "/districts", json!({"name": "Beta"})).await;

    let (status, body) = post(&app, "/districts", json!({"name": "Alpha"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "District with this name already exists");

    let (status, _) = put(&app, "/districts/2", json!({"name": "Alpha"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Block names only need to be unique within a district
    let (status, _) = post(&app, "/blocks", json!({"name": "Central", "district_id": 1})).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post(&app, "/blocks", json!({"name": "Central", "district_id": 2})).await;
    assert_eq!(status, StatusCode::CREATED);

    // Moving a block into a district that already has its name
    let (status, _) = put(&app, "/blocks/2", json!({"district_id": 1})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_without_body_changes_nothing() {
    let app = app();

    let (_, district) = post(&app, "/districts", json!({"name": "Alpha", "population": 5})).await;
    let (_, block) = post(&app, "/blocks", json!({"name": "A1", "district_id": 1, "population": 8})).await;

    // No body and no content type
    let (status, body) = send(&app, Method::PUT, "/districts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "District updated successfully");
    assert_eq!(body["data"], district["data"]);

    let (status, body) = send(&app, Method::PUT, "/blocks/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], block["data"]);

    // Empty body sent as JSON
    let (status, body) = send_raw(&app, Method::PUT, "/districts/1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], district["data"]);

    // Malformed JSON is still rejected
    let (status, body) = send_raw(&app, Method::PUT, "/blocks/1", "{\"name\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    // A missing row wins over a missing body
    let (status, _) = send(&app, Method::PUT, "/districts/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_stores_zero_and_empty_values() {
    let app = app();

    let (status, body) = post(
        &app,
        "/districts",
        json!({"name": "Alpha", "population": 0, "area": 0, "headquarters": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["population"], 0);
    assert_eq!(body["data"]["area"], 0.0);
    assert_eq!(body["data"]["headquarters"], "");

    let (_, body) = post(
        &app,
        "/blocks",
        json!({"name": "A1", "district_id": 1, "population": 0, "headquarters": ""}),
    )
    .await;
    assert_eq!(body["data"]["population"], 0);
    assert_eq!(body["data"]["headquarters"], "");
}

#[tokio::test]
async fn test_update_merges_with_stored_row() {
    let app = app();

    let (_, created) = post(
        &app,
        "/districts",
        json!({"name": "Alpha", "population": 900, "area": 12.5, "headquarters": "Alpha Town"}),
    )
    .await;

    let (status, body) = put(&app, "/districts/1", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "District updated successfully");
    assert_eq!(body["data"], created["data"]);

    let (_, body) = put(&app, "/districts/1", json!({"population": 0})).await;
    assert_eq!(body["data"]["population"], 0);
    assert_eq!(body["data"]["area"], 12.5);
    assert_eq!(body["data"]["headquarters"], "Alpha Town");

    let (_, body) = put(&app, "/districts/1", json!({"headquarters": null, "name": ""})).await;
    assert_eq!(body["data"]["headquarters"], Value::Null);
    assert_eq!(body["data"]["name"], "Alpha");
    assert_eq!(body["data"]["population"], 0);

    post(&app, "/blocks", json!({"name": "A1", "district_id": 1, "population": 30})).await;
    let (_, body) = put(&app, "/blocks/1", json!({"population": null, "name": ""})).await;
    assert_eq!(body["data"]["population"], Value::Null);
    assert_eq!(body["data"]["name"], "A1");
}

#[tokio::test]
async fn test_move_block_between_districts() {
    let app = app();

    post(&app, "/districts", json!({"name": "Alpha"})).await;
    post(&app, "/districts", json!({"name": "Beta"})).await;
    post(&app, "/blocks", json!({"name": "A1", "district_id": 1})).await;

    let (status, body) = put(&app, "/blocks/1", json!({"district_id": 2, "name": "B9"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["district_id"], 2);
    assert_eq!(body["data"]["district_name"], "Beta");
    assert_eq!(body["data"]["name"], "B9");
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let app = app();

    for uri in ["/districts/5", "/districts/5/blocks"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "District with ID 5 not found");
    }

    let (status, _) = delete(&app, "/districts/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put(&app, "/districts/5", json!({"name": "Ghost"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = delete(&app, "/blocks/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Block with ID 3 not found");
    let (status, _) = put(&app, "/blocks/3", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/blocks/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Block with ID abc not found");
}

#[tokio::test]
async fn test_block_listings() {
    let app = app();

    post(&app, "/districts", json!({"name": "Zeta"})).await;
    post(&app, "/districts", json!({"name": "Alpha"})).await;
    post(&app, "/blocks", json!({"name": "Z2", "district_id": 1})).await;
    post(&app, "/blocks", json!({"name": "Z1", "district_id": 1})).await;
    post(&app, "/blocks", json!({"name": "A1", "district_id": 2})).await;

    let (_, body) = get(&app, "/districts").await;
    assert_eq!(body["results"], 2);
    assert_eq!(body["data"][0]["name"], "Alpha");

    let (status, body) = get(&app, "/blocks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], 3);
    let blocks = body["data"].as_array().unwrap();
    for block in blocks {
        let expected = if block["district_id"] == 1 { "Zeta" } else { "Alpha" };
        assert_eq!(block["district_name"], expected);
    }
    let names: Vec<&str> = blocks.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["A1", "Z1", "Z2"]);

    let (status, body) = get(&app, "/districts/1/blocks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["district"]["name"], "Zeta");
    assert_eq!(body["results"], 2);
    assert_eq!(body["data"][0]["name"], "Z1");
    assert!(body["data"][0].get("district_name").is_none());
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

/// Store whose every call fails as if the database were unreachable
struct UnreachableStore;

fn store_down<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait::async_trait]
impl DistrictStore for UnreachableStore {
    async fn list_districts(&self) -> StoreResult<Vec<District>> {
        store_down()
    }
    async fn get_district(&self, _id: Id) -> StoreResult<Option<District>> {
        store_down()
    }
    async fn insert_district(&self, _fields: &DistrictFields) -> StoreResult<Id> {
        store_down()
    }
    async fn update_district(&self, _id: Id, _fields: &DistrictFields) -> StoreResult<u64> {
        store_down()
    }
    async fn delete_district(&self, _id: Id) -> StoreResult<u64> {
        store_down()
    }
    async fn list_blocks_in_district(&self, _district_id: Id) -> StoreResult<Vec<Block>> {
        store_down()
    }
}

#[async_trait::async_trait]
impl BlockStore for UnreachableStore {
    async fn list_blocks(&self) -> StoreResult<Vec<Block>> {
        store_down()
    }
    async fn get_block(&self, _id: Id) -> StoreResult<Option<Block>> {
        store_down()
    }
    async fn find_block(&self, _id: Id) -> StoreResult<Option<Block>> {
        store_down()
    }
    async fn insert_block(&self, _fields: &BlockFields) -> StoreResult<Id> {
        store_down()
    }
    async fn update_block(&self, _id: Id, _fields: &BlockFields) -> StoreResult<u64> {
        store_down()
    }
    async fn delete_block(&self, _id: Id) -> StoreResult<u64> {
        store_down()
    }
}

#[tokio::test]
async fn test_store_failures_hide_cause() {
    let app = create_router::<UnreachableStore>().with_state(Arc::new(UnreachableStore));

    let cases = [
        (Method::GET, "/districts", None, "Error fetching districts"),
        (Method::GET, "/districts/1", None, "Error fetching district"),
        (Method::POST, "/districts", Some(json!({"name": "Alpha"})), "Error creating district"),
        (Method::PUT, "/districts/1", Some(json!({})), "Error updating district"),
        (Method::DELETE, "/districts/1", None, "Error deleting district"),
        (Method::GET, "/districts/1/blocks", None, "Error fetching district blocks"),
        (Method::GET, "/blocks", None, "Error fetching blocks"),
        (Method::GET, "/blocks/1", None, "Error fetching block"),
        (
            Method::POST,
            "/blocks",
            Some(json!({"name": "A1", "district_id": 1})),
            "Error creating block",
        ),
        (Method::PUT, "/blocks/1", Some(json!({})), "Error updating block"),
        (Method::DELETE, "/blocks/1", None, "Error deleting block"),
    ];

    for (method, uri, body, message) in cases {
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, json!({"status": "error", "message": message}));
    }
}
