//! Integration tests for the `/api/v1/memories` endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use common::{body_json, create_memory, delete, expect_json, get, post_json, put_json, send};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_memory_with_nested_location(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/memories", common::beach_day()).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    let memory = &json["data"];
    assert!(memory["id"].as_i64().unwrap() > 0);
    assert_eq!(memory["title"], "Beach Day");
    assert_eq!(memory["date"], "2023-04-22");
    assert_eq!(memory["location"]["name"], "Malibu Beach");
    assert_eq!(memory["location"]["latitude"], 34.0259);
    assert_eq!(memory["location"]["longitude"], -118.7798);
    assert!(memory["location"]["id"].as_i64().unwrap() > 0);
    assert_eq!(memory["locationId"], memory["location"]["id"]);
    assert_eq!(memory["mediaItems"], json!([]));
    assert!(memory["timelineEvent"].is_null());
    assert!(memory["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_media_and_timeline_event(pool: PgPool) {
    let app = common::build_test_app(pool);
    let memory = create_memory(
        app,
        json!({
            "title": "Anniversary Dinner",
            "description": "Candles and pasta",
            "date": "2023-06-15T19:30:00.000Z",
            "timelineEvent": {"importance": 5},
            "mediaItems": [
                {"url": "https://example.com/1.jpg", "type": "IMAGE", "caption": "Table"},
                {"url": "https://example.com/2.jpg", "type": "IMAGE"},
                {"url": "https://example.com/3.mp4", "type": "VIDEO"}
            ]
        }),
    )
    .await;

    assert_eq!(memory["date"], "2023-06-15");
    assert!(memory["location"].is_null());

    let media = memory["mediaItems"].as_array().unwrap();
    assert_eq!(media.len(), 3);
    assert!(media.iter().all(|m| m["memoryId"] == memory["id"]));
    assert_eq!(
        media.iter().filter(|m| m["type"] == "VIDEO").count(),
        1,
        "media type should round-trip as VIDEO"
    );

    let event = &memory["timelineEvent"];
    assert_eq!(event["importance"], 5);
    assert_eq!(event["title"], "Anniversary Dinner");
    assert_eq!(event["date"], "2023-06-15");
    assert_eq!(event["memoryId"], memory["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_timeline_event_defaults_importance(pool: PgPool) {
    let app = common::build_test_app(pool);
    let memory = create_memory(
        app,
        json!({
            "title": "First Date",
            "date": "2023-01-10",
            "timelineEvent": {"title": "Where it started"}
        }),
    )
    .await;

    assert_eq!(memory["timelineEvent"]["importance"], 3);
    assert_eq!(memory["timelineEvent"]["title"], "Where it started");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_blank_title_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/memories",
        json!({"title": "  ", "date": "2023-01-10"}),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("title"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_out_of_range_importance_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/memories",
        json!({
            "title": "Too important",
            "date": "2023-01-10",
            "timelineEvent": {"importance": 6}
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("timeline_event.importance"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_media_type_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/memories",
        json!({
            "title": "Mixtape",
            "date": "2023-01-10",
            "mediaItems": [{"url": "https://example.com/a.mp3", "type": "AUDIO"}]
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_date_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/memories", json!({"title": "Undated"})).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/memories",
        Body::from("{\"title\": "),
        Some("application/json"),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_empty_returns_empty_data(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = expect_json(get(app, "/api/v1/memories").await, StatusCode::OK).await;
    assert_eq!(json, json!({"data": []}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_by_date_descending(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (title, date) in [
        ("Middle", "2023-03-01"),
        ("Oldest", "2022-12-24"),
        ("Newest", "2023-08-30"),
    ] {
        create_memory(app.clone(), json!({"title": title, "date": date})).await;
    }

    let json = expect_json(get(app, "/api/v1/memories").await, StatusCode::OK).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_timeline_only_filters_memories(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_memory(
        app.clone(),
        json!({"title": "Plain", "date": "2023-05-01"}),
    )
    .await;
    create_memory(
        app.clone(),
        json!({"title": "Milestone A", "date": "2023-02-01", "timelineEvent": {}}),
    )
    .await;
    create_memory(
        app.clone(),
        json!({"title": "Milestone B", "date": "2023-09-01", "timelineEvent": {"importance": 4}}),
    )
    .await;

    let json = expect_json(
        get(app.clone(), "/api/v1/memories?timelineOnly=true").await,
        StatusCode::OK,
    )
    .await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Milestone B");
    assert_eq!(data[1]["title"], "Milestone A");
    assert!(data.iter().all(|m| !m["timelineEvent"].is_null()));

    let all = expect_json(
        get(app, "/api/v1/memories?timelineOnly=false").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_returns_memory_with_relations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_memory(app.clone(), common::beach_day()).await;
    let id = created["id"].as_i64().unwrap();

    let json = expect_json(
        get(app, &format!("/api/v1/memories/{id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = expect_json(
        get(app, "/api/v1/memories/999999").await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Memory with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_with_non_numeric_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/memories/not-a-number").await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("not-a-number"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_with_non_numeric_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/memories/abc").await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_with_invalid_timeline_flag_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/memories?timelineOnly=yes").await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_scalar_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_memory(app.clone(), common::beach_day()).await;
    let id = created["id"].as_i64().unwrap();

    let json = expect_json(
        put_json(
            app,
            &format!("/api/v1/memories/{id}"),
            json!({"title": "Beach Weekend", "description": "Sunburnt", "date": "2023-04-23"}),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let memory = &json["data"];
    assert_eq!(memory["id"], id);
    assert_eq!(memory["title"], "Beach Weekend");
    assert_eq!(memory["description"], "Sunburnt");
    assert_eq!(memory["date"], "2023-04-23");
    assert_eq!(memory["location"], created["location"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_ignores_relation_keys(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_memory(app.clone(), common::beach_day()).await;
    let id = created["id"].as_i64().unwrap();

    let json = expect_json(
        put_json(
            app,
            &format!("/api/v1/memories/{id}"),
            json!({
                "title": "Renamed",
                "location": {"name": "Elsewhere", "latitude": 0.0, "longitude": 0.0},
                "mediaItems": [{"url": "https://example.com/x.jpg", "type": "IMAGE"}],
                "timelineEvent": {"importance": 5}
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let memory = &json["data"];
    assert_eq!(memory["title"], "Renamed");
    assert_eq!(memory["location"]["name"], "Malibu Beach");
    assert_eq!(memory["mediaItems"], json!([]));
    assert!(memory["timelineEvent"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_only_relation_keys_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_memory(app.clone(), common::beach_day()).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/memories/{id}"),
        json!({"mediaItems": []}),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");

    let response = put_json(app, &format!("/api/v1/memories/{id}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_empty_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_memory(app.clone(), common::beach_day()).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        app,
        Method::PUT,
        &format!("/api/v1/memories/{id}"),
        Body::empty(),
        Some("application/json"),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/memories/424242", json!({"title": "Ghost"})).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_memory_and_children(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = create_memory(
        app.clone(),
        json!({
            "title": "Concert Night",
            "date": "2023-07-08",
            "timelineEvent": {"importance": 4},
            "mediaItems": [
                {"url": "https://example.com/stage.jpg", "type": "IMAGE"},
                {"url": "https://example.com/encore.mp4", "type": "VIDEO"}
            ]
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/memories/{id}")).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json, json!({"success": true}));

    let response = get(app, &format!("/api/v1/memories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (media, events): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM media), (SELECT COUNT(*) FROM timeline_events)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!((media, events), (0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/memories/31337").await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
