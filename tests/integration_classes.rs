mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_class, generate_unique_class_name, get_json, post_json, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let name = generate_unique_class_name();

    let (status, body) = post_json(app, "/api/classes", json!({ "name": name })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], name.as_str());
    assert!(body["id"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_duplicate_name(pool: PgPool) {
    let name = generate_unique_class_name();
    create_test_class(&pool, &name).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(app, "/api/classes", json!({ "name": name })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_empty_name_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = post_json(app, "/api/classes", json!({ "name": "" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_classes_with_search(pool: PgPool) {
    create_test_class(&pool, "Morning Batch").await;
    create_test_class(&pool, "Evening Batch").await;
    create_test_class(&pool, "Weekend Group").await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = get_json(app, "/api/classes?search=batch").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_options_sorted_by_name(pool: PgPool) {
    create_test_class(&pool, "Zeta Class").await;
    create_test_class(&pool, "Alpha Class").await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = get_json(app, "/api/classes/options").await;

    assert_eq!(status, StatusCode::OK);
    let options = body.as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0]["name"], "Alpha Class");
    assert_eq!(options[1]["name"], "Zeta Class");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_class_by_id_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = get_json(app, &format!("/api/classes/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_class(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/classes/{}", class.id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": "Renamed Class" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_class_then_gone(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/classes/{}", class.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = get_json(app, &format!("/api/classes/{}", class.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_delete_classes(pool: PgPool) {
    let a = create_test_class(&pool, &generate_unique_class_name()).await;
    let b = create_test_class(&pool, &generate_unique_class_name()).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(
        app,
        "/api/classes/bulk-delete",
        json!({ "ids": [a.id, b.id] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_delete_empty_selection_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = post_json(app, "/api/classes/bulk-delete", json!({ "ids": [] })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
