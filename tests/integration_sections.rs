mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_class, create_test_section, generate_unique_class_name, get_json, post_json,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_section(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(
        app,
        "/api/sections",
        json!({ "name": "Section A", "class_id": class.id }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Section A");
    assert_eq!(body["class_name"], class.name.as_str());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_name_allowed_across_classes(pool: PgPool) {
    let class_a = create_test_class(&pool, &generate_unique_class_name()).await;
    let class_b = create_test_class(&pool, &generate_unique_class_name()).await;
    create_test_section(&pool, "Section A", class_a.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = post_json(
        app,
        "/api/sections",
        json!({ "name": "Section A", "class_id": class_b.id }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_name_within_class_rejected(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;
    create_test_section(&pool, "Section A", class.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = post_json(
        app,
        "/api/sections",
        json!({ "name": "Section A", "class_id": class.id }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_section_unknown_class_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = post_json(
        app,
        "/api/sections",
        json!({ "name": "Section A", "class_id": Uuid::new_v4() }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_section_options_scoped_to_class(pool: PgPool) {
    let class_a = create_test_class(&pool, &generate_unique_class_name()).await;
    let class_b = create_test_class(&pool, &generate_unique_class_name()).await;
    create_test_section(&pool, "Section A", class_a.id).await;
    create_test_section(&pool, "Section B", class_a.id).await;
    create_test_section(&pool, "Section A", class_b.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) =
        get_json(app, &format!("/api/sections/options?class_id={}", class_a.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_section_options_without_class_is_empty(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;
    create_test_section(&pool, "Section A", class.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = get_json(app, "/api/sections/options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_sections_includes_class_name(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;
    create_test_section(&pool, "Section A", class.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = get_json(app, "/api/sections").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["class_name"], class.name.as_str());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_section_move_to_other_class(pool: PgPool) {
    let class_a = create_test_class(&pool, &generate_unique_class_name()).await;
    let class_b = create_test_class(&pool, &generate_unique_class_name()).await;
    let section = create_test_section(&pool, "Section A", class_a.id).await;
    create_test_section(&pool, "Section A", class_b.id).await;

    // Moving into class B collides with its existing "Section A".
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/sections/{}", section.id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "class_id": class_b.id }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_delete_sections(pool: PgPool) {
    let class = create_test_class(&pool, &generate_unique_class_name()).await;
    let a = create_test_section(&pool, "Section A", class.id).await;
    let b = create_test_section(&pool, "Section B", class.id).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(
        app,
        "/api/sections/bulk-delete",
        json!({ "ids": [a.id, b.id] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 2);
}
