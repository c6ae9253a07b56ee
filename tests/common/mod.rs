use axum::body::Body;
use axum::http::{Request, StatusCode};
use classtrack::config::cors::CorsConfig;
use classtrack::router::init_router;
use classtrack::state::AppState;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestClass {
    pub id: Uuid,
    pub name: String,
}

#[allow(dead_code)]
pub struct TestSection {
    pub id: Uuid,
    pub name: String,
    pub class_id: Uuid,
}

pub async fn create_test_class(pool: &PgPool, name: &str) -> TestClass {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (name) VALUES ($1) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    TestClass {
        id,
        name: name.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_section(pool: &PgPool, name: &str, class_id: Uuid) -> TestSection {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO sections (name, class_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestSection {
        id,
        name: name.to_string(),
        class_id,
    }
}

#[allow(dead_code)]
pub async fn create_test_student(
    pool: &PgPool,
    name: &str,
    class_id: Option<Uuid>,
    section_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (name, email, phone_number, address, class_id, section_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(name)
    .bind(generate_unique_email())
    .bind(generate_unique_phone())
    .bind("1 Test Street")
    .bind(class_id)
    .bind(section_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_phone() -> String {
    format!("+{:015}", Uuid::new_v4().as_u128() % 1_000_000_000_000_000)
}

#[allow(dead_code)]
pub fn generate_unique_class_name() -> String {
    format!("Class {}", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_student_name() -> String {
    format!("Student {}", Uuid::new_v4())
}

/// POST `body` as JSON and return (status, parsed body)
#[allow(dead_code)]
pub async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

/// GET `uri` and return (status, parsed body)
#[allow(dead_code)]
pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}
