use axum::{Json, extract::State};
use tracing::instrument;

use crate::modules::navigation::model::{NavigationGroup, NavigationItem, NavigationResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Navigation metadata for the admin frontend. The student count badge is
/// computed per request so it tracks soft deletes.
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Navigation groups and items", body = NavigationResponse)
    ),
    tag = "Navigation"
)]
#[instrument(skip(state))]
pub async fn get_navigation(
    State(state): State<AppState>,
) -> Result<Json<NavigationResponse>, AppError> {
    let student_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM students WHERE deleted_at IS NULL",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(NavigationResponse {
        groups: vec![NavigationGroup {
            label: "Academic Management",
            items: vec![
                NavigationItem {
                    label: "Classes",
                    icon: "heroicon-o-library",
                    path: "/api/classes",
                    badge: None,
                },
                NavigationItem {
                    label: "Sections",
                    icon: "heroicon-o-collection",
                    path: "/api/sections",
                    badge: None,
                },
                NavigationItem {
                    label: "Students",
                    icon: "heroicon-o-academic-cap",
                    path: "/api/students",
                    badge: Some(student_count),
                },
            ],
        }],
    }))
}
