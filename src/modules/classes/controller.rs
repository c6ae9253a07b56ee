use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{
    BulkDeleteResponse, BulkIdsDto, Class, ClassFilterParams, ClassOption, CreateClassDto,
    PaginatedClassesResponse, UpdateClassDto,
};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 400, description = "Duplicate class name"),
        (status = 422, description = "Validation failure")
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = ClassService::create_class(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    get,
    path = "/api/classes",
    params(ClassFilterParams),
    responses(
        (status = 200, description = "Paginated list of classes", body = PaginatedClassesResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    Query(filters): Query<ClassFilterParams>,
) -> Result<Json<PaginatedClassesResponse>, AppError> {
    let classes = ClassService::get_classes(&state.db, filters).await?;

    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/classes/options",
    responses(
        (status = 200, description = "Class options for dropdowns", body = Vec<ClassOption>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassOption>>, AppError> {
    let options = ClassService::get_class_options(&state.db).await?;

    Ok(Json(options))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::get_class_by_id(&state.db, id).await?;

    Ok(Json(class))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 400, description = "Duplicate class name"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::update_class(&state.db, id, dto).await?;

    Ok(Json(class))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ClassService::delete_class(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/classes/bulk-delete",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Selected classes deleted", body = BulkDeleteResponse),
        (status = 422, description = "Empty selection")
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn bulk_delete_classes(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let deleted_count = ClassService::bulk_delete_classes(&state.db, &dto.ids).await?;

    Ok(Json(BulkDeleteResponse { deleted_count }))
}
