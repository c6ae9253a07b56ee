use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{BulkDeleteResponse, BulkIdsDto};
use crate::modules::sections::model::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionFilterParams, SectionOption,
    SectionOptionsParams, UpdateSectionDto,
};
use crate::modules::sections::service::SectionService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/sections",
    request_body = CreateSectionDto,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Duplicate section name within the class"),
        (status = 422, description = "Validation failure or unknown class")
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn create_section(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSectionDto>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    let section = SectionService::create_section(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/sections",
    params(SectionFilterParams),
    responses(
        (status = 200, description = "Paginated list of sections", body = PaginatedSectionsResponse)
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn get_sections(
    State(state): State<AppState>,
    Query(filters): Query<SectionFilterParams>,
) -> Result<Json<PaginatedSectionsResponse>, AppError> {
    let sections = SectionService::get_sections(&state.db, filters).await?;

    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/api/sections/options",
    params(SectionOptionsParams),
    responses(
        (status = 200, description = "Section options for the chosen class; empty without one", body = Vec<SectionOption>)
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn get_section_options(
    State(state): State<AppState>,
    Query(params): Query<SectionOptionsParams>,
) -> Result<Json<Vec<SectionOption>>, AppError> {
    let options = SectionService::get_section_options(&state.db, params.class_id).await?;

    Ok(Json(options))
}

#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section details", body = Section),
        (status = 404, description = "Section not found")
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn get_section_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Section>, AppError> {
    let section = SectionService::get_section_by_id(&state.db, id).await?;

    Ok(Json(section))
}

#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = UpdateSectionDto,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 400, description = "Duplicate section name within the class"),
        (status = 404, description = "Section not found")
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSectionDto>,
) -> Result<Json<Section>, AppError> {
    let section = SectionService::update_section(&state.db, id, dto).await?;

    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 404, description = "Section not found")
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SectionService::delete_section(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/sections/bulk-delete",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Selected sections deleted", body = BulkDeleteResponse),
        (status = 422, description = "Empty selection")
    ),
    tag = "Sections"
)]
#[instrument(skip(state))]
pub async fn bulk_delete_sections(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let deleted_count = SectionService::bulk_delete_sections(&state.db, &dto.ids).await?;

    Ok(Json(BulkDeleteResponse { deleted_count }))
}
