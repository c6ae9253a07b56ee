use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{BulkDeleteResponse, BulkIdsDto};
use crate::modules::students::export::{
    self, EXPORT_CONTENT_TYPE, EXPORT_FILENAME,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Duplicate name, email, or phone number"),
        (status = 422, description = "Validation failure or incoherent class/section pair")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Paginated list of students", body = PaginatedStudentsResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let students = StudentService::get_students(&state.db, filters).await?;

    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, id).await?;

    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Duplicate name, email, or phone number"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Incoherent class/section pair")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;

    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/students/bulk-delete",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Selected students deleted", body = BulkDeleteResponse),
        (status = 422, description = "Empty selection")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn bulk_delete_students(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let deleted_count = StudentService::bulk_delete_students(&state.db, &dto.ids).await?;

    Ok(Json(BulkDeleteResponse { deleted_count }))
}

#[utoipa::path(
    post,
    path = "/api/students/export",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Spreadsheet of the selected students",
         content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 404, description = "No matching students"),
        (status = 422, description = "Empty selection")
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn export_students(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<([(header::HeaderName, String); 2], Vec<u8>), AppError> {
    let result = export::export_students(&state.db, &dto.ids).await?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        result.bytes,
    ))
}
