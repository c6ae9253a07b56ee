//! Class models and DTOs.
//!
//! A class ("Class 1", "Class 2", ...) is the top level of the academic
//! hierarchy; sections and students hang off it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Option entry for class dropdowns: the id → name projection.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct ClassOption {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct ClassFilterParams {
    /// Substring match on the class name.
    pub search: Option<String>,
    /// One of `name`, `created_at`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedClassesResponse {
    pub data: Vec<Class>,
    pub meta: PaginationMeta,
}

/// Id set for bulk actions (bulk delete, export).
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct BulkIdsDto {
    #[validate(length(min = 1, message = "at least one id must be selected"))]
    pub ids: Vec<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct BulkDeleteResponse {
    pub deleted_count: u64,
}
