//! Section models and DTOs.
//!
//! A section ("Section A", "Section B", ...) groups students within one
//! class. Section names only need to be unique inside their class.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_optional_uuid;

#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub class_id: Uuid,
    /// Joined from `classes.name` for the listing table.
    pub class_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Option entry for the cascading section dropdown.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct SectionOption {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateSectionDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    pub class_id: Uuid,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateSectionDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub class_id: Option<Uuid>,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct SectionFilterParams {
    /// Restrict the listing to one class.
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub class_id: Option<Uuid>,
    /// Substring match on the section name.
    pub search: Option<String>,
    /// One of `name`, `class_name`, `created_at`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PaginationParams,
}

/// Query parameters for the cascading options endpoint. No chosen class
/// means no options, deliberately not "all sections".
#[derive(Deserialize, Debug, IntoParams)]
pub struct SectionOptionsParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub class_id: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedSectionsResponse {
    pub data: Vec<Section>,
    pub meta: PaginationMeta,
}
