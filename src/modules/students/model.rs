//! Student models and DTOs.
//!
//! Students carry contact attributes and optionally sit in a class and one
//! of that class's sections. Name, email, and phone number are globally
//! unique; the class/section pair must be coherent (checked in the service
//! before persisting).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_optional_uuid;

#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub class_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    /// Joined from `classes.name` for the listing table and the export.
    pub class_name: Option<String>,
    /// Joined from `sections.name` for the listing table and the export.
    pub section_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "phone_number must be between 1 and 30 characters"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    pub class_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

/// Partial update. An omitted `section_id` is kept as-is unless the class
/// changes, in which case the stored section is cleared so a section from
/// the old class can never linger under the new one.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 30, message = "phone_number must be between 1 and 30 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: Option<String>,
    pub class_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

/// Class and section are independent AND-conditions at the query level;
/// only the dropdown options cascade.
#[derive(Deserialize, Debug, IntoParams)]
pub struct StudentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub class_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub section_id: Option<Uuid>,
    /// Substring match across name, email, phone number, and address.
    pub search: Option<String>,
    /// One of `name`, `email`, `phone_number`, `address`, `class_name`,
    /// `section_name`, `created_at`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateStudentDto {
        CreateStudentDto {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone_number: "+1-555-0100".to_string(),
            address: "12 Elm Street".to_string(),
            class_id: None,
            section_id: None,
        }
    }

    #[test]
    fn test_create_student_dto_valid() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_invalid_email() {
        let mut dto = valid_create();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_empty_address() {
        let mut dto = valid_create();
        dto.address = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_empty_phone() {
        let mut dto = valid_create();
        dto.phone_number = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_student_dto_empty_is_valid() {
        let dto = UpdateStudentDto {
            name: None,
            email: None,
            phone_number: None,
            address: None,
            class_id: None,
            section_id: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_student_dto_invalid_email() {
        let dto = UpdateStudentDto {
            name: None,
            email: Some("bad".to_string()),
            phone_number: None,
            address: None,
            class_id: None,
            section_id: None,
        };
        assert!(dto.validate().is_err());
    }
}
