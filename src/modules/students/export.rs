//! Spreadsheet export for student records.
//!
//! Export always re-reads the selected rows from the database rather than
//! trusting any row data a client might send, so the workbook reflects
//! current state even when the listing that drove the selection is stale.

use rust_xlsxwriter::Workbook;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::Student;
use crate::modules::students::service::STUDENT_SELECT;
use crate::utils::errors::AppError;

const EXPORT_COLUMNS: [&str; 6] = [
    "Name",
    "Email",
    "Phone Number",
    "Address",
    "Class",
    "Section",
];

pub const EXPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "students.xlsx";

#[derive(Debug)]
pub struct ExportResult {
    pub bytes: Vec<u8>,
    pub row_count: usize,
}

fn build_workbook(students: &[Student]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| AppError::internal(anyhow::anyhow!(e)))?;
    }

    for (row, student) in students.iter().enumerate() {
        let row = (row + 1) as u32;
        let cells: [&str; 6] = [
            &student.name,
            &student.email,
            &student.phone_number,
            &student.address,
            student.class_name.as_deref().unwrap_or(""),
            student.section_name.as_deref().unwrap_or(""),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(row, col as u16, *value)
                .map_err(|e| AppError::internal(anyhow::anyhow!(e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::internal(anyhow::anyhow!(e)))
}

/// Builds an xlsx workbook for the given student ids. Rows are re-fetched
/// by primary key and ordered by id, so the output order is stable no
/// matter how the ids were collected.
#[instrument(skip(db, ids), fields(requested = ids.len()))]
pub async fn export_students(db: &PgPool, ids: &[Uuid]) -> Result<ExportResult, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "{STUDENT_SELECT} WHERE st.id = ANY($1) AND st.deleted_at IS NULL ORDER BY st.id"
    ))
    .bind(ids)
    .fetch_all(db)
    .await?;

    if students.is_empty() {
        return Err(AppError::not_found(anyhow::anyhow!(
            "No matching students to export"
        )));
    }

    let bytes = build_workbook(&students)?;

    Ok(ExportResult {
        bytes,
        row_count: students.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::students::model::CreateStudentDto;
    use crate::modules::students::service::StudentService;
    use axum::http::StatusCode;

    fn sample_student(name: &str) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone_number: "+1-555-0100".to_string(),
            address: "12 Elm Street".to_string(),
            class_id: None,
            section_id: None,
            class_name: Some("Class 1".to_string()),
            section_name: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_workbook_is_zip_container() {
        let students = vec![sample_student("Ada Lovelace"), sample_student("Alan Turing")];
        let bytes = build_workbook(&students).unwrap();

        // xlsx files are zip archives.
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_workbook_with_no_rows_still_has_headers() {
        let bytes = build_workbook(&[]).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_export_refetches_and_counts(pool: PgPool) {
        let mut ids = Vec::new();
        for tag in ["0001", "0002", "0003"] {
            let student = StudentService::create_student(
                &pool,
                CreateStudentDto {
                    name: format!("Student {tag}"),
                    email: format!("student.{tag}@example.com"),
                    phone_number: format!("+1-555-{tag}"),
                    address: "12 Elm Street".to_string(),
                    class_id: None,
                    section_id: None,
                },
            )
            .await
            .unwrap();
            ids.push(student.id);
        }

        // Soft-deleted rows drop out of the export.
        StudentService::delete_student(&pool, ids[2]).await.unwrap();

        let result = export_students(&pool, &ids).await.unwrap();
        assert_eq!(result.row_count, 2);
        assert!(result.bytes.starts_with(b"PK\x03\x04"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_export_with_no_matches_is_not_found(pool: PgPool) {
        let result = export_students(&pool, &[Uuid::new_v4()]).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
