use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

pub(super) const STUDENT_SELECT: &str =
    "SELECT st.id, st.name, st.email, st.phone_number, st.address, \
     st.class_id, st.section_id, c.name AS class_name, se.name AS section_name, \
     st.created_at, st.updated_at \
     FROM students st \
     LEFT JOIN classes c ON c.id = st.class_id \
     LEFT JOIN sections se ON se.id = st.section_id";

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("name") => "st.name",
        Some("email") => "st.email",
        Some("phone_number") => "st.phone_number",
        Some("address") => "st.address",
        Some("class_name") => "c.name",
        Some("section_name") => "se.name",
        _ => "st.created_at",
    }
}

fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some("asc") => "ASC",
        Some("desc") => "DESC",
        _ => "DESC",
    }
}

pub struct StudentService;

impl StudentService {
    /// Field-by-field global uniqueness pre-check, so the response can name
    /// the offending field. The partial unique indexes stay the source of
    /// truth when two submissions race past this.
    async fn ensure_unique_fields(
        db: &PgPool,
        name: &str,
        email: &str,
        phone_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        for (column, value) in [
            ("name", name),
            ("email", email),
            ("phone_number", phone_number),
        ] {
            let taken = sqlx::query_scalar::<_, bool>(&format!(
                "SELECT EXISTS(
                    SELECT 1 FROM students
                    WHERE {column} = $1 AND deleted_at IS NULL
                      AND ($2::uuid IS NULL OR id <> $2)
                 )"
            ))
            .bind(value)
            .bind(exclude_id)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "A student with this {} already exists",
                    column.replace('_', " ")
                )));
            }
        }

        Ok(())
    }

    /// Coherence check before persisting: a section must belong to the
    /// student's class. The original only shaped this through cascading
    /// dropdowns; here it is a hard server-side rule.
    async fn ensure_class_section_coherent(
        db: &PgPool,
        class_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(class_id) = class_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(class_id)
            .fetch_one(db)
            .await?;

            if !exists {
                return Err(AppError::unprocessable(anyhow::anyhow!(
                    "Class does not exist"
                )));
            }
        }

        match (class_id, section_id) {
            (_, None) => Ok(()),
            (None, Some(_)) => Err(AppError::unprocessable(anyhow::anyhow!(
                "A section cannot be assigned without a class"
            ))),
            (Some(class_id), Some(section_id)) => {
                let belongs = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(
                        SELECT 1 FROM sections
                        WHERE id = $1 AND class_id = $2 AND deleted_at IS NULL
                     )",
                )
                .bind(section_id)
                .bind(class_id)
                .fetch_one(db)
                .await?;

                if !belongs {
                    return Err(AppError::unprocessable(anyhow::anyhow!(
                        "Section does not belong to the selected class"
                    )));
                }

                Ok(())
            }
        }
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        Self::ensure_unique_fields(db, &dto.name, &dto.email, &dto.phone_number, None).await?;
        Self::ensure_class_section_coherent(db, dto.class_id, dto.section_id).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO students (name, email, phone_number, address, class_id, section_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(&dto.address)
        .bind(dto.class_id)
        .bind(dto.section_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A student with this name, email, or phone number already exists"
                ));
            }
            AppError::from(e)
        })?;

        Self::get_student_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE st.deleted_at IS NULL");
        let mut idx = 0;

        // The two filter conditions are independent ANDs; no attempt is
        // made to verify that the chosen section belongs to the chosen
        // class at query time.
        if filters.class_id.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND st.class_id = ${idx}"));
        }
        if filters.section_id.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND st.section_id = ${idx}"));
        }
        if filters.search.is_some() {
            idx += 1;
            where_clause.push_str(&format!(
                " AND (st.name ILIKE ${idx} OR st.email ILIKE ${idx} \
                 OR st.phone_number ILIKE ${idx} OR st.address ILIKE ${idx})"
            ));
        }

        let count_query = format!(
            "SELECT COUNT(*) FROM students st \
             LEFT JOIN classes c ON c.id = st.class_id \
             LEFT JOIN sections se ON se.id = st.section_id{where_clause}"
        );
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(class_id) = filters.class_id {
            count_sql = count_sql.bind(class_id);
        }
        if let Some(section_id) = filters.section_id {
            count_sql = count_sql.bind(section_id);
        }
        if let Some(search) = &filters.search {
            count_sql = count_sql.bind(format!("%{search}%"));
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "{STUDENT_SELECT}{where_clause} ORDER BY {} {} LIMIT {} OFFSET {}",
            sort_column(filters.sort_by.as_deref()),
            sort_direction(filters.sort_order.as_deref()),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Student>(&data_query);
        if let Some(class_id) = filters.class_id {
            data_sql = data_sql.bind(class_id);
        }
        if let Some(section_id) = filters.section_id {
            data_sql = data_sql.bind(section_id);
        }
        if let Some(search) = &filters.search {
            data_sql = data_sql.bind(format!("%{search}%"));
        }
        let students = data_sql.fetch_all(db).await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "{STUDENT_SELECT} WHERE st.id = $1 AND st.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let phone_number = dto.phone_number.unwrap_or(existing.phone_number);
        let address = dto.address.unwrap_or(existing.address);

        let class_changed = dto.class_id.is_some() && dto.class_id != existing.class_id;
        let class_id = dto.class_id.or(existing.class_id);

        // Stale-selection rule: a class change without an accompanying
        // section clears the stored section, so the old class's section
        // never survives under the new class.
        let section_id = match dto.section_id {
            Some(section_id) => Some(section_id),
            None if class_changed => None,
            None => existing.section_id,
        };

        Self::ensure_unique_fields(db, &name, &email, &phone_number, Some(id)).await?;
        Self::ensure_class_section_coherent(db, class_id, section_id).await?;

        sqlx::query(
            "UPDATE students
             SET name = $1, email = $2, phone_number = $3, address = $4,
                 class_id = $5, section_id = $6, updated_at = NOW()
             WHERE id = $7 AND deleted_at IS NULL",
        )
        .bind(&name)
        .bind(&email)
        .bind(&phone_number)
        .bind(&address)
        .bind(class_id)
        .bind(section_id)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A student with this name, email, or phone number already exists"
                ));
            }
            AppError::from(e)
        })?;

        Self::get_student_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE students SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn bulk_delete_students(db: &PgPool, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE students SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }
}
