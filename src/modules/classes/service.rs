use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{
    Class, ClassFilterParams, ClassOption, CreateClassDto, PaginatedClassesResponse,
    UpdateClassDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const CLASS_COLUMNS: &str = "id, name, created_at, updated_at";

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("name") => "name",
        _ => "created_at",
    }
}

fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some("asc") => "ASC",
        Some("desc") => "DESC",
        // Name sorting reads naturally ascending, recency descending.
        _ => "DESC",
    }
}

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        // Friendly pre-check; the partial unique index is the backstop.
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE name = $1 AND deleted_at IS NULL)",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A class named {} already exists",
                dto.name
            )));
        }

        let class = sqlx::query_as::<_, Class>(&format!(
            "INSERT INTO classes (name) VALUES ($1) RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A class named {} already exists",
                    dto.name
                ));
            }
            AppError::from(e)
        })?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_classes(
        db: &PgPool,
        filters: ClassFilterParams,
    ) -> Result<PaginatedClassesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE deleted_at IS NULL");
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{}%", search));
            where_clause.push_str(&format!(" AND name ILIKE ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM classes{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {CLASS_COLUMNS} FROM classes{where_clause} ORDER BY {} {} LIMIT {} OFFSET {}",
            sort_column(filters.sort_by.as_deref()),
            sort_direction(filters.sort_order.as_deref()),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Class>(&data_query);
        for param in &params {
            data_sql = data_sql.bind(param);
        }
        let classes = data_sql.fetch_all(db).await?;

        Ok(PaginatedClassesResponse {
            data: classes,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    /// Options mapping (id → name) for the class dropdowns, ordered by name.
    #[instrument(skip(db))]
    pub async fn get_class_options(db: &PgPool) -> Result<Vec<ClassOption>, AppError> {
        let options = sqlx::query_as::<_, ClassOption>(
            "SELECT id, name FROM classes WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        Ok(options)
    }

    #[instrument(skip(db))]
    pub async fn get_class_by_id(db: &PgPool, id: Uuid) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn update_class(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class_by_id(db, id).await?;
        let name = dto.name.unwrap_or(existing.name);

        // Uniqueness must ignore the record being edited.
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE name = $1 AND id <> $2 AND deleted_at IS NULL)",
        )
        .bind(&name)
        .bind(id)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A class named {} already exists",
                name
            )));
        }

        let class = sqlx::query_as::<_, Class>(&format!(
            "UPDATE classes SET name = $1, updated_at = NOW()
             WHERE id = $2 AND deleted_at IS NULL
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&name)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A class named {} already exists",
                    name
                ));
            }
            AppError::from(e)
        })?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE classes SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn bulk_delete_classes(db: &PgPool, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE classes SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }
}
