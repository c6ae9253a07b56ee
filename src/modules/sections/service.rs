use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::sections::model::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionFilterParams, SectionOption,
    UpdateSectionDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const SECTION_SELECT: &str = "SELECT s.id, s.name, s.class_id, c.name AS class_name, \
     s.created_at, s.updated_at \
     FROM sections s \
     JOIN classes c ON c.id = s.class_id";

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("name") => "s.name",
        Some("class_name") => "c.name",
        _ => "s.created_at",
    }
}

fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some("asc") => "ASC",
        Some("desc") => "DESC",
        _ => "DESC",
    }
}

pub struct SectionService;

impl SectionService {
    async fn ensure_class_exists(db: &PgPool, class_id: Uuid) -> Result<(), AppError> {
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

        Ok(())
    }

    /// Scoped uniqueness predicate: a section name is taken only when a live
    /// section with the same name exists under the same class, excluding the
    /// record being edited.
    async fn name_taken_in_class(
        db: &PgPool,
        name: &str,
        class_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM sections
                WHERE name = $1 AND class_id = $2 AND deleted_at IS NULL
                  AND ($3::uuid IS NULL OR id <> $3)
             )",
        )
        .bind(name)
        .bind(class_id)
        .bind(exclude_id)
        .fetch_one(db)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(db))]
    pub async fn create_section(db: &PgPool, dto: CreateSectionDto) -> Result<Section, AppError> {
        Self::ensure_class_exists(db, dto.class_id).await?;

        if Self::name_taken_in_class(db, &dto.name, dto.class_id, None).await? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A section named {} already exists in this class",
                dto.name
            )));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO sections (name, class_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A section named {} already exists in this class",
                    dto.name
                ));
            }
            AppError::from(e)
        })?;

        Self::get_section_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn get_sections(
        db: &PgPool,
        filters: SectionFilterParams,
    ) -> Result<PaginatedSectionsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE s.deleted_at IS NULL");
        let mut idx = 0;

        if filters.class_id.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND s.class_id = ${idx}"));
        }
        if filters.search.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND s.name ILIKE ${idx}"));
        }

        let count_query = format!(
            "SELECT COUNT(*) FROM sections s JOIN classes c ON c.id = s.class_id{where_clause}"
        );
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(class_id) = filters.class_id {
            count_sql = count_sql.bind(class_id);
        }
        if let Some(search) = &filters.search {
            count_sql = count_sql.bind(format!("%{search}%"));
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "{SECTION_SELECT}{where_clause} ORDER BY {} {} LIMIT {} OFFSET {}",
            sort_column(filters.sort_by.as_deref()),
            sort_direction(filters.sort_order.as_deref()),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Section>(&data_query);
        if let Some(class_id) = filters.class_id {
            data_sql = data_sql.bind(class_id);
        }
        if let Some(search) = &filters.search {
            data_sql = data_sql.bind(format!("%{search}%"));
        }
        let sections = data_sql.fetch_all(db).await?;

        Ok(PaginatedSectionsResponse {
            data: sections,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    /// Cascading options: the candidate set for a chosen class, projected to
    /// (id, name). No chosen class yields no options rather than every
    /// section in the system.
    #[instrument(skip(db))]
    pub async fn get_section_options(
        db: &PgPool,
        class_id: Option<Uuid>,
    ) -> Result<Vec<SectionOption>, AppError> {
        let Some(class_id) = class_id else {
            return Ok(Vec::new());
        };

        let options = sqlx::query_as::<_, SectionOption>(
            "SELECT id, name FROM sections
             WHERE class_id = $1 AND deleted_at IS NULL
             ORDER BY name",
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(options)
    }

    #[instrument(skip(db))]
    pub async fn get_section_by_id(db: &PgPool, id: Uuid) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(&format!(
            "{SECTION_SELECT} WHERE s.id = $1 AND s.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Section not found")))?;

        Ok(section)
    }

    #[instrument(skip(db))]
    pub async fn update_section(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSectionDto,
    ) -> Result<Section, AppError> {
        let existing = Self::get_section_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let class_id = dto.class_id.unwrap_or(existing.class_id);

        if class_id != existing.class_id {
            Self::ensure_class_exists(db, class_id).await?;
        }

        // Uniqueness is checked against the class the section will end up
        // in, ignoring the record itself.
        if Self::name_taken_in_class(db, &name, class_id, Some(id)).await? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A section named {} already exists in this class",
                name
            )));
        }

        sqlx::query(
            "UPDATE sections SET name = $1, class_id = $2, updated_at = NOW()
             WHERE id = $3 AND deleted_at IS NULL",
        )
        .bind(&name)
        .bind(class_id)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A section named {} already exists in this class",
                    name
                ));
            }
            AppError::from(e)
        })?;

        Self::get_section_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_section(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE sections SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Section not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn bulk_delete_sections(db: &PgPool, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE sections SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }
}
