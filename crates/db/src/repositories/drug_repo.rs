//! Repository for the `drugs` table.

use bloodlevel_core::drug::prefix_pattern;
use bloodlevel_core::types::DbId;
use sqlx::PgPool;

use crate::models::drug::{CreateDrug, Drug, UpdateDrug};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, drug_name, drug_metadata, \
    normal_level_mg, normal_level_ug, \
    toxic_level_mg, toxic_level_ug, \
    lethal_level_mg, lethal_level_ug, \
    created_at, updated_at";

/// Provides CRUD and name search for drugs.
pub struct DrugRepo;

impl DrugRepo {
    /// Insert a new drug, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDrug) -> Result<Drug, sqlx::Error> {
        let query = format!(
            "INSERT INTO drugs \
                 (drug_name, drug_metadata, normal_level_mg, normal_level_ug, \
                  toxic_level_mg, toxic_level_ug, lethal_level_mg, lethal_level_ug) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drug>(&query)
            .bind(&input.drug_name)
            .bind(&input.drug_metadata)
            .bind(&input.normal_level_mg)
            .bind(&input.normal_level_ug)
            .bind(&input.toxic_level_mg)
            .bind(&input.toxic_level_ug)
            .bind(&input.lethal_level_mg)
            .bind(&input.lethal_level_ug)
            .fetch_one(pool)
            .await
    }

    /// Find a drug by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Drug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drugs WHERE id = $1");
        sqlx::query_as::<_, Drug>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drugs ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Drug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drugs ORDER BY drug_name, id");
        sqlx::query_as::<_, Drug>(&query).fetch_all(pool).await
    }

    /// Case-insensitive name-prefix search.
    ///
    /// `%` and `_` inside `query` act as `LIKE` wildcards. Results are
    /// ordered by name so the first row is stable across calls.
    pub async fn search_by_name_prefix(
        pool: &PgPool,
        query: &str,
    ) -> Result<Vec<Drug>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM drugs \
             WHERE LOWER(drug_name) LIKE $1 \
             ORDER BY drug_name, id"
        );
        sqlx::query_as::<_, Drug>(&sql)
            .bind(prefix_pattern(query))
            .fetch_all(pool)
            .await
    }

    /// Partially update a drug.
    ///
    /// `drug_name` uses `COALESCE`. The nullable columns use a presence flag
    /// per field so an explicit `null` clears the value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDrug,
    ) -> Result<Option<Drug>, sqlx::Error> {
        let query = format!(
            "UPDATE drugs SET \
                 drug_name       = COALESCE($2, drug_name), \
                 drug_metadata   = CASE WHEN $3  THEN $4  ELSE drug_metadata END, \
                 normal_level_mg = CASE WHEN $5  THEN $6  ELSE normal_level_mg END, \
                 normal_level_ug = CASE WHEN $7  THEN $8  ELSE normal_level_ug END, \
                 toxic_level_mg  = CASE WHEN $9  THEN $10 ELSE toxic_level_mg END, \
                 toxic_level_ug  = CASE WHEN $11 THEN $12 ELSE toxic_level_ug END, \
                 lethal_level_mg = CASE WHEN $13 THEN $14 ELSE lethal_level_mg END, \
                 lethal_level_ug = CASE WHEN $15 THEN $16 ELSE lethal_level_ug END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );

        let mut q = sqlx::query_as::<_, Drug>(&query)
            .bind(id)
            .bind(&input.drug_name);
        for field in [
            &input.drug_metadata,
            &input.normal_level_mg,
            &input.normal_level_ug,
            &input.toxic_level_mg,
            &input.toxic_level_ug,
            &input.lethal_level_mg,
            &input.lethal_level_ug,
        ] {
            q = q
                .bind(field.is_some())
                .bind(field.as_ref().and_then(|v| v.as_deref()));
        }
        q.fetch_optional(pool).await
    }

    /// Delete a drug by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drugs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() > 0 {
            tracing::debug!(drug_id = id, "Drug row deleted");
        }
        Ok(result.rows_affected() > 0)
    }
}
