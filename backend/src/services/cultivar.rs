//! Cultivar reference data service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::GrowingDaysRange;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models;

/// Cultivar service for managing crop reference data
#[derive(Clone)]
pub struct CultivarService {
    db: PgPool,
}

/// Database row for a cultivar
#[derive(Debug, Clone, sqlx::FromRow)]
struct CultivarRow {
    pub id: Uuid,
    pub name: String,
    pub crop: String,
    pub growing_days: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CultivarRow> for models::Cultivar {
    fn from(row: CultivarRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            crop: row.crop,
            growing_days: row.growing_days,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Cultivar with its parsed growing days for API responses
#[derive(Debug, Clone, Serialize)]
pub struct CultivarView {
    #[serde(flatten)]
    pub cultivar: models::Cultivar,
    pub growing_days_range: GrowingDaysRange,
    pub growing_days_text: String,
}

impl From<models::Cultivar> for CultivarView {
    fn from(cultivar: models::Cultivar) -> Self {
        let range = cultivar.growing_days_range();
        Self {
            growing_days_text: range.display_text(),
            growing_days_range: range,
            cultivar,
        }
    }
}

/// Input for creating a cultivar
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCultivarInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub crop: String,
    /// Stored as given; any text is accepted
    #[validate(length(max = 50))]
    pub growing_days: Option<String>,
    pub notes: Option<String>,
}

/// Input for updating a cultivar
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCultivarInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub crop: Option<String>,
    #[validate(length(max = 50))]
    pub growing_days: Option<String>,
    pub notes: Option<String>,
}

impl UpdateCultivarInput {
    /// Field rules plus the trimmed-name check applied on create
    fn check(&self) -> AppResult<()> {
        self.validate()?;
        if let Some(name) = &self.name {
            shared::validate_name(name).map_err(|msg| AppError::validation("name", msg))?;
        }
        Ok(())
    }
}

const CULTIVAR_COLUMNS: &str = "id, name, crop, growing_days, notes, created_at, updated_at";

fn map_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEntry("crop and name".to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

impl CultivarService {
    /// Create a new CultivarService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all cultivars ordered by crop and name
    pub async fn list_cultivars(&self) -> AppResult<Vec<CultivarView>> {
        let rows = sqlx::query_as::<_, CultivarRow>(&format!(
            "SELECT {CULTIVAR_COLUMNS} FROM cultivars ORDER BY crop, name"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CultivarView::from(models::Cultivar::from(row)))
            .collect())
    }

    /// Get a cultivar by ID
    pub async fn get_cultivar(&self, cultivar_id: Uuid) -> AppResult<models::Cultivar> {
        let row = sqlx::query_as::<_, CultivarRow>(&format!(
            "SELECT {CULTIVAR_COLUMNS} FROM cultivars WHERE id = $1"
        ))
        .bind(cultivar_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cultivar".to_string()))?;

        Ok(row.into())
    }

    /// Create a cultivar
    pub async fn create_cultivar(&self, input: CreateCultivarInput) -> AppResult<CultivarView> {
        input.validate()?;
        shared::validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;

        let row = sqlx::query_as::<_, CultivarRow>(&format!(
            r#"
            INSERT INTO cultivars (name, crop, growing_days, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING {CULTIVAR_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.crop.trim())
        .bind(&input.growing_days)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await
        .map_err(map_unique_violation)?;

        tracing::info!("Created cultivar {} ({})", row.name, row.id);
        Ok(models::Cultivar::from(row).into())
    }

    /// Update a cultivar
    pub async fn update_cultivar(
        &self,
        cultivar_id: Uuid,
        input: UpdateCultivarInput,
    ) -> AppResult<CultivarView> {
        input.check()?;
        let existing = self.get_cultivar(cultivar_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let crop = input.crop.unwrap_or(existing.crop);
        let growing_days = input.growing_days.or(existing.growing_days);
        let notes = input.notes.or(existing.notes);

        let row = sqlx::query_as::<_, CultivarRow>(&format!(
            r#"
            UPDATE cultivars
            SET name = $1, crop = $2, growing_days = $3, notes = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {CULTIVAR_COLUMNS}
            "#
        ))
        .bind(name.trim())
        .bind(crop.trim())
        .bind(&growing_days)
        .bind(&notes)
        .bind(cultivar_id)
        .fetch_one(&self.db)
        .await
        .map_err(map_unique_violation)?;

        Ok(models::Cultivar::from(row).into())
    }

    /// Delete a cultivar that has no grows
    pub async fn delete_cultivar(&self, cultivar_id: Uuid) -> AppResult<()> {
        let grow_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM grows WHERE cultivar_id = $1",
        )
        .bind(cultivar_id)
        .fetch_one(&self.db)
        .await?;

        if grow_count > 0 {
            return Err(AppError::InvalidStateTransition(format!(
                "Cultivar still has {} grow(s)",
                grow_count
            )));
        }

        let result = sqlx::query("DELETE FROM cultivars WHERE id = $1")
            .bind(cultivar_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cultivar".to_string()));
        }
        Ok(())
    }
}
