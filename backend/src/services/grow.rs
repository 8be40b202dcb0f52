//! Grow tracking and harvest outlook service

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{HarvestBucket, HarvestOutlook};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models;
use super::cultivar::CultivarService;

/// Grow service for plantings and their harvest projections
#[derive(Clone)]
pub struct GrowService {
    db: PgPool,
}

/// Database row for a grow
#[derive(Debug, Clone, sqlx::FromRow)]
struct GrowRow {
    pub id: Uuid,
    pub cultivar_id: Uuid,
    pub planted_date: NaiveDate,
    pub usda_zone: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GrowRow> for models::Grow {
    fn from(row: GrowRow) -> Self {
        Self {
            id: row.id,
            cultivar_id: row.cultivar_id,
            planted_date: row.planted_date,
            usda_zone: row.usda_zone,
            location: row.location,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Grow with cultivar name and harvest outlook for API responses
#[derive(Debug, Clone, Serialize)]
pub struct GrowDetail {
    #[serde(flatten)]
    pub grow: models::Grow,
    pub cultivar_name: String,
    pub crop: String,
    pub outlook: HarvestOutlook,
}

/// Heat-map payload for a grow
#[derive(Debug, Clone, Serialize)]
pub struct GrowCalendar {
    pub grow_id: Uuid,
    pub usda_zone: Option<String>,
    pub weeks: BTreeMap<u32, HarvestBucket>,
}

/// Input for recording a planting
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGrowInput {
    pub cultivar_id: Uuid,
    pub planted_date: NaiveDate,
    pub usda_zone: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub notes: Option<String>,
}

const GROW_COLUMNS: &str =
    "id, cultivar_id, planted_date, usda_zone, location, notes, created_at, updated_at";

impl GrowService {
    /// Create a new GrowService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn cultivars(&self) -> CultivarService {
        CultivarService::new(self.db.clone())
    }

    /// List all grows with their outlook as of `today`
    pub async fn list_grows(&self, today: NaiveDate) -> AppResult<Vec<GrowDetail>> {
        let rows = sqlx::query_as::<_, GrowRow>(&format!(
            "SELECT {GROW_COLUMNS} FROM grows ORDER BY planted_date DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        let cultivars: BTreeMap<Uuid, models::Cultivar> = self
            .cultivars()
            .list_cultivars()
            .await?
            .into_iter()
            .map(|view| (view.cultivar.id, view.cultivar))
            .collect();

        rows.into_iter()
            .map(|row| {
                let grow = models::Grow::from(row);
                let cultivar = cultivars
                    .get(&grow.cultivar_id)
                    .ok_or_else(|| AppError::Internal(format!("Grow {} has no cultivar", grow.id)))?;
                Ok(Self::detail(grow, cultivar, today))
            })
            .collect()
    }

    /// Get a grow with its harvest outlook as of `today`
    pub async fn get_grow(&self, grow_id: Uuid, today: NaiveDate) -> AppResult<GrowDetail> {
        let grow = self.fetch_grow(grow_id).await?;
        let cultivar = self.cultivars().get_cultivar(grow.cultivar_id).await?;
        Ok(Self::detail(grow, &cultivar, today))
    }

    /// Week-by-week harvest buckets for a grow
    pub async fn get_calendar(&self, grow_id: Uuid) -> AppResult<GrowCalendar> {
        let grow = self.fetch_grow(grow_id).await?;
        let cultivar = self.cultivars().get_cultivar(grow.cultivar_id).await?;

        let weeks = shared::calendar_buckets(
            cultivar.growing_days_range(),
            grow.planted_date,
            grow.usda_zone.as_deref(),
        );

        Ok(GrowCalendar {
            grow_id: grow.id,
            usda_zone: grow.usda_zone,
            weeks,
        })
    }

    /// Record a planting
    pub async fn create_grow(&self, input: CreateGrowInput, today: NaiveDate) -> AppResult<GrowDetail> {
        input.validate()?;
        if let Some(zone) = &input.usda_zone {
            shared::validate_usda_zone(zone).map_err(|msg| AppError::validation("usda_zone", msg))?;
        }
        shared::validate_planted_date(input.planted_date, today)
            .map_err(|msg| AppError::validation("planted_date", msg))?;

        let cultivar = self.cultivars().get_cultivar(input.cultivar_id).await?;

        let row = sqlx::query_as::<_, GrowRow>(&format!(
            r#"
            INSERT INTO grows (cultivar_id, planted_date, usda_zone, location, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {GROW_COLUMNS}
            "#
        ))
        .bind(input.cultivar_id)
        .bind(input.planted_date)
        .bind(input.usda_zone.as_deref().map(str::trim))
        .bind(&input.location)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Recorded grow {} of {} planted {}",
            row.id,
            cultivar.name,
            row.planted_date
        );
        Ok(Self::detail(row.into(), &cultivar, today))
    }

    /// Delete a grow
    pub async fn delete_grow(&self, grow_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM grows WHERE id = $1")
            .bind(grow_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Grow".to_string()));
        }
        Ok(())
    }

    async fn fetch_grow(&self, grow_id: Uuid) -> AppResult<models::Grow> {
        let row = sqlx::query_as::<_, GrowRow>(&format!(
            "SELECT {GROW_COLUMNS} FROM grows WHERE id = $1"
        ))
        .bind(grow_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Grow".to_string()))?;

        Ok(row.into())
    }

    fn detail(grow: models::Grow, cultivar: &models::Cultivar, today: NaiveDate) -> GrowDetail {
        GrowDetail {
            outlook: grow.harvest_outlook(cultivar, today),
            cultivar_name: cultivar.name.clone(),
            crop: cultivar.crop.clone(),
            grow,
        }
    }
}
