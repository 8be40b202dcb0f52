//! Worker roster service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models;

/// Worker service
#[derive(Clone)]
pub struct WorkerService {
    db: PgPool,
}

/// Database row for a worker
#[derive(Debug, Clone, sqlx::FromRow)]
struct WorkerRow {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub is_active_employee: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WorkerRow> for models::Worker {
    fn from(row: WorkerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: row.role,
            is_active_employee: row.is_active_employee,
            created_at: row.created_at,
        }
    }
}

/// Input for adding a worker
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub role: Option<String>,
}

/// Input for updating a worker
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub role: Option<String>,
    pub is_active_employee: Option<bool>,
}

impl WorkerService {
    /// Create a new WorkerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List workers, optionally only current employees
    pub async fn list_workers(&self, active_only: bool) -> AppResult<Vec<models::Worker>> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, name, role, is_active_employee, created_at
            FROM workers
            WHERE is_active_employee OR NOT $1
            ORDER BY name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(models::Worker::from).collect())
    }

    /// Get a worker by ID
    pub async fn get_worker(&self, worker_id: Uuid) -> AppResult<models::Worker> {
        let row = sqlx::query_as::<_, WorkerRow>(
            "SELECT id, name, role, is_active_employee, created_at FROM workers WHERE id = $1",
        )
        .bind(worker_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Worker".to_string()))?;

        Ok(row.into())
    }

    /// Add a worker
    pub async fn create_worker(&self, input: CreateWorkerInput) -> AppResult<models::Worker> {
        input.validate()?;
        shared::validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;

        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            INSERT INTO workers (name, role)
            VALUES ($1, $2)
            RETURNING id, name, role, is_active_employee, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.role)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Added worker {} ({})", row.name, row.id);
        Ok(row.into())
    }

    /// Update a worker; marking them inactive keeps their time history
    pub async fn update_worker(
        &self,
        worker_id: Uuid,
        input: UpdateWorkerInput,
    ) -> AppResult<models::Worker> {
        input.validate()?;
        let existing = self.get_worker(worker_id).await?;

        let name = input.name.unwrap_or(existing.name);
        shared::validate_name(&name).map_err(|msg| AppError::validation("name", msg))?;
        let role = input.role.or(existing.role);
        let is_active_employee = input
            .is_active_employee
            .unwrap_or(existing.is_active_employee);

        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            UPDATE workers
            SET name = $1, role = $2, is_active_employee = $3
            WHERE id = $4
            RETURNING id, name, role, is_active_employee, created_at
            "#,
        )
        .bind(name.trim())
        .bind(&role)
        .bind(is_active_employee)
        .bind(worker_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
