//! Time clock service for worker clock-in/clock-out and daily hours
//!
//! Clock operations run in a single transaction that first locks the
//! worker row, so two concurrent clock-ins for one worker serialize and the
//! second sees the first's active block. A worker's active block may sit on
//! an earlier day after an overnight shift; it is loaded with the current
//! day so clock-out can close it and clock-in refuses to open a second one.
//!
//! Deleted blocks are kept as rows with `deleted_at` set so their numbers
//! are never issued again.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use shared::{Accrual, DateRange, HoursBand, TimeBlock, WorkerDay, WorkerDaySummary};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Time clock service
#[derive(Clone)]
pub struct TimeClockService {
    db: PgPool,
    offset: FixedOffset,
}

/// Database row for a time block
#[derive(Debug, Clone, sqlx::FromRow)]
struct TimeBlockRow {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub work_date: NaiveDate,
    pub block_number: i32,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub hours_worked: f64,
}

impl From<TimeBlockRow> for TimeBlock {
    fn from(row: TimeBlockRow) -> Self {
        Self {
            id: row.id,
            worker_id: row.worker_id,
            work_date: row.work_date,
            block_number: row.block_number,
            clock_in: row.clock_in,
            clock_out: row.clock_out,
            is_active: row.is_active,
            hours_worked: row.hours_worked,
        }
    }
}

/// Time block with its current hours for API responses
#[derive(Debug, Clone, Serialize)]
pub struct TimeBlockView {
    #[serde(flatten)]
    pub block: TimeBlock,
    /// Live for an active block, stored otherwise
    pub hours: f64,
    pub band: HoursBand,
    pub hours_text: String,
}

impl TimeBlockView {
    pub fn new(block: TimeBlock, now: DateTime<Utc>) -> Self {
        let Accrual { hours, band } = block.accrual(now);
        Self {
            hours_text: shared::format_hours(hours),
            hours,
            band,
            block,
        }
    }
}

/// A worker's day: summary tile plus its blocks
#[derive(Debug, Clone, Serialize)]
pub struct WorkerDayView {
    pub summary: WorkerDaySummary,
    pub total_hours_text: String,
    pub blocks: Vec<TimeBlockView>,
}

/// A currently clocked-in worker
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActiveWorkerRow {
    pub worker_id: Uuid,
    pub worker_name: String,
    pub block_id: Uuid,
    pub work_date: NaiveDate,
    pub block_number: i32,
    pub clock_in: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveWorker {
    #[serde(flatten)]
    pub row: ActiveWorkerRow,
    pub live: Accrual,
}

const BLOCK_COLUMNS: &str =
    "id, worker_id, work_date, block_number, clock_in, clock_out, is_active, hours_worked";

impl TimeClockService {
    /// Create a new TimeClockService; `offset` decides which calendar day an instant belongs to
    pub fn new(db: PgPool, offset: FixedOffset) -> Self {
        Self { db, offset }
    }

    /// Clock a worker in at `now`
    pub async fn clock_in(&self, worker_id: Uuid, now: DateTime<Utc>) -> AppResult<TimeBlockView> {
        let mut tx = self.db.begin().await?;
        Self::lock_worker(&mut tx, worker_id, true).await?;

        let date = shared::work_date(now, self.offset);
        let mut day = Self::load_day(&mut tx, worker_id, date).await?;
        let block = day.clock_in(now)?.clone();

        sqlx::query(
            r#"
            INSERT INTO time_blocks (id, worker_id, work_date, block_number, clock_in, is_active, hours_worked)
            VALUES ($1, $2, $3, $4, $5, TRUE, 0)
            "#,
        )
        .bind(block.id)
        .bind(block.worker_id)
        .bind(block.work_date)
        .bind(block.block_number)
        .bind(block.clock_in)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Worker {} clocked in, block {} on {}",
            worker_id,
            block.block_number,
            date
        );
        Ok(TimeBlockView::new(block, now))
    }

    /// Clock a worker out of their open block at `now`, whichever day it was opened on
    pub async fn clock_out(&self, worker_id: Uuid, now: DateTime<Utc>) -> AppResult<TimeBlockView> {
        let mut tx = self.db.begin().await?;
        Self::lock_worker(&mut tx, worker_id, false).await?;

        let date = shared::work_date(now, self.offset);
        let mut day = Self::load_day(&mut tx, worker_id, date).await?;

        if let Some(open) = day.open_block() {
            shared::validate_clock_sequence(open.clock_in, now)
                .map_err(|msg| AppError::validation("clock_out", msg))?;
        }
        let block = day.clock_out(now)?.clone();
        if block.work_date != date {
            tracing::info!(
                "Worker {} closed block {} opened on {}",
                worker_id,
                block.block_number,
                block.work_date
            );
        }

        sqlx::query(
            r#"
            UPDATE time_blocks
            SET clock_out = $1, is_active = FALSE, hours_worked = $2
            WHERE id = $3
            "#,
        )
        .bind(block.clock_out)
        .bind(block.hours_worked)
        .bind(block.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Worker {} clocked out of block {} after {:.2}h",
            worker_id,
            block.block_number,
            block.hours_worked
        );
        Ok(TimeBlockView::new(block, now))
    }

    /// Blocks and totals for one worker-day
    pub async fn get_day(
        &self,
        worker_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<WorkerDayView> {
        let rows = sqlx::query_as::<_, TimeBlockRow>(&format!(
            r#"
            SELECT {BLOCK_COLUMNS} FROM time_blocks
            WHERE worker_id = $1 AND work_date = $2 AND deleted_at IS NULL
            "#
        ))
        .bind(worker_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        let day = WorkerDay::new(worker_id, date, rows.into_iter().map(TimeBlock::from).collect());
        Ok(Self::day_view(day, now))
    }

    /// Daily summaries for every date in `range`, including days with no blocks
    pub async fn get_range_summaries(
        &self,
        worker_id: Uuid,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<WorkerDaySummary>> {
        shared::validate_date_range(&range).map_err(|msg| AppError::validation("end", msg))?;

        let rows = sqlx::query_as::<_, TimeBlockRow>(&format!(
            r#"
            SELECT {BLOCK_COLUMNS} FROM time_blocks
            WHERE worker_id = $1 AND work_date BETWEEN $2 AND $3 AND deleted_at IS NULL
            "#
        ))
        .bind(worker_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        let blocks: Vec<TimeBlock> = rows.into_iter().map(TimeBlock::from).collect();
        Ok(range
            .days()
            .map(|date| {
                let day_blocks = blocks.iter().filter(|b| b.work_date == date).cloned().collect();
                WorkerDay::new(worker_id, date, day_blocks).summary(now)
            })
            .collect())
    }

    /// Delete a finalized block; remaining blocks keep their numbers and the
    /// deleted number stays retired
    pub async fn delete_block(&self, block_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, TimeBlockRow>(&format!(
            "SELECT {BLOCK_COLUMNS} FROM time_blocks WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        ))
        .bind(block_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Time block".to_string()))?;

        if row.is_active {
            return Err(AppError::InvalidStateTransition(
                "Clock out before deleting an active time block".to_string(),
            ));
        }

        sqlx::query("UPDATE time_blocks SET deleted_at = NOW() WHERE id = $1")
            .bind(block_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Deleted time block {} (worker {}, {} #{})",
            block_id,
            row.worker_id,
            row.work_date,
            row.block_number
        );
        Ok(())
    }

    /// Workers with an active block, longest-running first
    pub async fn active_workers(&self, now: DateTime<Utc>) -> AppResult<Vec<ActiveWorker>> {
        let rows = sqlx::query_as::<_, ActiveWorkerRow>(
            r#"
            SELECT w.id as worker_id, w.name as worker_name, t.id as block_id,
                   t.work_date, t.block_number, t.clock_in
            FROM time_blocks t
            JOIN workers w ON w.id = t.worker_id
            WHERE t.is_active AND t.deleted_at IS NULL
            ORDER BY t.clock_in ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActiveWorker {
                live: shared::accrue(row.clock_in, None, now),
                row,
            })
            .collect())
    }

    fn day_view(day: WorkerDay, now: DateTime<Utc>) -> WorkerDayView {
        let summary = day.summary(now);
        WorkerDayView {
            total_hours_text: shared::format_hours(summary.total_hours),
            summary,
            blocks: day
                .into_blocks()
                .into_iter()
                .map(|block| TimeBlockView::new(block, now))
                .collect(),
        }
    }

    /// Take the per-worker row lock held until the transaction ends
    async fn lock_worker(
        tx: &mut Transaction<'_, Postgres>,
        worker_id: Uuid,
        require_employed: bool,
    ) -> AppResult<()> {
        let is_active_employee = sqlx::query_scalar::<_, bool>(
            "SELECT is_active_employee FROM workers WHERE id = $1 FOR UPDATE",
        )
        .bind(worker_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Worker".to_string()))?;

        if require_employed && !is_active_employee {
            return Err(AppError::InvalidStateTransition(
                "Worker is no longer an active employee".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a worker-day with its numbering high-water mark and any active
    /// block left on another day
    async fn load_day(
        tx: &mut Transaction<'_, Postgres>,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<WorkerDay> {
        let rows = sqlx::query_as::<_, TimeBlockRow>(&format!(
            r#"
            SELECT {BLOCK_COLUMNS} FROM time_blocks
            WHERE worker_id = $1 AND work_date = $2 AND deleted_at IS NULL
            "#
        ))
        .bind(worker_id)
        .bind(date)
        .fetch_all(&mut **tx)
        .await?;

        // Includes deleted rows
        let last_issued = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT COALESCE(MAX(block_number), 0) FROM time_blocks
            WHERE worker_id = $1 AND work_date = $2
            "#,
        )
        .bind(worker_id)
        .bind(date)
        .fetch_one(&mut **tx)
        .await?;

        let open_elsewhere = sqlx::query_as::<_, TimeBlockRow>(&format!(
            r#"
            SELECT {BLOCK_COLUMNS} FROM time_blocks
            WHERE worker_id = $1 AND is_active AND work_date <> $2
            "#
        ))
        .bind(worker_id)
        .bind(date)
        .fetch_optional(&mut **tx)
        .await?;

        let day = WorkerDay::new(
            worker_id,
            date,
            rows.into_iter().map(TimeBlock::from).collect(),
        )
        .with_issued_block_numbers(last_issued);

        Ok(match open_elsewhere {
            Some(row) => day.with_open_block(row.into()),
            None => day,
        })
    }
}
