//! Worker time-clock models

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Hours below this are regular time
pub const WARNING_THRESHOLD_HOURS: f64 = 8.0;
pub const OVERTIME_THRESHOLD_HOURS: f64 = 9.0;
pub const EXCESSIVE_THRESHOLD_HOURS: f64 = 10.0;

/// Rejected clock operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Worker {worker_id} is already clocked in (block {block_number})")]
    AlreadyClockedIn { worker_id: Uuid, block_number: i32 },

    #[error("Worker {worker_id} is not clocked in")]
    NotClockedIn { worker_id: Uuid },
}

/// Payroll-alert classification of accumulated hours
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HoursBand {
    /// Under 8 hours
    Regular,
    /// 8 to under 9 hours
    Warning,
    /// 9 to under 10 hours
    Overtime,
    /// 10 hours or more
    Excessive,
}

impl HoursBand {
    pub fn classify(hours: f64) -> Self {
        if hours >= EXCESSIVE_THRESHOLD_HOURS {
            HoursBand::Excessive
        } else if hours >= OVERTIME_THRESHOLD_HOURS {
            HoursBand::Overtime
        } else if hours >= WARNING_THRESHOLD_HOURS {
            HoursBand::Warning
        } else {
            HoursBand::Regular
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HoursBand::Regular => "Regular",
            HoursBand::Warning => "Approaching Overtime",
            HoursBand::Overtime => "Overtime",
            HoursBand::Excessive => "Excessive",
        }
    }
}

impl std::fmt::Display for HoursBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Elapsed hours with their band
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Accrual {
    pub hours: f64,
    pub band: HoursBand,
}

impl Accrual {
    pub fn from_hours(hours: f64) -> Self {
        Self {
            hours,
            band: HoursBand::classify(hours),
        }
    }
}

/// Fractional hours between two instants
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    end.signed_duration_since(start).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR
}

/// Hours for a block: final when clocked out, live against `now` otherwise
pub fn accrue(
    clock_in: DateTime<Utc>,
    clock_out: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Accrual {
    Accrual::from_hours(hours_between(clock_in, clock_out.unwrap_or(now)))
}

/// Calendar day an instant belongs to in the farm's local offset
pub fn work_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Render hours as "8h 30m"
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{}{}h {}m", sign, minutes / 60, minutes % 60)
}

/// One contiguous clock-in/clock-out interval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlock {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub work_date: NaiveDate,
    /// 1-based, in creation order within the worker's day
    pub block_number: i32,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Fixed at clock-out; 0 while the block is active
    pub hours_worked: f64,
}

impl TimeBlock {
    /// Current hours: stored for finalized blocks, live for the active one
    pub fn hours_at(&self, now: DateTime<Utc>) -> f64 {
        if self.is_active {
            hours_between(self.clock_in, now)
        } else {
            self.hours_worked
        }
    }

    pub fn accrual(&self, now: DateTime<Utc>) -> Accrual {
        Accrual::from_hours(self.hours_at(now))
    }
}

/// All blocks of one worker on one calendar day
///
/// Owns the clock-in/clock-out preconditions and block numbering. Callers
/// load the day, apply one operation and persist the touched block; in a
/// concurrent setting the load-apply-save sequence must run under a lock
/// held for that worker.
///
/// A worker has at most one active block across all days. An active block
/// left on an earlier day (an overnight shift) is attached with
/// [`WorkerDay::with_open_block`]: it blocks clock-in and is the block that
/// clock-out closes.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerDay {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    blocks: Vec<TimeBlock>,
    /// Highest number ever issued on this day, including deleted blocks
    last_block_number: i32,
    earlier_open_block: Option<TimeBlock>,
}

impl WorkerDay {
    pub fn new(worker_id: Uuid, date: NaiveDate, mut blocks: Vec<TimeBlock>) -> Self {
        blocks.sort_by_key(|b| b.block_number);
        let last_block_number = blocks.iter().map(|b| b.block_number).max().unwrap_or(0);
        Self {
            worker_id,
            date,
            blocks,
            last_block_number,
            earlier_open_block: None,
        }
    }

    /// Raise the numbering high-water mark to cover numbers of deleted blocks
    pub fn with_issued_block_numbers(mut self, last_issued: i32) -> Self {
        self.last_block_number = self.last_block_number.max(last_issued);
        self
    }

    /// Attach the worker's active block from an earlier day
    ///
    /// Ignored when the block is finalized, belongs to another worker or
    /// belongs to this day.
    pub fn with_open_block(mut self, block: TimeBlock) -> Self {
        if block.is_active && block.worker_id == self.worker_id && block.work_date != self.date {
            self.earlier_open_block = Some(block);
        }
        self
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<TimeBlock> {
        self.blocks
    }

    /// Active block belonging to this day
    pub fn active_block(&self) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| b.is_active)
    }

    /// The worker's active block on any day: this day's first, then an
    /// attached block from an earlier day
    pub fn open_block(&self) -> Option<&TimeBlock> {
        self.active_block().or_else(|| {
            self.earlier_open_block
                .as_ref()
                .filter(|block| block.is_active)
        })
    }

    /// Numbers are never reused, even after the highest block is deleted
    pub fn next_block_number(&self) -> i32 {
        self.last_block_number + 1
    }

    /// Open a new active block at `at`
    pub fn clock_in(&mut self, at: DateTime<Utc>) -> Result<&TimeBlock, ClockError> {
        if let Some(open) = self.open_block() {
            return Err(ClockError::AlreadyClockedIn {
                worker_id: self.worker_id,
                block_number: open.block_number,
            });
        }

        let block = TimeBlock {
            id: Uuid::new_v4(),
            worker_id: self.worker_id,
            work_date: self.date,
            block_number: self.next_block_number(),
            clock_in: at,
            clock_out: None,
            is_active: true,
            hours_worked: 0.0,
        };
        self.last_block_number = block.block_number;
        self.blocks.push(block);
        Ok(&self.blocks[self.blocks.len() - 1])
    }

    /// Close the open block at `at` and fix its hours
    ///
    /// An overnight block keeps its own `work_date`; all of its hours count
    /// toward the day it was opened.
    pub fn clock_out(&mut self, at: DateTime<Utc>) -> Result<&TimeBlock, ClockError> {
        let worker_id = self.worker_id;
        let block = match self.blocks.iter_mut().find(|b| b.is_active) {
            Some(block) => block,
            None => self
                .earlier_open_block
                .as_mut()
                .filter(|block| block.is_active)
                .ok_or(ClockError::NotClockedIn { worker_id })?,
        };

        block.clock_out = Some(at);
        block.is_active = false;
        block.hours_worked = hours_between(block.clock_in, at);
        Ok(&*block)
    }

    /// Drop a block without renumbering the rest or freeing its number
    pub fn remove_block(&mut self, block_id: Uuid) -> Option<TimeBlock> {
        let index = self.blocks.iter().position(|b| b.id == block_id)?;
        Some(self.blocks.remove(index))
    }

    /// Finalized hours plus live hours of the active block
    pub fn total_hours(&self, now: DateTime<Utc>) -> f64 {
        self.blocks.iter().map(|b| b.hours_at(now)).sum()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> WorkerDaySummary {
        let total_hours = self.total_hours(now);
        WorkerDaySummary {
            worker_id: self.worker_id,
            date: self.date,
            total_hours,
            band: HoursBand::classify(total_hours),
            block_count: self.blocks.len(),
            is_clocked_in: self.active_block().is_some(),
            remaining_regular_hours: (WARNING_THRESHOLD_HOURS - total_hours).max(0.0),
        }
    }
}

/// Dashboard tile data for one worker-day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerDaySummary {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    pub total_hours: f64,
    pub band: HoursBand,
    pub block_count: usize,
    pub is_clocked_in: bool,
    pub remaining_regular_hours: f64,
}
