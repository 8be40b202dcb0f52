//! Worker models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A farm worker who clocks time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    /// False once the worker has left; their history is kept
    pub is_active_employee: bool,
    pub created_at: DateTime<Utc>,
}
