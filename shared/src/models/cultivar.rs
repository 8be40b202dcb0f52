//! Cultivar and grow models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GrowingDaysRange, HarvestOutlook};

/// A crop cultivar with its reference growing days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cultivar {
    pub id: Uuid,
    pub name: String,
    pub crop: String,
    /// Free-form source text, e.g. "75-85" or "~90 days"
    pub growing_days: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cultivar {
    /// Parsed on every call; only the source text is stored
    pub fn growing_days_range(&self) -> GrowingDaysRange {
        GrowingDaysRange::parse(self.growing_days.as_deref())
    }
}

/// A planting of a cultivar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grow {
    pub id: Uuid,
    pub cultivar_id: Uuid,
    pub planted_date: NaiveDate,
    /// Reserved for zone-adjusted calendars
    pub usda_zone: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grow {
    pub fn harvest_outlook(&self, cultivar: &Cultivar, today: NaiveDate) -> HarvestOutlook {
        HarvestOutlook::new(cultivar.growing_days_range(), self.planted_date, today)
    }
}
