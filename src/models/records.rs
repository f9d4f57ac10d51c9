//! Demo dashboard records
//!
//! The typed records the demo dashboard keeps in its cached collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::Record;

// == Collection Keys ==
pub const QUICK_LOGS_KEY: &str = "quick-logs";
pub const JOURNAL_ENTRIES_KEY: &str = "journal-entries";
pub const REMINDERS_KEY: &str = "reminders";

/// Kind of activity captured by a quick log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Feeding,
    Walk,
    Medication,
    Grooming,
    Vet,
    Play,
    Other,
}

/// One-tap activity log ("Buddy was fed").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLog {
    pub id: String,
    pub pet_name: String,
    pub activity_type: ActivityType,
    pub logged_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Free-form health journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub pet_name: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Scheduled care reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub pet_name: String,
    pub title: String,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl Record for QuickLog {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for JournalEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Reminder {
    fn id(&self) -> &str {
        &self.id
    }
}
