//! Demo data seeding
//!
//! Installs the starter collections a fresh demo session opens with.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::cache::DemoCache;
use crate::models::records::{
    ActivityType, JournalEntry, QuickLog, Reminder, JOURNAL_ENTRIES_KEY, QUICK_LOGS_KEY,
    REMINDERS_KEY,
};

/// Writes the starter collection for every demo key not already cached.
///
/// Returns how many collections were written. Existing collections are left
/// alone so a returning visitor keeps their edits.
pub fn seed_demo_data(cache: &mut DemoCache) -> usize {
    if !cache.is_active() {
        debug!("Demo cache inactive, not seeding");
        return 0;
    }

    let now = DateTime::<Utc>::from_timestamp_millis(cache.now_ms() as i64).unwrap_or_default();
    let mut seeded = 0;

    if !cache.has_key(QUICK_LOGS_KEY) {
        cache.set(QUICK_LOGS_KEY, &starter_quick_logs(now));
        seeded += 1;
    }
    if !cache.has_key(JOURNAL_ENTRIES_KEY) {
        cache.set(JOURNAL_ENTRIES_KEY, &starter_journal(now));
        seeded += 1;
    }
    if !cache.has_key(REMINDERS_KEY) {
        cache.set(REMINDERS_KEY, &starter_reminders(now));
        seeded += 1;
    }

    if seeded > 0 {
        info!("Seeded {} demo collections", seeded);
    }
    seeded
}

fn starter_quick_logs(now: DateTime<Utc>) -> Vec<QuickLog> {
    vec![
        QuickLog {
            id: "demo-log-1".to_string(),
            pet_name: "Buddy".to_string(),
            activity_type: ActivityType::Feeding,
            logged_at: now - Duration::hours(2),
            notes: Some("Ate all of breakfast".to_string()),
        },
        QuickLog {
            id: "demo-log-2".to_string(),
            pet_name: "Buddy".to_string(),
            activity_type: ActivityType::Walk,
            logged_at: now - Duration::hours(1),
            notes: None,
        },
        QuickLog {
            id: "demo-log-3".to_string(),
            pet_name: "Luna".to_string(),
            activity_type: ActivityType::Medication,
            logged_at: now - Duration::minutes(20),
            notes: Some("Half tablet with food".to_string()),
        },
    ]
}

fn starter_journal(now: DateTime<Utc>) -> Vec<JournalEntry> {
    vec![
        JournalEntry {
            id: "demo-journal-1".to_string(),
            pet_name: "Buddy".to_string(),
            title: "Limping after the park".to_string(),
            content: "Favoring the front left paw after fetch. Resting tonight.".to_string(),
            mood: Some("tired".to_string()),
            created_at: now - Duration::days(1),
        },
        JournalEntry {
            id: "demo-journal-2".to_string(),
            pet_name: "Luna".to_string(),
            title: "New food".to_string(),
            content: "Switched to the salmon formula. No stomach issues so far.".to_string(),
            mood: Some("happy".to_string()),
            created_at: now - Duration::hours(5),
        },
    ]
}

fn starter_reminders(now: DateTime<Utc>) -> Vec<Reminder> {
    vec![
        Reminder {
            id: "demo-reminder-1".to_string(),
            pet_name: "Buddy".to_string(),
            title: "Flea and tick treatment".to_string(),
            due_at: now + Duration::days(3),
            completed: false,
        },
        Reminder {
            id: "demo-reminder-2".to_string(),
            pet_name: "Luna".to_string(),
            title: "Annual checkup".to_string(),
            due_at: now + Duration::days(14),
            completed: false,
        },
    ]
}
