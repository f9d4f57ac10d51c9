//! Request, response and record models
//!
//! DTOs for the demo HTTP surface plus the typed records the demo
//! dashboard keeps in its cached collections.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{ActivityType, JournalEntry, QuickLog, Reminder};
pub use requests::{AddItemRequest, SetRequest};
pub use responses::{
    CollectionResponse, GetResponse, HealthResponse, KeysResponse, MessageResponse,
    StatsResponse, TtlResponse,
};
