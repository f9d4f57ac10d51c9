//! Collection Module
//!
//! Array-CRUD helpers over a cache entry that holds an ordered list of
//! records, each identified by an `id`.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::cache::DemoCache;

/// A record stored in a [`Collection`].
pub trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

/// Untyped JSON objects, as received over HTTP. A missing or non-string
/// `id` reads as the empty string.
impl Record for Map<String, Value> {
    fn id(&self) -> &str {
        self.get("id").and_then(Value::as_str).unwrap_or_default()
    }
}

// == Collection ==
/// View of one cache key as an ordered list of `T`.
///
/// Every mutation writes the whole list back through [`DemoCache::set`],
/// which restarts the TTL for the entire collection, and returns the list
/// as written.
pub struct Collection<'a, T> {
    cache: &'a mut DemoCache,
    key: String,
    _record: PhantomData<T>,
}

impl DemoCache {
    /// Opens `key` as a collection of `T`.
    pub fn collection<T: Record>(&mut self, key: &str) -> Collection<'_, T> {
        Collection {
            cache: self,
            key: key.to_string(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<'_, T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current items, empty when the entry is absent.
    ///
    /// An entry that is not a list of `T` also reads as empty, but is left
    /// in place: it may be valid data stored under the key by other code.
    pub fn items(&mut self) -> Vec<T> {
        let Some(data) = self.cache.get::<Value>(&self.key) else {
            return Vec::new();
        };

        match serde_json::from_value(data) {
            Ok(items) => items,
            Err(e) => {
                warn!("Entry '{}' is not a collection: {}", self.key, e);
                Vec::new()
            }
        }
    }

    // == Add ==
    /// Appends `item` to the end of the list.
    pub fn add_item(&mut self, item: T) -> Vec<T> {
        let mut items = self.items();
        items.push(item);
        self.write(items)
    }

    // == Update ==
    /// Shallow-merges the fields of `patch` into the item whose id is `id`.
    ///
    /// `patch` must serialize to a JSON object. Items with other ids pass
    /// through untouched and order is preserved. A merge that no longer
    /// decodes as `T` leaves that item unchanged.
    pub fn update_item<P: Serialize + ?Sized>(&mut self, id: &str, patch: &P) -> Vec<T> {
        let fields = match serde_json::to_value(patch) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                warn!("Ignoring non-object patch for '{}' in '{}': {}", id, self.key, other);
                return self.items();
            }
            Err(e) => {
                warn!("Failed to serialize patch for '{}' in '{}': {}", id, self.key, e);
                return self.items();
            }
        };

        let items = self
            .items()
            .into_iter()
            .map(|item| {
                if item.id() == id {
                    merge_fields(item, &fields)
                } else {
                    item
                }
            })
            .collect();
        self.write(items)
    }

    // == Remove ==
    /// Drops the item whose id is `id`.
    pub fn remove_item(&mut self, id: &str) -> Vec<T> {
        let items = self.items().into_iter().filter(|item| item.id() != id).collect();
        self.write(items)
    }

    // == Clear ==
    /// Writes back an empty list.
    pub fn clear_all(&mut self) -> Vec<T> {
        self.write(Vec::new())
    }

    fn write(&mut self, items: Vec<T>) -> Vec<T> {
        self.cache.set(&self.key, &items);
        items
    }
}

fn merge_fields<T: Record>(item: T, patch: &Map<String, Value>) -> T {
    let mut fields = match serde_json::to_value(&item) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) | Err(_) => {
            warn!("Record '{}' is not a JSON object, skipping update", item.id());
            return item;
        }
    };

    for (name, value) in patch {
        fields.insert(name.clone(), value.clone());
    }

    match serde_json::from_value(Value::Object(fields)) {
        Ok(merged) => merged,
        Err(e) => {
            warn!("Update for '{}' does not fit the record shape: {}", item.id(), e);
            item
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStorage, DEMO_TTL_MS};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Log {
        id: String,
        pet_name: String,
        activity_type: String,
    }

    impl Record for Log {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn log(id: &str, pet: &str, activity: &str) -> Log {
        Log {
            id: id.to_string(),
            pet_name: pet.to_string(),
            activity_type: activity.to_string(),
        }
    }

    fn demo_cache() -> (DemoCache, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        (DemoCache::in_browser(MemoryStorage::new(), clock.clone()), clock)
    }

    #[test]
    fn test_add_then_remove_quick_log() {
        let (mut cache, _) = demo_cache();
        cache.set("quick-logs", &Vec::<Log>::new());

        let mut logs = cache.collection::<Log>("quick-logs");
        let after_add = logs.add_item(log("log-1", "Buddy", "feeding"));
        assert_eq!(after_add, vec![log("log-1", "Buddy", "feeding")]);
        assert_eq!(logs.items(), after_add);

        let after_remove = logs.remove_item("log-1");
        assert!(after_remove.is_empty());
        assert!(logs.items().is_empty());
    }

    #[test]
    fn test_add_to_absent_collection() {
        let (mut cache, _) = demo_cache();
        let items = cache.collection::<Log>("fresh").add_item(log("a", "Milo", "walk"));

        assert_eq!(items.len(), 1);
        assert!(cache.has_key("fresh"));
    }

    #[test]
    fn test_update_merges_and_preserves_order() {
        let (mut cache, _) = demo_cache();
        let mut logs = cache.collection::<Log>("quick-logs");
        logs.add_item(log("a", "Buddy", "feeding"));
        logs.add_item(log("b", "Milo", "walk"));
        logs.add_item(log("c", "Luna", "play"));

        let items = logs.update_item("b", &json!({"activityType": "grooming"}));

        assert_eq!(
            items,
            vec![
                log("a", "Buddy", "feeding"),
                log("b", "Milo", "grooming"),
                log("c", "Luna", "play"),
            ]
        );
        assert_eq!(logs.items(), items);
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let (mut cache, _) = demo_cache();
        let mut logs = cache.collection::<Log>("quick-logs");
        logs.add_item(log("a", "Buddy", "feeding"));

        let items = logs.update_item("zzz", &json!({"petName": "Ghost"}));
        assert_eq!(items, vec![log("a", "Buddy", "feeding")]);
    }

    #[test]
    fn test_update_with_bad_shape_keeps_item() {
        let (mut cache, _) = demo_cache();
        let mut logs = cache.collection::<Log>("quick-logs");
        logs.add_item(log("a", "Buddy", "feeding"));

        let items = logs.update_item("a", &json!({"petName": 42}));
        assert_eq!(items, vec![log("a", "Buddy", "feeding")]);

        let items = logs.update_item("a", &json!(["not", "an", "object"]));
        assert_eq!(items, vec![log("a", "Buddy", "feeding")]);
    }

    #[test]
    fn test_remove_preserves_remaining_order() {
        let (mut cache, _) = demo_cache();
        let mut logs = cache.collection::<Log>("quick-logs");
        for id in ["a", "b", "c", "d"] {
            logs.add_item(log(id, "Buddy", "walk"));
        }

        let ids: Vec<String> = logs.remove_item("b").into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_clear_all_writes_empty_list() {
        let (mut cache, _) = demo_cache();
        let mut logs = cache.collection::<Log>("quick-logs");
        logs.add_item(log("a", "Buddy", "walk"));

        assert!(logs.clear_all().is_empty());
        assert!(cache.has_key("quick-logs"), "Cleared collection is an empty list, not absent");
    }

    #[test]
    fn test_mutation_resets_collection_ttl() {
        let (mut cache, clock) = demo_cache();
        cache.collection::<Log>("quick-logs").add_item(log("a", "Buddy", "walk"));

        clock.advance(DEMO_TTL_MS - 60_000);
        assert_eq!(cache.time_remaining("quick-logs"), 1);

        cache.collection::<Log>("quick-logs").add_item(log("b", "Milo", "walk"));
        assert_eq!(cache.time_remaining("quick-logs"), 30);
    }

    #[test]
    fn test_json_map_records() {
        let (mut cache, _) = demo_cache();
        let mut items = cache.collection::<Map<String, Value>>("reminders");

        let reminder = json!({"id": "r-1", "title": "Flea treatment", "completed": false});
        let Value::Object(reminder) = reminder else { unreachable!() };
        items.add_item(reminder);

        let updated = items.update_item("r-1", &json!({"completed": true}));
        assert_eq!(updated[0]["completed"], json!(true));
        assert_eq!(updated[0].id(), "r-1");
    }

    #[test]
    fn test_reading_non_list_entry_leaves_it_intact() {
        let (mut cache, _) = demo_cache();
        cache.set("profile", &json!({"name": "Buddy"}));

        assert!(cache.collection::<Map<String, Value>>("profile").items().is_empty());
        assert_eq!(cache.get::<Value>("profile"), Some(json!({"name": "Buddy"})));
        assert_eq!(cache.stats().corrupted, 0);
    }
}
