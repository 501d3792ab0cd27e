//! Process-wide upload task registry.
//!
//! Maps record ids to the current progress percent of their in-flight
//! transfer. Written exclusively by the orchestrator invocation that owns a
//! given record id; read by presentation code. Nothing is persisted and no
//! iteration is exposed, so readers can never race a concurrent writer over
//! anything but a single key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Cloneable handle to the shared progress map. An entry exists only while
/// the owning orchestrator invocation is in flight and is removed
/// unconditionally when it settles.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    inner: Arc<Mutex<HashMap<Uuid, u8>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the progress percent for a record's task.
    pub fn set_progress(&self, record_id: Uuid, percent: u8) {
        let mut map = self.inner.lock().expect("task registry poisoned");
        map.insert(record_id, percent.min(100));
    }

    /// Current progress for a record, or `None` when no task is in flight.
    pub fn progress(&self, record_id: Uuid) -> Option<u8> {
        let map = self.inner.lock().expect("task registry poisoned");
        map.get(&record_id).copied()
    }

    /// Whether a task is currently registered for the record.
    pub fn contains(&self, record_id: Uuid) -> bool {
        let map = self.inner.lock().expect("task registry poisoned");
        map.contains_key(&record_id)
    }

    /// Atomically register a new task at 0% unless one is already in flight.
    /// Returns false when the record already has an entry, which the
    /// orchestrator surfaces as a precondition failure.
    pub fn claim(&self, record_id: Uuid) -> bool {
        let mut map = self.inner.lock().expect("task registry poisoned");
        if map.contains_key(&record_id) {
            return false;
        }
        map.insert(record_id, 0);
        true
    }

    /// Remove the record's entry, if any.
    pub fn clear(&self, record_id: Uuid) {
        let mut map = self.inner.lock().expect("task registry poisoned");
        map.remove(&record_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_roundtrip() {
        let registry = TaskRegistry::new();
        let id = Uuid::new_v4();

        assert_eq!(registry.progress(id), None);
        registry.set_progress(id, 40);
        assert_eq!(registry.progress(id), Some(40));
        registry.set_progress(id, 85);
        assert_eq!(registry.progress(id), Some(85));
        registry.clear(id);
        assert_eq!(registry.progress(id), None);
    }

    #[test]
    fn percent_is_capped_at_100() {
        let registry = TaskRegistry::new();
        let id = Uuid::new_v4();
        registry.set_progress(id, 250);
        assert_eq!(registry.progress(id), Some(100));
    }

    #[test]
    fn claim_refuses_second_task_for_same_record() {
        let registry = TaskRegistry::new();
        let id = Uuid::new_v4();

        assert!(registry.claim(id));
        assert_eq!(registry.progress(id), Some(0));
        assert!(!registry.claim(id));

        registry.clear(id);
        assert!(registry.claim(id));
    }

    #[test]
    fn keys_are_independent() {
        let registry = TaskRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.set_progress(a, 10);
        registry.set_progress(b, 90);
        assert_eq!(registry.progress(a), Some(10));
        assert_eq!(registry.progress(b), Some(90));

        registry.clear(a);
        assert_eq!(registry.progress(a), None);
        assert_eq!(registry.progress(b), Some(90));
    }

    #[test]
    fn clones_share_state() {
        let registry = TaskRegistry::new();
        let view = registry.clone();
        let id = Uuid::new_v4();

        registry.set_progress(id, 55);
        assert_eq!(view.progress(id), Some(55));
    }
}
