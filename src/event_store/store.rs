//! Event Store - in-memory log of received SMS events
//!
//! The store keeps every ingested event in arrival order plus a cached
//! reference to the most recent one. Both live behind one lock so readers
//! never observe `latest` ahead of `all`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{IngestError, SmsEvent};
use crate::utils::current_utc_time;

#[derive(Debug, Default)]
struct StoreState {
    events: Vec<Arc<SmsEvent>>,
    latest: Option<Arc<SmsEvent>>,
}

/// Thread-safe append-only store of ingested events
#[derive(Debug, Default)]
pub struct EventStore {
    state: Mutex<StoreState>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, stamp and append a raw payload.
    ///
    /// On failure nothing is appended.
    pub fn ingest(&self, body: &[u8]) -> Result<Arc<SmsEvent>, IngestError> {
        self.ingest_then(body, |_| ()).map(|(event, ())| event)
    }

    /// Like [`ingest`](Self::ingest), running `on_append` while the store is
    /// still locked.
    ///
    /// Concurrent ingestions therefore reach `on_append` in the same order
    /// they appear in [`all`](Self::all). `on_append` may take the subscriber
    /// registry lock; it must never call back into the store.
    pub fn ingest_then<F, R>(
        &self,
        body: &[u8],
        on_append: F,
    ) -> Result<(Arc<SmsEvent>, R), IngestError>
    where
        F: FnOnce(&Arc<SmsEvent>) -> R,
    {
        let event = Arc::new(SmsEvent::parse(body, current_utc_time())?);

        let mut state = self.state.lock();
        state.latest = Some(Arc::clone(&event));
        state.events.push(Arc::clone(&event));
        let result = on_append(&event);
        drop(state);

        Ok((event, result))
    }

    /// Most recent event, if any
    pub fn latest(&self) -> Option<Arc<SmsEvent>> {
        self.state.lock().latest.clone()
    }

    /// Snapshot of every event in ingestion order
    pub fn all(&self) -> Vec<Arc<SmsEvent>> {
        self.state.lock().events.clone()
    }

    /// Number of ingested events
    pub fn count(&self) -> usize {
        self.state.lock().events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_store() {
        let store = EventStore::new();
        assert!(store.latest().is_none());
        assert!(store.all().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_ingest_appends_and_updates_latest() {
        let store = EventStore::new();
        store.ingest(br#"{"sender":"a","message":"1"}"#).unwrap();
        let second = store.ingest(br#"{"sender":"b","message":"2"}"#).unwrap();

        assert_eq!(store.count(), 2);
        assert_eq!(store.latest().unwrap(), second);

        let all = store.all();
        assert_eq!(all[0].sender(), "a");
        assert_eq!(all[1].sender(), "b");
    }

    #[test]
    fn test_rejected_payload_not_appended() {
        let store = EventStore::new();
        assert!(store.ingest(br#"{"sender":"x"}"#).is_err());
        assert!(store.ingest(b"nope").is_err());

        assert_eq!(store.count(), 0);
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_ingest_then_runs_once_on_success_only() {
        let store = EventStore::new();
        let mut calls = 0;

        let (event, seen) = store
            .ingest_then(br#"{"sender":"a","message":"1"}"#, |e| {
                calls += 1;
                Arc::clone(e)
            })
            .unwrap();
        assert!(Arc::ptr_eq(&event, &seen));

        assert!(store.ingest_then(br#"{"message":"1"}"#, |_| calls += 1).is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_latest_always_present_in_all() {
        let store = Arc::new(EventStore::new());

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..200 {
                        let body = format!(r#"{{"sender":"w{}","message":"{}"}}"#, w, i);
                        store.ingest(body.as_bytes()).unwrap();
                    }
                })
            })
            .collect();

        for _ in 0..500 {
            let latest = store.latest();
            let all = store.all();
            if let Some(latest) = latest {
                assert!(all.iter().any(|e| Arc::ptr_eq(e, &latest)));
            }
        }

        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(store.count(), 800);
        assert!(Arc::ptr_eq(&store.latest().unwrap(), store.all().last().unwrap()));
    }
}
