//! Shared helpers for client integration tests

#![allow(dead_code)]

use fitrack_core::{CoreError, CoreResult, KeyValueStore, MemoryStore};
use fitrack_http::{AuthService, FitrackClient, SessionExpiredHandler};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how often the client reported an expired session
#[derive(Default)]
pub struct ExpiryCounter(AtomicUsize);

impl ExpiryCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl SessionExpiredHandler for ExpiryCounter {
    fn on_session_expired(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Memory store that refuses writes to one key
pub struct RejectingStore {
    pub inner: MemoryStore,
    rejected: &'static str,
}

impl RejectingStore {
    pub fn new(rejected: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            rejected,
        }
    }
}

impl KeyValueStore for RejectingStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        if key == self.rejected {
            return Err(CoreError::storage("quota exceeded"));
        }
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> CoreResult<()> {
        self.inner.delete(key)
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub expiries: Arc<ExpiryCounter>,
    pub client: FitrackClient,
    pub auth: AuthService,
}

pub fn harness(base_url: &str) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let expiries = Arc::new(ExpiryCounter::default());

    let client = FitrackClient::builder()
        .base_url(base_url)
        .store(store.clone() as Arc<dyn KeyValueStore>)
        .on_session_expired(expiries.clone())
        .build()
        .unwrap();

    Harness {
        store,
        expiries,
        auth: AuthService::new(client.clone()),
        client,
    }
}
