//! The generic expiring key/value cache contract (spec §6 "gencache") and
//! the negative-connection cache. Both are collaborators named only by
//! their interface in spec.md; this module provides the in-memory
//! implementation this crate ships for tests and the demo binary.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// `cache.set/get/del` (spec §6).
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration);
    fn del(&self, key: &str);
}

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-memory `Cache` backed by a `HashMap` guarded by a mutex. Not meant to
/// survive process restarts; production embedders supply their own
/// `gencache`-backed implementation.
#[derive(Default)]
pub struct MemCache {
    entries: std::sync::Mutex<HashMap<String, Entry>>,
}

impl MemCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(e) if e.expires_at > Instant::now() => Some(e.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        self.entries.lock().unwrap().insert(key.to_string(), Entry { value, expires_at: Instant::now() + ttl });
    }

    fn del(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// `negcache.check(domain, addr) -> ok | bad` (spec §6). Always "ok" by
/// default; a real deployment plugs in the collaborator that records DCs
/// known to be unreachable.
pub trait NegativeCache: Send + Sync {
    fn is_bad(&self, domain: &str, addr: &str) -> bool;
}

#[derive(Default)]
pub struct MemNegativeCache {
    bad: std::sync::Mutex<std::collections::HashSet<(String, String)>>,
}

impl MemNegativeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_bad(&self, domain: &str, addr: &str) {
        self.bad.lock().unwrap().insert((domain.to_string(), addr.to_string()));
    }
}

impl NegativeCache for MemNegativeCache {
    fn is_bad(&self, domain: &str, addr: &str) -> bool {
        self.bad.lock().unwrap().contains(&(domain.to_string(), addr.to_string()))
    }
}
