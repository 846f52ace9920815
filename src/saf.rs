//! Server affinity (SAF): a short-lived preference for the last domain
//! controller that answered successfully for a domain (spec GLOSSARY,
//! §4.J.1). Two keyspaces share one underlying [`Cache`](crate::cache::Cache):
//! `SAF/DOMAIN/<domain>` (15-minute TTL, the ordinary preference) and
//! `SAFJOIN/DOMAIN/<domain>` (1-hour TTL, set by a domain join and checked
//! first on fetch).

use std::time::Duration;

use crate::cache::Cache;

const SAF_TTL: Duration = Duration::from_secs(900);
const SAFJOIN_TTL: Duration = Duration::from_secs(3600);

fn saf_key(domain: &str) -> String {
    format!("SAF/DOMAIN/{}", domain.to_ascii_uppercase())
}

fn saf_join_key(domain: &str) -> String {
    format!("SAFJOIN/DOMAIN/{}", domain.to_ascii_uppercase())
}

/// Record `server` as the last domain controller to answer for `domain`.
/// Refuses to store an empty domain or server name.
pub fn saf_store(cache: &dyn Cache, domain: &str, server: &str) -> bool {
    if domain.is_empty() || server.is_empty() {
        return false;
    }
    cache.set(&saf_key(domain), server.as_bytes().to_vec(), SAF_TTL);
    true
}

/// As [`saf_store`], but under the longer-lived join keyspace checked first
/// by [`saf_fetch`].
pub fn saf_join_store(cache: &dyn Cache, domain: &str, server: &str) -> bool {
    if domain.is_empty() || server.is_empty() {
        return false;
    }
    cache.set(&saf_join_key(domain), server.as_bytes().to_vec(), SAFJOIN_TTL);
    true
}

/// Checks the join keyspace first, falling back to the ordinary one.
pub fn saf_fetch(cache: &dyn Cache, domain: &str) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    cache
        .get(&saf_join_key(domain))
        .or_else(|| cache.get(&saf_key(domain)))
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Removes both keyspace entries for `domain`.
pub fn saf_delete(cache: &dyn Cache, domain: &str) {
    cache.del(&saf_join_key(domain));
    cache.del(&saf_key(domain));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemCache;

    #[test]
    fn fetch_prefers_join_keyspace_over_plain() {
        let cache = MemCache::new();
        saf_store(&cache, "EXAMPLE", "dc1.example.com");
        saf_join_store(&cache, "EXAMPLE", "dc2.example.com");
        assert_eq!(saf_fetch(&cache, "EXAMPLE"), Some("dc2.example.com".to_string()));
    }

    #[test]
    fn fetch_falls_back_to_plain_keyspace() {
        let cache = MemCache::new();
        saf_store(&cache, "EXAMPLE", "dc1.example.com");
        assert_eq!(saf_fetch(&cache, "EXAMPLE"), Some("dc1.example.com".to_string()));
    }

    #[test]
    fn delete_clears_both_keyspaces() {
        let cache = MemCache::new();
        saf_store(&cache, "EXAMPLE", "dc1.example.com");
        saf_join_store(&cache, "EXAMPLE", "dc2.example.com");
        saf_delete(&cache, "EXAMPLE");
        assert_eq!(saf_fetch(&cache, "EXAMPLE"), None);
    }

    #[test]
    fn refuses_empty_domain_or_server() {
        let cache = MemCache::new();
        assert!(!saf_store(&cache, "", "dc1"));
        assert!(!saf_store(&cache, "EXAMPLE", ""));
    }
}
