//! The "system getaddrinfo-style resolver" that the hosts adapter (component
//! I) calls into (spec §4.I: `ai_socktype=STREAM, ai_flags=ADDRCONFIG`).

use std::net::IpAddr;

use crate::error::{Error, Result};

pub trait HostsLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Result<Vec<IpAddr>>;
}

/// Backed by the `dns-lookup` crate's `getaddrinfo`, filtering zero
/// addresses as spec §4.I requires.
pub struct DnsLookupHosts;

impl HostsLookup for DnsLookupHosts {
    fn lookup(&self, name: &str) -> Result<Vec<IpAddr>> {
        use dns_lookup::{AddrInfoHints, getaddrinfo};

        // SOCK_STREAM and AI_ADDRCONFIG per the POSIX getaddrinfo ABI that
        // `dns-lookup::AddrInfoHints` is a thin wrapper over.
        const SOCK_STREAM: i32 = 1;
        const AI_ADDRCONFIG: i32 = 0x0020;

        let hints = AddrInfoHints { socktype: SOCK_STREAM, address_family: 0, protocol: 0, flags: AI_ADDRCONFIG };

        let results: Vec<IpAddr> = getaddrinfo(Some(name), None, Some(hints))
            .map_err(Error::Io)?
            .filter_map(|r| r.ok())
            .map(|info| info.sockaddr.ip())
            .filter(|ip| !ip.is_unspecified())
            .collect();

        if results.is_empty() { Err(Error::NotFound) } else { Ok(results) }
    }
}

/// Test double returning a fixed map of name -> addresses.
#[derive(Default, Clone)]
pub struct StaticHosts {
    pub entries: std::collections::HashMap<String, Vec<IpAddr>>,
}

impl HostsLookup for StaticHosts {
    fn lookup(&self, name: &str) -> Result<Vec<IpAddr>> {
        self.entries.get(name).cloned().filter(|v| !v.is_empty()).ok_or(Error::NotFound)
    }
}
