//! The `config.*` / `lp_*` collaborator contract (spec §6). Out of scope to
//! implement against a real config store; this crate ships the trait plus a
//! plain-struct implementation for tests and the demo binary.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

pub trait ResolverConfig: Send + Sync {
    fn name_resolve_order(&self) -> Vec<String>;
    fn nbt_disabled(&self) -> bool;
    fn wins_servers_by_tag(&self) -> HashMap<String, Vec<Ipv4Addr>>;
    fn workgroup(&self) -> String;
    fn realm(&self) -> String;
    fn password_server(&self) -> String;
    fn nbt_client_socket_address(&self) -> IpAddr;
    /// `security = ADS` in the configured security mode (spec §4.J
    /// `get_pdc_ip`: tries the `[ads]` order first when true).
    fn security_is_ads(&self) -> bool;
    /// Caller-supplied capacity bound on a single resolution's result set
    /// (spec §3 "Ownership"; `None` is unbounded). Exceeding it surfaces
    /// `Error::OutOfMemory` instead of growing without limit.
    fn max_result_entries(&self) -> Option<usize> {
        None
    }
}

/// In-tree `ResolverConfig` used by tests and `nbtresolve-demo`.
#[derive(Debug, Clone)]
pub struct StaticResolverConfig {
    pub resolve_order: Vec<String>,
    pub nbt_disabled: bool,
    pub wins_servers: HashMap<String, Vec<Ipv4Addr>>,
    pub workgroup: String,
    pub realm: String,
    pub password_server: String,
    pub nbt_client_socket_address: IpAddr,
    pub security_is_ads: bool,
    pub max_result_entries: Option<usize>,
}

impl Default for StaticResolverConfig {
    fn default() -> Self {
        Self {
            resolve_order: vec!["host".into(), "lmhosts".into(), "wins".into(), "bcast".into()],
            nbt_disabled: false,
            wins_servers: HashMap::new(),
            workgroup: "WORKGROUP".into(),
            realm: String::new(),
            password_server: "*".into(),
            nbt_client_socket_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            security_is_ads: false,
            max_result_entries: None,
        }
    }
}

impl ResolverConfig for StaticResolverConfig {
    fn name_resolve_order(&self) -> Vec<String> {
        self.resolve_order.clone()
    }

    fn nbt_disabled(&self) -> bool {
        self.nbt_disabled
    }

    fn wins_servers_by_tag(&self) -> HashMap<String, Vec<Ipv4Addr>> {
        self.wins_servers.clone()
    }

    fn workgroup(&self) -> String {
        self.workgroup.clone()
    }

    fn realm(&self) -> String {
        self.realm.clone()
    }

    fn password_server(&self) -> String {
        self.password_server.clone()
    }

    fn nbt_client_socket_address(&self) -> IpAddr {
        self.nbt_client_socket_address
    }

    fn security_is_ads(&self) -> bool {
        self.security_is_ads
    }

    fn max_result_entries(&self) -> Option<usize> {
        self.max_result_entries
    }
}
