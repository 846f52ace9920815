//! Component J: the orchestrator (spec §4.J). `Resolver` bundles every
//! collaborator and drives `internal_resolve_name` plus its higher-level
//! facades (`resolve_name`, `find_master_ip`, `get_pdc_ip`, `get_dc_list`,
//! `get_sorted_dc_list`, `get_kdc_list`).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use log::warn;

use crate::adapters;
use crate::broadcast;
use crate::cache::{Cache, NegativeCache};
use crate::config::ResolverConfig;
use crate::dispatcher::PacketDispatcher;
use crate::dns_srv::DnsSrv;
use crate::error::{Error, Result};
use crate::hosts::HostsLookup;
use crate::iface::Interfaces;
use crate::lmhosts::LmhostsSource;
use crate::name::{IpService, NameType, KDC_NAME_TYPE, PORT_NONE, SUFFIX_DOMAIN_CONTROLLERS, SUFFIX_MASTER_BROWSER, SUFFIX_PDC};
use crate::name_query::NameQueryResult;
use crate::ranking;
use crate::saf;
use crate::wins::{self, WinsDeadMap, WinsTag};

const NAME_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default port for an unqualified `DC_ADS_ONLY` DC-list token (the
/// original's `LDAP_PORT`).
const LDAP_PORT: u16 = 389;
/// Default (and, for `DC_KDC_ONLY`, forced) port for a DC-list token (the
/// original's `DEFAULT_KRB5_PORT`).
const DEFAULT_KRB5_PORT: u16 = 88;

/// Which server list a DC lookup should restrict itself to (spec §4.J.1
/// "Lookup-type policy").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcLookupType {
    Default,
    AdsOnly,
    KdcOnly,
}

pub struct DcListResult {
    pub services: Vec<IpService>,
    pub ordered: bool,
}

/// Bundles every spec §6 collaborator the orchestrator needs. Each field is
/// a trait object so tests can swap in fakes.
pub struct Resolver<'a> {
    pub cache: &'a dyn Cache,
    pub negcache: &'a dyn NegativeCache,
    pub interfaces: &'a dyn Interfaces,
    pub dns: &'a dyn DnsSrv,
    pub hosts: &'a dyn HostsLookup,
    pub lmhosts: &'a dyn LmhostsSource,
    pub config: &'a dyn ResolverConfig,
    pub dispatcher: &'a dyn PacketDispatcher,
    pub wins_dead_map: &'a dyn WinsDeadMap,
}

fn cache_key(label: &str, name_type: NameType) -> String {
    format!("{}<{:04x}>", label.to_ascii_uppercase(), name_type)
}

fn encode_services(services: &[IpService]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + services.len() * 19);
    out.extend_from_slice(&(services.len() as u16).to_be_bytes());
    for s in services {
        match s.addr {
            IpAddr::V4(a) => {
                out.push(4);
                out.extend_from_slice(&a.octets());
            }
            IpAddr::V6(a) => {
                out.push(6);
                out.extend_from_slice(&a.octets());
            }
        }
        out.extend_from_slice(&s.port.to_be_bytes());
    }
    out
}

fn decode_services(bytes: &[u8]) -> Option<Vec<IpService>> {
    if bytes.len() < 2 {
        return None;
    }
    let count = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let mut pos = 2;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let fam = *bytes.get(pos)?;
        pos += 1;
        let addr = match fam {
            4 => {
                if bytes.len() < pos + 4 {
                    return None;
                }
                let a = Ipv4Addr::new(bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]);
                pos += 4;
                IpAddr::V4(a)
            }
            6 => {
                if bytes.len() < pos + 16 {
                    return None;
                }
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&bytes[pos..pos + 16]);
                pos += 16;
                IpAddr::V6(Ipv6Addr::from(octets))
            }
            _ => return None,
        };
        if bytes.len() < pos + 2 {
            return None;
        }
        let port = u16::from_be_bytes([bytes[pos], bytes[pos + 1]]);
        pos += 2;
        out.push(IpService::new(addr, port));
    }
    Some(out)
}

impl<'a> Resolver<'a> {
    /// `internal_resolve_name` (spec §4.J).
    pub async fn resolve(&self, name: &str, name_type: NameType, sitename: Option<&str>, resolve_order: &[String]) -> Result<Vec<IpService>> {
        if let Ok(addr) = name.parse::<IpAddr>() {
            if addr.is_unspecified() {
                return Err(Error::InvalidAddress);
            }
            return Ok(vec![IpService::no_port(addr)]);
        }

        let key = cache_key(name, name_type);
        if let Some(bytes) = self.cache.get(&key) {
            return match decode_services(&bytes) {
                Some(services) if services.is_empty() => Err(Error::NotFound),
                Some(services) => Ok(services),
                None => Err(Error::NotFound),
            };
        }

        if resolve_order.first().map(String::as_str) == Some("NULL") {
            return Err(Error::InvalidParameter("resolve order is NULL".into()));
        }

        let mut order: Vec<String> = resolve_order.to_vec();
        if name.len() > 15 || name.contains('.') {
            order.retain(|m| !matches!(m.to_ascii_lowercase().as_str(), "lmhosts" | "wins" | "bcast"));
        }

        for method in &order {
            let lower = method.to_ascii_lowercase();
            let (attempt, cache_type) = match lower.as_str() {
                "host" | "hosts" => (adapters::hosts_adapter(name, name_type, self.hosts), name_type),
                "lmhosts" => (adapters::lmhosts_adapter(name, name_type, self.lmhosts), name_type),
                "ads" => (adapters::ads_adapter(name, name_type, sitename, self.dns, self.hosts), name_type),
                "kdc" => (adapters::ads_adapter(name, KDC_NAME_TYPE, sitename, self.dns, self.hosts), KDC_NAME_TYPE),
                "wins" => {
                    if name_type == SUFFIX_MASTER_BROWSER as NameType {
                        continue;
                    }
                    (self.wins(name, name_type).await, name_type)
                }
                "bcast" => (self.bcast(name, name_type).await, name_type),
                other => {
                    warn!("resolve order names unrecognised method {other:?}");
                    continue;
                }
            };

            match attempt {
                Ok(mut services) if !services.is_empty() => {
                    ranking::dedup(&mut services);
                    if let Some(max) = self.config.max_result_entries() {
                        if services.len() > max {
                            return Err(Error::OutOfMemory);
                        }
                    }
                    self.cache.set(&cache_key(name, cache_type), encode_services(&services), NAME_CACHE_TTL);
                    return Ok(services);
                }
                _ => continue,
            }
        }

        self.cache.set(&key, encode_services(&[]), NAME_CACHE_TTL);
        Err(Error::NotFound)
    }

    async fn wins(&self, label: &str, name_type: NameType) -> Result<Vec<IpService>> {
        let src_addr = self.config.nbt_client_socket_address();
        let tags: Vec<WinsTag> = self
            .config
            .wins_servers_by_tag()
            .into_iter()
            .map(|(name, servers)| WinsTag { name, servers })
            .collect();
        let name = crate::name::NbtName::new(label, name_type as u8);
        let result = wins::wins_resolve(&name, src_addr, &tags, None, self.wins_dead_map, self.dispatcher).await?;
        Ok(name_query_result_to_services(result))
    }

    async fn bcast(&self, label: &str, name_type: NameType) -> Result<Vec<IpService>> {
        let name = crate::name::NbtName::new(label, name_type as u8);
        let result = broadcast::broadcast_resolve(&name, self.config.nbt_disabled(), self.interfaces, self.dispatcher).await?;
        Ok(name_query_result_to_services(result))
    }

    /// `resolve_name(name, type, prefer_ipv4)`.
    pub async fn resolve_name(&self, name: &str, name_type: NameType, prefer_ipv4: bool, resolve_order: &[String]) -> Result<IpService> {
        let services = self.resolve(name, name_type, None, resolve_order).await?;
        if prefer_ipv4 {
            services
                .into_iter()
                .find(|s| matches!(s.addr, IpAddr::V4(a) if !a.is_unspecified() && !a.is_broadcast()))
                .ok_or(Error::NotFound)
        } else {
            services.into_iter().next().ok_or(Error::NotFound)
        }
    }

    /// `find_master_ip(group)`: tries the master-browser suffix then PDC.
    pub async fn find_master_ip(&self, group: &str, resolve_order: &[String]) -> Result<IpService> {
        match self.resolve_name(group, SUFFIX_MASTER_BROWSER as NameType, true, resolve_order).await {
            Ok(s) => Ok(s),
            Err(_) => self.resolve_name(group, SUFFIX_PDC as NameType, true, resolve_order).await,
        }
    }

    /// `get_pdc_ip(domain)`.
    pub async fn get_pdc_ip(&self, domain: &str, resolve_order: &[String]) -> Result<IpService> {
        let order: Vec<String> = if self.config.security_is_ads() {
            vec!["ads".to_string()]
        } else {
            resolve_order.to_vec()
        };

        let mut services = match self.resolve(domain, SUFFIX_PDC as NameType, None, &order).await {
            Ok(s) => s,
            Err(_) if self.config.security_is_ads() => self.resolve(domain, SUFFIX_PDC as NameType, None, resolve_order).await?,
            Err(e) => return Err(e),
        };

        if services.len() > 1 {
            ranking::sort_by_proximity(&mut services, self.interfaces);
        }
        services.into_iter().next().ok_or(Error::NotFound)
    }

    /// `get_dc_list(domain, sitename, lookup_type)` — §4.J.1 DC list assembly.
    pub async fn get_dc_list(&self, domain: &str, sitename: Option<&str>, lookup_type: DcLookupType, resolve_order: &[String]) -> Result<DcListResult> {
        let (effective_order, effective_type, mut ordered): (Vec<String>, NameType, bool) = match lookup_type {
            DcLookupType::Default => (resolve_order.to_vec(), SUFFIX_DOMAIN_CONTROLLERS as NameType, false),
            DcLookupType::AdsOnly => {
                if resolve_order.iter().any(|m| m.eq_ignore_ascii_case("host")) {
                    (vec!["ads".to_string()], SUFFIX_DOMAIN_CONTROLLERS as NameType, true)
                } else {
                    (vec!["NULL".to_string()], SUFFIX_DOMAIN_CONTROLLERS as NameType, true)
                }
            }
            DcLookupType::KdcOnly => (vec!["kdc".to_string()], KDC_NAME_TYPE, true),
        };

        let same_realm = domain.eq_ignore_ascii_case(&self.config.workgroup()) || domain.eq_ignore_ascii_case(&self.config.realm());
        let saf_server = saf::saf_fetch(self.cache, domain).unwrap_or_default();
        let second = if same_realm { self.config.password_server() } else { "*".to_string() };
        let candidate = format!("{saf_server}, {second}");

        let mut services = Vec::new();
        for raw_token in candidate.split(|c: char| c == ',' || c.is_whitespace()) {
            let token = raw_token.trim();
            if token.is_empty() {
                continue;
            }

            if token == "*" {
                if let Ok(found) = self.resolve(domain, effective_type, sitename, &effective_order).await {
                    services.extend(found);
                }
                continue;
            }

            ordered = true;
            let (host, port) = match token.rsplit_once(':') {
                Some((h, p)) => (h, p.parse::<u16>().ok()),
                None => (token, None),
            };
            if let Ok(addr) = self.resolve_name(host, 0x20, true, resolve_order).await {
                let default_port = match lookup_type {
                    DcLookupType::AdsOnly => LDAP_PORT,
                    DcLookupType::KdcOnly => DEFAULT_KRB5_PORT,
                    DcLookupType::Default => PORT_NONE,
                };
                // DC_KDC_ONLY ignores any explicit port in the token, per the original.
                let port = if lookup_type == DcLookupType::KdcOnly { default_port } else { port.unwrap_or(default_port) };
                services.push(IpService::new(addr.addr, port));
            }
        }

        services.retain(|s| !self.negcache.is_bad(domain, &s.addr.to_string()));
        ranking::dedup(&mut services);
        if services.iter().any(|s| s.addr.is_ipv4()) && services.iter().any(|s| !s.addr.is_ipv4()) {
            ranking::prioritize_ipv4(&mut services);
        }

        if let Some(max) = self.config.max_result_entries() {
            if services.len() > max {
                return Err(Error::OutOfMemory);
            }
        }

        Ok(DcListResult { services, ordered })
    }

    /// `get_sorted_dc_list`: retries once without `sitename` if the
    /// site-scoped attempt yields nothing, then sorts unordered results.
    pub async fn get_sorted_dc_list(&self, domain: &str, sitename: Option<&str>, lookup_type: DcLookupType, resolve_order: &[String]) -> Result<Vec<IpService>> {
        let mut result = self.get_dc_list(domain, sitename, lookup_type, resolve_order).await?;
        if result.services.is_empty() && sitename.is_some() {
            result = self.get_dc_list(domain, None, lookup_type, resolve_order).await?;
        }

        if !result.ordered {
            ranking::sort_by_proximity(&mut result.services, self.interfaces);
        }

        if result.services.is_empty() {
            return Err(Error::NoLogonServers);
        }
        Ok(result.services)
    }

    /// `get_kdc_list(realm, sitename)`.
    pub async fn get_kdc_list(&self, realm: &str, sitename: Option<&str>, resolve_order: &[String]) -> Result<Vec<IpService>> {
        self.get_sorted_dc_list(realm, sitename, DcLookupType::KdcOnly, resolve_order).await
    }

    /// `resolve_name_list(raw)`: a generic "parse this config string of
    /// servers" helper distinct from `get_dc_list`'s tokenizer — no `*` or
    /// `host:port` handling, just a flat comma/whitespace-separated list of
    /// name-or-address tokens, each resolved independently. Unresolvable
    /// tokens are skipped with a warning rather than failing the whole list.
    pub async fn resolve_name_list(&self, raw: &str, name_type: NameType, resolve_order: &[String]) -> Result<Vec<IpService>> {
        let mut out = Vec::new();
        for token in raw.split(|c: char| c == ',' || c.is_whitespace()) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match self.resolve_name(token, name_type, true, resolve_order).await {
                Ok(service) => out.push(service),
                Err(e) => warn!("resolve_name_list: skipping unresolvable token {token:?}: {e}"),
            }
        }

        ranking::dedup(&mut out);
        if out.is_empty() {
            return Err(Error::NotFound);
        }
        if let Some(max) = self.config.max_result_entries() {
            if out.len() > max {
                return Err(Error::OutOfMemory);
            }
        }
        Ok(out)
    }
}

fn name_query_result_to_services(result: NameQueryResult) -> Vec<IpService> {
    result.addresses.into_iter().map(|a| IpService::no_port(IpAddr::V4(a))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemCache, MemNegativeCache};
    use crate::config::StaticResolverConfig;
    use crate::dispatcher::NullDispatcher;
    use crate::dns_srv::NullDnsSrv;
    use crate::hosts::StaticHosts;
    use crate::iface::FakeInterfaces;
    use crate::lmhosts::StaticLmhosts;
    use crate::wins::MemWinsDeadMap;

    fn fixture<'a>(
        cache: &'a MemCache,
        negcache: &'a MemNegativeCache,
        interfaces: &'a FakeInterfaces,
        hosts: &'a StaticHosts,
        lmhosts: &'a StaticLmhosts,
        config: &'a StaticResolverConfig,
        dead_map: &'a MemWinsDeadMap,
    ) -> Resolver<'a> {
        Resolver {
            cache,
            negcache,
            interfaces,
            dns: &NullDnsSrv,
            hosts,
            lmhosts,
            config,
            dispatcher: &NullDispatcher,
            wins_dead_map: dead_map,
        }
    }

    #[tokio::test]
    async fn literal_ip_short_circuits_without_cache_or_backends() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let result = resolver.resolve("10.0.0.5", 0x20, None, &config.name_resolve_order()).await.unwrap();
        assert_eq!(result, vec![IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))]);
        assert!(cache.get(&cache_key("10.0.0.5", 0x20)).is_none());
    }

    #[tokio::test]
    async fn zero_literal_address_is_rejected() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let result = resolver.resolve("0.0.0.0", 0x20, None, &config.name_resolve_order()).await;
        assert!(matches!(result, Err(Error::InvalidAddress)));
    }

    #[tokio::test]
    async fn cache_hit_short_circuits_backends() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let services = vec![IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)))];
        cache.set(&cache_key("FILESRV", 0x20), encode_services(&services), Duration::from_secs(60));

        let result = resolver.resolve("FILESRV", 0x20, None, &["host".to_string()]).await.unwrap();
        assert_eq!(result, services);
    }

    #[tokio::test]
    async fn negative_cache_hit_returns_not_found_without_backends() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        cache.set(&cache_key("GONE", 0x20), encode_services(&[]), Duration::from_secs(60));
        let result = resolver.resolve("GONE", 0x20, None, &["host".to_string()]).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn null_resolve_order_is_invalid_parameter() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let result = resolver.resolve("FILESRV", 0x20, None, &["NULL".to_string()]).await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn dotted_name_strips_lmhosts_wins_bcast() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let mut hosts = StaticHosts::default();
        hosts.entries.insert("host.example.com".into(), vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))]);
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let order = vec!["lmhosts".to_string(), "host".to_string(), "wins".to_string(), "bcast".to_string()];
        let result = resolver.resolve("host.example.com", 0x20, None, &order).await.unwrap();
        assert_eq!(result, vec![IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))]);
    }

    #[tokio::test]
    async fn kdc_hit_is_cached_under_synthetic_type_not_original() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();

        let dns = crate::dns_srv::StaticDnsSrv {
            records: vec![crate::dns_srv::SrvRecord {
                priority: 0,
                weight: 0,
                target: crate::dns_srv::SrvTarget::Resolved(vec![IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 5, 5, 5)))]),
            }],
        };

        let resolver = Resolver {
            cache: &cache,
            negcache: &negcache,
            interfaces: &interfaces,
            dns: &dns,
            hosts: &hosts,
            lmhosts: &lmhosts,
            config: &config,
            dispatcher: &NullDispatcher,
            wins_dead_map: &dead_map,
        };

        let result = resolver.resolve("EXAMPLE.COM", SUFFIX_DOMAIN_CONTROLLERS as NameType, None, &["kdc".to_string()]).await.unwrap();
        assert_eq!(result, vec![IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 5, 5, 5)))]);

        assert!(cache.get(&cache_key("EXAMPLE.COM", SUFFIX_DOMAIN_CONTROLLERS as NameType)).is_none());
        assert!(cache.get(&cache_key("EXAMPLE.COM", KDC_NAME_TYPE)).is_some());
    }

    #[tokio::test]
    async fn result_set_over_the_configured_bound_is_out_of_memory() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let mut hosts = StaticHosts::default();
        hosts.entries.insert(
            "FILESRV".into(),
            vec![
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3)),
            ],
        );
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig { max_result_entries: Some(2), ..StaticResolverConfig::default() };
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let result = resolver.resolve("FILESRV", 0x20, None, &["host".to_string()]).await;
        assert!(matches!(result, Err(Error::OutOfMemory)));
    }

    #[tokio::test]
    async fn resolve_name_list_flattens_tokens_and_skips_unresolvable() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let order = config.name_resolve_order();
        let result = resolver.resolve_name_list("10.0.0.1, bogus.example 10.0.0.2", 0x20, &order).await.unwrap();
        assert_eq!(
            result,
            vec![
                IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
                IpService::no_port(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))),
            ]
        );
    }

    #[tokio::test]
    async fn resolve_name_list_fails_when_every_token_is_unresolvable() {
        let cache = MemCache::new();
        let negcache = MemNegativeCache::new();
        let interfaces = FakeInterfaces::default();
        let hosts = StaticHosts::default();
        let lmhosts = StaticLmhosts::default();
        let config = StaticResolverConfig::default();
        let dead_map = MemWinsDeadMap::default();
        let resolver = fixture(&cache, &negcache, &interfaces, &hosts, &lmhosts, &config, &dead_map);

        let order = config.name_resolve_order();
        let result = resolver.resolve_name_list("bogus.example", 0x20, &order).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }
}
