//! The DNS SRV lookup collaborator contract (spec §6 `dns.query_{pdc,dcs,kdcs}`).
//! Actually issuing `_ldap._tcp.<dom>` / `_kerberos._tcp.<dom>` queries is
//! explicitly out of scope (spec §1); this module defines the trait the ADS
//! adapter (component I) consumes and a no-op implementation for when no
//! real resolver is wired in.

use crate::name::IpService;

/// One SRV answer: either already resolved to addresses, or just a
/// hostname the adapter must expand (spec §4.I).
#[derive(Debug, Clone)]
pub enum SrvTarget {
    Resolved(Vec<IpService>),
    Hostname { host: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct SrvRecord {
    pub priority: u16,
    pub weight: u16,
    pub target: SrvTarget,
}

pub trait DnsSrv: Send + Sync {
    fn query_pdc(&self, domain: &str, sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>>;
    fn query_dcs(&self, domain: &str, sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>>;
    fn query_kdcs(&self, realm: &str, sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>>;
}

/// Always returns `NotFound`; wire in a real resolver for production use.
pub struct NullDnsSrv;

impl DnsSrv for NullDnsSrv {
    fn query_pdc(&self, _domain: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        Err(crate::error::Error::NotFound)
    }

    fn query_dcs(&self, _domain: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        Err(crate::error::Error::NotFound)
    }

    fn query_kdcs(&self, _realm: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        Err(crate::error::Error::NotFound)
    }
}

/// Test double returning a fixed, pre-configured record set regardless of
/// the query's arguments.
#[derive(Default, Clone)]
pub struct StaticDnsSrv {
    pub records: Vec<SrvRecord>,
}

impl DnsSrv for StaticDnsSrv {
    fn query_pdc(&self, _domain: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        if self.records.is_empty() { Err(crate::error::Error::NotFound) } else { Ok(self.records.clone()) }
    }

    fn query_dcs(&self, _domain: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        if self.records.is_empty() { Err(crate::error::Error::NotFound) } else { Ok(self.records.clone()) }
    }

    fn query_kdcs(&self, _realm: &str, _sitename: Option<&str>) -> crate::error::Result<Vec<SrvRecord>> {
        if self.records.is_empty() { Err(crate::error::Error::NotFound) } else { Ok(self.records.clone()) }
    }
}
