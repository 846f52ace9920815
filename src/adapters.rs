//! Component I: hosts / lmhosts / ADS adapters (spec §4.I). Each adapter
//! takes a name + type and produces `ip_service[]` through one of the
//! collaborator traits (§6). Types are carried as [`NameType`] (u16), not
//! the wire-only `NbtName::suffix` byte, since the synthetic KDC type
//! (0xDCDC) never fits in a suffix byte.

use crate::dns_srv::{DnsSrv, SrvTarget};
use crate::error::{Error, Result};
use crate::hosts::HostsLookup;
use crate::lmhosts::LmhostsSource;
use crate::name::{IpService, NameType, KDC_NAME_TYPE, SUFFIX_DOMAIN_CONTROLLERS, SUFFIX_PDC, SUFFIX_SERVER, SUFFIX_WORKSTATION};

/// Accepted types are 0x00 and 0x20; anything else is `InvalidParameter`.
pub fn hosts_adapter(label: &str, name_type: NameType, hosts: &dyn HostsLookup) -> Result<Vec<IpService>> {
    if name_type != SUFFIX_WORKSTATION as NameType && name_type != SUFFIX_SERVER as NameType {
        return Err(Error::InvalidParameter(format!("hosts adapter rejects name type {name_type:#06x}")));
    }
    let addrs = hosts.lookup(label)?;
    Ok(addrs.into_iter().map(IpService::no_port).collect())
}

/// Streams lmhosts entries, matching on parsed suffix.
pub fn lmhosts_adapter(label: &str, name_type: NameType, lmhosts: &dyn LmhostsSource) -> Result<Vec<IpService>> {
    let entries = lmhosts.entries().map_err(Error::Io)?;
    let matches: Vec<IpService> = entries
        .into_iter()
        .filter(|e| e.name.eq_ignore_ascii_case(label) && e.suffix as NameType == name_type)
        .map(|e| IpService::no_port(e.addr))
        .collect();

    if matches.is_empty() { Err(Error::NotFound) } else { Ok(matches) }
}

/// Accepted types are 0x1B (PDC), 0x1C (DC) and the synthetic KDC type.
/// Dispatches to the matching SRV query and expands any hostname-only
/// target through `hosts`, preserving the record's port.
pub fn ads_adapter(label: &str, name_type: NameType, sitename: Option<&str>, dns: &dyn DnsSrv, hosts: &dyn HostsLookup) -> Result<Vec<IpService>> {
    let records = match name_type {
        t if t == SUFFIX_PDC as NameType => dns.query_pdc(label, sitename)?,
        t if t == SUFFIX_DOMAIN_CONTROLLERS as NameType => dns.query_dcs(label, sitename)?,
        KDC_NAME_TYPE => dns.query_kdcs(label, sitename)?,
        other => return Err(Error::InvalidParameter(format!("ADS adapter rejects name type {other:#06x}"))),
    };

    let mut out = Vec::new();
    for record in records {
        match record.target {
            SrvTarget::Resolved(addrs) => out.extend(addrs),
            SrvTarget::Hostname { host, port } => {
                for addr in hosts.lookup(&host)? {
                    out.push(IpService::new(addr, port));
                }
            }
        }
    }

    if out.is_empty() { Err(Error::NotFound) } else { Ok(out) }
}
