//! The interface-enumerator collaborator contract (spec §6): `count()`,
//! `broadcast(i)`, `is_local(addr)`. Unlike the DNS-SRV and lmhosts
//! collaborators, enumerating local interfaces is a plain local syscall, so
//! this crate ships a real `pnet`-backed implementation alongside the trait
//! (grounded on the interface walk in the ARP/subnet-discovery scanners of
//! this pack), plus a deterministic fake for ranking/broadcast tests.

use std::net::{IpAddr, Ipv4Addr};

use ipnetwork::Ipv4Network;

/// One local interface's address, its broadcast address, and its prefix
/// length — the prefix is needed for the longest-prefix-match comparator in
/// component K.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub addr: IpAddr,
    pub broadcast: IpAddr,
    pub prefix_len: u8,
}

pub trait Interfaces: Send + Sync {
    fn count(&self) -> usize;
    fn broadcast(&self, index: usize) -> Option<InterfaceAddr>;
    fn is_local(&self, addr: IpAddr) -> bool;

    fn all(&self) -> Vec<InterfaceAddr> {
        (0..self.count()).filter_map(|i| self.broadcast(i)).collect()
    }
}

/// Real interface enumerator backed by `pnet::datalink`, matching the walk
/// already used in this pack's subnet-discovery scanners.
pub struct PnetInterfaces;

impl Interfaces for PnetInterfaces {
    fn count(&self) -> usize {
        self.all_addrs().len()
    }

    fn broadcast(&self, index: usize) -> Option<InterfaceAddr> {
        self.all_addrs().into_iter().nth(index)
    }

    fn is_local(&self, addr: IpAddr) -> bool {
        self.all_addrs().iter().any(|i| i.addr == addr)
    }
}

impl PnetInterfaces {
    fn all_addrs(&self) -> Vec<InterfaceAddr> {
        pnet::datalink::interfaces()
            .into_iter()
            .filter(|iface| iface.is_up() && !iface.is_loopback())
            .flat_map(|iface| {
                iface.ips.into_iter().filter_map(|ip| match ip.ip() {
                    IpAddr::V4(ipv4) => {
                        let net = Ipv4Network::new(ipv4, ip.prefix()).ok()?;
                        Some(InterfaceAddr {
                            addr: IpAddr::V4(ipv4),
                            broadcast: IpAddr::V4(net.broadcast()),
                            prefix_len: ip.prefix(),
                        })
                    }
                    IpAddr::V6(v6) => Some(InterfaceAddr {
                        addr: IpAddr::V6(v6),
                        broadcast: IpAddr::V6(v6), // IPv6 has no broadcast; unused by component G
                        prefix_len: ip.prefix(),
                    }),
                })
            })
            .collect()
    }
}

/// Deterministic fake used by ranking and broadcast-resolver tests.
#[derive(Default, Clone)]
pub struct FakeInterfaces {
    pub interfaces: Vec<InterfaceAddr>,
    pub local_addrs: Vec<IpAddr>,
}

impl FakeInterfaces {
    pub fn with_ipv4(addr: Ipv4Addr, broadcast: Ipv4Addr, prefix_len: u8) -> Self {
        Self {
            interfaces: vec![InterfaceAddr { addr: IpAddr::V4(addr), broadcast: IpAddr::V4(broadcast), prefix_len }],
            local_addrs: vec![IpAddr::V4(addr)],
        }
    }
}

impl Interfaces for FakeInterfaces {
    fn count(&self) -> usize {
        self.interfaces.len()
    }

    fn broadcast(&self, index: usize) -> Option<InterfaceAddr> {
        self.interfaces.get(index).copied()
    }

    fn is_local(&self, addr: IpAddr) -> bool {
        self.local_addrs.contains(&addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_interfaces_reports_broadcast() {
        let ifaces = FakeInterfaces::with_ipv4(Ipv4Addr::new(192, 168, 1, 5), Ipv4Addr::new(192, 168, 1, 255), 24);
        assert_eq!(ifaces.count(), 1);
        let b = ifaces.broadcast(0).unwrap();
        assert_eq!(b.broadcast, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 255)));
        assert!(ifaces.is_local(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5))));
        assert!(!ifaces.is_local(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
    }
}
