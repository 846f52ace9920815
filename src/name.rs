//! NetBIOS name and IP-service data model (spec §3).

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Workstation / redirector.
pub const SUFFIX_WORKSTATION: u8 = 0x00;
/// File/print server.
pub const SUFFIX_SERVER: u8 = 0x20;
/// Primary domain controller.
pub const SUFFIX_PDC: u8 = 0x1B;
/// Domain controllers (the "1c" group name).
pub const SUFFIX_DOMAIN_CONTROLLERS: u8 = 0x1C;
/// Master browser.
pub const SUFFIX_MASTER_BROWSER: u8 = 0x1D;
/// Node status query.
pub const SUFFIX_NODE_STATUS: u8 = 0x21;

/// Synthetic name type used to cache Kerberos KDC SRV lookups separately
/// from plain DC lookups (spec GLOSSARY). Not a valid NetBIOS suffix byte;
/// only ever used as a name-cache key component.
pub const KDC_NAME_TYPE: u16 = 0xDCDC;

/// The orchestrator's notion of "name type" is wider than a wire suffix
/// byte, since [`KDC_NAME_TYPE`] does not fit in one — cache keys and
/// adapter dispatch use this; [`NbtName::suffix`] is strictly the
/// wire-encoded byte the transaction engine sends.
pub type NameType = u16;

/// Sentinel meaning "no port preference attached to this address".
pub const PORT_NONE: u16 = 0;

const MAX_LABEL_LEN: usize = 15;

/// A NetBIOS name: a label (trimmed of trailing spaces/NULs for display,
/// but transmitted padded to 15 bytes) plus a one-byte suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NbtName {
    pub label: String,
    pub suffix: u8,
}

impl NbtName {
    pub fn new(label: impl Into<String>, suffix: u8) -> Self {
        let label = label.into().to_ascii_uppercase();
        Self { label, suffix }
    }

    /// Pad/truncate the label to 15 bytes and append the suffix, producing
    /// the 16-byte buffer the wire encoder first-level-encodes.
    pub fn padded(&self) -> [u8; 16] {
        let mut buf = [b' '; 16];
        let bytes = self.label.as_bytes();
        let len = bytes.len().min(MAX_LABEL_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf[15] = self.suffix;
        buf
    }
}

impl fmt::Display for NbtName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{:02x}>", self.label, self.suffix)
    }
}

/// A `(sockaddr, port)` pair, where `port` may be [`PORT_NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpService {
    pub addr: IpAddr,
    pub port: u16,
}

impl IpService {
    pub fn new(addr: IpAddr, port: u16) -> Self {
        Self { addr, port }
    }

    pub fn no_port(addr: IpAddr) -> Self {
        Self { addr, port: PORT_NONE }
    }

    pub fn to_socket_addr(self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl fmt::Display for IpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == PORT_NONE {
            write!(f, "{}", self.addr)
        } else {
            write!(f, "{}:{}", self.addr, self.port)
        }
    }
}

/// NMB header flags mirrored back to callers of the name-query path
/// (spec §4.E "Output"): RS/AA/TC/RD/RA/B.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyFlags {
    pub response: bool,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub broadcast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_truncates_and_pads() {
        let name = NbtName::new("short", SUFFIX_SERVER);
        let padded = name.padded();
        assert_eq!(&padded[..5], b"SHORT");
        assert_eq!(&padded[5..15], [b' '; 10]);
        assert_eq!(padded[15], SUFFIX_SERVER);
    }

    #[test]
    fn padded_truncates_long_label() {
        let name = NbtName::new("a_name_that_is_way_too_long", SUFFIX_WORKSTATION);
        let padded = name.padded();
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..15], name.label.to_ascii_uppercase().as_bytes()[..15].to_vec().as_slice());
    }

    #[test]
    fn ip_service_display_respects_port_none() {
        let s = IpService::no_port("10.0.0.5".parse().unwrap());
        assert_eq!(s.to_string(), "10.0.0.5");

        let s = IpService::new("10.0.0.5".parse().unwrap(), 389);
        assert_eq!(s.to_string(), "10.0.0.5:389");
    }
}
