//! Component K: interface-proximity ranking and dedup (spec §4.K).

use std::cmp::Ordering;
use std::net::IpAddr;

use crate::iface::Interfaces;
use crate::name::IpService;

const IPV4_LOCAL_BONUS: u32 = 32;
const IPV6_LOCAL_BONUS: u32 = 128;

/// Count of leading bits in which `a` and `b` agree, over `bytes` bytes.
fn matching_len_bits(a: &[u8], b: &[u8], bytes: usize) -> u32 {
    let mut bits = 0u32;
    for i in 0..bytes {
        let x = a[i] ^ b[i];
        if x == 0 {
            bits += 8;
            continue;
        }
        // u8::leading_zeros counts within an 8-bit width, exactly the
        // number of leading bits this byte still agrees on.
        bits += x.leading_zeros();
        break;
    }
    bits
}

fn octets_v4(addr: std::net::Ipv4Addr) -> [u8; 4] {
    addr.octets()
}

fn octets_v6(addr: std::net::Ipv6Addr) -> [u8; 16] {
    addr.octets()
}

/// Max leading-bit-match against any same-family local interface, plus the
/// local-reachability bonus.
fn proximity_score(addr: IpAddr, interfaces: &dyn Interfaces) -> u32 {
    let mut max_bits = 0u32;
    for iface in interfaces.all() {
        match (addr, iface.addr) {
            (IpAddr::V4(a), IpAddr::V4(i)) => {
                max_bits = max_bits.max(matching_len_bits(&octets_v4(a), &octets_v4(i), 4));
            }
            (IpAddr::V6(a), IpAddr::V6(i)) => {
                max_bits = max_bits.max(matching_len_bits(&octets_v6(a), &octets_v6(i), 16));
            }
            _ => continue,
        }
    }

    if interfaces.is_local(addr) {
        max_bits += if addr.is_ipv4() { IPV4_LOCAL_BONUS } else { IPV6_LOCAL_BONUS };
    }
    max_bits
}

/// Order two addresses by interface proximity: higher score first. IPv4
/// only wins as a tie-break fallback, when neither address scores against
/// any local interface of its own family (mirrors the original's
/// mixed-family comparator: a real proximity match always outranks the
/// family preference).
pub fn compare_addrs(a: IpAddr, b: IpAddr, interfaces: &dyn Interfaces) -> Ordering {
    let score_a = proximity_score(a, interfaces);
    let score_b = proximity_score(b, interfaces);
    if score_a != score_b {
        return score_b.cmp(&score_a);
    }
    match (a.is_ipv4(), b.is_ipv4()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// As [`compare_addrs`], with a lower-port tie-break for `ip_service`.
pub fn compare_services(a: IpService, b: IpService, interfaces: &dyn Interfaces) -> Ordering {
    match compare_addrs(a.addr, b.addr, interfaces) {
        Ordering::Equal => a.port.cmp(&b.port),
        ord => ord,
    }
}

/// Sort `services` by interface proximity (component K comparator).
pub fn sort_by_proximity(services: &mut [IpService], interfaces: &dyn Interfaces) {
    services.sort_by(|a, b| compare_services(*a, *b, interfaces));
}

/// `(addr, port)` dedup: zero out later duplicates, compact in place,
/// preserving the order of first occurrence.
pub fn dedup(services: &mut Vec<IpService>) {
    let mut seen = std::collections::HashSet::new();
    services.retain(|s| seen.insert((s.addr, s.port)));
}

/// Stable partition placing IPv4 entries first, preserving relative order
/// within each family.
pub fn prioritize_ipv4(services: &mut [IpService]) {
    let mut ordered: Vec<IpService> = Vec::with_capacity(services.len());
    ordered.extend(services.iter().filter(|s| s.addr.is_ipv4()).copied());
    ordered.extend(services.iter().filter(|s| !s.addr.is_ipv4()).copied());
    services.copy_from_slice(&ordered);
}
