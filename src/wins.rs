//! Component H: the WINS resolver (spec §4.H). Queries one or more WINS
//! tags; within a tag, servers are probed strictly sequentially and a
//! timed-out server is marked dead for a cooldown window; tags themselves
//! run concurrently, first success wins.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use log::{debug, warn};
use tokio::time::Instant;

use crate::dispatcher::PacketDispatcher;
use crate::error::{Error, Result};
use crate::name::NbtName;
use crate::name_query::{self, NameQueryResult};

const PER_SERVER_DEADLINE: Duration = Duration::from_secs(2);

/// Tracks `(server, source)` pairs that have recently failed to answer, so
/// subsequent probes can skip them for a cooldown window (spec invariant 7).
pub trait WinsDeadMap: Send + Sync {
    fn is_dead(&self, server: Ipv4Addr, source: IpAddr) -> bool;
    fn mark_dead(&self, server: Ipv4Addr, source: IpAddr);
}

/// In-memory dead map with a fixed cooldown, keyed by `(server, source)`.
pub struct MemWinsDeadMap {
    cooldown: Duration,
    dead: Mutex<HashMap<(Ipv4Addr, IpAddr), Instant>>,
}

impl MemWinsDeadMap {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown, dead: Mutex::new(HashMap::new()) }
    }
}

impl Default for MemWinsDeadMap {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl WinsDeadMap for MemWinsDeadMap {
    fn is_dead(&self, server: Ipv4Addr, source: IpAddr) -> bool {
        let mut dead = self.dead.lock().unwrap();
        match dead.get(&(server, source)) {
            Some(&since) if Instant::now() < since + self.cooldown => true,
            Some(_) => {
                dead.remove(&(server, source));
                false
            }
            None => false,
        }
    }

    fn mark_dead(&self, server: Ipv4Addr, source: IpAddr) {
        self.dead.lock().unwrap().insert((server, source), Instant::now());
    }
}

/// One WINS tag's server list, queried in the order given.
pub struct WinsTag {
    pub name: String,
    pub servers: Vec<Ipv4Addr>,
}

/// Resolve `name` against the configured WINS tags. `src_addr` must be
/// IPv4; at least one tag with at least one surviving server must be
/// configured, else [`Error::InvalidParameter`] or [`Error::NotFound`].
pub async fn wins_resolve(
    name: &NbtName,
    src_addr: IpAddr,
    tags: &[WinsTag],
    local_addr: Option<IpAddr>,
    dead_map: &dyn WinsDeadMap,
    dispatcher: &dyn PacketDispatcher,
) -> Result<NameQueryResult> {
    if !src_addr.is_ipv4() {
        return Err(Error::InvalidParameter("WINS requires an IPv4 source address".into()));
    }
    if tags.is_empty() {
        return Err(Error::InvalidParameter("no WINS servers configured".into()));
    }

    let mut probes = FuturesUnordered::new();
    for tag in tags {
        let servers: Vec<Ipv4Addr> = tag
            .servers
            .iter()
            .copied()
            .filter(|s| Some(IpAddr::V4(*s)) != local_addr)
            .filter(|s| !dead_map.is_dead(*s, src_addr))
            .collect();

        if servers.is_empty() {
            continue;
        }

        probes.push(probe_tag(name, src_addr, servers, dead_map, dispatcher));
    }

    let mut last_err = Error::NotFound;
    while let Some(outcome) = probes.next().await {
        match outcome {
            Ok(value) => return Ok(value),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

/// Sequentially probe one tag's servers; the first success wins, a timeout
/// marks the server dead and advances to the next. `src_addr` is used only
/// to key the dead map, not as the query socket's bind address — the
/// upstream behaviour this mirrors never threads it down to the child
/// query either.
async fn probe_tag(
    name: &NbtName,
    src_addr: IpAddr,
    servers: Vec<Ipv4Addr>,
    dead_map: &dyn WinsDeadMap,
    dispatcher: &dyn PacketDispatcher,
) -> Result<NameQueryResult> {
    for server in servers {
        let src = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        let dst = SocketAddr::new(IpAddr::V4(server), 137);
        let deadline = Instant::now() + PER_SERVER_DEADLINE;

        match name_query::name_query(src, dst, name, false, true, deadline, dispatcher).await {
            Ok(result) => return Ok(result),
            Err(Error::Timeout) => {
                debug!("WINS server {server} timed out from source {src_addr}; marking dead");
                dead_map.mark_dead(server, src_addr);
            }
            Err(Error::NotFound) => {
                // Negative rcode: authoritative, does not mark the server dead.
                return Err(Error::NotFound);
            }
            Err(e) => {
                warn!("WINS probe of {server} failed: {e}");
            }
        }
    }
    Err(Error::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::NullDispatcher;
    use crate::name::SUFFIX_SERVER;
    use std::time::Duration as StdDuration;

    #[test]
    fn dead_map_respects_cooldown_window() {
        let map = MemWinsDeadMap::new(StdDuration::from_millis(50));
        let server = Ipv4Addr::new(10, 0, 0, 1);
        let src = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));

        assert!(!map.is_dead(server, src));
        map.mark_dead(server, src);
        assert!(map.is_dead(server, src));
    }

    #[tokio::test]
    async fn non_ipv4_source_is_rejected() {
        let name = NbtName::new("SRV", SUFFIX_SERVER);
        let tags = [WinsTag { name: "default".into(), servers: vec![Ipv4Addr::new(10, 0, 0, 1)] }];
        let dead_map = MemWinsDeadMap::default();

        let result = wins_resolve(
            &name,
            IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
            &tags,
            None,
            &dead_map,
            &NullDispatcher,
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn no_configured_tags_is_invalid_parameter() {
        let name = NbtName::new("SRV", SUFFIX_SERVER);
        let dead_map = MemWinsDeadMap::default();
        let result = wins_resolve(&name, IpAddr::V4(Ipv4Addr::LOCALHOST), &[], None, &dead_map, &NullDispatcher).await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
