//! Component G: the broadcast resolver (spec §4.G). Enumerates local IPv4
//! broadcast addresses and fans a broadcast name query out across all of
//! them, first success wins.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::dispatcher::PacketDispatcher;
use crate::error::{Error, Result};
use crate::fanout;
use crate::iface::Interfaces;
use crate::name::NbtName;
use crate::name_query::{self, NameQueryResult};

const WAIT_MS: u64 = 0;
const TIMEOUT_MS: u64 = 1000;

/// Resolve `name` by broadcasting on every local IPv4 interface. Returns
/// [`Error::NotFound`] when NetBIOS is administratively disabled or no IPv4
/// interface is configured.
pub async fn broadcast_resolve(
    name: &NbtName,
    nbt_disabled: bool,
    interfaces: &dyn Interfaces,
    dispatcher: &dyn PacketDispatcher,
) -> Result<NameQueryResult> {
    if nbt_disabled {
        return Err(Error::NotFound);
    }

    let addrs: Vec<SocketAddr> = interfaces
        .all()
        .into_iter()
        .filter(|i| matches!(i.broadcast, IpAddr::V4(_)))
        .map(|i| SocketAddr::new(i.broadcast, 137))
        .collect();

    if addrs.is_empty() {
        return Err(Error::NotFound);
    }

    let result = fanout::name_queries(&addrs, WAIT_MS, TIMEOUT_MS, |_index, dst, deadline| {
        let src = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        name_query::name_query(src, dst, name, true, true, deadline, dispatcher)
    })
    .await?;

    Ok(result.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::NullDispatcher;
    use crate::iface::FakeInterfaces;
    use crate::name::SUFFIX_MASTER_BROWSER;

    #[tokio::test]
    async fn disabled_nbt_fails_without_sending() {
        let name = NbtName::new("WORKGROUP", SUFFIX_MASTER_BROWSER);
        let interfaces = FakeInterfaces::default();
        let result = broadcast_resolve(&name, true, &interfaces, &NullDispatcher).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn no_ipv4_interface_fails() {
        let name = NbtName::new("WORKGROUP", SUFFIX_MASTER_BROWSER);
        let interfaces = FakeInterfaces::default();
        let result = broadcast_resolve(&name, false, &interfaces, &NullDispatcher).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }
}
