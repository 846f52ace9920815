//! Component D: the node-status (0x21) query (spec §4.D).

use std::net::SocketAddr;
use std::time::Duration;

use log::info;
use rand::Rng;
use tokio::time::Instant;

use crate::dispatcher::PacketDispatcher;
use crate::error::{Error, Result};
use crate::name::NbtName;
use crate::packet::{self, QTYPE_NBSTAT};
use crate::transaction::{self, Validation};

const DEADLINE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NodeStatusResult {
    pub entries: Vec<packet::NodeStatusEntry>,
    pub mac: Option<[u8; 6]>,
}

/// Issue a 0x21 query against `dst_addr` and parse the returned name table.
/// Rejects IPv6 destinations immediately without sending anything (spec
/// scenario S6).
pub async fn node_status_query(
    src_addr: SocketAddr,
    dst_addr: SocketAddr,
    name: &NbtName,
    dispatcher: &dyn PacketDispatcher,
) -> Result<NodeStatusResult> {
    if !dst_addr.is_ipv4() {
        return Err(Error::InvalidAddress);
    }

    let trn_id: u16 = rand::thread_rng().gen();
    let query = packet::build_query(trn_id, name, QTYPE_NBSTAT, false, false);
    let deadline = Instant::now() + DEADLINE;

    info!("node status query to {dst_addr} for {name}");

    transaction::trans(
        src_addr,
        dst_addr,
        false,
        &query,
        QTYPE_NBSTAT,
        trn_id as i32,
        deadline,
        dispatcher,
        |data: &[u8]| -> Validation<NodeStatusResult> {
            let reply = match packet::parse_reply(data) {
                Ok(r) => r,
                Err(_) => return Validation::Reject,
            };

            let h = reply.header;
            if h.opcode != 0 || h.rcode != 0 || h.ancount == 0 || h.broadcast || reply.rr_type != packet::QTYPE_NBSTAT {
                return Validation::Reject;
            }

            match packet::parse_node_status_rdata(reply.answer_rdata) {
                Ok((entries, mac)) => Validation::Accept(NodeStatusResult { entries, mac }),
                Err(_) => Validation::Reject,
            }
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::NullDispatcher;
    use crate::name::SUFFIX_NODE_STATUS;
    use std::net::{IpAddr, Ipv6Addr};

    #[tokio::test]
    async fn rejects_ipv6_destination_without_sending() {
        let name = NbtName::new("*", SUFFIX_NODE_STATUS);
        let dst = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 137);
        let src = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0);

        let result = node_status_query(src, dst, &name, &NullDispatcher).await;
        assert!(matches!(result, Err(Error::InvalidAddress)));
    }
}
