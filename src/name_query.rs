//! Component E: the name (0x20) query (spec §4.E).

use std::net::{Ipv4Addr, SocketAddr};

use log::{debug, warn};
use rand::Rng;
use tokio::time::Instant;

use crate::dispatcher::PacketDispatcher;
use crate::error::{rcode_description, Error, Result};
use crate::name::{NbtName, ReplyFlags};
use crate::packet::{self, QTYPE_NB};
use crate::transaction::{self, Validation};

#[derive(Debug, Clone, Default)]
pub struct NameQueryResult {
    pub addresses: Vec<Ipv4Addr>,
    pub flags: ReplyFlags,
}

/// Issue a 0x20 query against `dst_addr`. `bcast` controls both the header
/// bit and the response-collection strategy: a broadcast query collects
/// every accepted reply until `deadline` (returning [`Error::Timeout`] is
/// the normal, successful end of collection — callers in broadcast mode
/// should treat a timeout as "done collecting", per spec §4.E); a unicast
/// query resolves (or fails negatively) on the first reply.
pub async fn name_query(
    src_addr: SocketAddr,
    dst_addr: SocketAddr,
    name: &NbtName,
    bcast: bool,
    recurse: bool,
    deadline: Instant,
    dispatcher: &dyn PacketDispatcher,
) -> Result<NameQueryResult> {
    let trn_id: u16 = rand::thread_rng().gen();
    let query = packet::build_query(trn_id, name, QTYPE_NB, recurse, bcast);

    let mut addrs: Vec<Ipv4Addr> = Vec::new();
    let mut flags = ReplyFlags::default();

    let result = transaction::trans(
        src_addr,
        dst_addr,
        bcast,
        &query,
        QTYPE_NB,
        trn_id as i32,
        deadline,
        dispatcher,
        |data: &[u8]| -> Validation<NameQueryResult> {
            let reply = match packet::parse_reply(data) {
                Ok(r) => r,
                Err(_) => return Validation::Reject,
            };
            let h = reply.header;

            // Negative WINS (unicast) response: accept, but surface as NotFound.
            if h.opcode == 0 && !bcast && h.rcode != 0 {
                warn!("negative name query response, rcode {:#04x}: {}", h.rcode, rcode_description(h.rcode));
                return Validation::Negative(Error::NotFound);
            }

            if h.opcode != 0 || h.broadcast || h.rcode != 0 || h.ancount == 0 {
                return Validation::Reject;
            }

            let mut got_unique = false;
            for rec in packet::parse_name_query_rdata(reply.answer_rdata) {
                got_unique |= !rec.is_group();
                if rec.addr.is_unspecified() {
                    continue;
                }
                if !addrs.contains(&rec.addr) {
                    addrs.push(rec.addr);
                }
            }

            flags = ReplyFlags {
                response: h.response,
                authoritative: h.authoritative,
                truncated: h.truncated,
                recursion_desired: h.recursion_desired,
                recursion_available: h.recursion_available,
                broadcast: h.broadcast,
            };

            if bcast {
                // Keep collecting until a unique (non-group) name shows up.
                if got_unique {
                    Validation::Accept(NameQueryResult { addresses: addrs.clone(), flags })
                } else {
                    Validation::Reject
                }
            } else {
                Validation::Accept(NameQueryResult { addresses: addrs.clone(), flags })
            }
        },
    )
    .await;

    match result {
        Ok(r) => Ok(r),
        Err(Error::Timeout) if bcast && !addrs.is_empty() => {
            debug!("broadcast name query collection window closed with {} address(es)", addrs.len());
            Ok(NameQueryResult { addresses: addrs, flags })
        }
        Err(e) => Err(e),
    }
}
