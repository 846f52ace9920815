//! Component C: the NetBIOS transaction engine (spec §4.C). A single
//! request/reply exchange over UDP, racing the socket against a co-resident
//! daemon's local-reader subscription, with 1-second-spaced retransmits up
//! to a caller-supplied deadline and a caller-supplied validator that may
//! reject a packet and keep waiting.

use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::net::UdpSocket;
use tokio::time::Instant;

use crate::dispatcher::PacketDispatcher;
use crate::error::{Error, Result};

/// Outcome of validating one received packet (spec §9 "validators
/// reject-and-loop").
pub enum Validation<T> {
    /// Terminal success; the transaction resolves with `T`.
    Accept(T),
    /// Not a match for this transaction; re-arm the same source and keep
    /// waiting.
    Reject,
    /// Terminal, but negative (e.g. an NMB reply carrying a nonzero rcode).
    Negative(Error),
}

/// `-1` disables the transaction-id check on socket-received datagrams
/// (spec §4.C step 5).
pub const TRN_ID_ANY: i32 = -1;

const RETRANSMIT_INTERVAL: Duration = Duration::from_secs(1);

/// Perform one NetBIOS transaction: send `packet_bytes` to `dst_addr` from a
/// socket bound at `src_addr`, retransmitting every second until `deadline`,
/// racing the socket against the packet dispatcher's local-reader channel,
/// and calling `validator` on every received datagram until it returns
/// something other than [`Validation::Reject`].
pub async fn trans<T>(
    src_addr: SocketAddr,
    dst_addr: SocketAddr,
    is_broadcast: bool,
    packet_bytes: &[u8],
    expected_type: u16,
    trn_id: i32,
    deadline: Instant,
    dispatcher: &dyn PacketDispatcher,
    mut validator: impl FnMut(&[u8]) -> Validation<T>,
) -> Result<T> {
    let socket = UdpSocket::bind(src_addr).await?;
    if is_broadcast {
        socket.set_broadcast(true)?;
    }

    let mut reader = dispatcher.subscribe(expected_type, trn_id.try_into().unwrap_or(0));
    if reader.is_none() {
        trace!("no local packet dispatcher subscriber for type {expected_type:#x}; socket-only");
    }

    socket.send_to(packet_bytes, dst_addr).await?;
    let mut next_retransmit = Instant::now() + RETRANSMIT_INTERVAL;

    let mut buf = vec![0u8; 2048];

    loop {
        if Instant::now() >= deadline {
            return Err(Error::Timeout);
        }

        let sleep_until = next_retransmit.min(deadline);

        tokio::select! {
            _ = tokio::time::sleep_until(sleep_until) => {
                if Instant::now() >= deadline {
                    return Err(Error::Timeout);
                }
                debug!("retransmitting NMB query (trn_id={trn_id}) to {dst_addr}");
                socket.send_to(packet_bytes, dst_addr).await?;
                next_retransmit = Instant::now() + RETRANSMIT_INTERVAL;
            }

            recv = socket.recv_from(&mut buf) => {
                let (n, peer) = recv?;
                if !accept_peer(peer, trn_id, &buf[..n]) {
                    continue;
                }
                match validator(&buf[..n]) {
                    Validation::Accept(t) => return Ok(t),
                    Validation::Reject => continue,
                    Validation::Negative(e) => return Err(e),
                }
            }

            Some(packet) = recv_from_reader(&mut reader) => {
                match validator(&packet) {
                    Validation::Accept(t) => return Ok(t),
                    Validation::Reject => continue,
                    Validation::Negative(e) => return Err(e),
                }
            }
        }
    }
}

/// Never resolves when there is no active subscription, so the `select!`
/// branch simply never fires.
async fn recv_from_reader(reader: &mut Option<crate::dispatcher::PacketReader>) -> Option<Vec<u8>> {
    match reader {
        Some(r) => r.recv().await,
        None => std::future::pending().await,
    }
}

/// Spec §4.C step 5: reject unless the peer is IPv4 and the parsed
/// transaction id matches (or the check is disabled with `trn_id == -1`).
fn accept_peer(peer: SocketAddr, trn_id: i32, data: &[u8]) -> bool {
    if !peer.is_ipv4() {
        warn!("dropping NMB reply from non-IPv4 peer {peer}");
        return false;
    }
    if trn_id == TRN_ID_ANY {
        return true;
    }
    if data.len() < 2 {
        return false;
    }
    let got = u16::from_be_bytes([data[0], data[1]]);
    got as i32 == trn_id
}
