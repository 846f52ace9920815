//! The local packet-dispatcher collaborator contract (spec §6
//! `packet_dispatcher.subscribe(type, trn_id) -> reader`): lets a co-resident
//! NetBIOS daemon deliver an unsolicited reply straight to a waiting
//! transaction, without going back out over the socket.

use tokio::sync::mpsc;

pub struct PacketReader {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl PacketReader {
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }
}

pub trait PacketDispatcher: Send + Sync {
    /// Returns `None` if no co-resident daemon is listening; the
    /// transaction engine then continues socket-only (spec §4.C step 2).
    fn subscribe(&self, expected_type: u16, trn_id: u16) -> Option<PacketReader>;
}

/// No co-resident daemon; every subscription fails.
pub struct NullDispatcher;

impl PacketDispatcher for NullDispatcher {
    fn subscribe(&self, _expected_type: u16, _trn_id: u16) -> Option<PacketReader> {
        None
    }
}

/// In-process dispatcher for tests: lets a test inject a reply as though a
/// local daemon had delivered it.
#[derive(Default)]
pub struct InProcessDispatcher {
    subscribers: std::sync::Mutex<std::collections::HashMap<(u16, u16), mpsc::UnboundedSender<Vec<u8>>>>,
}

impl InProcessDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a co-resident daemon delivering `packet` for a matching
    /// subscription. Returns `false` if nothing is subscribed for this key.
    pub fn inject(&self, expected_type: u16, trn_id: u16, packet: Vec<u8>) -> bool {
        let subs = self.subscribers.lock().unwrap();
        match subs.get(&(expected_type, trn_id)) {
            Some(tx) => tx.send(packet).is_ok(),
            None => false,
        }
    }
}

impl PacketDispatcher for InProcessDispatcher {
    fn subscribe(&self, expected_type: u16, trn_id: u16) -> Option<PacketReader> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().insert((expected_type, trn_id), tx);
        Some(PacketReader { rx })
    }
}
