use std::collections::HashMap;
use std::sync::Arc;

use inkboard_shared::WireMessage;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Registry of connected peers. Each peer gets an unbounded queue drained by
/// its own send task; a peer that stops draining is dropped on next send.
#[derive(Clone, Default)]
pub struct Relay {
    peers: Arc<RwLock<HashMap<Uuid, mpsc::UnboundedSender<WireMessage>>>>,
}

impl Relay {
    /// Registers a peer and returns the new peer count.
    pub async fn join(&self, id: Uuid, tx: mpsc::UnboundedSender<WireMessage>) -> usize {
        let mut peers = self.peers.write().await;
        peers.insert(id, tx);
        peers.len()
    }

    pub async fn leave(&self, id: Uuid) -> usize {
        let mut peers = self.peers.write().await;
        peers.remove(&id);
        peers.len()
    }

    /// Echoes a message to every peer except its sender.
    pub async fn broadcast_except(&self, sender: Uuid, message: WireMessage) {
        let mut stale = Vec::new();
        {
            let peers = self.peers.read().await;
            for (id, tx) in peers.iter() {
                if *id == sender {
                    continue;
                }
                if tx.send(message.clone()).is_err() {
                    stale.push(*id);
                }
            }
        }
        if !stale.is_empty() {
            let mut peers = self.peers.write().await;
            for id in stale {
                peers.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_event() -> WireMessage {
        WireMessage::Draw {
            x: 1.0,
            y: 2.0,
            color: "#000000".to_string(),
            line_width: 5.0,
        }
    }

    #[tokio::test]
    async fn broadcast_skips_the_sender() {
        let relay = Relay::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        assert_eq!(relay.join(a, tx_a).await, 1);
        assert_eq!(relay.join(b, tx_b).await, 2);

        relay.broadcast_except(a, draw_event()).await;
        assert_eq!(rx_b.try_recv().ok(), Some(draw_event()));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_peers_are_evicted_on_broadcast() {
        let relay = Relay::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        relay.join(a, tx_a).await;
        relay.join(b, tx_b).await;
        drop(rx_b);

        relay.broadcast_except(a, draw_event()).await;
        assert_eq!(relay.leave(a).await, 0);
    }
}
