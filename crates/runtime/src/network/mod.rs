//! Routed remote invocations between peers.
//!
//! Every peer connects once and receives an unbounded inbox. A [`RoutedRpc`]
//! is addressed to the peer owning its target entity. Sending never blocks
//! and never fails from the sender's point of view: messages to unknown or
//! disconnected peers are logged and dropped.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use skills_core::{EntityId, PeerId};
use tokio::sync::mpsc;
use tracing::debug;

/// A remote invocation addressed to an entity on its owning peer.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutedRpc {
    pub sender: PeerId,
    pub target_peer: PeerId,
    pub target_entity: EntityId,
    pub method: String,
    pub payload: Vec<u8>,
}

/// Receiving half of a peer's connection.
pub type Inbox = mpsc::UnboundedReceiver<RoutedRpc>;

/// In-process router connecting the peers of a session.
#[derive(Clone, Debug, Default)]
pub struct Network {
    routes: Arc<RwLock<HashMap<PeerId, mpsc::UnboundedSender<RoutedRpc>>>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `peer` and returns its inbox. Reconnecting replaces the
    /// previous inbox.
    pub fn connect(&self, peer: PeerId) -> Inbox {
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(peer, tx);
        debug!(target: "skills_runtime::network", %peer, "Peer connected");
        rx
    }

    pub fn disconnect(&self, peer: PeerId) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&peer);
        debug!(target: "skills_runtime::network", %peer, "Peer disconnected");
    }

    pub fn is_connected(&self, peer: PeerId) -> bool {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&peer)
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Sends `rpc` to its target peer, best-effort.
    ///
    /// Returns true if the message was queued for delivery.
    pub fn send(&self, rpc: RoutedRpc) -> bool {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);

        let Some(tx) = routes.get(&rpc.target_peer) else {
            debug!(
                target: "skills_runtime::network",
                sender = %rpc.sender,
                target = %rpc.target_peer,
                method = %rpc.method,
                "No route to peer, dropping message"
            );
            return false;
        };

        let target = rpc.target_peer;
        match tx.send(rpc) {
            Ok(()) => true,
            Err(mpsc::error::SendError(rpc)) => {
                debug!(
                    target: "skills_runtime::network",
                    sender = %rpc.sender,
                    %target,
                    method = %rpc.method,
                    "Peer inbox closed, dropping message"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc(target: i64) -> RoutedRpc {
        RoutedRpc {
            sender: PeerId(1),
            target_peer: PeerId(target),
            target_entity: EntityId::new(target, 1),
            method: "test".to_string(),
            payload: vec![1, 2, 3],
        }
    }

    #[test]
    fn delivers_to_connected_peer() {
        let network = Network::new();
        let mut inbox = network.connect(PeerId(2));

        assert!(network.send(rpc(2)));
        assert_eq!(inbox.try_recv().ok(), Some(rpc(2)));
    }

    #[test]
    fn drops_messages_for_unknown_peers() {
        let network = Network::new();
        assert!(!network.send(rpc(9)));
    }

    #[test]
    fn drops_messages_after_inbox_closed() {
        let network = Network::new();
        let inbox = network.connect(PeerId(3));
        drop(inbox);

        assert!(!network.is_connected(PeerId(3)));
        assert!(!network.send(rpc(3)));
    }

    #[test]
    fn disconnect_removes_route() {
        let network = Network::new();
        let _inbox = network.connect(PeerId(4));
        assert!(network.is_connected(PeerId(4)));

        network.disconnect(PeerId(4));
        assert!(!network.is_connected(PeerId(4)));
        assert!(!network.send(rpc(4)));
    }
}
