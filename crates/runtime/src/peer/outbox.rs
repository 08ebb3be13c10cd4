//! Relay outbox backed by the session network.

use skills_core::{PeerId, RelayMessage, RelayOutbox};
use tracing::{debug, warn};

use super::rpc::encode_relay_credit;
use crate::network::{Network, RoutedRpc};

/// Forwards relay messages from one peer onto the network.
pub struct NetworkOutbox<'a> {
    network: &'a Network,
    sender: PeerId,
    sent: usize,
}

impl<'a> NetworkOutbox<'a> {
    pub fn new(network: &'a Network, sender: PeerId) -> Self {
        Self {
            network,
            sender,
            sent: 0,
        }
    }

    /// Number of messages the network queued for delivery.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl RelayOutbox for NetworkOutbox<'_> {
    fn send(&mut self, message: RelayMessage) {
        let payload = match encode_relay_credit(message.credit) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(target: "skills_runtime::peer", %error, "Failed to encode relay credit");
                return;
            }
        };

        debug!(
            target: "skills_runtime::peer",
            sender = %self.sender,
            target = %message.target_peer,
            entity = %message.target_entity,
            credit = message.credit,
            "Relaying experience to shield caster"
        );

        let delivered = self.network.send(RoutedRpc {
            sender: self.sender,
            target_peer: message.target_peer,
            target_entity: message.target_entity,
            method: message.method.to_string(),
            payload,
        });
        if delivered {
            self.sent += 1;
        }
    }
}
