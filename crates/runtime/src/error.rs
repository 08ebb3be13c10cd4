//! Error types surfaced by the runtime.
//!
//! Relay delivery never produces an error: dropped messages are logged by the
//! network and forgotten. Errors here cover local misuse (acting on a
//! character this peer does not own) and malformed inbound messages.

use thiserror::Error;

use skills_core::{ConfigError, EntityId, PeerId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("character {entity} is owned by {owner}, not {peer}")]
    NotOwner {
        entity: EntityId,
        owner: PeerId,
        peer: PeerId,
    },

    #[error("character {0} does not exist on this peer")]
    UnknownCharacter(EntityId),

    #[error("no local player has been spawned")]
    NoLocalPlayer,

    #[error("method '{method}' is not registered on {entity}")]
    UnknownMethod { entity: EntityId, method: String },

    #[error("malformed payload for '{method}'")]
    Payload {
        method: String,
        #[source]
        source: bincode::Error,
    },

    #[error("rejected configuration update")]
    Config(#[from] ConfigError),
}
