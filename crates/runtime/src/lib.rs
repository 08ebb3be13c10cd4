//! Multiplayer session runtime for the skill engine.
//!
//! The engine in `skills-core` is transport-free: it mutates one character
//! and hands relay credits to an outbox. This crate supplies the session
//! around it so several participants can play together in one process.
//!
//! Modules are organized by responsibility:
//! - [`peer`] hosts a participant, its owned characters and inbound handlers
//! - [`network`] routes remote invocations between peers, best-effort
//! - [`config`] shares a live-reloadable configuration across peers
pub mod config;
pub mod network;
pub mod peer;

mod error;

pub use config::SharedConfig;
pub use error::{Result, RuntimeError};
pub use network::{Inbox, Network, RoutedRpc};
pub use peer::{
    ADD_STATUS_EFFECT_METHOD, AddStatusEffectPayload, NetworkOutbox, Peer, RpcMethod, RpcRegistry,
};
