//! Network identities of participants and entities.

use core::fmt;

/// Identity of a participant (execution context) in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerId(pub i64);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer:{}", self.0)
    }
}

/// Network identity of an entity.
///
/// The `user` half names the participant that created the entity and therefore
/// owns it; `id` is a per-owner counter. [`EntityId::NONE`] is the sentinel the
/// host returns for unset entity references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId {
    pub user: i64,
    pub id: u32,
}

impl EntityId {
    pub const NONE: Self = Self { user: 0, id: 0 };

    pub const fn new(user: i64, id: u32) -> Self {
        Self { user, id }
    }

    /// Participant that owns this entity.
    pub const fn owner(self) -> PeerId {
        PeerId(self.user)
    }

    pub const fn is_none(self) -> bool {
        self.user == 0 && self.id == 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user, self.id)
    }
}
