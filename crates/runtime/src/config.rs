//! Live-reloadable configuration shared by every peer of a session.

use std::sync::{Arc, PoisonError, RwLock};

use skills_core::SkillsConfig;
use tracing::{info, warn};

use crate::error::Result;

/// Handle to the session's current configuration.
///
/// Peers read a fresh [`SharedConfig::snapshot`] for every event, so updates
/// apply from the next event on.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<SkillsConfig>>,
}

impl SharedConfig {
    pub fn new(config: SkillsConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Current configuration.
    pub fn snapshot(&self) -> SkillsConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the configuration. Out-of-range values are rejected and the
    /// previous configuration stays in effect.
    pub fn update(&self, config: SkillsConfig) -> Result<()> {
        if let Err(error) = config.validate() {
            warn!(target: "skills_runtime::config", %error, "Rejected configuration update");
            return Err(error.into());
        }

        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
        info!(target: "skills_runtime::config", "Configuration updated");
        Ok(())
    }
}
