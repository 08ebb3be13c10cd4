//! Two-player session driving every skill hook.
//!
//! Loads the configuration (first argument, `SMART_SKILLS_CONFIG`, or the
//! shipped defaults), then plays a short scripted session: a shielded fight
//! relaying experience to the caster, a shield break, a sneak attack and a
//! death with recovery afterwards.
//!
//! ```bash
//! RUST_LOG=skills_runtime=debug cargo run -p skills-cli -- path/to/smart_skills.toml
//! ```

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use skills_content::ConfigLoader;

const DEFAULT_CONFIG: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../skills/content/data/smart_skills.toml"
);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SMART_SKILLS_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = ConfigLoader::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!(path = %path.display(), ?config, "Configuration loaded");

    scenario::run(config).await
}
