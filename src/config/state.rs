// Application state
// Shared by every connection task; nothing here is mutable after startup

use super::types::Config;
use std::path::PathBuf;

/// Immutable state shared across connections
pub struct AppState {
    pub config: Config,
    /// Canonicalized document root; the containment check for request paths
    /// compares against this
    pub root: PathBuf,
}

impl AppState {
    /// Canonicalize the configured root up front so a missing or unreadable
    /// directory fails at startup instead of on the first request.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = config.server.root.canonicalize()?;
        Ok(Self { config, root })
    }
}
