//! Content loaders for reading battle data from files.
//!
//! This module provides loaders that turn TOML/RON files into `battle-core`
//! types and line-ups the runtime can start sessions from.

pub mod factory;
pub mod lineups;
pub mod params;

pub use factory::ContentFactory;
pub use lineups::LineupLoader;
pub use params::ParamsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
