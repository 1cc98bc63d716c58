//! Content factory for loading everything a session needs from a data directory.

use std::path::{Path, PathBuf};

use battle_core::TuningParams;

use crate::lineup::Lineup;
use crate::loaders::{LineupLoader, LoadResult, ParamsLoader};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── params.toml
/// └── lineups.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load tuning parameters from `params.toml`, or defaults if the file is absent.
    pub fn load_params(&self) -> LoadResult<TuningParams> {
        let path = self.data_dir.join("params.toml");
        if !path.exists() {
            return Ok(TuningParams::default());
        }
        ParamsLoader::load(&path)
    }

    /// Load the line-up catalog from `lineups.ron`.
    pub fn load_lineups(&self) -> LoadResult<Vec<Lineup>> {
        LineupLoader::load(&self.data_dir.join("lineups.ron"))
    }

    /// Load one line-up by name from `lineups.ron`.
    pub fn load_lineup(&self, name: &str) -> LoadResult<Lineup> {
        LineupLoader::find(&self.data_dir.join("lineups.ron"), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_params().unwrap(), TuningParams::default());
        assert!(factory.load_lineups().is_err());
    }
}
