//! Tuning parameter loader.

use std::path::Path;

use battle_core::TuningParams;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`TuningParams`] from TOML files.
///
/// Every field is optional in the file; missing fields keep their defaults.
/// The result is validated before it is returned.
pub struct ParamsLoader;

impl ParamsLoader {
    /// Load tuning parameters from a TOML file.
    pub fn load(path: &Path) -> LoadResult<TuningParams> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse and validate tuning parameters from TOML text.
    pub fn parse(content: &str) -> LoadResult<TuningParams> {
        let params: TuningParams = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse params TOML: {}", e))?;
        params.validate()?;
        Ok(params)
    }
}
