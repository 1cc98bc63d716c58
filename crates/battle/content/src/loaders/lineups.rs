//! Line-up catalog loader.

use std::path::Path;

use crate::lineup::Lineup;
use crate::loaders::{LoadResult, read_file};

/// Loader for line-up catalogs from RON files.
///
/// File format: `Vec<Lineup>`
///
/// Example:
/// ```ron
/// [
///     (name: "opening_act", ruleset: classic, enemy: adaptive, script: ["appeal", "attack"]),
///     (name: "fever", ruleset: emotion, enemy: normal, seed: Some(7)),
/// ]
/// ```
pub struct LineupLoader;

impl LineupLoader {
    /// Load every line-up from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Lineup>> {
        let content = read_file(path)?;
        let lineups: Vec<Lineup> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse line-up RON at {:?}: {}", path, e))?;

        for (index, lineup) in lineups.iter().enumerate() {
            if lineups[..index].iter().any(|other| other.name == lineup.name) {
                anyhow::bail!("Duplicate line-up name '{}' in {:?}", lineup.name, path);
            }
        }

        Ok(lineups)
    }

    /// Load a single line-up by name.
    pub fn find(path: &Path, name: &str) -> LoadResult<Lineup> {
        Self::load(path)?
            .into_iter()
            .find(|lineup| lineup.name == name)
            .ok_or_else(|| anyhow::anyhow!("No line-up named '{}' in {:?}", name, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{RulesetKind, Strategy};
    use std::io::Write;

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_catalog_with_defaults() {
        let file = write_catalog(
            r#"[
                (name: "duel", ruleset: classic, enemy: mirror, script: ["attack", "guard"]),
                (name: "fever", ruleset: emotion, enemy: aggressive, seed: Some(7)),
            ]"#,
        );
        let lineups = LineupLoader::load(file.path()).unwrap();
        assert_eq!(lineups.len(), 2);
        assert_eq!(lineups[0].ruleset, RulesetKind::Classic);
        assert_eq!(lineups[0].script, ["attack", "guard"]);
        assert_eq!(lineups[1].enemy, Strategy::Aggressive);
        assert_eq!(lineups[1].seed, Some(7));
        assert!(lineups[1].script.is_empty());
        assert_eq!(lineups[1].turn_limit, None);
    }

    #[test]
    fn rejects_duplicate_names() {
        let file = write_catalog(
            r#"[
                (name: "duel", ruleset: classic, enemy: mirror),
                (name: "duel", ruleset: emotion, enemy: normal),
            ]"#,
        );
        let err = LineupLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn find_reports_missing_names() {
        let file = write_catalog(r#"[(name: "duel", ruleset: classic, enemy: mirror)]"#);
        assert_eq!(
            LineupLoader::find(file.path(), "duel").unwrap().enemy,
            Strategy::Mirror
        );
        assert!(LineupLoader::find(file.path(), "encore").is_err());
    }

    #[test]
    fn unknown_strategy_fails_to_parse() {
        let file = write_catalog(r#"[(name: "duel", ruleset: classic, enemy: berserk)]"#);
        assert!(LineupLoader::load(file.path()).is_err());
    }
}
