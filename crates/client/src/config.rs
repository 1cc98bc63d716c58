//! Arena configuration loaded from the process environment.
use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ContentFactory, ParamsLoader};
use battle_core::{RulesetKind, Strategy};
use runtime::SessionConfig;

/// Resolved client configuration.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Name of the line-up the session was built from, if any.
    pub lineup: Option<String>,
    pub session: SessionConfig,
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Directory with `params.toml` / `lineups.ron` (default: bundled)
    /// - `ARENA_PARAMS` - Tuning parameter TOML file (default: the data directory's)
    /// - `ARENA_LINEUP` - Named line-up to start from (default: none)
    /// - `ARENA_RULESET` - `classic` or `emotion` (default: line-up, else classic)
    /// - `ARENA_STRATEGY` - Enemy AI: `normal`, `adaptive`, `mirror`, `aggressive`
    /// - `ARENA_SCRIPT` - Comma separated player actions, repeated (default: seeded random)
    /// - `ARENA_SEED` - Battle seed
    /// - `ARENA_MAX_TURNS` - Auto-play safety cap (default: 500)
    ///
    /// Explicit variables override the line-up, which overrides the data
    /// directory's parameters.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // blank values count as unset
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let factory = match var("ARENA_DATA_DIR") {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };

        let params = match var("ARENA_PARAMS") {
            Some(path) => ParamsLoader::load(&PathBuf::from(path))?,
            None => factory.load_params()?,
        };

        let lineup = var("ARENA_LINEUP");
        let mut session = match &lineup {
            Some(name) => SessionConfig::from_lineup(&factory.load_lineup(name)?, &params),
            None => SessionConfig {
                params,
                ..SessionConfig::default()
            },
        };

        if let Some(ruleset) = var("ARENA_RULESET") {
            session.ruleset = ruleset
                .trim()
                .parse::<RulesetKind>()
                .map_err(|_| anyhow::anyhow!("unknown ruleset '{}'", ruleset))?;
        }

        if let Some(strategy) = var("ARENA_STRATEGY") {
            session.strategy = Strategy::parse(&strategy)?;
        }

        if let Some(script) = var("ARENA_SCRIPT") {
            session.script = script
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect();
        }

        if let Some(seed) = var("ARENA_SEED") {
            session.params.seed = seed
                .trim()
                .parse()
                .with_context(|| format!("ARENA_SEED must be an unsigned integer, got '{seed}'"))?;
        }

        if let Some(max_turns) = var("ARENA_MAX_TURNS") {
            let max_turns: u32 = max_turns.trim().parse().with_context(|| {
                format!("ARENA_MAX_TURNS must be an unsigned integer, got '{max_turns}'")
            })?;
            session.max_turns = max_turns.max(1);
        }

        Ok(Self { lineup, session })
    }
}
