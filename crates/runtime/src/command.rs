//! Text command surface.
//!
//! ```text
//! act <player> [enemy]   resolve one turn; the AI picks the enemy action if omitted
//! auto                   resolve one turn with the configured player provider
//! restart                discard the battle and start over from the same seed
//! ```
//!
//! Action ids are checked later against the session's rule-set.
use std::str::FromStr;

use crate::error::RuntimeError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Act {
        player: String,
        enemy: Option<String>,
    },
    Auto,
    Restart,
}

impl FromStr for Command {
    type Err = RuntimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(RuntimeError::EmptyCommand);
        };
        let args: Vec<&str> = words.collect();
        let invalid = || RuntimeError::InvalidCommand {
            input: input.trim().to_owned(),
        };

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("act", [player]) => Ok(Self::Act {
                player: (*player).to_owned(),
                enemy: None,
            }),
            ("act", [player, enemy]) => Ok(Self::Act {
                player: (*player).to_owned(),
                enemy: Some((*enemy).to_owned()),
            }),
            ("auto", []) => Ok(Self::Auto),
            ("restart", []) => Ok(Self::Restart),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_act_with_and_without_enemy() {
        assert_eq!(
            "act attack".parse::<Command>().unwrap(),
            Command::Act {
                player: "attack".into(),
                enemy: None
            }
        );
        assert_eq!(
            "  ACT rage  grief ".parse::<Command>().unwrap(),
            Command::Act {
                player: "rage".into(),
                enemy: Some("grief".into())
            }
        );
    }

    #[test]
    fn parses_bare_verbs() {
        assert_eq!("restart".parse::<Command>().unwrap(), Command::Restart);
        assert_eq!("Auto".parse::<Command>().unwrap(), Command::Auto);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "   ".parse::<Command>(),
            Err(RuntimeError::EmptyCommand)
        ));
        for input in ["act", "act a b c", "restart now", "dance"] {
            assert!(matches!(
                input.parse::<Command>(),
                Err(RuntimeError::InvalidCommand { .. })
            ));
        }
    }
}
