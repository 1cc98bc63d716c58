//! End-to-end session runs: line-ups from the bundled data play to a result,
//! and identical configurations replay to identical digests.
use battle_content::ContentFactory;
use battle_core::{RulesetKind, Strategy, TuningParams, Winner};
use runtime::{Outcome, SessionConfig, SessionHandle};

fn played_digest(config: &SessionConfig) -> (Winner, u32, String) {
    let mut handle = SessionHandle::new(config).expect("session should start");
    let winner = handle
        .auto_play(config.max_turns, |_| {})
        .expect("battle should end before the cap");
    let digest = handle.digest().expect("state should encode");
    (winner, handle.current_turn(), hex::encode(digest))
}

#[test]
fn same_config_replays_to_same_digest() {
    for ruleset in [RulesetKind::Classic, RulesetKind::Emotion] {
        let config = SessionConfig {
            ruleset,
            strategy: Strategy::Normal,
            params: TuningParams {
                turn_limit: 60,
                ..TuningParams::default().with_seed(0xC0FFEE)
            },
            ..SessionConfig::default()
        };

        let first = played_digest(&config);
        let second = played_digest(&config);
        assert_eq!(first, second, "{ruleset} battle diverged");
        assert_ne!(first.0, Winner::None);
        assert_eq!(first.2.len(), 64);
    }
}

#[test]
fn seed_changes_the_battle() {
    let base = SessionConfig {
        ruleset: RulesetKind::Emotion,
        params: TuningParams {
            turn_limit: 60,
            ..TuningParams::default()
        },
        ..SessionConfig::default()
    };
    let other = SessionConfig {
        params: base.params.clone().with_seed(base.params.seed + 1),
        ..base.clone()
    };
    assert_ne!(played_digest(&base).2, played_digest(&other).2);
}

#[test]
fn restart_matches_a_fresh_session() {
    let config = SessionConfig {
        ruleset: RulesetKind::Classic,
        script: vec!["appeal".into(), "attack".into()],
        ..SessionConfig::default()
    };
    let fresh = SessionHandle::new(&config).unwrap().digest().unwrap();

    let mut handle = SessionHandle::new(&config).unwrap();
    for _ in 0..3 {
        assert!(matches!(handle.dispatch("auto").unwrap(), Outcome::Turn(_)));
    }
    assert_ne!(handle.digest().unwrap(), fresh);

    assert_eq!(handle.dispatch("restart").unwrap(), Outcome::Restarted);
    assert_eq!(handle.digest().unwrap(), fresh);
}

#[test]
fn bundled_lineups_play_to_a_result() {
    let factory = ContentFactory::bundled();
    let params = factory.load_params().expect("bundled params should load");
    let lineups = factory.load_lineups().expect("bundled line-ups should load");
    assert!(!lineups.is_empty());

    for lineup in &lineups {
        let config = SessionConfig::from_lineup(lineup, &params);
        let mut handle = SessionHandle::new(&config)
            .unwrap_or_else(|err| panic!("line-up {} failed to start: {err}", lineup.name));
        assert_eq!(handle.kind(), lineup.ruleset);

        let mut turns = 0;
        let winner = handle
            .auto_play(config.max_turns, |summary| {
                turns += 1;
                assert_eq!(summary.turn, turns);
            })
            .unwrap();
        assert_ne!(winner, Winner::None, "line-up {} never ended", lineup.name);
        assert!(turns <= config.params.turn_limit);
    }
}
