//! Headless arena client.
//!
//! Builds one battle session from the environment, plays it to the end with
//! the configured enemy strategy and player script, logs every turn and
//! prints the winner together with the final state digest.
//!
//! # Examples
//!
//! ```bash
//! # Bundled line-up
//! ARENA_LINEUP=fever_night cargo run -p arena-client
//!
//! # Ad-hoc classic battle with a fixed player script
//! ARENA_RULESET=classic ARENA_STRATEGY=adaptive ARENA_SCRIPT=appeal,attack,guard \
//!     RUST_LOG=debug cargo run -p arena-client
//! ```
mod config;

use anyhow::Result;
use config::ArenaConfig;
use runtime::SessionHandle;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::from_env()?;
    if let Some(lineup) = &config.lineup {
        tracing::info!("Line-up: {}", lineup);
    }

    let mut handle = SessionHandle::new(&config.session)?;
    let winner = handle.auto_play(config.session.max_turns, |turn| {
        tracing::info!(
            player_hp = turn.player_hp,
            enemy_hp = turn.enemy_hp,
            player_fans = turn.player_fans,
            enemy_fans = turn.enemy_fans,
            "{}",
            turn.message
        );
    })?;

    let digest = hex::encode(handle.digest()?);
    tracing::info!(turns = handle.current_turn(), %winner, "Battle finished");
    println!("{winner} after {} turns", handle.current_turn());
    println!("digest {digest}");
    Ok(())
}
