//! Resource systems: fans, anti-gauge, audience commands and the comment pool.
//!
//! Everything here is a pure function of its inputs. Randomness only enters
//! through the explicit generation helpers ([`generate_commands`],
//! [`comments::generate`]), which derive their draws from the battle seed.

pub mod anti;
pub mod audience;
pub mod comments;
pub mod compliance;

pub use anti::{AntiGauge, AntiLevel, compute_anti_delta};
pub use audience::{AudienceComposition, apply_to_composition, compute_fan_delta};
pub use comments::{Comment, CommentKind, ConsumedComments, Consumption};
pub use compliance::{
    AudienceCommand, Commands, Compliance, ComplianceTally, evaluate_commands, generate_commands,
};
