//! Matchup cycles and win/lose/draw judgement.

use core::fmt::Debug;

/// Outcome of a matchup from one side's perspective.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Judgement {
    Win,
    Lose,
    Draw,
}

impl Judgement {
    /// The same matchup seen from the other side.
    pub const fn invert(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }

    pub const fn is_lose(self) -> bool {
        matches!(self, Self::Lose)
    }
}

/// An action set arranged in a circular dominance order.
///
/// Every action beats its successor in [`CycleAction::CYCLE`] and loses to its
/// predecessor. Identical actions draw, as do non-adjacent pairs in cycles
/// longer than three.
pub trait CycleAction: Copy + Eq + Debug + 'static {
    /// All actions in dominance order; also the fixed tie-break priority.
    const CYCLE: &'static [Self];

    /// Index of this action in [`CycleAction::CYCLE`].
    fn position(self) -> usize;

    /// The action this one beats.
    fn successor(self) -> Self {
        Self::CYCLE[(self.position() + 1) % Self::CYCLE.len()]
    }

    /// The action that beats this one.
    fn predecessor(self) -> Self {
        let len = Self::CYCLE.len();
        Self::CYCLE[(self.position() + len - 1) % len]
    }

    fn beats(self, other: Self) -> bool {
        self != other && self.successor() == other
    }
}

/// Judges `a` against `b` from `a`'s perspective.
pub fn judge<A: CycleAction>(a: A, b: A) -> Judgement {
    if a.beats(b) {
        Judgement::Win
    } else if b.beats(a) {
        Judgement::Lose
    } else {
        Judgement::Draw
    }
}

/// Returns the action that beats `action`.
pub fn counter<A: CycleAction>(action: A) -> A {
    action.predecessor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ClassicAction, Emotion};

    #[test]
    fn classic_cycle() {
        use ClassicAction::*;
        assert_eq!(judge(Attack, Appeal), Judgement::Win);
        assert_eq!(judge(Appeal, Guard), Judgement::Win);
        assert_eq!(judge(Guard, Attack), Judgement::Win);
        assert_eq!(judge(Appeal, Attack), Judgement::Lose);
        assert_eq!(judge(Attack, Attack), Judgement::Draw);
    }

    #[test]
    fn emotion_cycle() {
        use Emotion::*;
        assert_eq!(judge(Rage, Terror), Judgement::Win);
        assert_eq!(judge(Terror, Grief), Judgement::Win);
        assert_eq!(judge(Grief, Ecstasy), Judgement::Win);
        assert_eq!(judge(Ecstasy, Rage), Judgement::Win);
        assert_eq!(judge(Terror, Rage), Judgement::Lose);
    }

    #[test]
    fn non_adjacent_emotions_draw() {
        use Emotion::*;
        assert_eq!(judge(Rage, Grief), Judgement::Draw);
        assert_eq!(judge(Grief, Rage), Judgement::Draw);
        assert_eq!(judge(Terror, Ecstasy), Judgement::Draw);
    }

    #[test]
    fn counter_beats_its_target() {
        for &action in ClassicAction::CYCLE {
            assert_eq!(judge(counter(action), action), Judgement::Win);
        }
        for &emotion in Emotion::CYCLE {
            assert_eq!(judge(counter(emotion), emotion), Judgement::Win);
        }
    }
}
