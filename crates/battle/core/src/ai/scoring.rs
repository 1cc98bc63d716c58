//! Candidate scoring for the opponent AI.
//!
//! Every strategy reduces to scoring each action of the cycle and picking
//! one. Scores are plain integers; the candidate list is always walked in
//! cycle order, so ties resolve to the earlier action.

use crate::combat::{CycleAction, Judgement, judge};

/// Weight a candidate gains per past player action it would have beaten.
pub const WIN_WEIGHT: u32 = 3;
/// Weight a candidate gains per past player action it would have drawn.
pub const DRAW_WEIGHT: u32 = 1;

/// One scored candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored<A> {
    pub action: A,
    pub score: u32,
}

/// Scores and selects candidate actions.
pub struct ActionScorer;

impl ActionScorer {
    /// How well `candidate` would have fared against `history`.
    ///
    /// ```text
    /// score = 1 + Σ (win → WIN_WEIGHT, draw → DRAW_WEIGHT, lose → 0)
    /// ```
    ///
    /// The base of one keeps every action reachable by a weighted pick.
    pub fn favorability<A: CycleAction>(candidate: A, history: impl Iterator<Item = A>) -> u32 {
        history.fold(1, |score, past| {
            score
                + match judge(candidate, past) {
                    Judgement::Win => WIN_WEIGHT,
                    Judgement::Draw => DRAW_WEIGHT,
                    Judgement::Lose => 0,
                }
        })
    }

    /// Scores every action of the cycle, in cycle order.
    pub fn score_all<A: CycleAction>(mut score: impl FnMut(A) -> u32) -> Vec<Scored<A>> {
        A::CYCLE
            .iter()
            .map(|&action| Scored {
                action,
                score: score(action),
            })
            .collect()
    }

    /// Highest score wins; the first candidate wins ties.
    pub fn select_best<A: CycleAction>(candidates: &[Scored<A>]) -> Option<Scored<A>> {
        let mut best: Option<Scored<A>> = None;
        for candidate in candidates {
            tracing::debug!(
                "  candidate {:?}: score={}",
                candidate.action,
                candidate.score
            );
            if best.is_none_or(|top| candidate.score > top.score) {
                best = Some(*candidate);
            }
        }
        best
    }

    /// Picks a candidate with probability proportional to its score.
    ///
    /// `roll` is reduced modulo the score total, so any `u32` is accepted.
    pub fn select_weighted<A: CycleAction>(candidates: &[Scored<A>], roll: u32) -> Option<A> {
        let total: u64 = candidates.iter().map(|c| c.score as u64).sum();
        if total == 0 {
            return candidates.first().map(|c| c.action);
        }
        let mut remaining = roll as u64 % total;
        for candidate in candidates {
            let score = candidate.score as u64;
            if remaining < score {
                return Some(candidate.action);
            }
            remaining -= score;
        }
        candidates.last().map(|c| c.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ClassicAction;

    #[test]
    fn favorability_counts_wins_and_draws() {
        use ClassicAction::*;
        let history = [Appeal, Appeal, Attack];
        // attack beats appeal twice, draws attack once
        assert_eq!(
            ActionScorer::favorability(Attack, history.iter().copied()),
            1 + 3 + 3 + 1
        );
        // guard beats attack once
        assert_eq!(
            ActionScorer::favorability(Guard, history.iter().copied()),
            1 + 3
        );
        assert_eq!(ActionScorer::favorability(Guard, core::iter::empty()), 1);
    }

    #[test]
    fn best_prefers_cycle_order_on_ties() {
        let candidates = ActionScorer::score_all::<ClassicAction>(|_| 7);
        let best = ActionScorer::select_best(&candidates).map(|s| s.action);
        assert_eq!(best, Some(ClassicAction::Attack));
    }

    #[test]
    fn weighted_pick_walks_cumulative_scores() {
        let candidates = ActionScorer::score_all::<ClassicAction>(|action| match action {
            ClassicAction::Attack => 1,
            ClassicAction::Appeal => 0,
            ClassicAction::Guard => 4,
        });
        assert_eq!(
            ActionScorer::select_weighted(&candidates, 0),
            Some(ClassicAction::Attack)
        );
        for roll in 1..5 {
            assert_eq!(
                ActionScorer::select_weighted(&candidates, roll),
                Some(ClassicAction::Guard)
            );
        }
        assert_eq!(
            ActionScorer::select_weighted(&candidates, 5),
            Some(ClassicAction::Attack)
        );
    }
}
