//! Step sequencing for the creation wizard.
//!
//! The visible step list is a filtered view of [`MASTER_STEPS`], decided once
//! at mount time by a single flag (`include_group_step`). It is never
//! recomputed mid-flow.
//!
//! Cursor rules:
//!   * `advance` / `retreat` move by exactly one step and are silent no-ops
//!     at the boundaries.
//!   * `jump_to` only moves backwards (strictly earlier index). Forward jumps
//!     are rejected unconditionally so no unvalidated step can be skipped.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    GroupInfo,
    MarketType,
    BasicInfo,
    Configuration,
    Review,
}

impl StepId {
    pub fn label(&self) -> &'static str {
        match self {
            StepId::GroupInfo => "Group Info",
            StepId::MarketType => "Market Type",
            StepId::BasicInfo => "Basic Info",
            StepId::Configuration => "Configuration",
            StepId::Review => "Review",
        }
    }
}

/// Fixed master order; the group step is the only optional one.
pub const MASTER_STEPS: [StepId; 5] = [
    StepId::GroupInfo,
    StepId::MarketType,
    StepId::BasicInfo,
    StepId::Configuration,
    StepId::Review,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub id: StepId,
    pub label: &'static str,
}

impl From<StepId> for StepDescriptor {
    fn from(id: StepId) -> Self {
        Self {
            id,
            label: id.label(),
        }
    }
}

/// Ordered list of steps to render for the given mode.
pub fn compute_steps(include_group_step: bool) -> Vec<StepDescriptor> {
    MASTER_STEPS
        .iter()
        .copied()
        .filter(|id| include_group_step || *id != StepId::GroupInfo)
        .map(StepDescriptor::from)
        .collect()
}

/// Cursor over the visible step list.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: Vec<StepDescriptor>,
    position: usize,
    furthest: usize,
}

impl StepSequencer {
    pub fn new(include_group_step: bool) -> Self {
        Self {
            steps: compute_steps(include_group_step),
            position: 0,
            furthest: 0,
        }
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> StepDescriptor {
        self.steps[self.position]
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.steps.len()
    }

    /// Steps already passed at least once (for the step indicator).
    pub fn completed(&self) -> &[StepDescriptor] {
        &self.steps[..self.furthest]
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Move one step forward. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        self.furthest = self.furthest.max(self.position);
        true
    }

    /// Move one step back. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jump to an earlier visible step. Returns whether the cursor moved.
    pub fn jump_to(&mut self, id: StepId) -> bool {
        match self.index_of(id) {
            Some(target) if target < self.position => {
                self.position = target;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(steps: &[StepDescriptor]) -> Vec<StepId> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn group_mode_has_five_steps_starting_with_group_info() {
        let steps = compute_steps(true);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].id, StepId::GroupInfo);
        assert_eq!(ids(&steps), MASTER_STEPS.to_vec());
    }

    #[test]
    fn plain_mode_has_four_steps_starting_with_market_type() {
        let steps = compute_steps(false);
        assert_eq!(
            ids(&steps),
            vec![
                StepId::MarketType,
                StepId::BasicInfo,
                StepId::Configuration,
                StepId::Review
            ]
        );
        assert_eq!(steps[0].label, "Market Type");
    }

    #[test]
    fn retreat_at_first_step_is_a_noop() {
        let mut seq = StepSequencer::new(true);
        assert!(!seq.retreat());
        assert_eq!(seq.position(), 0);
    }

    #[test]
    fn advance_at_last_step_is_a_noop() {
        let mut seq = StepSequencer::new(false);
        while seq.advance() {}
        assert_eq!(seq.current().id, StepId::Review);
        assert!(!seq.advance());
        assert_eq!(seq.position(), 3);
    }

    #[test]
    fn jump_only_moves_backwards() {
        let mut seq = StepSequencer::new(true);
        seq.advance();
        seq.advance();
        assert_eq!(seq.current().id, StepId::BasicInfo);

        assert!(!seq.jump_to(StepId::Review));
        assert!(!seq.jump_to(StepId::Configuration));
        assert!(!seq.jump_to(StepId::BasicInfo));
        assert_eq!(seq.position(), 2);

        assert!(seq.jump_to(StepId::GroupInfo));
        assert_eq!(seq.position(), 0);
    }

    #[test]
    fn jump_to_hidden_step_is_rejected() {
        let mut seq = StepSequencer::new(false);
        seq.advance();
        assert!(!seq.jump_to(StepId::GroupInfo));
        assert_eq!(seq.current().id, StepId::BasicInfo);
    }

    #[test]
    fn completed_tracks_furthest_step_reached() {
        let mut seq = StepSequencer::new(false);
        seq.advance();
        seq.advance();
        seq.retreat();
        assert_eq!(
            ids(seq.completed()),
            vec![StepId::MarketType, StepId::BasicInfo]
        );
    }
}
