//! Wizard state owned by the reducer.
//!
//! `WizardState` is the single-writer record for one mounted wizard: the
//! draft, the step cursor, the submission handler and the phase of the flow.
//! It is created by [`WizardState::mount`] and only mutated through
//! `core::reducer::reduce`.
//!
//! Phase machine:
//!   Editing --advance at Review--> Submitting { task }
//!   Submitting --TaskFinished(ok)--> Done { redirect }
//!   Submitting --TaskFinished(err)--> Editing
//!   Editing --cancel (confirmed if dirty)--> Discarded
//!
//! Unmounting flips `mounted` off; any later task result is ignored.

use std::time::Duration;

use crate::config::WizardCfg;
use crate::core::effects::TaskId;
use crate::domain::draft::DraftRecord;
use crate::domain::steps::{StepDescriptor, StepSequencer};
use crate::domain::submission::{Routes, SubmissionHandler};
use crate::domain::validation::Strictness;

/// Decided once when the wizard is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
    pub include_group_step: bool,
    pub strictness: Strictness,
    pub routes: Routes,
    pub submit_delay: Duration,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self::from_config(&WizardCfg::default(), false)
    }
}

impl MountOptions {
    pub fn from_config(cfg: &WizardCfg, include_group_step: bool) -> Self {
        Self {
            include_group_step,
            strictness: if cfg.strict_basic_info {
                Strictness::Standalone
            } else {
                Strictness::Lenient
            },
            routes: Routes {
                market_route: cfg.market_route.clone(),
                group_route: cfg.group_route.clone(),
            },
            submit_delay: Duration::from_millis(cfg.submit_delay_ms),
        }
    }

    pub fn with_group(mut self, include_group_step: bool) -> Self {
        self.include_group_step = include_group_step;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting { task: TaskId },
    Done { redirect: String },
    Discarded,
}

/// Destructive action waiting for the user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    DiscardDraft,
}

#[derive(Debug)]
pub struct WizardState {
    pub draft: DraftRecord,
    pub sequencer: StepSequencer,
    pub phase: WizardPhase,
    pub strictness: Strictness,
    pub submission: SubmissionHandler,
    pub submit_delay: Duration,
    /// Set by the first successful edit.
    pub dirty: bool,
    pub mounted: bool,
    pub pending_confirm: Option<PendingConfirm>,
    next_task_id: TaskId,
}

impl WizardState {
    pub fn mount(opts: MountOptions) -> Self {
        Self {
            draft: DraftRecord::new(opts.include_group_step),
            sequencer: StepSequencer::new(opts.include_group_step),
            phase: WizardPhase::Editing,
            strictness: opts.strictness,
            submission: SubmissionHandler::new(opts.routes),
            submit_delay: opts.submit_delay,
            dirty: false,
            mounted: true,
            pending_confirm: None,
            next_task_id: 1,
        }
    }

    pub fn current_step(&self) -> StepDescriptor {
        self.sequencer.current()
    }

    pub fn is_editing(&self) -> bool {
        self.mounted && self.phase == WizardPhase::Editing
    }

    pub fn redirect(&self) -> Option<&str> {
        match &self.phase {
            WizardPhase::Done { redirect } => Some(redirect),
            _ => None,
        }
    }

    /// Human-readable label (logs / CLI output).
    pub fn label(&self) -> &'static str {
        match self.phase {
            WizardPhase::Editing => "editing",
            WizardPhase::Submitting { .. } => "submitting",
            WizardPhase::Done { .. } => "done",
            WizardPhase::Discarded => "discarded",
        }
    }

    pub(crate) fn allocate_task_id(&mut self) -> TaskId {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }
}
