//! Reducer: `Action` -> state transition + effects.
//!
//! Policy:
//!   - Side-effect free. Notifications, navigation, prompts and async work
//!     are returned as `Effect`s for the loop to run.
//!   - Mutates only `WizardState`.
//!   - Never panics or errors on an action that does not apply; such
//!     actions are absorbed (boundary navigation, input after submission,
//!     results of cancelled tasks). Some of them leave an `Effect::Log`.
//!   - Validation failures surface as an error notification and leave the
//!     cursor untouched.

use crate::action::{Action, PopupResult};
use crate::core::effects::{Effect, TaskId, TaskKind, TaskResultKind};
use crate::core::state::{PendingConfirm, WizardPhase, WizardState};
use crate::domain::draft::{Audience, FieldEdit};
use crate::domain::fixtures::Fixtures;
use crate::domain::steps::StepId;
use crate::domain::submission::CreatedMarket;
use crate::domain::validation;
use crate::services::notify::NotificationKind;

pub fn reduce(state: &mut WizardState, action: Action) -> Vec<Effect> {
    match action {
        Action::TaskFinished { id, result } => finish_task(state, id, result),
        Action::Unmount => unmount(state),
        _ if !state.mounted => vec![Effect::log(format!("{action} ignored: wizard unmounted"))],
        Action::ConfirmResult(answer) => resolve_confirm(state, answer),
        _ if state.phase != WizardPhase::Editing => vec![Effect::log(format!(
            "{action} ignored while {}",
            state.label()
        ))],
        Action::Edit(edit) => edit_draft(state, edit),
        Action::Advance => advance(state),
        Action::Submit => {
            if state.current_step().id == StepId::Review {
                begin_submission(state)
            } else {
                vec![Effect::log("submit ignored: not on review step")]
            }
        }
        Action::Retreat => {
            state.sequencer.retreat();
            Vec::new()
        }
        Action::JumpTo(step) => {
            if state.sequencer.jump_to(step) {
                Vec::new()
            } else {
                vec![Effect::log(format!("jump to {step} rejected"))]
            }
        }
        Action::Cancel => {
            if state.dirty {
                state.pending_confirm = Some(PendingConfirm::DiscardDraft);
                vec![Effect::Confirm {
                    title: "Discard draft?".into(),
                    question: "Your changes will be lost.".into(),
                }]
            } else {
                discard(state)
            }
        }
    }
}

fn edit_draft(state: &mut WizardState, edit: FieldEdit) -> Vec<Effect> {
    if let FieldEdit::Audience(Audience::Group(id)) = &edit {
        if Fixtures::builtin().find_group(id).is_none() {
            return vec![Effect::notify(
                NotificationKind::Error,
                "Unknown group",
                format!("No group with id {id}"),
            )];
        }
    }
    match state.draft.apply(edit) {
        Ok(()) => {
            state.dirty = true;
            Vec::new()
        }
        Err(e) => vec![Effect::log(format!("edit rejected: {e}"))],
    }
}

fn advance(state: &mut WizardState) -> Vec<Effect> {
    let step = state.current_step().id;
    if step == StepId::Review {
        return begin_submission(state);
    }
    match validation::check(step, &state.draft, state.strictness) {
        Ok(()) => {
            state.sequencer.advance();
            Vec::new()
        }
        Err(e) => vec![Effect::notify(
            NotificationKind::Error,
            "Missing information",
            e.to_string(),
        )],
    }
}

fn begin_submission(state: &mut WizardState) -> Vec<Effect> {
    let request = match state.submission.begin(&state.draft) {
        Ok(request) => request,
        Err(e) => return vec![Effect::log(format!("submit ignored: {e}"))],
    };
    let id = state.allocate_task_id();
    state.phase = WizardPhase::Submitting { task: id };
    let what = if request.with_group {
        "Creating group and market..."
    } else {
        "Creating market..."
    };
    vec![
        Effect::notify(NotificationKind::Loading, "Please wait", what),
        Effect::async_task(
            id,
            TaskKind::CreateMarket {
                request,
                delay: state.submit_delay,
            },
        ),
    ]
}

fn finish_task(state: &mut WizardState, id: TaskId, result: TaskResultKind) -> Vec<Effect> {
    let expected = matches!(state.phase, WizardPhase::Submitting { task } if task == id);
    if !state.mounted || !expected {
        return vec![Effect::log(format!("stale result for task {id} dropped"))];
    }
    match result {
        TaskResultKind::MarketCreated(created) => market_created(state, created),
        TaskResultKind::CreateFailed { reason } => {
            // fail() cannot refuse here: the phase check above implies pending.
            let _ = state.submission.fail(reason.clone());
            state.phase = WizardPhase::Editing;
            vec![Effect::notify(
                NotificationKind::Error,
                "Creation failed",
                reason,
            )]
        }
    }
}

fn market_created(state: &mut WizardState, created: CreatedMarket) -> Vec<Effect> {
    match state.submission.succeed(created) {
        Ok(redirect) => {
            state.phase = WizardPhase::Done {
                redirect: redirect.clone(),
            };
            let message = if created.group_id.is_some() {
                "Group and market created"
            } else {
                "Market created"
            };
            vec![
                Effect::notify(NotificationKind::Success, "Success", message),
                Effect::Navigate(redirect),
            ]
        }
        Err(e) => vec![Effect::log(format!("creation result ignored: {e}"))],
    }
}

fn resolve_confirm(state: &mut WizardState, answer: PopupResult) -> Vec<Effect> {
    match (state.pending_confirm.take(), answer) {
        (Some(PendingConfirm::DiscardDraft), PopupResult::Confirmed)
            if state.phase == WizardPhase::Editing =>
        {
            discard(state)
        }
        (Some(_), _) => vec![Effect::log("confirmation declined")],
        (None, _) => vec![Effect::log("confirmation without pending prompt ignored")],
    }
}

fn discard(state: &mut WizardState) -> Vec<Effect> {
    state.draft = Default::default();
    state.dirty = false;
    state.phase = WizardPhase::Discarded;
    vec![Effect::GoBack]
}

fn unmount(state: &mut WizardState) -> Vec<Effect> {
    if !state.mounted {
        return Vec::new();
    }
    state.mounted = false;
    state.pending_confirm = None;
    match state.phase {
        WizardPhase::Submitting { task } => vec![Effect::CancelTask(task)],
        _ => Vec::new(),
    }
}
