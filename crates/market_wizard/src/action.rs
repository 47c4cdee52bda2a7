use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::effects::{TaskId, TaskResultKind};
use crate::domain::draft::FieldEdit;
use crate::domain::steps::StepId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupResult {
    Confirmed,
    Cancelled,
}

/// Everything that can happen to a mounted wizard.
///
/// User input (edits, navigation, cancel) and system events (task results,
/// unmount) share one enum so the reducer sees a single ordered stream.
/// Scripts for the CLI are plain JSON arrays of these.
#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Edit(FieldEdit),
    Advance,
    Retreat,
    JumpTo(StepId),
    Submit,
    /// Leave the wizard; asks for confirmation when the draft has edits.
    Cancel,
    ConfirmResult(PopupResult),
    Unmount,
    TaskFinished {
        id: TaskId,
        result: TaskResultKind,
    },
}
