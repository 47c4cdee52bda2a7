/*!
Effect & task model of the wizard.

The reducer stays pure: it never notifies, navigates or sleeps itself. It
returns a `Vec<Effect>` and the loop interprets them against the
collaborators (`Notifier`, `Navigator`, `Confirmer`) and the `TaskExecutor`.

- `Effect` is the declarative side-effect description.
- `TaskKind` is a unit of (simulated) asynchronous work. Each variant holds
  all the input it needs; no shared state is read while it runs.
- `TaskResultKind` re-enters the system as `Action::TaskFinished`.
*/

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::submission::{CreatedMarket, SubmissionRequest};
use crate::services::notify::NotificationKind;

/// Task identifier, allocated by the reducer so it can recognise stale results.
pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Explicit "no effect" marker.
    None,
    Notify {
        kind: NotificationKind,
        title: String,
        message: String,
    },
    Navigate(String),
    GoBack,
    /// Ask the user before a destructive action.
    Confirm {
        title: String,
        question: String,
    },
    /// Spawn a background task under the given id.
    Async { id: TaskId, kind: TaskKind },
    /// Abort a running task; its result must never arrive.
    CancelTask(TaskId),
    /// Lightweight side-effect: log a message (info-level semantic).
    Log(String),
}

impl Effect {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }

    pub fn notify(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Effect::Notify {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn async_task(id: TaskId, kind: TaskKind) -> Self {
        Effect::Async { id, kind }
    }

    pub fn none() -> Self {
        Effect::None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Stand-in for the market creation call: waits `delay`, then succeeds.
    CreateMarket {
        request: SubmissionRequest,
        delay: Duration,
    },
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::CreateMarket { request, delay } => write!(
                f,
                "CreateMarket(with_group={}, delay={}ms)",
                request.with_group,
                delay.as_millis()
            ),
        }
    }
}

/// Results produced by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskResultKind {
    MarketCreated(CreatedMarket),
    /// Never produced by the simulated call; modelled for completeness.
    CreateFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_log_effect() {
        let e = Effect::log("hello");
        match e {
            Effect::Log(s) => assert_eq!(s, "hello"),
            _ => panic!("expected Log variant"),
        }
    }

    #[test]
    fn task_kind_display_mentions_delay() {
        let kind = TaskKind::CreateMarket {
            request: SubmissionRequest {
                with_group: true,
                payload: serde_json::json!({}),
            },
            delay: Duration::from_millis(1500),
        };
        assert_eq!(kind.to_string(), "CreateMarket(with_group=true, delay=1500ms)");
    }
}
