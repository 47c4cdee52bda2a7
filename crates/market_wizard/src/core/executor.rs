/*!
Task executor for the wizard's simulated background work.

The reducer emits `Effect::Async { id, kind }` / `Effect::CancelTask(id)`;
the loop forwards them here. A single worker loop receives commands over an
unbounded channel and spawns one Tokio task per `TaskKind`. Completion
re-enters the loop as `Action::TaskFinished`.

Cancellation:
- Every running task owns a `CancellationToken` stored in the registry.
- `cancel(id)` fires the token; the task stops at its next await point and
  sends nothing back. A cancelled task never mutates wizard state.
- `shutdown()` cancels everything and stops the worker.

`TaskExecutor` is `Clone` (cheap – clones the sender).
*/

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::action::Action;
use crate::core::effects::{TaskId, TaskKind, TaskResultKind};
use crate::domain::submission::CreatedMarket;

#[derive(Debug)]
enum Command {
    Spawn { id: TaskId, kind: TaskKind },
    Cancel { id: TaskId },
    Shutdown,
}

/// Public handle for scheduling background tasks.
#[derive(Clone)]
pub struct TaskExecutor {
    tx: mpsc::UnboundedSender<Command>,
}

impl TaskExecutor {
    /// Create a new executor and spawn its worker loop.
    ///
    /// Results are sent as `Action::TaskFinished` on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Worker {
            rx,
            action_tx,
            active: HashMap::new(),
        };
        let join = tokio::spawn(worker.run());
        (Self { tx }, join)
    }

    pub fn spawn(&self, id: TaskId, kind: TaskKind) {
        if let Err(e) = self.tx.send(Command::Spawn { id, kind }) {
            warn!("TaskExecutor channel closed; failed to schedule task: {}", e);
        }
    }

    pub fn cancel(&self, id: TaskId) {
        if self.tx.send(Command::Cancel { id }).is_err() {
            debug!("TaskExecutor gone; nothing to cancel for task {id}");
        }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);
    }
}

struct ActiveTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Command>,
    action_tx: mpsc::UnboundedSender<Action>,
    active: HashMap<TaskId, ActiveTask>,
}

impl Worker {
    async fn run(mut self) {
        info!("TaskExecutor worker started");
        while let Some(cmd) = self.rx.recv().await {
            // Forget tasks that already ran to completion.
            self.active.retain(|_, t| !t.handle.is_finished());
            match cmd {
                Command::Spawn { id, kind } => self.spawn(id, kind),
                Command::Cancel { id } => self.cancel(id),
                Command::Shutdown => {
                    warn!(
                        "TaskExecutor shutdown requested; cancelling {} active task(s)",
                        self.active.len()
                    );
                    let ids: Vec<_> = self.active.keys().copied().collect();
                    for id in ids {
                        self.cancel(id);
                    }
                    break;
                }
            }
        }
        info!("TaskExecutor worker stopped");
    }

    fn spawn(&mut self, id: TaskId, kind: TaskKind) {
        debug!("[task:{id}] spawn {kind}");
        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = child.cancelled() => None,
                result = execute(id, kind) => Some(result),
            };
            match result {
                Some(result) => {
                    if tx.send(Action::TaskFinished { id, result }).is_err() {
                        debug!("[task:{id}] finished after loop closed");
                    }
                }
                None => debug!("[task:{id}] cancelled before completion"),
            }
        });
        self.active.insert(id, ActiveTask { token, handle });
    }

    fn cancel(&mut self, id: TaskId) {
        if let Some(task) = self.active.remove(&id) {
            warn!("Cancelling task {}", id);
            task.token.cancel();
        } else {
            debug!("Cancel requested for unknown task {}", id);
        }
    }
}

async fn execute(id: TaskId, kind: TaskKind) -> TaskResultKind {
    match kind {
        TaskKind::CreateMarket { request, delay } => {
            tokio::time::sleep(delay).await;
            let created = CreatedMarket {
                market_id: Uuid::new_v4(),
                group_id: request.with_group.then(Uuid::new_v4),
            };
            info!(
                "[task:{}] market created id={} group={:?} payload_bytes={}",
                id,
                created.market_id,
                created.group_id,
                request.payload.to_string().len()
            );
            TaskResultKind::MarketCreated(created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::SubmissionRequest;
    use std::time::Duration;

    fn create(with_group: bool) -> TaskKind {
        TaskKind::CreateMarket {
            request: SubmissionRequest {
                with_group,
                payload: serde_json::json!({ "title": "Best Route" }),
            },
            delay: Duration::from_millis(1500),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn create_market_completes_after_delay() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (exec, _join) = TaskExecutor::new(action_tx);
        exec.spawn(7, create(true));

        match action_rx.recv().await {
            Some(Action::TaskFinished {
                id,
                result: TaskResultKind::MarketCreated(created),
            }) => {
                assert_eq!(id, 7);
                assert!(created.group_id.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_reports_nothing() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (exec, _join) = TaskExecutor::new(action_tx);
        exec.spawn(1, create(false));
        exec.cancel(1);

        let waited = tokio::time::timeout(Duration::from_secs(5), action_rx.recv()).await;
        assert!(waited.is_err(), "cancelled task delivered {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_worker() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (exec, join) = TaskExecutor::new(action_tx);
        exec.spawn(3, create(false));
        exec.shutdown();
        join.await.unwrap();

        // The worker dropped its sender; the channel may close, but no result arrives.
        let waited = tokio::time::timeout(Duration::from_secs(5), action_rx.recv()).await;
        assert!(!matches!(waited, Ok(Some(_))), "got {waited:?}");
    }
}
