use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::{Result, eyre::eyre};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::action::Action;
use crate::core::effects::Effect;
use crate::core::executor::TaskExecutor;
use crate::core::reducer::reduce;
use crate::core::state::{MountOptions, WizardPhase, WizardState};
use crate::domain::steps::StepId;
use crate::services::confirm::Confirmer;
use crate::services::navigation::Navigator;
use crate::services::notify::{Notification, Notifier};

/// Where a wizard session ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    Done { redirect: String },
    Discarded,
    Unmounted,
    Editing { step: StepId },
    Submitting,
}

/// Event loop of one mounted wizard.
///
/// Owns the `WizardState` exclusively and is the only place that feeds it
/// actions. Effects returned by the reducer are interpreted here:
/// collaborators are called synchronously, async work goes to the
/// `TaskExecutor`, whose results come back through the action channel.
///
/// Confirm prompts are answered immediately by the `Confirmer` and the answer
/// is queued behind the action that asked, preserving order.
pub struct WizardLoop<N: Notifier, V: Navigator, C: Confirmer> {
    state: WizardState,
    notifier: N,
    navigator: V,
    confirmer: C,
    executor: TaskExecutor,
    worker: JoinHandle<()>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl<N: Notifier, V: Navigator, C: Confirmer> WizardLoop<N, V, C> {
    /// Mount a wizard. Must be called inside a Tokio runtime.
    pub fn new(opts: MountOptions, notifier: N, navigator: V, confirmer: C) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (executor, worker) = TaskExecutor::new(action_tx.clone());
        info!(
            "wizard mounted (group step: {}, strictness: {:?})",
            opts.include_group_step, opts.strictness
        );
        Self {
            state: WizardState::mount(opts),
            notifier,
            navigator,
            confirmer,
            executor,
            worker,
            action_tx,
            action_rx,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    pub fn confirmer(&self) -> &C {
        &self.confirmer
    }

    /// Sender for injecting actions from elsewhere (e.g. another task).
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Reduce one action and run its effects to completion.
    pub fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            debug!("dispatch {action}");
            for effect in reduce(&mut self.state, action) {
                self.apply(effect, &mut queue);
            }
        }
    }

    /// Dispatch every action already waiting in the channel.
    pub fn pump(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
        }
    }

    /// Wait until an in-flight submission has been resolved.
    pub async fn settle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.state.mounted && matches!(self.state.phase, WizardPhase::Submitting { .. }) {
            match tokio::time::timeout_at(deadline, self.action_rx.recv()).await {
                Ok(Some(action)) => self.dispatch(action),
                Ok(None) => return Err(eyre!("action channel closed while submitting")),
                Err(_) => return Err(eyre!("submission did not finish within {timeout:?}")),
            }
        }
        Ok(())
    }

    /// Replay a script of actions, then wait for the submission to settle.
    pub async fn run(
        &mut self,
        script: impl IntoIterator<Item = Action>,
        timeout: Duration,
    ) -> Result<Outcome> {
        for action in script {
            self.dispatch(action);
            self.pump();
        }
        self.settle(timeout).await?;
        let outcome = self.outcome();
        info!("wizard finished: {:?}", outcome);
        Ok(outcome)
    }

    pub fn outcome(&self) -> Outcome {
        if !self.state.mounted {
            return Outcome::Unmounted;
        }
        match &self.state.phase {
            WizardPhase::Done { redirect } => Outcome::Done {
                redirect: redirect.clone(),
            },
            WizardPhase::Discarded => Outcome::Discarded,
            WizardPhase::Submitting { .. } => Outcome::Submitting,
            WizardPhase::Editing => Outcome::Editing {
                step: self.state.current_step().id,
            },
        }
    }

    /// Stop the executor and wait for its worker.
    pub async fn shutdown(self) -> Result<()> {
        self.executor.shutdown();
        self.worker.await?;
        Ok(())
    }

    fn apply(&mut self, effect: Effect, queue: &mut VecDeque<Action>) {
        match effect {
            Effect::None => {}
            Effect::Log(msg) => debug!("[effect] {msg}"),
            Effect::Notify {
                kind,
                title,
                message,
            } => self
                .notifier
                .notify(Notification::new(kind, title, message)),
            Effect::Navigate(path) => self.navigator.navigate(&path),
            Effect::GoBack => {
                self.navigator.go_back();
            }
            Effect::Confirm { title, question } => {
                let answer = self.confirmer.confirm(&title, &question);
                queue.push_back(Action::ConfirmResult(answer));
            }
            Effect::Async { id, kind } => {
                info!("[effect] schedule async task {id}: {kind}");
                self.executor.spawn(id, kind);
            }
            Effect::CancelTask(id) => self.executor.cancel(id),
        }
    }
}
