use std::collections::VecDeque;

use crate::action::PopupResult;

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirmer {
    fn confirm(&mut self, title: &str, question: &str) -> PopupResult;
}

/// Always answers the same way; used by the CLI (`--yes`).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, _title: &str, _question: &str) -> PopupResult {
        if self.0 {
            PopupResult::Confirmed
        } else {
            PopupResult::Cancelled
        }
    }
}

/// Replays queued answers and remembers the questions asked.
/// Defaults to `Cancelled` once the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, _title: &str, question: &str) -> PopupResult {
        self.asked.push(question.to_string());
        match self.answers.pop_front() {
            Some(true) => PopupResult::Confirmed,
            _ => PopupResult::Cancelled,
        }
    }
}
