use std::time::{Duration, Instant};

use log::{error, info};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    Loading,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Instant::now(),
            // Loading toasts stay until replaced.
            ttl: match kind {
                NotificationKind::Loading => Duration::MAX,
                _ => Duration::from_millis(4000),
            },
        }
    }
}

/// Toast surface.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Success, title, message));
    }

    fn error(&mut self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Error, title, message));
    }

    fn info(&mut self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Info, title, message));
    }

    fn loading(&mut self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Loading, title, message));
    }
}

/// Writes notifications to the log (CLI use).
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, n: Notification) {
        match n.kind {
            NotificationKind::Error => error!("[toast:{}] {}: {}", n.kind, n.title, n.message),
            _ => info!("[toast:{}] {}: {}", n.kind, n.title, n.message),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub entries: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.entries.iter().map(|n| n.kind).collect()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.entries.iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}
