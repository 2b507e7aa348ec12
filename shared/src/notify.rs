//! Transient status toasts.
//!
//! Each notification owns its own clock. The shell reports elapsed time with
//! `Event::Tick`, and every live notification walks
//! `Created -> Visible -> Dismissing -> Removed` independently of the others.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ENTER_MS: u64 = 100;
pub const DEFAULT_DWELL_MS: u64 = 5000;
pub const DEFAULT_EXIT_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn classes(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-500 text-white",
            Self::Success => "bg-green-500 text-white",
            Self::Error => "bg-red-500 text-white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Created,
    Visible,
    Dismissing,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastTiming {
    /// Delay before the toast slides in.
    pub enter_ms: u64,
    /// Time from creation until dismissal starts on its own.
    pub dwell_ms: u64,
    /// Exit animation length; the toast is removed once it elapses.
    pub exit_ms: u64,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            enter_ms: DEFAULT_ENTER_MS,
            dwell_ms: DEFAULT_DWELL_MS,
            exit_ms: DEFAULT_EXIT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
    age_ms: u64,
    dismissed_at_ms: Option<u64>,
}

impl Notification {
    fn new(id: NotificationId, message: String, severity: Severity) -> Self {
        Self {
            id,
            message,
            severity,
            phase: Phase::Created,
            age_ms: 0,
            dismissed_at_ms: None,
        }
    }

    #[must_use]
    pub const fn age_ms(&self) -> u64 {
        self.age_ms
    }

    fn recompute_phase(&mut self, timing: &ToastTiming) {
        if self.dismissed_at_ms.is_none() && self.age_ms >= timing.dwell_ms {
            self.dismissed_at_ms = Some(timing.dwell_ms);
        }

        self.phase = match self.dismissed_at_ms {
            Some(start) if self.age_ms.saturating_sub(start) >= timing.exit_ms => Phase::Removed,
            Some(_) => Phase::Dismissing,
            None if self.age_ms >= timing.enter_ms => Phase::Visible,
            None => Phase::Created,
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Broadcaster {
    timing: ToastTiming,
    next_id: u64,
    live: Vec<Notification>,
}

impl Broadcaster {
    #[must_use]
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            timing,
            next_id: 0,
            live: Vec::new(),
        }
    }

    pub fn set_timing(&mut self, timing: ToastTiming) {
        self.timing = timing;
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.live.push(Notification::new(id, message.into(), severity));
        id
    }

    /// Advances every live notification by `elapsed_ms` and drops the ones
    /// that reached `Removed`. Returns whether anything changed phase.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let timing = self.timing;
        let mut changed = false;

        for notification in &mut self.live {
            let before = notification.phase;
            notification.age_ms = notification.age_ms.saturating_add(elapsed_ms);
            notification.recompute_phase(&timing);
            changed |= notification.phase != before;
        }

        self.live.retain(|n| n.phase != Phase::Removed);
        changed
    }

    /// Starts dismissal right away. Unknown or already-dismissing ids are a
    /// no-op; returns whether the notification changed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let timing = self.timing;
        let Some(notification) = self.live.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if notification.dismissed_at_ms.is_some() {
            return false;
        }

        notification.dismissed_at_ms = Some(notification.age_ms);
        notification.recompute_phase(&timing);
        self.live.retain(|n| n.phase != Phase::Removed);
        true
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.live.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.live.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
