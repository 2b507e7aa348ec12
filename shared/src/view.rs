use serde::{Deserialize, Serialize};

use crate::capabilities::NavTarget;
use crate::dom::Mount;
use crate::event::Action;
use crate::filter::FilterMode;
use crate::model::FeedStatus;
use crate::notify::{Notification, NotificationId, Phase, Severity};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterButton {
    pub mode: FilterMode,
    pub label: String,
    pub active: bool,
    pub action: Action,
}

impl FilterButton {
    #[must_use]
    pub fn new(mode: FilterMode, current: FilterMode) -> Self {
        Self {
            mode,
            label: mode.label().into(),
            active: mode == current,
            action: Action::SelectFilter { mode },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
    pub classes: String,
    pub dismiss: Action,
}

impl From<&Notification> for ToastView {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            message: n.message.clone(),
            severity: n.severity,
            phase: n.phase,
            classes: n.severity.classes().into(),
            dismiss: Action::DismissNotification { id: n.id },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    /// Present while a feed surface is attached.
    pub feed: Option<Mount>,
    pub status: FeedStatus,
    pub filter: FilterMode,
    pub filters: Vec<FilterButton>,
    pub notifications: Vec<ToastView>,
    pub active_nav: NavTarget,
    pub is_loading: bool,
}

impl ViewModel {
    #[must_use]
    pub fn toast(&self, id: NotificationId) -> Option<&ToastView> {
        self.notifications.iter().find(|t| t.id == id)
    }
}
