use serde::{Deserialize, Serialize};

use crate::capabilities::NavTarget;
use crate::filter::FilterMode;
use crate::loader::{FetchResult, LoadTicket};
use crate::notify::NotificationId;
use crate::ride::RideId;

/// A user interaction attached to a rendered node. The shell sends it back
/// unchanged when the node is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SelectRide { id: RideId },
    OfferRide { id: RideId },
    SelectFilter { mode: FilterMode },
    DismissNotification { id: NotificationId },
    Refresh,
}

#[derive(Debug, Clone, Default)]
pub enum Event {
    #[default]
    Noop,

    /// The page exposes a mount point for the feed; triggers the first load.
    SurfaceAttached {
        mount_id: String,
    },
    SurfaceDetached,
    ConfigReceived {
        json: String,
    },

    RefreshRequested,
    RidesFetched {
        ticket: LoadTicket,
        result: Box<FetchResult>,
    },

    FilterSelected(FilterMode),
    RideSelected {
        id: RideId,
    },
    OfferRide {
        id: RideId,
    },

    NotificationDismissed {
        id: NotificationId,
    },
    Tick {
        elapsed_ms: u64,
    },

    NavigationRequested(NavTarget),
    PostRideRequested,
    CommunityRequested,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::SurfaceAttached { .. } => "surface_attached",
            Self::SurfaceDetached => "surface_detached",
            Self::ConfigReceived { .. } => "config_received",
            Self::RefreshRequested => "refresh_requested",
            Self::RidesFetched { .. } => "rides_fetched",
            Self::FilterSelected(_) => "filter_selected",
            Self::RideSelected { .. } => "ride_selected",
            Self::OfferRide { .. } => "offer_ride",
            Self::NotificationDismissed { .. } => "notification_dismissed",
            Self::Tick { .. } => "tick",
            Self::NavigationRequested(_) => "navigation_requested",
            Self::PostRideRequested => "post_ride_requested",
            Self::CommunityRequested => "community_requested",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::RefreshRequested
                | Self::FilterSelected(_)
                | Self::RideSelected { .. }
                | Self::OfferRide { .. }
                | Self::NotificationDismissed { .. }
                | Self::NavigationRequested(_)
                | Self::PostRideRequested
                | Self::CommunityRequested
        )
    }
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        match action {
            Action::SelectRide { id } => Self::RideSelected { id },
            Action::OfferRide { id } => Self::OfferRide { id },
            Action::SelectFilter { mode } => Self::FilterSelected(mode),
            Action::DismissNotification { id } => Self::NotificationDismissed { id },
            Action::Refresh => Self::RefreshRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_default() {
        assert!(matches!(Event::default(), Event::Noop));
    }

    #[test]
    fn test_event_name() {
        assert_eq!(Event::Noop.name(), "noop");
        assert_eq!(Event::RefreshRequested.name(), "refresh_requested");
        assert_eq!(Event::FilterSelected(FilterMode::Nearby).name(), "filter_selected");
        assert_eq!(Event::Tick { elapsed_ms: 16 }.name(), "tick");
    }

    #[test]
    fn test_event_is_user_initiated() {
        assert!(!Event::Noop.is_user_initiated());
        assert!(!Event::Tick { elapsed_ms: 16 }.is_user_initiated());
        assert!(Event::RefreshRequested.is_user_initiated());
        assert!(Event::OfferRide { id: RideId::from(1) }.is_user_initiated());
    }

    #[test]
    fn test_action_into_event() {
        let event = Event::from(Action::OfferRide { id: RideId::from(3) });
        assert!(matches!(event, Event::OfferRide { id } if id == RideId::from(3)));

        let event = Event::from(Action::SelectFilter { mode: FilterMode::Recent });
        assert!(matches!(event, Event::FilterSelected(FilterMode::Recent)));

        assert!(matches!(Event::from(Action::Refresh), Event::RefreshRequested));
    }

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_string(&Action::OfferRide { id: RideId::from(9) }).unwrap();
        assert_eq!(json, r#"{"type":"offer_ride","id":"9"}"#);
    }
}
