use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::capabilities::NavTarget;
use crate::config::FeedConfig;
use crate::error::LoadError;
use crate::filter::{filter_with, FilterMode};
use crate::loader::LoadTicket;
use crate::notify::Broadcaster;
use crate::ride::{RideId, RideOffer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "ticket", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    InFlight(LoadTicket),
    Succeeded,
    Failed,
}

impl LoadState {
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::InFlight(_))
    }

    /// Whether a response tagged `ticket` belongs to the load in flight.
    #[must_use]
    pub fn awaits(self, ticket: LoadTicket) -> bool {
        self == Self::InFlight(ticket)
    }
}

/// What the feed mount currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    Loading,
    Empty,
    Error,
    Ready,
}

/// The mount point the page handed to the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSurface {
    pub mount_id: String,
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: FeedConfig,
    pub surface: Option<FeedSurface>,
    pub filter: FilterMode,
    pub rides: Vec<RideOffer>,
    pub offered: HashSet<RideId>,
    pub selected: Option<RideId>,
    pub load: LoadState,
    pub last_ticket: LoadTicket,
    pub last_error: Option<LoadError>,
    pub notifications: Broadcaster,
    pub active_nav: NavTarget,
}

impl Model {
    #[must_use]
    pub fn ride(&self, id: &RideId) -> Option<&RideOffer> {
        self.rides.iter().find(|ride| &ride.id == id)
    }

    #[must_use]
    pub fn visible_rides(&self) -> Vec<&RideOffer> {
        filter_with(&self.rides, self.filter, &self.config.filter_policy())
    }

    #[must_use]
    pub fn feed_status(&self) -> FeedStatus {
        match self.load {
            LoadState::Idle | LoadState::InFlight(_) => FeedStatus::Loading,
            LoadState::Failed => FeedStatus::Error,
            LoadState::Succeeded if self.rides.is_empty() => FeedStatus::Empty,
            LoadState::Succeeded => FeedStatus::Ready,
        }
    }

    #[must_use]
    pub fn is_offered(&self, id: &RideId) -> bool {
        self.offered.contains(id)
    }

    /// Swaps in a freshly loaded list. Offer and selection state belong to the
    /// old list and go with it.
    pub fn replace_rides(&mut self, rides: Vec<RideOffer>) {
        self.rides = rides;
        self.offered.clear();
        self.selected = None;
    }

    pub fn clear_rides(&mut self) {
        self.replace_rides(Vec::new());
    }

    pub fn issue_ticket(&mut self) -> LoadTicket {
        self.last_ticket = self.last_ticket.next();
        self.load = LoadState::InFlight(self.last_ticket);
        self.last_ticket
    }

    pub fn apply_config(&mut self, config: FeedConfig) {
        self.notifications.set_timing(config.toast);
        self.config = config;
    }
}
