//! The feed controller.
//!
//! All feed state lives in [`Model`]; the shell drives it with [`Event`]s and
//! renders the [`ViewModel`]. At most one load is in flight per surface: a
//! refresh that arrives while one is outstanding is ignored, and a response
//! whose ticket is no longer awaited is dropped.

use tracing::{debug, debug_span, info, warn};

use crate::capabilities::{Capabilities, NavTarget};
use crate::card::{
    card_key, empty_placeholder, error_placeholder, loading_placeholder, render_card,
    OfferControl,
};
use crate::config::FeedConfig;
use crate::dom::{Mount, Node};
use crate::event::Event;
use crate::filter::FilterMode;
use crate::loader::{self, interpret, LoadOutcome};
use crate::model::{FeedStatus, FeedSurface, LoadState, Model};
use crate::notify::Severity;
use crate::ride::RideId;
use crate::view::{FilterButton, ToastView, ViewModel};

pub const COMMUNITY_MESSAGE: &str = "Community features coming soon!";

#[derive(Default)]
pub struct App;

impl App {
    fn start_load(model: &mut Model, caps: &Capabilities) {
        if model.surface.is_none() {
            debug!("no feed surface attached; load not started");
            return;
        }
        if let LoadState::InFlight(ticket) = model.load {
            debug!(%ticket, "load already in flight; trigger ignored");
            return;
        }

        let ticket = model.issue_ticket();
        loader::request(&caps.http, &model.config.endpoint, ticket);
        caps.render.render();
    }

    fn apply_outcome(outcome: LoadOutcome, model: &mut Model, caps: &Capabilities) {
        debug!(outcome = outcome.label(), "load finished");
        match outcome {
            LoadOutcome::Loaded(rides) => {
                info!(count = rides.len(), "ride feed loaded");
                model.replace_rides(rides);
                model.load = LoadState::Succeeded;
                model.last_error = None;
                caps.render.render();
                Self::animate_cards(model, caps);
            }
            LoadOutcome::Empty => {
                info!("ride feed is empty");
                model.clear_rides();
                model.load = LoadState::Succeeded;
                model.last_error = None;
                caps.render.render();
            }
            LoadOutcome::Failed(error) => {
                warn!(
                    code = error.code(),
                    reason = error.reason(),
                    transport = error.is_transport_level(),
                    "ride feed load failed"
                );
                model.clear_rides();
                model.load = LoadState::Failed;
                model.last_error = Some(error);
                caps.render.render();
            }
        }
    }

    fn animate_cards(model: &Model, caps: &Capabilities) {
        if model.feed_status() != FeedStatus::Ready || model.surface.is_none() {
            return;
        }
        let keys = model.visible_rides().into_iter().map(card_key).collect();
        caps.animate.cards_entered(keys, model.config.card_stagger_ms);
    }

    /// Forgets the surface and anything loaded into it. A load still in
    /// flight is abandoned; its response will no longer be awaited.
    fn detach(model: &mut Model) {
        if let LoadState::InFlight(ticket) = model.load {
            debug!(%ticket, "abandoning in-flight load");
        }
        model.surface = None;
        model.load = LoadState::Idle;
        model.clear_rides();
    }

    fn navigate(target: NavTarget, model: &mut Model, caps: &Capabilities) {
        model.active_nav = target;
        if let Some(page) = target.page() {
            info!(nav = target.as_str(), page, "navigating away from feed");
            Self::detach(model);
            caps.navigate.to_page(page);
        }
        caps.render.render();
    }

    fn select_ride(id: &RideId, model: &mut Model, caps: &Capabilities) {
        let Some(ride) = model.ride(id) else {
            debug!(%id, "select for unknown ride ignored");
            return;
        };

        let message = format!("Selected ride from {} to {}", ride.pickup, ride.destination);
        let key = card_key(ride);

        model.selected = Some(id.clone());
        model.notifications.notify(message, Severity::Info);
        caps.animate.card_pressed(key);
        caps.render.render();
    }

    fn offer_ride(id: RideId, model: &mut Model, caps: &Capabilities) {
        if model.load.is_in_flight() {
            debug!(%id, "offer while the list is reloading ignored");
            return;
        }
        if model.is_offered(&id) {
            debug!(%id, "offer already sent");
            return;
        }
        let Some(ride) = model.ride(&id) else {
            debug!(%id, "offer for stale ride ignored");
            return;
        };

        let message = format!("Offer sent to {}!", ride.passenger);
        info!(%id, "ride offer sent");

        model.offered.insert(id);
        model.notifications.notify(message, Severity::Success);
        caps.render.render();
    }

    fn feed_children(model: &Model) -> Vec<Node> {
        match model.feed_status() {
            FeedStatus::Loading => vec![loading_placeholder()],
            FeedStatus::Empty => vec![empty_placeholder()],
            FeedStatus::Error => vec![error_placeholder()],
            FeedStatus::Ready => model
                .visible_rides()
                .into_iter()
                .map(|ride| {
                    let control = if model.is_offered(&ride.id) {
                        OfferControl::Sent
                    } else {
                        OfferControl::Available
                    };
                    render_card(ride, control)
                })
                .collect(),
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let span = debug_span!("update", event = event.name());
        let _entered = span.enter();

        if event.is_user_initiated() {
            debug!("user action");
        }

        match event {
            Event::Noop => {}

            Event::SurfaceAttached { mount_id } => {
                info!(mount_id = %mount_id, "feed surface attached");
                model.surface = Some(FeedSurface { mount_id });
                Self::start_load(model, caps);
            }

            Event::SurfaceDetached => {
                Self::detach(model);
                caps.render.render();
            }

            Event::ConfigReceived { json } => match FeedConfig::from_json(&json) {
                Ok(config) => {
                    debug!(endpoint = %config.endpoint, "feed config applied");
                    model.apply_config(config);
                    caps.render.render();
                }
                Err(e) => warn!(error = %e, "invalid feed config; keeping previous"),
            },

            Event::RefreshRequested => Self::start_load(model, caps),

            Event::RidesFetched { ticket, result } => {
                if !model.load.awaits(ticket) {
                    debug!(%ticket, "response for a load no longer awaited; dropped");
                    return;
                }
                Self::apply_outcome(interpret(*result), model, caps);
            }

            Event::FilterSelected(mode) => {
                model.filter = mode;
                caps.render.render();
                Self::animate_cards(model, caps);
            }

            Event::RideSelected { id } => Self::select_ride(&id, model, caps),

            Event::OfferRide { id } => Self::offer_ride(id, model, caps),

            Event::NotificationDismissed { id } => {
                if model.notifications.dismiss(id) {
                    caps.render.render();
                }
            }

            Event::Tick { elapsed_ms } => {
                if model.notifications.advance(elapsed_ms) {
                    caps.render.render();
                }
            }

            Event::NavigationRequested(target) => Self::navigate(target, model, caps),

            Event::PostRideRequested => Self::navigate(NavTarget::Post, model, caps),

            Event::CommunityRequested => {
                model.notifications.notify(COMMUNITY_MESSAGE, Severity::Info);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let feed = model.surface.as_ref().map(|surface| {
            let mut mount = Mount::new(surface.mount_id.clone());
            mount.replace_children(Self::feed_children(model));
            mount
        });

        ViewModel {
            feed,
            status: model.feed_status(),
            filter: model.filter,
            filters: FilterMode::ALL
                .iter()
                .map(|&mode| FilterButton::new(mode, model.filter))
                .collect(),
            notifications: model.notifications.iter().map(ToastView::from).collect(),
            active_nav: model.active_nav,
            is_loading: model.load.is_in_flight(),
        }
    }
}
