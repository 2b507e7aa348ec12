//! Ride cards and feed placeholders.
//!
//! Rendering is a pure function of its inputs: the same ride and offer state
//! always yield the same node tree.

use crate::dom::Node;
use crate::event::Action;
use crate::filter::parse_distance_km;
use crate::format::{
    estimate_travel_minutes, format_distance_km, format_duration_minutes, AVERAGE_SPEED_KMH,
};
use crate::ride::RideOffer;

pub const CARD_CLASSES: &str =
    "ride-card p-6 rounded-2xl shadow-lg border border-gray-100 card-hover cursor-pointer";
pub const OFFER_LABEL: &str = "Offer Ride";
pub const OFFER_SENT_LABEL: &str = "Offer Sent!";
pub const LOADING_TEXT: &str = "Loading rides...";
pub const EMPTY_TEXT: &str = "No rides posted yet. Be the first!";
pub const ERROR_TEXT: &str = "Error loading rides. Is the server running?";

/// State of a card's offer control. `Sent` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferControl {
    Available,
    Sent,
}

#[must_use]
pub fn card_key(ride: &RideOffer) -> String {
    format!("ride-{}", ride.id)
}

#[must_use]
pub fn offer_key(ride: &RideOffer) -> String {
    format!("offer-{}", ride.id)
}

fn placeholder_text(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

/// Numeric distances read as metres below a kilometre; text distances are
/// shown as sent.
fn distance_text(ride: &RideOffer) -> String {
    ride.distance_km.map_or_else(
        || placeholder_text(&ride.distance).to_string(),
        format_distance_km,
    )
}

fn offer_button(ride: &RideOffer, control: OfferControl) -> Node {
    let button = Node::element("button")
        .key(offer_key(ride))
        .class("text-white px-4 py-2 rounded-full text-sm font-medium transition-colors")
        .on_click(Action::OfferRide {
            id: ride.id.clone(),
        })
        .stop_propagation();

    match control {
        OfferControl::Available => button
            .class("bg-accent-green hover:bg-green-600")
            .text(OFFER_LABEL),
        OfferControl::Sent => button.class("bg-gray-400").text(OFFER_SENT_LABEL).disabled(true),
    }
}

fn route_stop(dot: &str, label: &str) -> Node {
    Node::element("div")
        .class("flex items-center gap-3")
        .child(Node::element("div").class("w-2 h-2 rounded-full").class(dot))
        .child(
            Node::element("span")
                .class("text-gray-700")
                .text(placeholder_text(label)),
        )
}

#[must_use]
pub fn render_card(ride: &RideOffer, control: OfferControl) -> Node {
    let header = Node::element("div")
        .class("flex items-start justify-between mb-4")
        .child(
            Node::element("div")
                .class("flex items-center gap-3")
                .child(
                    Node::element("div")
                        .class("w-12 h-12 bg-gray-100 rounded-full flex items-center justify-center text-2xl")
                        .text(ride.avatar.as_str()),
                )
                .child(
                    Node::element("div")
                        .child(
                            Node::element("h3")
                                .class("font-semibold text-gray-900")
                                .text(placeholder_text(&ride.passenger)),
                        )
                        .child(
                            Node::element("p")
                                .class("text-sm text-gray-500")
                                .text(ride.time.as_str()),
                        ),
                ),
        )
        .child(
            Node::element("div")
                .class("text-right")
                .child(
                    Node::element("div")
                        .key(format!("fare-{}", ride.id))
                        .class("text-lg font-bold accent-green")
                        .text(format!("₱{}", ride.fare)),
                )
                .child(
                    Node::element("div")
                        .class("text-sm text-gray-500")
                        .text(distance_text(ride)),
                ),
        );

    let route = Node::element("div")
        .class("space-y-3")
        .child(route_stop("bg-green-500", &ride.pickup))
        .child(route_stop("bg-red-500", &ride.destination));

    let mut timing = Node::element("div")
        .class("flex items-center gap-2")
        .child(
            Node::element("span")
                .key(format!("eta-{}", ride.id))
                .class("text-sm text-gray-500")
                .text(format!("ETA: {}", ride.eta.label())),
        );
    if let Some(minutes) = parse_distance_km(&ride.distance)
        .and_then(|km| estimate_travel_minutes(km, AVERAGE_SPEED_KMH))
    {
        timing = timing.child(
            Node::element("span")
                .class("text-sm text-gray-400")
                .text(format!("~{}", format_duration_minutes(minutes))),
        );
    }

    let footer = Node::element("div")
        .class("flex items-center justify-between mt-4 pt-4 border-t border-gray-100")
        .child(timing)
        .child(offer_button(ride, control));

    Node::element("div")
        .key(card_key(ride))
        .class(CARD_CLASSES)
        .on_click(Action::SelectRide {
            id: ride.id.clone(),
        })
        .child(header)
        .child(route)
        .child(footer)
}

#[must_use]
pub fn loading_placeholder() -> Node {
    Node::element("p").key("feed-loading").class("text-gray-500").text(LOADING_TEXT)
}

#[must_use]
pub fn empty_placeholder() -> Node {
    Node::element("p").key("feed-empty").class("text-gray-500").text(EMPTY_TEXT)
}

#[must_use]
pub fn error_placeholder() -> Node {
    Node::element("p").key("feed-error").class("text-red-500").text(ERROR_TEXT)
}
