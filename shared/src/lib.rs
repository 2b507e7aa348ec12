//! Shared core of the ride feed.
//!
//! The browser shell forwards page triggers as [`Event`]s, performs the
//! effects the core asks for (HTTP, render, animation, navigation) and
//! mirrors the [`ViewModel`] into the document.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod card;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod loader;
pub mod model;
pub mod notify;
pub mod ride;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect, NavTarget};
pub use config::FeedConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{ConfigError, LoadError};
pub use event::{Action, Event};
pub use filter::{filter, FilterMode};
pub use loader::{FetchResponse, FetchResult, LoadOutcome, LoadTicket};
pub use model::{FeedStatus, LoadState, Model};
pub use notify::{NotificationId, Phase, Severity};
pub use ride::{normalize, RawRide, RideId, RideOffer};
pub use view::{FilterButton, ToastView, ViewModel};
