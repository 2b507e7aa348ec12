//! Fetching the ride collection and interpreting what came back.
//!
//! Issuing the request and interpreting the response are separate steps so
//! the interpretation can be tested without a network or a display.

use crux_http::Http;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::LoadError;
use crate::event::Event;
use crate::ride::{normalize_all, RawRide, RideOffer};

/// Identifies one issued load so a late response can be matched against
/// the load the controller is still waiting for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

impl LoadTicket {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transport-neutral view of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// `Err` carries the transport failure message.
pub type FetchResult = Result<FetchResponse, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<RideOffer>),
    Empty,
    Failed(LoadError),
}

impl LoadOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "loaded",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }
}

/// Converts a `crux_http` result into a [`FetchResult`].
///
/// `crux_http` reports 4xx and 5xx statuses as `Error::Http`; those become a
/// response with that status here, so only transport failures stay `Err`.
pub fn from_http(result: crux_http::Result<crux_http::Response<Vec<u8>>>) -> FetchResult {
    match result {
        Ok(mut response) => Ok(FetchResponse {
            status: u16::from(response.status()),
            body: response.take_body().unwrap_or_default(),
        }),
        Err(crux_http::Error::Http(e)) => Ok(FetchResponse {
            status: u16::from(e.code),
            body: e.body.unwrap_or_default(),
        }),
        Err(e) => Err(e.to_string()),
    }
}

/// Issues the single GET for the ride collection. The outcome comes back as
/// [`Event::RidesFetched`] tagged with `ticket`.
pub fn request(http: &Http<Event>, endpoint: &str, ticket: LoadTicket) {
    debug!(%ticket, endpoint, "requesting ride feed");

    http.get(endpoint)
        .header("Accept", "application/json")
        .send(move |result| Event::RidesFetched {
            ticket,
            result: Box::new(from_http(result)),
        });
}

#[must_use]
pub fn interpret(result: FetchResult) -> LoadOutcome {
    let response = match result {
        Ok(response) => response,
        Err(reason) => return LoadOutcome::Failed(LoadError::Transport(reason)),
    };

    if !response.is_success() {
        return LoadOutcome::Failed(LoadError::Response {
            status: response.status,
        });
    }

    match serde_json::from_slice::<Vec<RawRide>>(&response.body) {
        Ok(raws) if raws.is_empty() => LoadOutcome::Empty,
        Ok(raws) => LoadOutcome::Loaded(normalize_all(raws)),
        Err(e) => LoadOutcome::Failed(LoadError::Malformed(e.to_string())),
    }
}
