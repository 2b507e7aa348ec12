//! View selection over the held ride list.
//!
//! Filtering is stable: the output is always a subsequence of the input in
//! its original order.

use serde::{Deserialize, Serialize};

use crate::ride::RideOffer;

pub const NEARBY_MAX_KM: f64 = 3.0;
pub const RECENT_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Nearby,
    Recent,
}

impl FilterMode {
    pub const ALL: [Self; 3] = [Self::All, Self::Nearby, Self::Recent];

    /// Lenient parse for values coming from the page; anything unrecognized
    /// selects `All`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "nearby" => Self::Nearby,
            "recent" => Self::Recent,
            _ => Self::All,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nearby => "nearby",
            Self::Recent => "recent",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Rides",
            Self::Nearby => "Nearby",
            Self::Recent => "Recent",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    pub nearby_max_km: f64,
    pub recent_limit: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            nearby_max_km: NEARBY_MAX_KM,
            recent_limit: RECENT_LIMIT,
        }
    }
}

/// Reads the leading decimal number of a display string, ignoring any
/// trailing unit text ("2.5 km" -> 2.5). Returns `None` when the string does
/// not start with a number, e.g. "N/A".
#[must_use]
pub fn parse_distance_km(distance: &str) -> Option<f64> {
    let s = distance.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// A ride is nearby when its distance parses and is within the threshold.
/// Unparseable distances (the "N/A" default) are never nearby.
#[must_use]
pub fn is_nearby(ride: &RideOffer, max_km: f64) -> bool {
    parse_distance_km(&ride.distance).is_some_and(|km| km <= max_km)
}

#[must_use]
pub fn filter_with<'a>(
    rides: &'a [RideOffer],
    mode: FilterMode,
    policy: &FilterPolicy,
) -> Vec<&'a RideOffer> {
    match mode {
        FilterMode::All => rides.iter().collect(),
        FilterMode::Nearby => rides
            .iter()
            .filter(|ride| is_nearby(ride, policy.nearby_max_km))
            .collect(),
        FilterMode::Recent => rides.iter().take(policy.recent_limit).collect(),
    }
}

#[must_use]
pub fn filter(rides: &[RideOffer], mode: FilterMode) -> Vec<&RideOffer> {
    filter_with(rides, mode, &FilterPolicy::default())
}
