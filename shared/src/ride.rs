//! Ride records as they arrive from the server and as the feed holds them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;
use uuid::Uuid;

pub const DEFAULT_PASSENGER: &str = "Anonymous";
pub const DEFAULT_DISTANCE: &str = "N/A";
pub const DEFAULT_AVATAR: &str = "👤";
pub const POSTED_LABEL: &str = "Just now";
pub const DEPART_NOW: &str = "now";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideId(pub String);

impl RideId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RideId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RideId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A JSON scalar that the server may send as either a number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    /// Mirrors the falsy check of the web client: `0`, `NaN` and blank text
    /// count as missing.
    fn is_blank(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(n) => *n == 0.0 || n.is_nan(),
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A ride record exactly as the endpoint returns it.
///
/// Optional fields are read leniently: a value of an unexpected JSON type is
/// treated as absent rather than failing the whole list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRide {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub passenger: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pickup: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub fare: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub distance: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub departure_time: Option<String>,
}

/// Strings pass through and numbers keep their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<RawScalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(RawScalar::Text(s)),
        Value::Number(n) => n
            .as_i64()
            .map(RawScalar::Int)
            .or_else(|| n.as_f64().map(RawScalar::Float)),
        _ => None,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fare {
    Amount(f64),
    Text(String),
    Unspecified,
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Self::Amount(n) => write!(f, "{n:.2}"),
            Self::Text(s) => f.write_str(s),
            Self::Unspecified => f.write_str("--"),
        }
    }
}

impl From<Option<RawScalar>> for Fare {
    #[allow(clippy::cast_precision_loss)]
    fn from(raw: Option<RawScalar>) -> Self {
        match raw {
            Some(RawScalar::Int(n)) => Self::Amount(n as f64),
            Some(RawScalar::Float(n)) if n.is_finite() => Self::Amount(n),
            Some(RawScalar::Text(s)) if !s.trim().is_empty() => Self::Text(s),
            _ => Self::Unspecified,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eta {
    Now,
    Scheduled,
}

impl Eta {
    #[must_use]
    pub fn from_departure(departure: Option<&str>) -> Self {
        if departure == Some(DEPART_NOW) {
            Self::Now
        } else {
            Self::Scheduled
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Now => "Now",
            Self::Scheduled => "Scheduled",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    #[default]
    Active,
}

/// A display-ready ride. Only ever built through [`normalize`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideOffer {
    pub id: RideId,
    pub passenger: String,
    pub pickup: String,
    pub destination: String,
    pub fare: Fare,
    pub distance: String,
    /// Set when the server sent the distance as a number of kilometres.
    pub distance_km: Option<f64>,
    pub time: String,
    pub eta: Eta,
    pub status: RideStatus,
    pub avatar: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[allow(clippy::cast_precision_loss)]
fn numeric_distance(raw: Option<&RawScalar>) -> Option<f64> {
    match raw {
        Some(RawScalar::Int(km)) => Some(*km as f64),
        Some(RawScalar::Float(km)) if km.is_finite() => Some(*km),
        _ => None,
    }
}

fn normalize_distance(raw: Option<RawScalar>) -> String {
    match raw {
        Some(RawScalar::Int(km)) => format!("{km}.0 km"),
        Some(RawScalar::Float(km)) if km.is_finite() => format!("{km:.1} km"),
        Some(RawScalar::Text(s)) if !s.trim().is_empty() => s,
        _ => DEFAULT_DISTANCE.into(),
    }
}

/// Applies display defaults, taking the fallback id from `fallback_id` when
/// the record has none.
pub fn normalize_with(raw: RawRide, fallback_id: impl FnOnce() -> RideId) -> RideOffer {
    let id = match raw.id {
        Some(id) if !id.is_blank() => RideId(id.to_string()),
        _ => fallback_id(),
    };

    let distance_km = numeric_distance(raw.distance.as_ref());

    RideOffer {
        id,
        passenger: present(raw.passenger).unwrap_or_else(|| DEFAULT_PASSENGER.into()),
        pickup: raw.pickup.unwrap_or_default(),
        destination: raw.destination.unwrap_or_default(),
        fare: Fare::from(raw.fare),
        distance: normalize_distance(raw.distance),
        distance_km,
        time: POSTED_LABEL.into(),
        eta: Eta::from_departure(raw.departure_time.as_deref()),
        status: RideStatus::Active,
        avatar: DEFAULT_AVATAR.into(),
    }
}

#[must_use]
pub fn normalize(raw: RawRide) -> RideOffer {
    normalize_with(raw, RideId::generate)
}

/// Normalizes a whole server list, keeping order and re-keying any id that
/// repeats an earlier one.
#[must_use]
pub fn normalize_all(raws: Vec<RawRide>) -> Vec<RideOffer> {
    let mut seen = HashSet::with_capacity(raws.len());
    let mut rides = Vec::with_capacity(raws.len());

    for raw in raws {
        if raw.pickup.is_none() || raw.destination.is_none() {
            warn!(id = ?raw.id, "ride record is missing pickup or destination");
        }

        let mut ride = normalize(raw);
        if !seen.insert(ride.id.clone()) {
            let replacement = RideId::generate();
            warn!(duplicate = %ride.id, replacement = %replacement, "duplicate ride id re-keyed");
            ride.id = replacement;
            seen.insert(ride.id.clone());
        }
        rides.push(ride);
    }

    rides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pickup: &str, destination: &str) -> RawRide {
        RawRide {
            pickup: Some(pickup.into()),
            destination: Some(destination.into()),
            ..RawRide::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let ride = normalize_with(raw("Jaro Plaza", "SM City"), || RideId::new("gen-1"));

        assert_eq!(ride.id.as_str(), "gen-1");
        assert_eq!(ride.passenger, "Anonymous");
        assert_eq!(ride.pickup, "Jaro Plaza");
        assert_eq!(ride.destination, "SM City");
        assert_eq!(ride.fare, Fare::Unspecified);
        assert_eq!(ride.distance, "N/A");
        assert_eq!(ride.time, "Just now");
        assert_eq!(ride.eta, Eta::Scheduled);
        assert_eq!(ride.status, RideStatus::Active);
        assert_eq!(ride.avatar, "👤");
    }

    #[test]
    fn test_present_fields_kept() {
        let ride = normalize(RawRide {
            id: Some(RawScalar::Int(7)),
            passenger: Some("Maria".into()),
            fare: Some(RawScalar::Int(60)),
            distance: Some(RawScalar::Text("2.5 km".into())),
            departure_time: Some("now".into()),
            ..raw("A", "B")
        });

        assert_eq!(ride.id, RideId::from(7));
        assert_eq!(ride.passenger, "Maria");
        assert_eq!(ride.fare, Fare::Amount(60.0));
        assert_eq!(ride.fare.to_string(), "60");
        assert_eq!(ride.distance, "2.5 km");
        assert_eq!(ride.eta, Eta::Now);
    }

    #[test]
    fn test_eta_requires_exact_now() {
        assert_eq!(Eta::from_departure(Some("now")), Eta::Now);
        assert_eq!(Eta::from_departure(Some("Now")), Eta::Scheduled);
        assert_eq!(Eta::from_departure(Some("2025-01-01T10:00")), Eta::Scheduled);
        assert_eq!(Eta::from_departure(None), Eta::Scheduled);
        assert_eq!(Eta::Now.label(), "Now");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let ride = normalize_with(
            RawRide {
                id: Some(RawScalar::Text("  ".into())),
                passenger: Some(String::new()),
                distance: Some(RawScalar::Text(String::new())),
                ..raw("A", "B")
            },
            || RideId::new("fallback"),
        );

        assert_eq!(ride.id.as_str(), "fallback");
        assert_eq!(ride.passenger, "Anonymous");
        assert_eq!(ride.distance, "N/A");
    }

    #[test]
    fn test_numeric_distance_is_kilometers() {
        let ride = normalize(RawRide {
            distance: Some(RawScalar::Float(2.54)),
            ..raw("A", "B")
        });
        assert_eq!(ride.distance, "2.5 km");
        assert_eq!(ride.distance_km, Some(2.54));

        let ride = normalize(RawRide {
            distance: Some(RawScalar::Int(4)),
            ..raw("A", "B")
        });
        assert_eq!(ride.distance, "4.0 km");
        assert_eq!(ride.distance_km, Some(4.0));

        let ride = normalize(RawRide {
            distance: Some(RawScalar::Text("4 km".into())),
            ..raw("A", "B")
        });
        assert_eq!(ride.distance_km, None);
    }

    #[test]
    fn test_missing_route_renders_empty() {
        let ride = normalize(RawRide::default());
        assert_eq!(ride.pickup, "");
        assert_eq!(ride.destination, "");
    }

    #[test]
    fn test_raw_ride_deserializes_mixed_ids() {
        let raws: Vec<RawRide> = serde_json::from_str(
            r#"[
                {"id": 1, "pickup": "A", "destination": "B", "fare": "50"},
                {"id": "abc", "pickup": "C", "destination": "D", "departureTime": "now", "extra": true},
                {"pickup": "E", "destination": "F", "passenger": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(raws[0].id, Some(RawScalar::Int(1)));
        assert_eq!(raws[0].fare, Some(RawScalar::Text("50".into())));
        assert_eq!(raws[1].id, Some(RawScalar::Text("abc".into())));
        assert_eq!(raws[1].departure_time.as_deref(), Some("now"));
        assert!(raws[2].id.is_none());
        assert!(raws[2].passenger.is_none());
    }

    #[test]
    fn test_raw_ride_tolerates_wrong_types() {
        let raw: RawRide = serde_json::from_str(
            r#"{"id": false, "passenger": {"name": "Ana"}, "pickup": 12, "destination": "B",
                "fare": true, "distance": [2], "departureTime": 1760000000}"#,
        )
        .unwrap();

        assert!(raw.id.is_none());
        assert!(raw.passenger.is_none());
        assert_eq!(raw.pickup.as_deref(), Some("12"));
        assert!(raw.fare.is_none());
        assert!(raw.distance.is_none());
        assert_eq!(raw.departure_time.as_deref(), Some("1760000000"));
    }

    #[test]
    fn test_normalize_all_keeps_order_and_unique_ids() {
        let rides = normalize_all(vec![
            RawRide { id: Some(RawScalar::Int(1)), ..raw("A", "B") },
            RawRide { id: Some(RawScalar::Int(2)), ..raw("C", "D") },
            RawRide { id: Some(RawScalar::Int(1)), ..raw("E", "F") },
            raw("G", "H"),
            raw("I", "J"),
        ]);

        let pickups: Vec<_> = rides.iter().map(|r| r.pickup.as_str()).collect();
        assert_eq!(pickups, ["A", "C", "E", "G", "I"]);

        let ids: HashSet<_> = rides.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), rides.len());
        assert_eq!(rides[0].id, RideId::from(1));
        assert_ne!(rides[2].id, RideId::from(1));
    }

    #[test]
    fn test_fare_display() {
        assert_eq!(Fare::Amount(45.5).to_string(), "45.50");
        assert_eq!(Fare::Text("50-60".into()).to_string(), "50-60");
        assert_eq!(Fare::Unspecified.to_string(), "--");
        assert_eq!(Fare::from(Some(RawScalar::Float(f64::NAN))), Fare::Unspecified);
    }
}
