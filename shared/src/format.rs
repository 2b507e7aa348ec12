pub const AVERAGE_SPEED_KMH: f64 = 25.0;

/// "45 min" below an hour, "1h 15m" from an hour up.
#[must_use]
pub fn format_duration_minutes(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// "750m" below one kilometre, "5.5 km" from one kilometre up.
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        #[allow(clippy::cast_possible_truncation)]
        let metres = (km * 1000.0).round() as i64;
        format!("{metres}m")
    } else {
        format!("{km:.1} km")
    }
}

/// Rounded travel time in minutes at `speed_kmh`. Non-finite or non-positive
/// inputs give `None`.
#[must_use]
pub fn estimate_travel_minutes(distance_km: f64, speed_kmh: f64) -> Option<u32> {
    if !distance_km.is_finite() || distance_km < 0.0 || !speed_kmh.is_finite() || speed_kmh <= 0.0 {
        return None;
    }

    let minutes = (distance_km / speed_kmh * 60.0).round();
    if minutes > f64::from(u32::MAX) {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = minutes as u32;
    Some(minutes)
}
