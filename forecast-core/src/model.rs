use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days requested from the provider, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCount(u8);

impl DayCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Day count for a plain location search ("current + short forecast").
    pub const DEFAULT: DayCount = DayCount(3);

    /// Day count for the geolocation / fallback flow.
    pub const SINGLE: DayCount = DayCount(1);

    pub fn new(days: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&days).then_some(Self(days))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated lookup, ready to be sent to the forecast provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub location: String,
    pub days: DayCount,
}

impl Query {
    /// Query for a platform-supplied position.
    pub fn for_position(position: Coordinates) -> Self {
        Self { location: position.to_string(), days: DayCount::SINGLE }
    }

    /// Query for the configured fallback location, used when no position is known.
    pub fn for_fallback(location: impl Into<String>) -> Self {
        Self { location: location.into(), days: DayCount::SINGLE }
    }
}

/// Start/end dates as entered by the user. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start: Some(start), end: Some(end) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Undecoded provider payload. Its schema belongs to the provider, so nothing
/// is checked until the renderer maps it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResponse(pub serde_json::Value);

impl From<serde_json::Value> for ForecastResponse {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
