//! Place and measurement records.
//!
//! These mirror the records the surrounding application loads from its
//! JSON store; the planner treats them as immutable inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reserved identifier of the synthetic route start.
pub const START_ID: &str = "start";

/// Reserved identifier of the synthetic route end.
pub const END_ID: &str = "end";

/// A directional travel observation towards another place.
///
/// Measurements are sparse and possibly asymmetric: not every pair has
/// one, and when both directions exist they may disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the place this measurement points at.
    pub target_id: String,
    /// Road distance in meters, if known.
    pub distance_m: Option<u32>,
    /// Travel duration in seconds, if known.
    pub duration_secs: Option<u32>,
}

/// A visiting point: a field-work site, or one of the two synthetic
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Time required to perform the work on site, in hours.
    #[serde(default)]
    pub service_hours: f64,
    /// Yearly visit quota.
    #[serde(default)]
    pub visits_per_year: u32,
    /// Prior visit dates, in insertion order (not necessarily sorted).
    #[serde(default)]
    pub visit_dates: Vec<NaiveDate>,
    /// Directional measurements towards other places.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Place {
    /// Synthetic route start: zero service time, no history, no
    /// measurements.
    pub fn start(latitude: f64, longitude: f64) -> Self {
        Self::endpoint(START_ID, "Start", latitude, longitude)
    }

    /// Synthetic route end.
    pub fn end(latitude: f64, longitude: f64) -> Self {
        Self::endpoint(END_ID, "End", latitude, longitude)
    }

    fn endpoint(id: &str, name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            latitude,
            longitude,
            service_hours: 0.0,
            visits_per_year: 0,
            visit_dates: Vec::new(),
            measurements: Vec::new(),
        }
    }

    /// True for the reserved start/end identifiers.
    pub fn is_endpoint(&self) -> bool {
        self.id == START_ID || self.id == END_ID
    }

    pub(crate) fn measured_distance_to(&self, target_id: &str) -> Option<u32> {
        self.measurements
            .iter()
            .find(|m| m.target_id == target_id)
            .and_then(|m| m.distance_m)
    }

    pub(crate) fn measured_duration_to(&self, target_id: &str) -> Option<u32> {
        self.measurements
            .iter()
            .find(|m| m.target_id == target_id)
            .and_then(|m| m.duration_secs)
    }
}
