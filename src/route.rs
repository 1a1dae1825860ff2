//! Route value type and summary derivation.

use serde::{Deserialize, Serialize};

use crate::cost::CostMatrix;
use crate::place::Place;

/// An ordered day route: synthetic start, visited places, synthetic end.
///
/// Constructed by [`crate::path::build_path`]; [`crate::augment::augment`]
/// inserts extra stops between existing neighbors but never removes or
/// reorders them, and the endpoints stay fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<Place>,
}

impl Route {
    pub(crate) fn new(stops: Vec<Place>) -> Self {
        debug_assert!(stops.len() >= 2, "a route runs at least start to end");
        Self { stops }
    }

    /// The stops in visiting order.
    pub fn stops(&self) -> &[Place] {
        &self.stops
    }

    /// Consumes the route and returns the owned stop sequence.
    pub fn into_stops(self) -> Vec<Place> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether any stop carries the given identifier.
    pub fn contains_id(&self, id: &str) -> bool {
        self.stops.iter().any(|p| p.id == id)
    }

    pub(crate) fn insert(&mut self, index: usize, place: Place) {
        debug_assert!(index > 0 && index < self.stops.len(), "endpoints stay fixed");
        self.stops.insert(index, place);
    }
}

/// Aggregate metrics over a finished route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total travel distance in meters.
    pub total_distance_m: f64,
    /// Total travel plus service duration in seconds.
    pub total_duration_secs: f64,
}

/// Derives route totals from consecutive-pair costs and per-stop service
/// times.
///
/// `speed_multiplier` scales on-site work only; travel time is unaffected.
/// Values ≤ 0 are treated as 1.0.
pub fn summarize(route: &Route, speed_multiplier: f64) -> RouteSummary {
    let speed = if speed_multiplier <= 0.0 { 1.0 } else { speed_multiplier };
    let matrix = CostMatrix::build(route.stops());

    let mut total_distance_m = 0.0;
    let mut total_duration_secs = 0.0;
    for i in 0..route.len() - 1 {
        total_distance_m += matrix.distance_m(i, i + 1);
        total_duration_secs += matrix.duration_secs(i, i + 1);
    }
    for place in route.stops() {
        total_duration_secs += place.service_hours / speed * 3600.0;
    }

    RouteSummary {
        total_distance_m,
        total_duration_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Measurement;

    fn site(id: &str, lat: f64, lng: f64, service_hours: f64) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            latitude: lat,
            longitude: lng,
            service_hours,
            visits_per_year: 0,
            visit_dates: Vec::new(),
            measurements: Vec::new(),
        }
    }

    fn measured_route() -> Route {
        let start = Place::start(50.0, 14.0);
        let mut a = site("a", 50.1, 14.1, 2.0);
        let end = Place::end(50.2, 14.2);
        a.measurements.push(Measurement {
            target_id: "start".to_string(),
            distance_m: Some(10_000),
            duration_secs: Some(600),
        });
        a.measurements.push(Measurement {
            target_id: "end".to_string(),
            distance_m: Some(20_000),
            duration_secs: Some(1_200),
        });
        Route::new(vec![start, a, end])
    }

    #[test]
    fn sums_travel_and_service() {
        let summary = summarize(&measured_route(), 1.0);
        assert_eq!(summary.total_distance_m, 30_000.0);
        // 600 + 1200 travel, 2 h of service.
        assert_eq!(summary.total_duration_secs, 1_800.0 + 7_200.0);
    }

    #[test]
    fn speed_multiplier_scales_service_only() {
        let summary = summarize(&measured_route(), 2.0);
        assert_eq!(summary.total_duration_secs, 1_800.0 + 3_600.0);
    }

    #[test]
    fn nonpositive_speed_clamps_to_one() {
        let at_one = summarize(&measured_route(), 1.0);
        assert_eq!(summarize(&measured_route(), 0.0), at_one);
        assert_eq!(summarize(&measured_route(), -3.0), at_one);
    }
}
