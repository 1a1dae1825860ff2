#![allow(dead_code)]

//! Test fixtures for tsp-planner.
//!
//! Provides a builder for place records and named central-Bohemian site
//! coordinates.

pub mod sites;

use chrono::NaiveDate;
use tsp_planner::place::{Measurement, Place};

/// Builder for places with sensible defaults.
#[derive(Debug, Clone)]
pub struct PlaceBuilder {
    place: Place,
}

impl PlaceBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            place: Place {
                id: id.to_string(),
                name: id.to_string(),
                latitude: 50.0,
                longitude: 14.4,
                service_hours: 1.0,
                visits_per_year: 2,
                visit_dates: Vec::new(),
                measurements: Vec::new(),
            },
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.place.latitude = latitude;
        self.place.longitude = longitude;
        self
    }

    pub fn service_hours(mut self, hours: f64) -> Self {
        self.place.service_hours = hours;
        self
    }

    pub fn quota(mut self, per_year: u32) -> Self {
        self.place.visits_per_year = per_year;
        self
    }

    pub fn visited(mut self, dates: &[&str]) -> Self {
        self.place.visit_dates = dates.iter().map(|d| day(d)).collect();
        self
    }

    /// Records a directional measurement towards `target`.
    pub fn measure(mut self, target: &str, distance_m: u32, duration_secs: u32) -> Self {
        self.place.measurements.push(Measurement {
            target_id: target.to_string(),
            distance_m: Some(distance_m),
            duration_secs: Some(duration_secs),
        });
        self
    }

    /// Records a distance-only measurement (duration unknown).
    pub fn measure_distance(mut self, target: &str, distance_m: u32) -> Self {
        self.place.measurements.push(Measurement {
            target_id: target.to_string(),
            distance_m: Some(distance_m),
            duration_secs: None,
        });
        self
    }

    pub fn build(self) -> Place {
        self.place
    }
}

pub fn day(s: &str) -> NaiveDate {
    s.parse().expect("fixture dates are well-formed")
}
