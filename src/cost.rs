//! Pairwise travel-cost resolution.
//!
//! Combines sparse directional measurements with a great-circle fallback
//! into dense matrices over arena node indices. Distances are symmetrized
//! before any graph is built (disagreeing directions collapse to the
//! minimum, keeping the weights a valid lower bound); durations stay
//! directional.

use rayon::prelude::*;

use crate::place::Place;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two latitude/longitude pairs, in meters.
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Dense pairwise costs over a fixed node slice.
///
/// Node indices follow the order of the slice passed to [`CostMatrix::build`].
#[derive(Debug, Clone)]
pub struct CostMatrix {
    n: usize,
    /// Symmetric distances in meters.
    dist: Vec<Vec<f64>>,
    /// Directional durations in seconds; `None` = unknown.
    dur: Vec<Vec<Option<u32>>>,
}

impl CostMatrix {
    /// Resolves every pair in `places`.
    ///
    /// Distance per unordered pair: the minimum of the two measured
    /// directions when both exist, the one measured direction when only
    /// one does, the great-circle estimate otherwise. Duration per
    /// ordered pair: the forward measurement, else the reverse one
    /// standing in, else unknown.
    pub fn build(places: &[Place]) -> Self {
        let n = places.len();

        // Measurement lookups scan each record's entry list; rows are
        // independent, so they run in parallel.
        let measured: Vec<(Vec<Option<u32>>, Vec<Option<u32>>)> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut dist_row = vec![None; n];
                let mut dur_row = vec![None; n];
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    dist_row[j] = places[i].measured_distance_to(&places[j].id);
                    dur_row[j] = places[i].measured_duration_to(&places[j].id);
                }
                (dist_row, dur_row)
            })
            .collect();

        let mut dist = vec![vec![0.0; n]; n];
        let mut dur = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    dur[i][j] = measured[i].1[j].or(measured[j].1[i]);
                }
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let d = match (measured[i].0[j], measured[j].0[i]) {
                    (Some(forward), Some(reverse)) => f64::from(forward.min(reverse)),
                    (Some(only), None) | (None, Some(only)) => f64::from(only),
                    (None, None) => haversine_m(
                        places[i].latitude,
                        places[i].longitude,
                        places[j].latitude,
                        places[j].longitude,
                    ),
                };
                dist[i][j] = d;
                dist[j][i] = d;
            }
        }

        Self { n, dist, dur }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Resolved symmetric distance in meters.
    pub fn distance_m(&self, from: usize, to: usize) -> f64 {
        self.dist[from][to]
    }

    /// Directional travel duration, if any measurement covers the pair.
    pub fn duration(&self, from: usize, to: usize) -> Option<u32> {
        self.dur[from][to]
    }

    /// Directional travel duration with unknown treated as zero seconds.
    ///
    /// The geometric fallback carries no duration, so budget arithmetic
    /// over unmeasured pairs undercounts travel.
    pub fn duration_secs(&self, from: usize, to: usize) -> f64 {
        self.dur[from][to].map(f64::from).unwrap_or(0.0)
    }

    /// Floyd–Warshall closure over the distance matrix.
    ///
    /// Establishes the triangle inequality the path constructor's
    /// approximation bound relies on. Durations are left untouched; they
    /// never feed the graph construction.
    pub fn metric_closure(&mut self) {
        for k in 0..self.n {
            for i in 0..self.n {
                for j in 0..self.n {
                    let via = self.dist[i][k] + self.dist[k][j];
                    if via < self.dist[i][j] {
                        self.dist[i][j] = via;
                    }
                }
            }
        }
    }
}
