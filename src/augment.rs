//! Time-budgeted route augmentation.
//!
//! Greedy cheapest-insertion of optional stops into a constructed route:
//! filter the candidate pool (membership, yearly quota, cooldown window),
//! then repeatedly insert the stop with the globally smallest duration
//! increase until the pool runs dry or the budget binds.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::cost::CostMatrix;
use crate::place::Place;
use crate::route::Route;

/// Augmentation knobs.
#[derive(Debug, Clone)]
pub struct AugmentOptions {
    /// Hard budget for the whole route (travel + service), in minutes.
    pub budget_minutes: u32,
    /// Service-speed adjustment; scales on-site work only, never travel.
    /// Values ≤ 0 fall back to 1.0.
    pub speed_multiplier: f64,
    /// Also consider places whose yearly quota is already met.
    pub include_over_quota: bool,
    /// Skip places visited within this many weeks of today; 0 disables
    /// the cooldown.
    pub cooldown_weeks: u32,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            budget_minutes: 8 * 60, // one working day
            speed_multiplier: 1.0,
            include_over_quota: false,
            cooldown_weeks: 0,
        }
    }
}

/// Inserts extra stops from `pool` into `route` while the total duration
/// stays within the budget.
///
/// Existing stops are never removed or reordered; every insertion goes
/// between two current neighbors at the globally cheapest spot. Ties keep
/// the earliest pool entry, then the earliest position. `today` drives
/// the quota and cooldown filters — the core never reads the clock
/// itself. A budget with no room for any candidate leaves the route
/// unchanged.
pub fn augment(route: &mut Route, pool: &[Place], today: NaiveDate, options: &AugmentOptions) {
    let speed = if options.speed_multiplier <= 0.0 {
        1.0
    } else {
        options.speed_multiplier
    };
    let budget_secs = f64::from(options.budget_minutes) * 60.0;

    let eligible: Vec<&Place> = pool
        .iter()
        .filter(|p| is_eligible(p, route, today, options))
        .collect();
    debug!(
        pool = pool.len(),
        eligible = eligible.len(),
        "filtered candidate pool"
    );
    if eligible.is_empty() {
        return;
    }

    // One arena over route stops and candidates; the route is tracked as
    // indices into it so insertions stay cheap.
    let mut arena: Vec<Place> = route.stops().to_vec();
    let mut order: Vec<usize> = (0..arena.len()).collect();
    let mut remaining: Vec<usize> = Vec::with_capacity(eligible.len());
    for candidate in eligible {
        remaining.push(arena.len());
        arena.push(candidate.clone());
    }
    let matrix = CostMatrix::build(&arena);

    let mut total_secs = 0.0;
    for pair in order.windows(2) {
        total_secs += matrix.duration_secs(pair[0], pair[1]);
    }
    for &stop in &order {
        total_secs += arena[stop].service_hours / speed * 3600.0;
    }

    let mut inserted = 0usize;
    while !remaining.is_empty() {
        let mut best: Option<(usize, usize, f64)> = None;
        for (slot, &candidate) in remaining.iter().enumerate() {
            let service_secs = arena[candidate].service_hours / speed * 3600.0;
            for position in 0..order.len() - 1 {
                let (prev, next) = (order[position], order[position + 1]);
                let detour = matrix.duration_secs(prev, candidate)
                    + matrix.duration_secs(candidate, next)
                    - matrix.duration_secs(prev, next);
                let increase = detour + service_secs;
                if best.is_none_or(|(_, _, current)| increase < current) {
                    best = Some((slot, position + 1, increase));
                }
            }
        }

        let Some((slot, at, increase)) = best else {
            break;
        };
        if total_secs + increase > budget_secs {
            // Budget is binding: stop without inserting.
            break;
        }

        let candidate = remaining.remove(slot);
        order.insert(at, candidate);
        route.insert(at, arena[candidate].clone());
        total_secs += increase;
        inserted += 1;
    }

    debug!(inserted, total_secs, budget_secs, "augmentation finished");
}

/// A pool entry qualifies only if every filter holds: not already routed,
/// not a reserved endpoint, under its yearly quota (unless overridden),
/// and outside the cooldown window.
fn is_eligible(place: &Place, route: &Route, today: NaiveDate, options: &AugmentOptions) -> bool {
    if place.is_endpoint() || route.contains_id(&place.id) {
        return false;
    }
    if !options.include_over_quota {
        let visits_this_year = place
            .visit_dates
            .iter()
            .filter(|date| date.year() == today.year())
            .count();
        if visits_this_year >= place.visits_per_year as usize {
            return false;
        }
    }
    if options.cooldown_weeks > 0 {
        let cutoff = today - Duration::weeks(i64::from(options.cooldown_weeks));
        if let Some(last_visit) = place.visit_dates.iter().max() {
            // Eligible only when the last visit is strictly before the
            // cutoff.
            if *last_visit >= cutoff {
                return false;
            }
        }
    }
    true
}
