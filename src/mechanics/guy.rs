//! Down-guy advisory.
//!
//! A screening heuristic, not a structural model: the unbalanced horizontal
//! load at the attachment is the wind on the span plus a tenth of the
//! cable's rated tension, resolved into a guy anchored at half the guy
//! attachment height from the pole.

use serde::Serialize;

use super::sag::wind_load_per_ft;
use crate::catalog::CableSpec;

/// Guy tension above which a down-guy is called for, lb.
pub const GUY_REQUIRED_TENSION_LB: f64 = 500.0;
const GUY_ATTACH_RATIO: f64 = 0.85;
const LEAD_RATIO: f64 = 0.5;
const UNBALANCED_TENSION_RATIO: f64 = 0.1;
const GUY_BASE_COST: f64 = 350.0;
const GUY_MAX_VARIABLE_COST: f64 = 650.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuyResult {
    pub required: bool,
    /// Guy tension, lb
    pub tension: f64,
    /// Guy angle from horizontal, degrees
    pub angle: f64,
    pub lead_distance: f64,
    pub guy_height: f64,
    /// Bearing the guy pulls toward, degrees
    pub pull_direction: f64,
    pub total_cost: f64,
}

pub fn calculate_down_guy(
    pole_above_ground_ft: f64,
    attach_ft: f64,
    cable: &CableSpec,
    span_ft: f64,
    wind_mph: f64,
    pull_direction_deg: f64,
) -> GuyResult {
    let wind_load = wind_load_per_ft(wind_mph, cable.diameter_in, 0.0) * span_ft;
    let horizontal_load = wind_load + UNBALANCED_TENSION_RATIO * cable.rated_tension_lb;

    let guy_height = GUY_ATTACH_RATIO * pole_above_ground_ft;
    let lead_distance = LEAD_RATIO * guy_height;
    let tension = horizontal_load * attach_ft / guy_height;
    let angle = (guy_height / lead_distance).atan().to_degrees();

    let required = tension > GUY_REQUIRED_TENSION_LB;
    let total_cost = if required {
        GUY_BASE_COST + GUY_MAX_VARIABLE_COST.min((tension / 10.0).round())
    } else {
        0.0
    };

    GuyResult {
        required,
        tension,
        angle,
        lead_distance,
        guy_height,
        pull_direction: pull_direction_deg.rem_euclid(360.0),
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_cable;

    #[test]
    fn long_windy_span_on_tall_pole_requires_guy() {
        let cable = find_cable("strand-10m").unwrap();
        let guy = calculate_down_guy(39.5, 33.0, cable, 300.0, 100.0, 0.0);
        assert!(guy.required);
        assert!(guy.tension > 0.0);
        assert!(guy.angle > 0.0);
        assert!(guy.total_cost >= GUY_BASE_COST);
        assert!(guy.total_cost <= GUY_BASE_COST + GUY_MAX_VARIABLE_COST);
    }

    #[test]
    fn short_calm_span_needs_no_guy() {
        let cable = find_cable("adss-24").unwrap();
        let guy = calculate_down_guy(34.0, 28.0, cable, 100.0, 20.0, 0.0);
        assert!(!guy.required);
        assert_eq!(guy.total_cost, 0.0);
    }

    #[test]
    fn geometry_follows_ratios() {
        let cable = find_cable("adss-48").unwrap();
        let guy = calculate_down_guy(40.0, 30.0, cable, 150.0, 90.0, -90.0);
        assert!((guy.guy_height - 34.0).abs() < 1e-9);
        assert!((guy.lead_distance - 17.0).abs() < 1e-9);
        assert!((guy.angle - 2.0f64.atan().to_degrees()).abs() < 1e-9);
        assert_eq!(guy.pull_direction, 270.0);
    }

    #[test]
    fn cost_is_capped() {
        let cable = find_cable("strand-10m").unwrap();
        let guy = calculate_down_guy(20.0, 19.0, cable, 5000.0, 150.0, 0.0);
        assert_eq!(guy.total_cost, GUY_BASE_COST + GUY_MAX_VARIABLE_COST);
    }
}
