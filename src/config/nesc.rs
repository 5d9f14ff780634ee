//! NESC baseline clearance table.

use serde::{Deserialize, Serialize};

use crate::core::{SpanEnvironment, VoltageClass};

/// Resolved clearance requirements, all in decimal feet.
///
/// Built fresh per analysis and never mutated in place: each policy layer in
/// [`super::pipeline`] takes a table and returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceTable {
    pub ground_clearance: f64,
    pub road_clearance: f64,
    pub power_clearance_distribution: f64,
    pub power_clearance_transmission: f64,
    pub minimum_pole_top_space: f64,
    /// Communication voltage only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comm_to_comm_vertical: Option<f64>,
    /// Communication voltage only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comm_to_comm_midspan: Option<f64>,
}

impl ClearanceTable {
    /// Comm-to-power separation that applies before owner floors.
    pub fn base_separation_ft(&self, voltage: VoltageClass) -> f64 {
        match voltage {
            VoltageClass::Transmission => self.power_clearance_transmission,
            VoltageClass::Communication | VoltageClass::Distribution => {
                self.power_clearance_distribution
            }
        }
    }
}

/// Baseline table for a voltage class.
///
/// Ground clearance is the only field that depends on the environment, and
/// only on whether the span crosses a road.
pub fn get_nesc_clearances(voltage: VoltageClass, environment: SpanEnvironment) -> ClearanceTable {
    let over_road = environment == SpanEnvironment::Road;
    match voltage {
        VoltageClass::Communication => ClearanceTable {
            ground_clearance: if over_road { 18.0 } else { 15.5 },
            road_clearance: 18.0,
            power_clearance_distribution: 40.0 / 12.0,
            power_clearance_transmission: 6.0,
            minimum_pole_top_space: 1.0,
            comm_to_comm_vertical: Some(1.0),
            comm_to_comm_midspan: Some(4.0 / 12.0),
        },
        VoltageClass::Distribution => ClearanceTable {
            ground_clearance: if over_road { 18.0 } else { 15.5 },
            road_clearance: 18.0,
            power_clearance_distribution: 40.0 / 12.0,
            power_clearance_transmission: 6.0,
            minimum_pole_top_space: 1.0,
            comm_to_comm_vertical: None,
            comm_to_comm_midspan: None,
        },
        VoltageClass::Transmission => ClearanceTable {
            ground_clearance: if over_road { 18.5 } else { 17.0 },
            road_clearance: 18.5,
            power_clearance_distribution: 40.0 / 12.0,
            power_clearance_transmission: 10.0,
            minimum_pole_top_space: 2.0,
            comm_to_comm_vertical: None,
            comm_to_comm_midspan: None,
        },
    }
}
