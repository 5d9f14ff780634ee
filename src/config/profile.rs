//! Per-job submission profiles.
//!
//! A submission profile carries the utility or region specific targets a
//! permit application is checked against. It can arrive inline with the
//! analysis input (JSON, camelCase keys) or from a TOML file (snake_case
//! keys are accepted as aliases).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::SpanEnvironment;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionProfile {
    pub name: Option<String>,

    /// Absolute ground-clearance target per span environment, feet
    #[serde(alias = "ground_targets")]
    pub ground_targets: BTreeMap<SpanEnvironment, f64>,

    /// Minimum comm-to-power separation, inches
    #[serde(alias = "comm_to_power_in", skip_serializing_if = "Option::is_none")]
    pub comm_to_power_in: Option<f64>,

    #[serde(alias = "min_top_space_ft", skip_serializing_if = "Option::is_none")]
    pub min_top_space_ft: Option<f64>,

    #[serde(alias = "road_clearance_ft", skip_serializing_if = "Option::is_none")]
    pub road_clearance_ft: Option<f64>,

    /// Lowest acceptable communication attachment height, feet
    #[serde(alias = "min_comm_attach_ft", skip_serializing_if = "Option::is_none")]
    pub min_comm_attach_ft: Option<f64>,
}

impl SubmissionProfile {
    /// Ground-clearance target for the span's environment, if the profile
    /// sets one.
    pub fn ground_target_for(&self, environment: SpanEnvironment) -> Option<f64> {
        if environment == SpanEnvironment::Unspecified {
            return None;
        }
        self.ground_targets.get(&environment).copied()
    }

    /// Check that every value is a finite, non-negative length.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("commToPowerIn", self.comm_to_power_in),
            ("minTopSpaceFt", self.min_top_space_ft),
            ("roadClearanceFt", self.road_clearance_ft),
            ("minCommAttachFt", self.min_comm_attach_ft),
        ];
        for (name, value) in scalars {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} must be a non-negative number, got {}", name, v));
                }
            }
        }
        for (env, target) in &self.ground_targets {
            if *env == SpanEnvironment::Unspecified {
                return Err("groundTargets contains an unrecognized environment tag".to_string());
            }
            if !target.is_finite() || *target < 0.0 {
                return Err(format!(
                    "groundTargets.{} must be a non-negative number, got {}",
                    env, target
                ));
            }
        }
        Ok(())
    }

    /// Merge `other` over `self`: any field `other` sets wins.
    pub fn overlay(mut self, other: &SubmissionProfile) -> SubmissionProfile {
        if other.name.is_some() {
            self.name = other.name.clone();
        }
        for (env, target) in &other.ground_targets {
            self.ground_targets.insert(*env, *target);
        }
        self.comm_to_power_in = other.comm_to_power_in.or(self.comm_to_power_in);
        self.min_top_space_ft = other.min_top_space_ft.or(self.min_top_space_ft);
        self.road_clearance_ft = other.road_clearance_ft.or(self.road_clearance_ft);
        self.min_comm_attach_ft = other.min_comm_attach_ft.or(self.min_comm_attach_ft);
        self
    }
}
