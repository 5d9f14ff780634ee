//! The flat input record accepted by [`super::compute_analysis`].

use serde::{Deserialize, Serialize};

use crate::config::SubmissionProfile;
use crate::core::{ExistingLine, PowerReference, SpanEnvironment, VoltageClass};
use crate::units::HeightValue;

/// One analysis job. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisInput {
    pub pole_height: Option<HeightValue>,
    pub pole_class: Option<String>,
    pub pole_latitude: Option<f64>,
    pub pole_longitude: Option<f64>,

    pub adjacent_pole_height: Option<HeightValue>,
    pub adjacent_pole_latitude: Option<f64>,
    pub adjacent_pole_longitude: Option<f64>,
    pub adjacent_power_height: Option<HeightValue>,
    pub adjacent_proposed_attach_ft: Option<HeightValue>,

    pub existing_power_height: Option<HeightValue>,
    pub drip_loop_height: Option<HeightValue>,
    pub voltage_class: Option<VoltageClass>,
    pub power_reference: PowerReference,

    /// Feet. Derived from both GPS fixes when absent.
    pub span_distance: Option<HeightValue>,
    pub is_new_construction: bool,
    pub cable_type: Option<String>,
    /// mph
    pub wind_speed: Option<f64>,
    /// inches
    pub ice_thickness: Option<f64>,
    pub span_environment: Option<SpanEnvironment>,

    pub existing_lines: Vec<ExistingLine>,

    pub preset: Option<String>,
    pub submission_profile: Option<SubmissionProfile>,
    /// Feet
    pub custom_min_top_space: Option<HeightValue>,
    /// Feet
    pub custom_road_clearance: Option<HeightValue>,
    /// Inches
    pub custom_comm_to_power: Option<HeightValue>,
    pub job_owner: Option<String>,

    pub has_transformer: bool,
    pub transformer_bottom_height: Option<HeightValue>,
    pub street_light_height: Option<HeightValue>,
    pub street_light_drip_loop_height: Option<HeightValue>,
    /// Degrees
    pub pull_direction: Option<f64>,
}

/// Read an optional height, treating unreadable text as absent.
pub(crate) fn height(value: &Option<HeightValue>) -> Option<f64> {
    value.as_ref().and_then(HeightValue::feet)
}

/// Read a plain number. Unit suffixes are not accepted here.
pub(crate) fn scalar(value: &HeightValue) -> Option<f64> {
    match value {
        HeightValue::Feet(v) => Some(*v),
        HeightValue::Text(text) => text.trim().parse::<f64>().ok(),
    }
}

impl AnalysisInput {
    pub fn new(pole_height: impl Into<HeightValue>) -> Self {
        Self {
            pole_height: Some(pole_height.into()),
            ..Default::default()
        }
    }

    pub fn voltage(&self) -> VoltageClass {
        self.voltage_class.unwrap_or_default()
    }

    pub fn environment(&self) -> SpanEnvironment {
        self.span_environment.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "poleHeight": "40ft",
            "existingPowerHeight": 35,
            "voltageClass": "distribution",
            "spanEnvironment": "road",
            "powerReference": "dripLoop",
            "existingLines": [
                {"type": "communication", "height": "25' 6\"", "companyName": "Verizon",
                 "makeReady": true, "makeReadyHeight": "24' 6\""}
            ],
            "customCommToPower": "44"
        }"#;
        let input: AnalysisInput = serde_json::from_str(json).unwrap();
        assert_eq!(height(&input.pole_height), Some(40.0));
        assert_eq!(height(&input.existing_power_height), Some(35.0));
        assert_eq!(input.environment(), SpanEnvironment::Road);
        assert_eq!(input.power_reference, PowerReference::DripLoop);
        assert_eq!(input.existing_lines[0].make_ready_height_ft(), Some(24.5));
        assert_eq!(input.custom_comm_to_power.as_ref().and_then(scalar), Some(44.0));
    }

    #[test]
    fn empty_record_uses_defaults() {
        let input: AnalysisInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, AnalysisInput::default());
        assert_eq!(input.voltage(), VoltageClass::Distribution);
        assert_eq!(input.environment(), SpanEnvironment::Unspecified);
    }

    #[test]
    fn scalar_rejects_unit_suffix() {
        assert_eq!(scalar(&HeightValue::from("2ft")), None);
        assert_eq!(scalar(&HeightValue::from(" 2.5 ")), Some(2.5));
    }
}
