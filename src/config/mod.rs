//! Clearance policy and project configuration.
//!
//! - [`nesc`]: the NESC baseline table
//! - [`presets`]: named owner presets
//! - [`profile`]: per-job submission profiles
//! - [`pipeline`]: the layered resolution of all of the above
//! - [`loader`]: `.polecalc.toml` discovery and parsing

pub mod loader;
pub mod nesc;
pub mod pipeline;
pub mod presets;
pub mod profile;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisInput;
use crate::core::SpanEnvironment;

pub use loader::{load_config, load_config_from, parse_and_validate_config, parse_profile};
pub use nesc::{get_nesc_clearances, ClearanceTable};
pub use pipeline::{resolve_clearances, CustomOverrides, PolicyRequest, ResolvedPolicy};
pub use presets::Preset;
pub use profile::SubmissionProfile;

/// Contents of `.polecalc.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolecalcConfig {
    pub defaults: DefaultsConfig,
    pub profile: Option<SubmissionProfile>,
}

/// Values used when an analysis input leaves the field unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub preset: Option<String>,
    pub wind_speed: Option<f64>,
    pub ice_thickness: Option<f64>,
    pub span_environment: Option<SpanEnvironment>,
    pub cable_type: Option<String>,
}

impl PolecalcConfig {
    /// Fill unset input fields from this config.
    ///
    /// A config-level profile sits under the job's own profile: fields the
    /// job sets win.
    pub fn apply_defaults(&self, mut input: AnalysisInput) -> AnalysisInput {
        let defaults = &self.defaults;
        if input.preset.is_none() {
            input.preset = defaults.preset.clone();
        }
        if input.wind_speed.is_none() {
            input.wind_speed = defaults.wind_speed;
        }
        if input.ice_thickness.is_none() {
            input.ice_thickness = defaults.ice_thickness;
        }
        if input.span_environment.is_none() {
            input.span_environment = defaults.span_environment;
        }
        if input.cable_type.is_none() {
            input.cable_type = defaults.cable_type.clone();
        }
        if let Some(base) = &self.profile {
            input.submission_profile = Some(match input.submission_profile.take() {
                Some(job) => base.clone().overlay(&job),
                None => base.clone(),
            });
        }
        input
    }
}
