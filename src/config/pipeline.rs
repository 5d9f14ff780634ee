//! Clearance policy resolution.
//!
//! The table is built as a pipeline of pure layers, each taking the prior
//! table and returning a new one. Order, last layer wins on overlap:
//!
//! 1. NESC baseline ([`get_nesc_clearances`])
//! 2. named preset ([`apply_preset_to_clearances`])
//! 3. owner floor, FirstEnergy family only ([`apply_owner_floor`])
//! 4. submission profile ([`apply_submission_profile`])
//! 5. custom scalar overrides ([`apply_custom_overrides`])
//!
//! Layers 2-4 only raise floors, except the submission profile's
//! environment ground target which is an absolute assignment. Custom
//! overrides replace their field outright.

use tracing::debug;

use super::nesc::{get_nesc_clearances, ClearanceTable};
use super::presets::Preset;
use super::profile::SubmissionProfile;
use crate::core::{SpanEnvironment, VoltageClass};
use crate::findings::Findings;
use crate::units::{feet_to_inches, format_feet_inches_verbose};

/// FirstEnergy construction standard floors.
pub const FE_COMM_TO_POWER_IN: f64 = 44.0;
pub const FE_MIN_TOP_SPACE_FT: f64 = 2.0;
pub const FE_ROAD_GROUND_FT: f64 = 18.0;

/// A table plus what the layer had to say about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub table: ClearanceTable,
    pub findings: Findings,
}

impl Layer {
    fn unchanged(table: ClearanceTable) -> Self {
        Self {
            table,
            findings: Findings::new(),
        }
    }
}

/// Scalar overrides entered for one job.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomOverrides {
    pub min_top_space_ft: Option<f64>,
    pub road_clearance_ft: Option<f64>,
    pub comm_to_power_in: Option<f64>,
}

/// Everything clearance resolution depends on.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRequest<'a> {
    pub voltage: VoltageClass,
    pub environment: SpanEnvironment,
    pub preset: Option<&'a str>,
    pub first_energy: bool,
    pub profile: Option<&'a SubmissionProfile>,
    pub custom: CustomOverrides,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPolicy {
    pub clearances: ClearanceTable,
    pub preset: Option<Preset>,
    pub findings: Findings,
}

/// Run every layer in order.
pub fn resolve_clearances(request: &PolicyRequest<'_>) -> ResolvedPolicy {
    let mut findings = Findings::new();
    let baseline = get_nesc_clearances(request.voltage, request.environment);

    let preset = request.preset.and_then(|name| {
        let parsed = Preset::parse(name);
        if parsed.is_none() && !name.trim().is_empty() {
            findings.note(format!(
                "Preset '{}' is not recognized; NESC baseline retained",
                name.trim()
            ));
        }
        parsed
    });

    let table = take(&mut findings, apply_preset_to_clearances(baseline, preset));
    let table = take(
        &mut findings,
        apply_owner_floor(table, request.first_energy, request.environment),
    );
    let table = take(
        &mut findings,
        apply_submission_profile(table, request.profile, request.environment),
    );
    let clearances = take(&mut findings, apply_custom_overrides(table, &request.custom));

    debug!(?clearances, "resolved clearance table");
    ResolvedPolicy {
        clearances,
        preset,
        findings,
    }
}

/// Layer 2: raise the fields a named preset defines to the preset's value.
pub fn apply_preset_to_clearances(table: ClearanceTable, preset: Option<Preset>) -> Layer {
    let Some(preset) = preset else {
        return Layer::unchanged(table);
    };
    let rules = preset.rules();
    let mut findings = Findings::new();
    let mut next = table;

    if let Some(top) = rules.min_top_space_ft {
        next.minimum_pole_top_space = next.minimum_pole_top_space.max(top);
    }
    if let Some(road) = rules.road_clearance_ft {
        next.road_clearance = next.road_clearance.max(road);
    }
    if let Some(sep) = rules.comm_to_power_ft {
        next.power_clearance_distribution = next.power_clearance_distribution.max(sep);
    }

    if next != table {
        findings.note(format!(
            "{} preset applied: comm-to-power {}in, pole-top space {}, road clearance {}",
            preset.display_name(),
            feet_to_inches(next.power_clearance_distribution),
            format_feet_inches_verbose(next.minimum_pole_top_space),
            format_feet_inches_verbose(next.road_clearance),
        ));
    }
    Layer {
        table: next,
        findings,
    }
}

/// Layer 3: FirstEnergy floors. No-op for other owners.
pub fn apply_owner_floor(
    table: ClearanceTable,
    first_energy: bool,
    environment: SpanEnvironment,
) -> Layer {
    if !first_energy {
        return Layer::unchanged(table);
    }
    let mut findings = Findings::new();
    let mut next = table;

    next.power_clearance_distribution = next
        .power_clearance_distribution
        .max(FE_COMM_TO_POWER_IN / 12.0);
    next.minimum_pole_top_space = next.minimum_pole_top_space.max(FE_MIN_TOP_SPACE_FT);
    if environment.is_roadway() {
        next.ground_clearance = next.ground_clearance.max(FE_ROAD_GROUND_FT);
    }

    if next != table {
        findings.note(format!(
            "FirstEnergy floors applied: comm-to-power >= {}in, pole-top space >= {}",
            FE_COMM_TO_POWER_IN,
            format_feet_inches_verbose(FE_MIN_TOP_SPACE_FT)
        ));
    }
    Layer {
        table: next,
        findings,
    }
}

/// Layer 4: submission-profile targets.
pub fn apply_submission_profile(
    table: ClearanceTable,
    profile: Option<&SubmissionProfile>,
    environment: SpanEnvironment,
) -> Layer {
    let Some(profile) = profile else {
        return Layer::unchanged(table);
    };
    let mut findings = Findings::new();
    let mut next = table;
    let label = profile.name.as_deref().unwrap_or("Submission profile");

    match profile.ground_target_for(environment) {
        Some(target) if target.is_finite() && target >= 0.0 => {
            next.ground_clearance = target;
            findings.note(format!(
                "{}: {} ground clearance target {}",
                label,
                environment,
                format_feet_inches_verbose(target)
            ));
        }
        Some(target) => {
            findings.note(format!(
                "{}: {} ground clearance target {} ignored; it is not a non-negative number",
                label, environment, target
            ));
        }
        None => {}
    }
    if let Some(sep_in) = profile.comm_to_power_in.filter(|v| v.is_finite()) {
        next.power_clearance_distribution = next.power_clearance_distribution.max(sep_in / 12.0);
    }
    if let Some(top) = profile.min_top_space_ft.filter(|v| v.is_finite()) {
        next.minimum_pole_top_space = next.minimum_pole_top_space.max(top);
    }
    if let Some(road) = profile.road_clearance_ft.filter(|v| v.is_finite()) {
        next.road_clearance = next.road_clearance.max(road);
    }

    if next.power_clearance_distribution != table.power_clearance_distribution
        || next.minimum_pole_top_space != table.minimum_pole_top_space
        || next.road_clearance != table.road_clearance
    {
        findings.note(format!(
            "{} raised separations: comm-to-power {}in, pole-top space {}, road clearance {}",
            label,
            feet_to_inches(next.power_clearance_distribution),
            format_feet_inches_verbose(next.minimum_pole_top_space),
            format_feet_inches_verbose(next.road_clearance),
        ));
    }
    Layer {
        table: next,
        findings,
    }
}

/// Layer 5: explicit per-job values replace their field.
pub fn apply_custom_overrides(table: ClearanceTable, custom: &CustomOverrides) -> Layer {
    let mut findings = Findings::new();
    let mut next = table;

    let mut accept = |name: &str, value: Option<f64>| -> Option<f64> {
        let value = value?;
        if value.is_finite() && value >= 0.0 {
            Some(value)
        } else {
            findings.warn(format!(
                "Custom {} override ignored: {} is not a non-negative number",
                name, value
            ));
            None
        }
    };

    let top = accept("minimum top space", custom.min_top_space_ft);
    let road = accept("road clearance", custom.road_clearance_ft);
    let comm = accept("comm-to-power", custom.comm_to_power_in);

    if let Some(top) = top {
        next.minimum_pole_top_space = top;
        findings.note(format!(
            "Custom minimum pole-top space {}",
            format_feet_inches_verbose(top)
        ));
    }
    if let Some(road) = road {
        next.road_clearance = road;
        findings.note(format!(
            "Custom road clearance {}",
            format_feet_inches_verbose(road)
        ));
    }
    if let Some(comm_in) = comm {
        next.power_clearance_distribution = comm_in / 12.0;
        findings.note(format!("Custom comm-to-power separation {}in", comm_in));
    }

    Layer {
        table: next,
        findings,
    }
}

fn take(findings: &mut Findings, layer: Layer) -> ClearanceTable {
    findings.absorb(layer.findings);
    layer.table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ClearanceTable {
        get_nesc_clearances(VoltageClass::Distribution, SpanEnvironment::Road)
    }

    fn request<'a>() -> PolicyRequest<'a> {
        PolicyRequest {
            voltage: VoltageClass::Distribution,
            environment: SpanEnvironment::Road,
            preset: None,
            first_energy: false,
            profile: None,
            custom: CustomOverrides::default(),
        }
    }

    #[test]
    fn no_layers_returns_baseline() {
        let resolved = resolve_clearances(&request());
        assert_eq!(resolved.clearances, baseline());
        assert!(resolved.preset.is_none());
        assert!(resolved.findings.is_empty());
    }

    #[test]
    fn preset_sets_defined_fields() {
        let layer = apply_preset_to_clearances(baseline(), Some(Preset::Penelec));
        assert_eq!(layer.table.minimum_pole_top_space, 2.0);
        assert_eq!(feet_to_inches(layer.table.power_clearance_distribution), 44);
        assert_eq!(layer.table.ground_clearance, baseline().ground_clearance);
        assert_eq!(layer.findings.notes.len(), 1);
    }

    #[test]
    fn preset_never_lowers_transmission_baseline() {
        let trans = get_nesc_clearances(VoltageClass::Transmission, SpanEnvironment::Road);
        let layer = apply_preset_to_clearances(trans, Some(Preset::FirstEnergy));
        assert_eq!(layer.table.road_clearance, 18.5);
        assert_eq!(layer.table.minimum_pole_top_space, 2.0);
        assert_eq!(layer.table.power_clearance_transmission, 10.0);
    }

    #[test]
    fn nesc_preset_changes_nothing() {
        let layer = apply_preset_to_clearances(baseline(), Some(Preset::Nesc));
        assert_eq!(layer.table, baseline());
        assert!(layer.findings.is_empty());
    }

    #[test]
    fn unknown_preset_is_noted() {
        let mut req = request();
        req.preset = Some("Acme Power");
        let resolved = resolve_clearances(&req);
        assert_eq!(resolved.clearances, baseline());
        assert!(resolved.findings.notes[0].contains("Acme Power"));
    }

    #[test]
    fn owner_floor_only_raises() {
        let mut generous = baseline();
        generous.minimum_pole_top_space = 3.0;
        let layer = apply_owner_floor(generous, true, SpanEnvironment::Road);
        assert_eq!(layer.table.minimum_pole_top_space, 3.0);
        assert_eq!(feet_to_inches(layer.table.power_clearance_distribution), 44);
    }

    #[test]
    fn owner_floor_raises_ground_on_roads_only() {
        let mut low = get_nesc_clearances(VoltageClass::Distribution, SpanEnvironment::Highway);
        assert_eq!(low.ground_clearance, 15.5);
        low = apply_owner_floor(low, true, SpanEnvironment::Highway).table;
        assert_eq!(low.ground_clearance, 18.0);

        let field = get_nesc_clearances(VoltageClass::Distribution, SpanEnvironment::Field);
        let layered = apply_owner_floor(field, true, SpanEnvironment::Field).table;
        assert_eq!(layered.ground_clearance, 15.5);
    }

    #[test]
    fn owner_floor_is_noop_for_other_owners() {
        let layer = apply_owner_floor(baseline(), false, SpanEnvironment::Road);
        assert_eq!(layer.table, baseline());
    }

    #[test]
    fn profile_ground_target_is_absolute() {
        let mut profile = SubmissionProfile::default();
        profile.ground_targets.insert(SpanEnvironment::Road, 16.0);
        let layer = apply_submission_profile(baseline(), Some(&profile), SpanEnvironment::Road);
        assert_eq!(layer.table.ground_clearance, 16.0);
    }

    #[test]
    fn negative_profile_ground_target_is_ignored() {
        let mut profile = SubmissionProfile::default();
        profile.ground_targets.insert(SpanEnvironment::Road, -5.0);
        let layer = apply_submission_profile(baseline(), Some(&profile), SpanEnvironment::Road);
        assert_eq!(layer.table.ground_clearance, 18.0);
        assert!(layer.findings.notes[0].contains("ignored"));
    }

    #[test]
    fn profile_separations_only_raise() {
        let profile = SubmissionProfile {
            comm_to_power_in: Some(30.0),
            min_top_space_ft: Some(2.5),
            road_clearance_ft: Some(19.0),
            ..Default::default()
        };
        let layer = apply_submission_profile(baseline(), Some(&profile), SpanEnvironment::Road);
        assert_eq!(feet_to_inches(layer.table.power_clearance_distribution), 40);
        assert_eq!(layer.table.minimum_pole_top_space, 2.5);
        assert_eq!(layer.table.road_clearance, 19.0);
    }

    #[test]
    fn custom_overrides_replace_even_downward() {
        let table = apply_owner_floor(baseline(), true, SpanEnvironment::Road).table;
        let custom = CustomOverrides {
            min_top_space_ft: Some(1.0),
            road_clearance_ft: Some(17.0),
            comm_to_power_in: Some(36.0),
        };
        let layer = apply_custom_overrides(table, &custom);
        assert_eq!(layer.table.minimum_pole_top_space, 1.0);
        assert_eq!(layer.table.road_clearance, 17.0);
        assert_eq!(feet_to_inches(layer.table.power_clearance_distribution), 36);
        assert_eq!(layer.findings.notes.len(), 3);
    }

    #[test]
    fn custom_overrides_reject_negative_values() {
        let custom = CustomOverrides {
            min_top_space_ft: Some(-2.0),
            ..Default::default()
        };
        let layer = apply_custom_overrides(baseline(), &custom);
        assert_eq!(layer.table, baseline());
        assert_eq!(layer.findings.warnings.len(), 1);
    }

    #[test]
    fn later_layers_win_in_full_pipeline() {
        let profile = SubmissionProfile {
            min_top_space_ft: Some(3.0),
            ..Default::default()
        };
        let mut req = request();
        req.preset = Some("firstEnergy");
        req.first_energy = true;
        req.profile = Some(&profile);
        req.custom.road_clearance_ft = Some(20.0);

        let resolved = resolve_clearances(&req);
        assert_eq!(resolved.preset, Some(Preset::FirstEnergy));
        assert_eq!(resolved.clearances.minimum_pole_top_space, 3.0);
        assert_eq!(resolved.clearances.road_clearance, 20.0);
        assert_eq!(feet_to_inches(resolved.clearances.power_clearance_distribution), 44);
    }
}
