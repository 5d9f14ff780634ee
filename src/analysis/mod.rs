//! The analysis orchestrator.
//!
//! [`compute_analysis`] is the only public entry point into the engine. It
//! validates the input, runs each stage in order, concatenates the findings
//! every stage returns, and converts any failure (including a panic) into an
//! `ok: false` outcome. It never panics and never returns `Err`.
//!
//! Stage order:
//!
//! 1. Pole geometry
//! 2. Owner classification and clearance policy
//! 3. Controlling conductor and attachment placement
//! 4. Span mechanics, owner checks, make-ready, guying

pub mod input;
pub mod result;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, debug_span, warn};

pub use input::AnalysisInput;
pub use result::{AnalysisOutcome, AnalysisResult, AttachResult, PoleResult};

use input::{height, scalar};

use crate::catalog::{default_cable, find_cable, pole_class_info, setting_depth_ft, CableSpec};
use crate::config::{resolve_clearances, CustomOverrides, PolicyRequest};
use crate::core::VoltageClass;
use crate::errors::{ensure_finite, CalcError, Result};
use crate::findings::Findings;
use crate::geo::span_from_coordinates;
use crate::make_ready::analyze_make_ready;
use crate::mechanics::{
    analyze_span, calculate_down_guy, span_length_findings, SpanLoading, SpanRequest,
};
use crate::owner::{classify_owner, effective_separation};
use crate::placement::{
    first_energy_checks, recommend_attachment, select_controlling_conductor, ConductorInputs,
    MidspanContext, OwnerCheckInputs, PlacementContext,
};
use crate::units::{format_feet_inches_tick_marks, HeightValue};

pub const DEFAULT_WIND_SPEED_MPH: f64 = 90.0;
pub const DEFAULT_ICE_THICKNESS_IN: f64 = 0.0;

/// Run a full analysis. Always returns an outcome.
pub fn compute_analysis(input: &AnalysisInput) -> AnalysisOutcome {
    let span = debug_span!("compute_analysis");
    let _guard = span.enter();

    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        let pole_height_ft = validate(input)?;
        run(input, pole_height_ft).map_err(|e| vec![e])
    }));

    match attempt {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(errors)) => {
            for error in &errors {
                debug!(code = %error.code(), kind = %error.kind(), field = error.field(), "analysis rejected");
            }
            AnalysisOutcome::failure(&errors)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "panic caught at analysis boundary");
            AnalysisOutcome::failure(&[CalcError::unexpected(message)])
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Returns the pole height in feet, or every validation error found.
fn validate(input: &AnalysisInput) -> std::result::Result<f64, Vec<CalcError>> {
    let mut errors = Vec::new();

    let pole_height = height(&input.pole_height).filter(|h| *h > 0.0);
    if pole_height.is_none() {
        errors.push(CalcError::input("poleHeight", "Pole height is required"));
    }

    let power_given = input
        .existing_power_height
        .as_ref()
        .is_some_and(HeightValue::is_present);
    if !input.is_new_construction && !power_given && input.voltage() != VoltageClass::Communication
    {
        errors.push(CalcError::input(
            "existingPowerHeight",
            "Existing power height is required for an existing pole",
        ));
    }

    match pole_height {
        Some(h) if errors.is_empty() => Ok(h),
        _ => Err(errors),
    }
}

fn resolve_cable(key: Option<&str>, findings: &mut Findings) -> &'static CableSpec {
    match key.map(str::trim).filter(|k| !k.is_empty()) {
        None => default_cable(),
        Some(key) => find_cable(key).unwrap_or_else(|| {
            let fallback = default_cable();
            findings.note(format!(
                "Cable type '{}' is not in the catalog; using {}",
                key, fallback.name
            ));
            fallback
        }),
    }
}

fn custom_scalar(
    value: &Option<HeightValue>,
    name: &str,
    findings: &mut Findings,
) -> Option<f64> {
    let value = value.as_ref().filter(|v| v.is_present())?;
    let parsed = scalar(value);
    if parsed.is_none() {
        findings.note(format!("Custom {} is not a number; ignored", name));
    }
    parsed
}

fn span_length(input: &AnalysisInput) -> Option<f64> {
    height(&input.span_distance)
        .filter(|s| *s > 0.0)
        .or_else(|| {
            span_from_coordinates(
                (input.pole_latitude, input.pole_longitude),
                (input.adjacent_pole_latitude, input.adjacent_pole_longitude),
            )
        })
        .filter(|s| *s > 0.0)
}

fn run(input: &AnalysisInput, pole_height_ft: f64) -> Result<AnalysisOutcome> {
    let mut findings = Findings::new();
    let voltage = input.voltage();
    let environment = input.environment();

    // Pole geometry
    let buried_ft = setting_depth_ft(pole_height_ft);
    let above_ground_ft = pole_height_ft - buried_ft;
    let class_info = input.pole_class.as_deref().and_then(pole_class_info).cloned();
    if class_info.is_none() {
        if let Some(class) = input.pole_class.as_deref().filter(|c| !c.trim().is_empty()) {
            findings.note(format!("Pole class '{}' is not recognized", class.trim()));
        }
    }

    // Owner and clearance policy
    let owner = classify_owner(
        input.preset.as_deref(),
        &input.existing_lines,
        input.job_owner.as_deref(),
    );
    let first_energy = owner.is_first_energy();
    for source in &owner.sources {
        findings.note(format!("FirstEnergy rules apply: {}", source));
    }

    let custom = CustomOverrides {
        min_top_space_ft: custom_scalar(&input.custom_min_top_space, "minimum top space", &mut findings),
        road_clearance_ft: custom_scalar(&input.custom_road_clearance, "road clearance", &mut findings),
        comm_to_power_in: custom_scalar(&input.custom_comm_to_power, "comm-to-power", &mut findings),
    };
    let policy = {
        let _stage = debug_span!("clearance_policy").entered();
        resolve_clearances(&PolicyRequest {
            voltage,
            environment,
            preset: input.preset.as_deref(),
            first_energy,
            profile: input.submission_profile.as_ref(),
            custom,
        })
    };
    findings.absorb(policy.findings);
    let clearances = policy.clearances;
    let separation = effective_separation(owner.signal, voltage, &clearances);

    // Placement
    let existing_power_ft = height(&input.existing_power_height);
    let selection = select_controlling_conductor(&ConductorInputs {
        existing_power_ft,
        drip_loop_ft: height(&input.drip_loop_height),
        existing_lines: &input.existing_lines,
        reference: input.power_reference,
        voltage,
    });
    let placement = recommend_attachment(&PlacementContext {
        pole_above_ground_ft: above_ground_ft,
        selection: &selection,
        voltage,
        first_energy,
        separation,
        clearances: &clearances,
        raw_power_ft: existing_power_ft,
        is_new_construction: input.is_new_construction,
        min_comm_attach_ft: input
            .submission_profile
            .as_ref()
            .and_then(|p| p.min_comm_attach_ft),
        has_transformer: input.has_transformer,
    });
    findings.absorb(placement.findings);
    let proposed_attach_ft = ensure_finite(placement.proposed_attach_ft, "attachment height")?;

    // Span
    let cable = resolve_cable(input.cable_type.as_deref(), &mut findings);
    let loading = SpanLoading {
        span_ft: span_length(input).unwrap_or(0.0),
        wind_mph: input
            .wind_speed
            .filter(|w| *w >= 0.0)
            .unwrap_or(DEFAULT_WIND_SPEED_MPH),
        ice_in: input
            .ice_thickness
            .filter(|i| *i >= 0.0)
            .unwrap_or(DEFAULT_ICE_THICKNESS_IN),
    };

    let adjacent_above_ground_ft = height(&input.adjacent_pole_height)
        .filter(|h| *h > 0.0)
        .map(|h| h - setting_depth_ft(h));
    let (span_result, span_findings) = {
        let _stage = debug_span!("span_mechanics").entered();
        analyze_span(&SpanRequest {
            loading,
            proposed_attach_ft,
            adjacent_above_ground_ft,
            adjacent_proposed_attach_ft: height(&input.adjacent_proposed_attach_ft),
            adjacent_power_ft: height(&input.adjacent_power_height),
            effective_separation_ft: separation.effective_ft,
            minimum_pole_top_space: clearances.minimum_pole_top_space,
            ground_clearance: clearances.ground_clearance,
            cable,
        })
    };
    findings.absorb(span_findings);
    if let Some(span) = &span_result {
        ensure_finite(span.sag_ft, "sag")?;
        ensure_finite(span.midspan_ft, "midspan height")?;
        findings.absorb(span_length_findings(span.span_ft, voltage));
    }
    let midspan = span_result.as_ref().map(|span| MidspanContext {
        loading,
        new_sag_ft: span.sag_ft,
    });

    if first_energy {
        findings.absorb(first_energy_checks(&OwnerCheckInputs {
            proposed_attach_ft,
            controlling: selection.controlling,
            effective_separation_inches: separation.effective_inches,
            transformer_bottom_ft: height(&input.transformer_bottom_height),
            street_light_ft: height(&input.street_light_height),
            street_light_drip_loop_ft: height(&input.street_light_drip_loop_height),
            street_light_bonded: false,
            existing_lines: &input.existing_lines,
            midspan,
        }));
    }

    // Make-ready
    let (make_ready, make_ready_findings) = analyze_make_ready(
        &input.existing_lines,
        proposed_attach_ft,
        separation.effective_inches,
        midspan.as_ref(),
    );
    findings.absorb(make_ready_findings);

    // Guying
    let guy = (loading.span_ft > 0.0 && above_ground_ft > 0.0 && proposed_attach_ft > 0.0).then(
        || {
            calculate_down_guy(
                above_ground_ft,
                proposed_attach_ft,
                cable,
                loading.span_ft,
                loading.wind_mph,
                input.pull_direction.unwrap_or(0.0),
            )
        },
    );
    if let Some(guy) = guy.as_ref().filter(|g| g.required) {
        ensure_finite(guy.tension, "guy tension")?;
        findings.warn(format!(
            "Down guy required: estimated tension {:.0} lb",
            guy.tension
        ));
        findings.cost("Down guy", guy.total_cost);
    }

    let cost = ensure_finite(findings.total_cost() + make_ready.total, "cost")?;
    debug!(proposed_attach_ft, cost, "analysis complete");

    let result = AnalysisResult {
        pole: PoleResult {
            input_height: pole_height_ft,
            buried_ft,
            above_ground_ft,
            class_info,
            latitude: input.pole_latitude,
            longitude: input.pole_longitude,
        },
        attach: AttachResult {
            proposed_attach_ft,
            proposed_attach_fmt: format_feet_inches_tick_marks(proposed_attach_ft),
            recommendation: placement.recommendation,
            scenario: placement.scenario,
            effective_separation_ft: separation.effective_ft,
            effective_separation_inches: separation.effective_inches,
            first_energy,
        },
        span: span_result,
        clearances,
        make_ready_total: make_ready.total,
        make_ready_lines: make_ready.lines,
        guy,
        cable: cable.clone(),
        cost_items: findings.costs.clone(),
    };
    Ok(AnalysisOutcome::success(result, findings, cost))
}
