//! Span sag and midspan clearance.
//!
//! Sag uses the parabolic approximation of the catenary with the cable's
//! vertical weight and the wind load on its ice-thickened diameter combined
//! into one resultant load per foot.

use serde::Serialize;
use tracing::debug;

use crate::catalog::CableSpec;
use crate::core::{LineKind, VoltageClass};
use crate::findings::Findings;
use crate::units::{format_feet_inches_tick_marks, format_feet_inches_verbose};

/// NESC wind pressure coefficient, psf per mph².
pub const WIND_PRESSURE_COEFFICIENT: f64 = 0.00256;

/// Spans longer than this require engineering review.
pub const ENGINEERING_REVIEW_SPAN_FT: f64 = 300.0;
pub const ENGINEERING_REVIEW_COST: f64 = 500.0;
/// Communication spans longer than this likely need a mid-span pole.
pub const INTERMEDIATE_SUPPORT_SPAN_FT: f64 = 150.0;

pub fn wind_pressure_psf(wind_mph: f64) -> f64 {
    WIND_PRESSURE_COEFFICIENT * wind_mph * wind_mph
}

/// Horizontal wind load per foot on a cable, lb/ft.
pub fn wind_load_per_ft(wind_mph: f64, cable_diameter_in: f64, ice_thickness_in: f64) -> f64 {
    let diameter_ft = (cable_diameter_in + 2.0 * ice_thickness_in) / 12.0;
    wind_pressure_psf(wind_mph) * diameter_ft
}

/// Sag in feet. `tension_lb` must be positive.
pub fn calculate_sag(
    span_ft: f64,
    weight_lb_per_ft: f64,
    tension_lb: f64,
    wind_mph: f64,
    cable_diameter_in: f64,
    ice_thickness_in: f64,
) -> f64 {
    let w_horizontal = wind_load_per_ft(wind_mph, cable_diameter_in, ice_thickness_in);
    let w_effective = weight_lb_per_ft.hypot(w_horizontal);
    w_effective * span_ft * span_ft / (8.0 * tension_lb)
}

/// Span loading shared by every cable on the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanLoading {
    pub span_ft: f64,
    pub wind_mph: f64,
    pub ice_in: f64,
}

/// Nominal sag of an existing line of the given kind under `loading`.
///
/// Existing lines carry no cable data, so a typical build is assumed:
/// service drops are light and slack, power neutrals and secondaries are
/// triplex, everything else is lashed communication strand.
pub fn nominal_line_sag(kind: LineKind, loading: &SpanLoading) -> f64 {
    let (diameter_in, weight_lb_per_ft, tension_lb) = match kind {
        LineKind::Drop => (0.40, 0.05, 600.0),
        LineKind::Neutral | LineKind::Secondary => (0.90, 0.30, 1500.0),
        LineKind::Communication | LineKind::Other => (0.80, 0.25, 2000.0),
    };
    calculate_sag(
        loading.span_ft,
        weight_lb_per_ft,
        tension_lb,
        loading.wind_mph,
        diameter_in,
        loading.ice_in,
    )
}

/// Vertical gap at midspan between an existing line and the new cable,
/// inches. Positive when the two keep the same relative order.
pub fn midspan_gap_in(
    kind: LineKind,
    line_ft: f64,
    proposed_ft: f64,
    new_sag_ft: f64,
    loading: &SpanLoading,
) -> f64 {
    let line_mid = line_ft - nominal_line_sag(kind, loading);
    let new_mid = proposed_ft - new_sag_ft;
    let same_order = (line_ft >= proposed_ft) == (line_mid >= new_mid);
    let gap = (line_mid - new_mid).abs() * 12.0;
    if same_order {
        gap
    } else {
        -gap
    }
}

/// Where the neighbor-end attach height came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NeighborAttachSource {
    AdjacentProposed,
    AdjacentPower,
    AdjacentPoleTop,
}

#[derive(Debug, Clone, Copy)]
pub struct SpanRequest<'a> {
    pub loading: SpanLoading,
    pub proposed_attach_ft: f64,
    pub adjacent_above_ground_ft: Option<f64>,
    pub adjacent_proposed_attach_ft: Option<f64>,
    pub adjacent_power_ft: Option<f64>,
    pub effective_separation_ft: f64,
    pub minimum_pole_top_space: f64,
    pub ground_clearance: f64,
    pub cable: &'a CableSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanResult {
    pub span_ft: f64,
    pub wind: f64,
    pub ice_thickness: f64,
    pub sag_ft: f64,
    pub sag_fmt: String,
    pub neighbor_attach_ft: f64,
    pub neighbor_attach_source: NeighborAttachSource,
    pub midspan_ft: f64,
    pub midspan_fmt: String,
}

/// Sag and midspan height for the new cable.
///
/// Returns `None` when the span, the adjacent pole, or the attach height is
/// missing or non-positive.
pub fn analyze_span(request: &SpanRequest<'_>) -> (Option<SpanResult>, Findings) {
    let mut findings = Findings::new();
    let loading = request.loading;

    let Some(adjacent_above_ground) = request.adjacent_above_ground_ft.filter(|h| *h > 0.0) else {
        return (None, findings);
    };
    if loading.span_ft <= 0.0 || request.proposed_attach_ft <= 0.0 {
        return (None, findings);
    }
    if request.cable.rated_tension_lb <= 0.0 {
        findings.note(format!(
            "Cable {} has no rated tension; sag not computed",
            request.cable.name
        ));
        return (None, findings);
    }

    let sag_ft = calculate_sag(
        loading.span_ft,
        request.cable.weight_lb_per_ft,
        request.cable.rated_tension_lb,
        loading.wind_mph,
        request.cable.diameter_in,
        loading.ice_in,
    );

    let (neighbor_attach_ft, neighbor_attach_source) =
        if let Some(explicit) = request.adjacent_proposed_attach_ft.filter(|h| *h > 0.0) {
            (explicit, NeighborAttachSource::AdjacentProposed)
        } else if let Some(power) = request.adjacent_power_ft.filter(|h| *h > 0.0) {
            (
                power - request.effective_separation_ft,
                NeighborAttachSource::AdjacentPower,
            )
        } else {
            (
                adjacent_above_ground - request.minimum_pole_top_space,
                NeighborAttachSource::AdjacentPoleTop,
            )
        };

    let midspan_ft = (request.proposed_attach_ft + neighbor_attach_ft) / 2.0 - sag_ft;
    debug!(sag_ft, neighbor_attach_ft, midspan_ft, "span mechanics");

    findings.note(format!(
        "Sag {} over {:.0}ft span at {:.0} mph wind",
        format_feet_inches_verbose(sag_ft),
        loading.span_ft,
        loading.wind_mph
    ));
    if midspan_ft < request.ground_clearance {
        findings.warn(format!(
            "Midspan height {} is below the required ground clearance of {}",
            format_feet_inches_tick_marks(midspan_ft),
            format_feet_inches_tick_marks(request.ground_clearance)
        ));
    }

    let result = SpanResult {
        span_ft: loading.span_ft,
        wind: loading.wind_mph,
        ice_thickness: loading.ice_in,
        sag_ft,
        sag_fmt: format_feet_inches_tick_marks(sag_ft),
        neighbor_attach_ft,
        neighbor_attach_source,
        midspan_ft,
        midspan_fmt: format_feet_inches_tick_marks(midspan_ft),
    };
    (Some(result), findings)
}

/// Warnings that depend only on span length.
pub fn span_length_findings(span_ft: f64, voltage: VoltageClass) -> Findings {
    let mut findings = Findings::new();
    if span_ft > ENGINEERING_REVIEW_SPAN_FT {
        findings.warn(format!(
            "Span of {:.0}ft exceeds {:.0}ft; engineering review is mandatory",
            span_ft, ENGINEERING_REVIEW_SPAN_FT
        ));
        findings.cost("Engineering review (long span)", ENGINEERING_REVIEW_COST);
    }
    if voltage == VoltageClass::Communication && span_ft > INTERMEDIATE_SUPPORT_SPAN_FT {
        findings.warn(format!(
            "Communication span of {:.0}ft exceeds {:.0}ft; consider an intermediate support pole",
            span_ft, INTERMEDIATE_SUPPORT_SPAN_FT
        ));
    }
    findings
}
