//! FirstEnergy supplementary clearance checks.
//!
//! These run after placement and only report. A shortfall never moves the
//! proposed height.

use tracing::debug;

use super::conductor::ControllingConductor;
use crate::core::{ExistingLine, LineKind};
use crate::findings::Findings;
use crate::mechanics::{midspan_gap_in, SpanLoading};
use crate::units::format_feet_inches_tick_marks;

pub const TRANSFORMER_BOTTOM_GAP_IN: f64 = 30.0;
pub const STREET_LIGHT_GAP_IN: f64 = 20.0;
pub const BONDED_STREET_LIGHT_GAP_IN: f64 = 4.0;
pub const STREET_LIGHT_DRIP_LOOP_GAP_IN: f64 = 12.0;
pub const COMM_ABOVE_STREET_LIGHT_GAP_IN: f64 = 4.0;
pub const MIDSPAN_COMM_MAIN_GAP_IN: f64 = 12.0;
pub const MIDSPAN_COMM_DROP_GAP_IN: f64 = 4.0;

/// Slack for comparisons against whole-inch requirements.
const TOLERANCE_IN: f64 = 0.01;

/// Span state needed for midspan comm-to-comm checks.
#[derive(Debug, Clone, Copy)]
pub struct MidspanContext {
    pub loading: SpanLoading,
    pub new_sag_ft: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OwnerCheckInputs<'a> {
    pub proposed_attach_ft: f64,
    pub controlling: Option<ControllingConductor>,
    pub effective_separation_inches: i64,
    pub transformer_bottom_ft: Option<f64>,
    pub street_light_ft: Option<f64>,
    pub street_light_drip_loop_ft: Option<f64>,
    /// Street light bonding is not captured on any input today.
    pub street_light_bonded: bool,
    pub existing_lines: &'a [ExistingLine],
    pub midspan: Option<MidspanContext>,
}

fn gap_in(upper_ft: f64, lower_ft: f64) -> f64 {
    (upper_ft - lower_ft) * 12.0
}

fn short_of(gap: f64, required: f64) -> bool {
    gap + TOLERANCE_IN < required
}

pub fn first_energy_checks(inputs: &OwnerCheckInputs<'_>) -> Findings {
    let mut findings = Findings::new();
    let proposed = inputs.proposed_attach_ft;

    if let Some(controlling) = inputs.controlling {
        let gap = gap_in(controlling.height_ft, proposed);
        let required = inputs.effective_separation_inches as f64;
        if short_of(gap, required) {
            findings.warn(format!(
                "FE: {:.1}in below the {} is less than the required {}in",
                gap, controlling.name, inputs.effective_separation_inches
            ));
        }
    }

    if let Some(bottom) = inputs.transformer_bottom_ft.filter(|h| *h > 0.0) {
        let gap = gap_in(bottom, proposed);
        if short_of(gap, TRANSFORMER_BOTTOM_GAP_IN) {
            findings.warn(format!(
                "FE: {:.1}in to transformer bottom at {} is less than {:.0}in",
                gap,
                format_feet_inches_tick_marks(bottom),
                TRANSFORMER_BOTTOM_GAP_IN
            ));
        }
    }

    if let Some(light) = inputs.street_light_ft.filter(|h| *h > 0.0) {
        if light >= proposed {
            let required = if inputs.street_light_bonded {
                BONDED_STREET_LIGHT_GAP_IN
            } else {
                STREET_LIGHT_GAP_IN
            };
            let gap = gap_in(light, proposed);
            if short_of(gap, required) {
                findings.warn(format!(
                    "FE: {:.1}in to street light at {} is less than {:.0}in",
                    gap,
                    format_feet_inches_tick_marks(light),
                    required
                ));
            }
        } else {
            let gap = gap_in(proposed, light);
            if short_of(gap, COMM_ABOVE_STREET_LIGHT_GAP_IN) {
                findings.warn(format!(
                    "FE: communication {:.1}in above street light is less than {:.0}in",
                    gap, COMM_ABOVE_STREET_LIGHT_GAP_IN
                ));
            }
        }
    }

    if let Some(drip) = inputs.street_light_drip_loop_ft.filter(|h| *h > 0.0) {
        let gap = gap_in(drip, proposed).abs();
        if short_of(gap, STREET_LIGHT_DRIP_LOOP_GAP_IN) {
            findings.warn(format!(
                "FE: {:.1}in to street light drip loop is less than {:.0}in",
                gap, STREET_LIGHT_DRIP_LOOP_GAP_IN
            ));
        }
    }

    if let Some(midspan) = inputs.midspan {
        for line in inputs.existing_lines {
            let required = match line.kind() {
                LineKind::Communication => MIDSPAN_COMM_MAIN_GAP_IN,
                LineKind::Drop => MIDSPAN_COMM_DROP_GAP_IN,
                _ => continue,
            };
            let Some(line_ft) = line.resulting_height_ft().filter(|h| *h > 0.0) else {
                continue;
            };
            let gap = midspan_gap_in(
                line.kind(),
                line_ft,
                proposed,
                midspan.new_sag_ft,
                &midspan.loading,
            );
            if short_of(gap, required) {
                findings.warn(format!(
                    "FE: midspan gap to {} at {} is {:.1}in, less than {:.0}in",
                    line.line_type,
                    format_feet_inches_tick_marks(line_ft),
                    gap,
                    required
                ));
            }
        }
    }

    debug!(warnings = findings.warnings.len(), "first energy checks");
    findings
}
