//! Make-ready impact: clearance of each existing line to the new cable, and
//! the cost of moving lines that are flagged for make-ready.

use serde::Serialize;
use tracing::debug;

use crate::core::{ExistingLine, LineKind};
use crate::findings::Findings;
use crate::mechanics::midspan_gap_in;
use crate::placement::MidspanContext;
use crate::units::format_feet_inches_tick_marks;

/// Dollars per inch an existing line is moved.
pub const COST_PER_INCH: f64 = 12.5;

const TOLERANCE_IN: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapRequirement {
    pub pole_in: f64,
    pub midspan_in: f64,
}

pub fn gap_requirement(kind: LineKind, effective_separation_inches: i64) -> GapRequirement {
    match kind {
        LineKind::Drop => GapRequirement {
            pole_in: 6.0,
            midspan_in: 4.0,
        },
        LineKind::Neutral | LineKind::Secondary => GapRequirement {
            pole_in: effective_separation_inches as f64,
            midspan_in: 15.0,
        },
        LineKind::Communication | LineKind::Other => GapRequirement {
            pole_in: 12.0,
            midspan_in: 9.0,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineImpact {
    pub line_type: String,
    pub company_name: String,
    pub original_ft: f64,
    pub new_ft: f64,
    pub moved: bool,
    pub pole_gap_in: f64,
    pub midspan_gap_in: Option<f64>,
    pub requirement: GapRequirement,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeReadyReport {
    pub lines: Vec<LineImpact>,
    pub total: f64,
}

fn describe(line: &ExistingLine) -> String {
    let company = line.company_name.trim();
    if company.is_empty() {
        line.line_type.clone()
    } else {
        format!("{} ({})", line.line_type, company)
    }
}

fn assess_line(
    line: &ExistingLine,
    original_ft: f64,
    proposed_attach_ft: f64,
    effective_separation_inches: i64,
    midspan: Option<&MidspanContext>,
    findings: &mut Findings,
) -> LineImpact {
    let kind = line.kind();
    let make_ready_ft = line.make_ready_height_ft();
    let new_ft = match make_ready_ft {
        Some(h) if line.make_ready => h,
        _ => original_ft,
    };
    let requirement = gap_requirement(kind, effective_separation_inches);

    let pole_gap_in = (new_ft - proposed_attach_ft).abs() * 12.0;
    if pole_gap_in + TOLERANCE_IN < requirement.pole_in {
        findings.warn(format!(
            "{} at {} is {:.1}in from the new attachment; {:.0}in required",
            describe(line),
            format_feet_inches_tick_marks(new_ft),
            pole_gap_in,
            requirement.pole_in
        ));
    }

    let midspan_gap = midspan.map(|ctx| {
        midspan_gap_in(kind, new_ft, proposed_attach_ft, ctx.new_sag_ft, &ctx.loading)
    });
    if let Some(gap) = midspan_gap {
        if gap + TOLERANCE_IN < requirement.midspan_in {
            findings.warn(format!(
                "{} midspan gap is {:.1}in; {:.0}in required",
                describe(line),
                gap,
                requirement.midspan_in
            ));
        }
    }

    let cost = match make_ready_ft {
        Some(target) if (target - original_ft).abs() > f64::EPSILON => {
            let delta_in = (target - original_ft).abs() * 12.0;
            let cost = delta_in * COST_PER_INCH;
            findings.note(format!(
                "Make-ready: move {} from {} to {}",
                describe(line),
                format_feet_inches_tick_marks(original_ft),
                format_feet_inches_tick_marks(target)
            ));
            cost
        }
        _ => 0.0,
    };

    LineImpact {
        line_type: line.line_type.clone(),
        company_name: line.company_name.clone(),
        original_ft,
        new_ft,
        moved: new_ft != original_ft,
        pole_gap_in,
        midspan_gap_in: midspan_gap,
        requirement,
        cost,
    }
}

/// Lines without a parseable height are skipped.
pub fn analyze_make_ready(
    lines: &[ExistingLine],
    proposed_attach_ft: f64,
    effective_separation_inches: i64,
    midspan: Option<&MidspanContext>,
) -> (MakeReadyReport, Findings) {
    let mut findings = Findings::new();
    let impacts: Vec<LineImpact> = lines
        .iter()
        .filter_map(|line| {
            let original_ft = line.height_ft()?;
            Some(assess_line(
                line,
                original_ft,
                proposed_attach_ft,
                effective_separation_inches,
                midspan,
                &mut findings,
            ))
        })
        .collect();

    let total = impacts.iter().map(|i| i.cost).sum();
    debug!(lines = impacts.len(), total, "make-ready");
    (
        MakeReadyReport {
            lines: impacts,
            total,
        },
        findings,
    )
}
