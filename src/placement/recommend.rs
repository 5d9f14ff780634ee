//! Attachment height recommendation.
//!
//! Placement is an explicit state machine. Each [`PlacementScenario`] has
//! its own evaluation function that returns `None` when the scenario does
//! not apply; scenarios are tried in [`PlacementScenario::PRIORITY`] order
//! and the first match wins:
//!
//! 1. `CommOwnerNoPower`: no conductor detected on a comm-owned pole
//! 2. `PowerPresent`: a controlling conductor exists
//! 3. `NewConstruction`: new pole, nothing above to clear
//! 4. `VoltageDefault`: always applies
//!
//! The `minCommAttachFt` clamp and the transformer surcharge run after the
//! scenario, whatever it was.

use serde::Serialize;
use tracing::debug;

use super::conductor::{ConductorKind, ConductorSelection, ControllingConductor};
use crate::config::nesc::ClearanceTable;
use crate::core::VoltageClass;
use crate::findings::Findings;
use crate::owner::EffectiveSeparation;
use crate::units::{feet_to_inches, format_feet_inches_tick_marks};

/// Comm-owned poles attach this far below the top, feet.
pub const COMM_OWNER_TOP_OFFSET_FT: f64 = 1.0;
pub const TRANSFORMER_COST: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationBasis {
    #[serde(rename = "owner-comm/no-power")]
    OwnerCommNoPower,
    #[serde(rename = "NESC")]
    Nesc,
    #[serde(rename = "NESC-transmission")]
    NescTransmission,
    #[serde(rename = "FE")]
    FirstEnergy,
    #[serde(rename = "new-construction")]
    NewConstruction,
    #[serde(rename = "voltage-default")]
    VoltageDefault,
}

impl RecommendationBasis {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationBasis::OwnerCommNoPower => "owner-comm/no-power",
            RecommendationBasis::Nesc => "NESC",
            RecommendationBasis::NescTransmission => "NESC-transmission",
            RecommendationBasis::FirstEnergy => "FE",
            RecommendationBasis::NewConstruction => "new-construction",
            RecommendationBasis::VoltageDefault => "voltage-default",
        }
    }
}

impl std::fmt::Display for RecommendationBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub basis: RecommendationBasis,
    pub detail: String,
    pub clearance_in: i64,
    pub controlling: ControllingConductor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementScenario {
    CommOwnerNoPower,
    PowerPresent,
    NewConstruction,
    VoltageDefault,
}

#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub pole_above_ground_ft: f64,
    pub selection: &'a ConductorSelection,
    pub voltage: VoltageClass,
    pub first_energy: bool,
    pub separation: EffectiveSeparation,
    pub clearances: &'a ClearanceTable,
    /// Existing power height as entered, before candidate filtering
    pub raw_power_ft: Option<f64>,
    pub is_new_construction: bool,
    pub min_comm_attach_ft: Option<f64>,
    pub has_transformer: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: PlacementScenario,
    pub proposed_attach_ft: f64,
    pub recommendation: Recommendation,
    pub findings: Findings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub scenario: PlacementScenario,
    pub proposed_attach_ft: f64,
    pub recommendation: Recommendation,
    pub findings: Findings,
}

impl PlacementScenario {
    pub const PRIORITY: [PlacementScenario; 4] = [
        PlacementScenario::CommOwnerNoPower,
        PlacementScenario::PowerPresent,
        PlacementScenario::NewConstruction,
        PlacementScenario::VoltageDefault,
    ];

    pub fn evaluate(self, ctx: &PlacementContext<'_>) -> Option<ScenarioOutcome> {
        match self {
            PlacementScenario::CommOwnerNoPower => evaluate_comm_owner_no_power(ctx),
            PlacementScenario::PowerPresent => evaluate_power_present(ctx),
            PlacementScenario::NewConstruction => evaluate_new_construction(ctx),
            PlacementScenario::VoltageDefault => Some(evaluate_voltage_default(ctx)),
        }
    }
}

fn evaluate_comm_owner_no_power(ctx: &PlacementContext<'_>) -> Option<ScenarioOutcome> {
    let selection = ctx.selection;
    if selection.controlling.is_some() || !selection.comm_owner_no_power {
        return None;
    }
    let proposed = ctx.pole_above_ground_ft - COMM_OWNER_TOP_OFFSET_FT;
    let mut findings = Findings::new();
    findings.note("Communication-owned pole with no power detected; attaching 1ft below pole top");
    let cost = if ctx.is_new_construction { 150.0 } else { 200.0 };
    findings.cost("Attachment (comm-owned pole)", cost);

    Some(ScenarioOutcome {
        scenario: PlacementScenario::CommOwnerNoPower,
        proposed_attach_ft: proposed,
        recommendation: Recommendation {
            basis: RecommendationBasis::OwnerCommNoPower,
            detail: format!(
                "Attach at {} (1ft below pole top)",
                format_feet_inches_tick_marks(proposed)
            ),
            clearance_in: 12,
            controlling: pole_top(ctx.pole_above_ground_ft),
        },
        findings,
    })
}

fn evaluate_power_present(ctx: &PlacementContext<'_>) -> Option<ScenarioOutcome> {
    let controlling = ctx.selection.controlling?;
    let proposed = controlling.height_ft - ctx.separation.effective_ft;
    let basis = if ctx.voltage == VoltageClass::Transmission {
        RecommendationBasis::NescTransmission
    } else if ctx.first_energy {
        RecommendationBasis::FirstEnergy
    } else {
        RecommendationBasis::Nesc
    };

    let mut findings = Findings::new();
    findings.note(format!(
        "Controlling conductor: {} at {}",
        controlling.name,
        format_feet_inches_tick_marks(controlling.height_ft)
    ));
    if ctx.separation.effective_ft > ctx.separation.base_ft {
        findings.note(format!(
            "Owner floor of {}in exceeds the resolved {}in separation",
            ctx.separation.effective_inches,
            feet_to_inches(ctx.separation.base_ft)
        ));
    }
    findings.cost("Attachment below power", 200.0);

    Some(ScenarioOutcome {
        scenario: PlacementScenario::PowerPresent,
        proposed_attach_ft: proposed,
        recommendation: Recommendation {
            basis,
            detail: format!(
                "{} {}in below {} at {}",
                basis,
                ctx.separation.effective_inches,
                controlling.name,
                format_feet_inches_tick_marks(controlling.height_ft)
            ),
            clearance_in: ctx.separation.effective_inches,
            controlling,
        },
        findings,
    })
}

fn evaluate_new_construction(ctx: &PlacementContext<'_>) -> Option<ScenarioOutcome> {
    if ctx.selection.controlling.is_some()
        || ctx.selection.comm_owner_no_power
        || !ctx.is_new_construction
    {
        return None;
    }
    let top_space = ctx.clearances.minimum_pole_top_space;
    let proposed = ctx.pole_above_ground_ft - top_space;
    let mut findings = Findings::new();
    findings.note("New construction with no power detected; reserving minimum pole-top space");
    findings.cost("Attachment (new construction)", 150.0);

    Some(ScenarioOutcome {
        scenario: PlacementScenario::NewConstruction,
        proposed_attach_ft: proposed,
        recommendation: Recommendation {
            basis: RecommendationBasis::NewConstruction,
            detail: format!(
                "Attach {} below pole top",
                format_feet_inches_tick_marks(top_space)
            ),
            clearance_in: feet_to_inches(top_space),
            controlling: pole_top(ctx.pole_above_ground_ft),
        },
        findings,
    })
}

fn evaluate_voltage_default(ctx: &PlacementContext<'_>) -> ScenarioOutcome {
    let clearance_ft = match ctx.voltage {
        VoltageClass::Transmission => ctx.clearances.power_clearance_transmission,
        VoltageClass::Communication | VoltageClass::Distribution => {
            ctx.clearances.power_clearance_distribution
        }
    };
    let power_ft = ctx.raw_power_ft.unwrap_or(0.0);
    let proposed = power_ft - clearance_ft;

    let mut findings = Findings::new();
    if ctx.raw_power_ft.is_none() {
        findings.warn("No usable power height; voltage-default placement assumes 0ft");
    }
    findings.note(format!(
        "No controlling conductor selected; using the {} clearance of {}in",
        ctx.voltage,
        feet_to_inches(clearance_ft)
    ));
    findings.cost("Attachment (voltage default)", 200.0);

    ScenarioOutcome {
        scenario: PlacementScenario::VoltageDefault,
        proposed_attach_ft: proposed,
        recommendation: Recommendation {
            basis: RecommendationBasis::VoltageDefault,
            detail: format!(
                "{} voltage clearance below power at {}",
                ctx.voltage,
                format_feet_inches_tick_marks(power_ft)
            ),
            clearance_in: feet_to_inches(clearance_ft),
            controlling: ControllingConductor {
                name: ConductorKind::Power,
                height_ft: power_ft,
            },
        },
        findings,
    }
}

fn pole_top(height_ft: f64) -> ControllingConductor {
    ControllingConductor {
        name: ConductorKind::PoleTop,
        height_ft,
    }
}

/// Run the state machine, then the post-scenario adjustments.
pub fn recommend_attachment(ctx: &PlacementContext<'_>) -> Placement {
    let ScenarioOutcome {
        scenario,
        proposed_attach_ft,
        recommendation,
        mut findings,
    } = PlacementScenario::PRIORITY
        .iter()
        .find_map(|scenario| scenario.evaluate(ctx))
        .unwrap_or_else(|| evaluate_voltage_default(ctx));

    let mut proposed = proposed_attach_ft;
    if let Some(min_comm) = ctx.min_comm_attach_ft.filter(|v| v.is_finite()) {
        let allowed_max = ctx
            .selection
            .controlling
            .map_or(f64::INFINITY, |c| c.height_ft - ctx.separation.effective_ft);
        let clamped = proposed.max(min_comm).min(allowed_max);
        if clamped != proposed {
            findings.note(format!(
                "Proposed height adjusted from {} to {} for the submission profile minimum of {}",
                format_feet_inches_tick_marks(proposed),
                format_feet_inches_tick_marks(clamped),
                format_feet_inches_tick_marks(min_comm)
            ));
            proposed = clamped;
        }
        if min_comm > allowed_max {
            findings.warn(format!(
                "Submission profile minimum of {} cannot be met below the {}",
                format_feet_inches_tick_marks(min_comm),
                recommendation.controlling.name
            ));
        }
    }

    if ctx.has_transformer {
        findings.note("Transformer on pole; verify clearance to transformer bottom and case");
        findings.cost("Transformer on pole", TRANSFORMER_COST);
    }

    if proposed <= 0.0 {
        findings.warn(format!(
            "Computed attachment height {} is not above ground",
            format_feet_inches_tick_marks(proposed)
        ));
    }

    debug!(?scenario, proposed, "attachment recommendation");
    Placement {
        scenario,
        proposed_attach_ft: proposed,
        recommendation,
        findings,
    }
}
