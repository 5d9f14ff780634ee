//! Controlling-conductor selection.

use serde::Serialize;
use tracing::debug;

use crate::core::{ExistingLine, LineKind, PowerReference, VoltageClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConductorKind {
    #[serde(rename = "power conductor")]
    Power,
    #[serde(rename = "drip loop")]
    DripLoop,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "secondary")]
    Secondary,
    #[serde(rename = "pole top")]
    PoleTop,
}

impl ConductorKind {
    pub fn name(self) -> &'static str {
        match self {
            ConductorKind::Power => "power conductor",
            ConductorKind::DripLoop => "drip loop",
            ConductorKind::Neutral => "neutral",
            ConductorKind::Secondary => "secondary",
            ConductorKind::PoleTop => "pole top",
        }
    }

    fn matches_reference(self, reference: PowerReference) -> bool {
        matches!(
            (reference, self),
            (PowerReference::Power, ConductorKind::Power)
                | (PowerReference::DripLoop, ConductorKind::DripLoop)
                | (PowerReference::Neutral, ConductorKind::Neutral)
                | (PowerReference::Secondary, ConductorKind::Secondary)
        )
    }
}

impl std::fmt::Display for ConductorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The reference used for placement math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllingConductor {
    pub name: ConductorKind,
    pub height_ft: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ConductorInputs<'a> {
    pub existing_power_ft: Option<f64>,
    pub drip_loop_ft: Option<f64>,
    pub existing_lines: &'a [ExistingLine],
    pub reference: PowerReference,
    pub voltage: VoltageClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConductorSelection {
    /// Detected conductors, lowest first
    pub candidates: Vec<ControllingConductor>,
    pub controlling: Option<ControllingConductor>,
    pub power_present: bool,
    /// No conductor detected on a communication-owned pole
    pub comm_owner_no_power: bool,
}

pub fn collect_candidates(inputs: &ConductorInputs<'_>) -> Vec<ControllingConductor> {
    let positive = |h: Option<f64>| h.filter(|v| *v > 0.0);

    let mut candidates: Vec<ControllingConductor> = [
        (ConductorKind::Power, positive(inputs.existing_power_ft)),
        (ConductorKind::DripLoop, positive(inputs.drip_loop_ft)),
    ]
    .into_iter()
    .filter_map(|(name, height)| height.map(|height_ft| ControllingConductor { name, height_ft }))
    .collect();

    candidates.extend(inputs.existing_lines.iter().filter_map(|line| {
        let name = match line.kind() {
            LineKind::Neutral => ConductorKind::Neutral,
            LineKind::Secondary => ConductorKind::Secondary,
            _ => return None,
        };
        positive(line.height_ft()).map(|height_ft| ControllingConductor { name, height_ft })
    }));

    candidates.sort_by(|a, b| a.height_ft.total_cmp(&b.height_ft));
    candidates
}

pub fn select_controlling_conductor(inputs: &ConductorInputs<'_>) -> ConductorSelection {
    let candidates = collect_candidates(inputs);

    let controlling = match inputs.reference {
        PowerReference::Auto => candidates.first().copied(),
        reference => candidates
            .iter()
            .find(|c| c.name.matches_reference(reference))
            .copied(),
    };

    let comm_signal = inputs.voltage == VoltageClass::Communication
        || inputs
            .existing_lines
            .iter()
            .any(|line| line.is_typed_communication() && !line.company_name.trim().is_empty());
    let comm_owner_no_power = candidates.is_empty() && comm_signal;

    debug!(
        candidates = candidates.len(),
        ?controlling,
        comm_owner_no_power,
        "controlling conductor"
    );

    ConductorSelection {
        power_present: controlling.is_some(),
        candidates,
        controlling,
        comm_owner_no_power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(lines: &'a [ExistingLine], reference: PowerReference) -> ConductorInputs<'a> {
        ConductorInputs {
            existing_power_ft: Some(35.0),
            drip_loop_ft: Some(33.5),
            existing_lines: lines,
            reference,
            voltage: VoltageClass::Distribution,
        }
    }

    #[test]
    fn auto_picks_lowest() {
        let lines = vec![
            ExistingLine::new("neutral", "31ft 0in"),
            ExistingLine::new("secondary", "29' 6\""),
        ];
        let selection = select_controlling_conductor(&inputs(&lines, PowerReference::Auto));
        let controlling = selection.controlling.unwrap();
        assert_eq!(controlling.name, ConductorKind::Secondary);
        assert_eq!(controlling.height_ft, 29.5);
        assert!(selection.power_present);
        assert_eq!(selection.candidates.len(), 4);
    }

    #[test]
    fn explicit_reference_picks_that_category() {
        let lines = vec![ExistingLine::new("neutral", 31.0)];
        let selection = select_controlling_conductor(&inputs(&lines, PowerReference::Power));
        assert_eq!(selection.controlling.unwrap().name, ConductorKind::Power);

        let selection = select_controlling_conductor(&inputs(&lines, PowerReference::DripLoop));
        assert_eq!(selection.controlling.unwrap().height_ft, 33.5);
    }

    #[test]
    fn explicit_reference_without_match_selects_nothing() {
        let selection = select_controlling_conductor(&inputs(&[], PowerReference::Neutral));
        assert!(selection.controlling.is_none());
        assert!(!selection.power_present);
        assert!(!selection.comm_owner_no_power);
    }

    #[test]
    fn unparseable_and_zero_heights_are_skipped() {
        let lines = vec![
            ExistingLine::new("neutral", "abc"),
            ExistingLine::new("secondary", 0.0),
        ];
        let selection = select_controlling_conductor(&ConductorInputs {
            existing_power_ft: None,
            drip_loop_ft: Some(0.0),
            existing_lines: &lines,
            reference: PowerReference::Auto,
            voltage: VoltageClass::Distribution,
        });
        assert!(selection.candidates.is_empty());
        assert!(selection.controlling.is_none());
    }

    #[test]
    fn comm_owner_detected_from_voltage() {
        let selection = select_controlling_conductor(&ConductorInputs {
            existing_power_ft: None,
            drip_loop_ft: None,
            existing_lines: &[],
            reference: PowerReference::Auto,
            voltage: VoltageClass::Communication,
        });
        assert!(selection.comm_owner_no_power);
    }

    #[test]
    fn comm_owner_detected_from_owned_comm_line() {
        let lines = vec![ExistingLine::new("communication", 24.0).with_company("Verizon")];
        let unowned = vec![ExistingLine::new("communication", 24.0)];
        let base = ConductorInputs {
            existing_power_ft: None,
            drip_loop_ft: None,
            existing_lines: &lines,
            reference: PowerReference::Auto,
            voltage: VoltageClass::Distribution,
        };
        assert!(select_controlling_conductor(&base).comm_owner_no_power);

        let without_company = ConductorInputs {
            existing_lines: &unowned,
            ..base
        };
        assert!(!select_controlling_conductor(&without_company).comm_owner_no_power);
    }

    #[test]
    fn serializes_conductor_names() {
        let c = ControllingConductor {
            name: ConductorKind::DripLoop,
            height_ft: 30.0,
        };
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["name"], "drip loop");
        assert_eq!(json["heightFt"], 30.0);
    }
}
