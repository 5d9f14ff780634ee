//! Output records of an analysis.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{CableSpec, PoleClassInfo};
use crate::config::ClearanceTable;
use crate::errors::CalcError;
use crate::findings::{CostItem, Findings};
use crate::make_ready::LineImpact;
use crate::mechanics::{GuyResult, SpanResult};
use crate::placement::{PlacementScenario, Recommendation};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleResult {
    pub input_height: f64,
    pub buried_ft: f64,
    pub above_ground_ft: f64,
    pub class_info: Option<PoleClassInfo>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachResult {
    pub proposed_attach_ft: f64,
    pub proposed_attach_fmt: String,
    pub recommendation: Recommendation,
    pub scenario: PlacementScenario,
    pub effective_separation_ft: f64,
    pub effective_separation_inches: i64,
    pub first_energy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub pole: PoleResult,
    pub attach: AttachResult,
    pub span: Option<SpanResult>,
    pub clearances: ClearanceTable,
    pub make_ready_total: f64,
    pub make_ready_lines: Vec<LineImpact>,
    pub guy: Option<GuyResult>,
    pub cable: CableSpec,
    pub cost_items: Vec<CostItem>,
}

/// What [`super::compute_analysis`] returns. It never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub ok: bool,
    pub results: Option<AnalysisResult>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
    pub cost: Option<f64>,
    pub errors: BTreeMap<String, String>,
}

impl AnalysisOutcome {
    pub(crate) fn success(result: AnalysisResult, findings: Findings, cost: f64) -> Self {
        Self {
            ok: true,
            results: Some(result),
            warnings: findings.warnings,
            notes: findings.notes,
            cost: Some(cost),
            errors: BTreeMap::new(),
        }
    }

    pub(crate) fn failure(errors: &[CalcError]) -> Self {
        let errors = errors
            .iter()
            .map(|e| (e.field().to_string(), e.public_message()))
            .collect();
        Self {
            ok: false,
            results: None,
            warnings: Vec::new(),
            notes: Vec::new(),
            cost: None,
            errors,
        }
    }
}
