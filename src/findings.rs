//! Warnings, notes, and cost additions returned by each calculation step.
//!
//! Every step returns its own [`Findings`]; the orchestrator concatenates
//! them with [`Findings::absorb`]. Nothing here is shared between steps.

use serde::{Deserialize, Serialize};

/// A labelled cost addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Findings {
    /// Out-of-tolerance conditions. Informational, never blocking.
    pub warnings: Vec<String>,
    /// Design rationale.
    pub notes: Vec<String>,
    pub costs: Vec<CostItem>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn cost(&mut self, label: impl Into<String>, amount: f64) {
        self.costs.push(CostItem {
            label: label.into(),
            amount,
        });
    }

    /// Append another step's findings, preserving order.
    pub fn absorb(&mut self, other: Findings) {
        self.warnings.extend(other.warnings);
        self.notes.extend(other.notes);
        self.costs.extend(other.costs);
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.iter().map(|c| c.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.notes.is_empty() && self.costs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_preserves_order_and_totals() {
        let mut first = Findings::new();
        first.warn("a");
        first.cost("attach", 200.0);

        let mut second = Findings::new();
        second.warn("b");
        second.note("n");
        second.cost("transformer", 300.0);

        first.absorb(second);
        assert_eq!(first.warnings, vec!["a", "b"]);
        assert_eq!(first.notes, vec!["n"]);
        assert_eq!(first.total_cost(), 500.0);
    }

    #[test]
    fn new_findings_are_empty() {
        assert!(Findings::new().is_empty());
        assert_eq!(Findings::new().total_cost(), 0.0);
    }
}
