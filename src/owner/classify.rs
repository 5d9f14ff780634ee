//! FirstEnergy-family ownership detection.

use serde::Serialize;

use crate::config::presets::Preset;
use crate::core::ExistingLine;

/// Brand names that mark a pole as FirstEnergy-owned, lowercase.
pub const FIRST_ENERGY_HINTS: [&str; 14] = [
    "firstenergy",
    "first energy",
    "mon power",
    "monongahela",
    "potomac edison",
    "penelec",
    "met-ed",
    "penn power",
    "west penn",
    "jcp&l",
    "ohio edison",
    "toledo edison",
    "illuminating company",
    "cleveland electric",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnershipSignal {
    FirstEnergy,
    Generic,
}

/// What caused a FirstEnergy classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "camelCase")]
pub enum ClassificationSource {
    Preset(String),
    CompanyName(String),
    JobOwner(String),
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationSource::Preset(name) => write!(f, "preset '{}'", name),
            ClassificationSource::CompanyName(name) => write!(f, "existing line owner '{}'", name),
            ClassificationSource::JobOwner(name) => write!(f, "job owner '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerClassification {
    pub signal: OwnershipSignal,
    pub sources: Vec<ClassificationSource>,
}

impl OwnerClassification {
    pub fn is_first_energy(&self) -> bool {
        self.signal == OwnershipSignal::FirstEnergy
    }
}

/// True when `text` contains any FirstEnergy brand hint.
pub fn matches_first_energy_hint(text: &str) -> bool {
    let lower = text.to_lowercase();
    FIRST_ENERGY_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Classify the job's owner. Any one signal is enough.
pub fn classify_owner(
    preset: Option<&str>,
    existing_lines: &[ExistingLine],
    job_owner: Option<&str>,
) -> OwnerClassification {
    let mut sources = Vec::new();

    if let Some(name) = preset {
        if Preset::parse(name).is_some_and(Preset::is_first_energy_family) {
            sources.push(ClassificationSource::Preset(name.trim().to_string()));
        }
    }

    sources.extend(
        existing_lines
            .iter()
            .filter(|line| matches_first_energy_hint(&line.company_name))
            .map(|line| ClassificationSource::CompanyName(line.company_name.trim().to_string())),
    );

    if let Some(owner) = job_owner.filter(|o| matches_first_energy_hint(o)) {
        sources.push(ClassificationSource::JobOwner(owner.trim().to_string()));
    }

    let signal = if sources.is_empty() {
        OwnershipSignal::Generic
    } else {
        OwnershipSignal::FirstEnergy
    };
    OwnerClassification { signal, sources }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_alone_classifies() {
        let c = classify_owner(Some("penelec"), &[], None);
        assert!(c.is_first_energy());
        assert_eq!(
            c.sources,
            vec![ClassificationSource::Preset("penelec".into())]
        );
    }

    #[test]
    fn nesc_preset_does_not_classify() {
        assert!(!classify_owner(Some("nesc"), &[], None).is_first_energy());
    }

    #[test]
    fn company_name_hint_is_case_insensitive() {
        let lines = vec![ExistingLine::new("neutral", 30.0).with_company("MON POWER Co.")];
        assert!(classify_owner(None, &lines, None).is_first_energy());
    }

    #[test]
    fn illuminating_company_line_matches_its_preset() {
        let lines = vec![ExistingLine::new("neutral", 30.0).with_company("The Illuminating Company")];
        assert!(classify_owner(None, &lines, None).is_first_energy());
        assert!(classify_owner(Some("illuminatingCompany"), &[], None).is_first_energy());
        assert!(matches_first_energy_hint("Cleveland Electric Illuminating Co."));
    }

    #[test]
    fn job_owner_hint_classifies() {
        let c = classify_owner(None, &[], Some("JCP&L - Morristown"));
        assert!(c.is_first_energy());
        assert!(matches!(c.sources[0], ClassificationSource::JobOwner(_)));
    }

    #[test]
    fn unrelated_owner_is_generic() {
        let lines = vec![ExistingLine::new("communication", 22.0).with_company("Comcast")];
        let c = classify_owner(Some("nesc"), &lines, Some("Duke Energy"));
        assert_eq!(c.signal, OwnershipSignal::Generic);
        assert!(c.sources.is_empty());
    }
}
