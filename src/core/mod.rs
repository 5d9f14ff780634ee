//! Shared domain types: voltage classes, span environments, existing lines.

use serde::{Deserialize, Serialize};

use crate::units::HeightValue;

/// Voltage class of the existing power plant on the pole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoltageClass {
    Communication,
    #[default]
    Distribution,
    Transmission,
}

impl VoltageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            VoltageClass::Communication => "communication",
            VoltageClass::Distribution => "distribution",
            VoltageClass::Transmission => "transmission",
        }
    }
}

impl std::fmt::Display for VoltageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoltageClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "communication" | "comm" => Ok(VoltageClass::Communication),
            "distribution" => Ok(VoltageClass::Distribution),
            "transmission" => Ok(VoltageClass::Transmission),
            other => Err(format!(
                "Invalid voltage class: '{}'. Valid options: communication, distribution, transmission",
                other
            )),
        }
    }
}

/// What the span crosses. Drives the ground-clearance target.
///
/// Unknown tags deserialize to [`SpanEnvironment::Unspecified`] rather than
/// failing, since the tag usually comes from free-form field data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpanEnvironment {
    Road,
    Highway,
    Interstate,
    Residential,
    ResidentialDriveway,
    Commercial,
    CommercialDriveway,
    Alley,
    Railroad,
    Pedestrian,
    Field,
    Farm,
    WaterNavigable,
    WaterNonNavigable,
    #[default]
    Unspecified,
}

impl SpanEnvironment {
    /// The recognized tags, excluding `Unspecified`.
    pub const RECOGNIZED: [SpanEnvironment; 14] = [
        SpanEnvironment::Road,
        SpanEnvironment::Highway,
        SpanEnvironment::Interstate,
        SpanEnvironment::Residential,
        SpanEnvironment::ResidentialDriveway,
        SpanEnvironment::Commercial,
        SpanEnvironment::CommercialDriveway,
        SpanEnvironment::Alley,
        SpanEnvironment::Railroad,
        SpanEnvironment::Pedestrian,
        SpanEnvironment::Field,
        SpanEnvironment::Farm,
        SpanEnvironment::WaterNavigable,
        SpanEnvironment::WaterNonNavigable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpanEnvironment::Road => "road",
            SpanEnvironment::Highway => "highway",
            SpanEnvironment::Interstate => "interstate",
            SpanEnvironment::Residential => "residential",
            SpanEnvironment::ResidentialDriveway => "residentialDriveway",
            SpanEnvironment::Commercial => "commercial",
            SpanEnvironment::CommercialDriveway => "commercialDriveway",
            SpanEnvironment::Alley => "alley",
            SpanEnvironment::Railroad => "railroad",
            SpanEnvironment::Pedestrian => "pedestrian",
            SpanEnvironment::Field => "field",
            SpanEnvironment::Farm => "farm",
            SpanEnvironment::WaterNavigable => "waterNavigable",
            SpanEnvironment::WaterNonNavigable => "waterNonNavigable",
            SpanEnvironment::Unspecified => "unspecified",
        }
    }

    /// Lenient parse: case, spaces, dashes and underscores are ignored.
    pub fn parse(s: &str) -> Self {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::RECOGNIZED
            .into_iter()
            .find(|env| env.as_str().to_lowercase() == key)
            .unwrap_or(SpanEnvironment::Unspecified)
    }

    /// Roads of any class, for owner rules that apply to vehicular crossings.
    pub fn is_roadway(self) -> bool {
        matches!(
            self,
            SpanEnvironment::Road | SpanEnvironment::Highway | SpanEnvironment::Interstate
        )
    }
}

impl From<String> for SpanEnvironment {
    fn from(value: String) -> Self {
        SpanEnvironment::parse(&value)
    }
}

impl From<SpanEnvironment> for String {
    fn from(value: SpanEnvironment) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for SpanEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which existing conductor governs the new attachment height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerReference {
    /// Lowest detected conductor
    #[default]
    Auto,
    Neutral,
    Secondary,
    DripLoop,
    Power,
}

/// An attachment already on the pole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExistingLine {
    #[serde(rename = "type")]
    pub line_type: String,
    pub height: Option<HeightValue>,
    pub company_name: String,
    pub make_ready: bool,
    pub make_ready_height: Option<HeightValue>,
}

impl ExistingLine {
    pub fn new(line_type: impl Into<String>, height: impl Into<HeightValue>) -> Self {
        Self {
            line_type: line_type.into(),
            height: Some(height.into()),
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = company.into();
        self
    }

    pub fn with_make_ready(mut self, height: impl Into<HeightValue>) -> Self {
        self.make_ready = true;
        self.make_ready_height = Some(height.into());
        self
    }

    pub fn kind(&self) -> LineKind {
        LineKind::from_type(&self.line_type)
    }

    pub fn height_ft(&self) -> Option<f64> {
        self.height.as_ref().and_then(HeightValue::feet)
    }

    pub fn make_ready_height_ft(&self) -> Option<f64> {
        self.make_ready_height.as_ref().and_then(HeightValue::feet)
    }

    /// Height after make-ready, or the current height when no move applies.
    pub fn resulting_height_ft(&self) -> Option<f64> {
        let original = self.height_ft()?;
        if self.make_ready {
            Some(self.make_ready_height_ft().unwrap_or(original))
        } else {
            Some(original)
        }
    }

    /// Literal "communication" typing, as used by the comm-owner signal.
    pub fn is_typed_communication(&self) -> bool {
        self.line_type.to_lowercase().contains("communication")
    }
}

/// Coarse classification of an existing line's free-text type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Neutral,
    Secondary,
    Drop,
    Communication,
    Other,
}

impl LineKind {
    pub fn from_type(line_type: &str) -> Self {
        let lower = line_type.to_lowercase();
        if lower.contains("neutral") {
            LineKind::Neutral
        } else if lower.contains("secondary") {
            LineKind::Secondary
        } else if lower.contains("drop") {
            LineKind::Drop
        } else if ["communication", "comm", "fiber", "telco", "catv", "cable"]
            .iter()
            .any(|hint| lower.contains(hint))
        {
            LineKind::Communication
        } else {
            LineKind::Other
        }
    }

    pub fn is_power_neutral_or_secondary(self) -> bool {
        matches!(self, LineKind::Neutral | LineKind::Secondary)
    }
}
