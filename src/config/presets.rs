//! Named clearance presets for pole owners.
//!
//! A preset tightens the NESC baseline for a specific owner:
//! - **nesc**: baseline only, no changes
//! - **FirstEnergy family**: the parent company and each operating company,
//!   all carrying the same construction standard
//!
//! # Example
//!
//! ```rust
//! use polecalc::config::presets::Preset;
//!
//! let preset = Preset::parse("Mon Power").unwrap();
//! assert!(preset.is_first_energy_family());
//! assert_eq!(preset.rules().min_top_space_ft, Some(2.0));
//! ```

use serde::{Deserialize, Serialize};

/// Known presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// NESC baseline, no owner overlay
    Nesc,
    FirstEnergy,
    MonPower,
    PotomacEdison,
    Penelec,
    MetEd,
    PennPower,
    WestPennPower,
    Jcpl,
    OhioEdison,
    ToledoEdison,
    IlluminatingCompany,
}

/// Fields a preset may set. `None` leaves the prior value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresetRules {
    pub min_top_space_ft: Option<f64>,
    pub road_clearance_ft: Option<f64>,
    pub comm_to_power_ft: Option<f64>,
}

const FIRST_ENERGY_RULES: PresetRules = PresetRules {
    min_top_space_ft: Some(2.0),
    road_clearance_ft: Some(18.0),
    comm_to_power_ft: Some(44.0 / 12.0),
};

impl Preset {
    pub const ALL: [Preset; 12] = [
        Preset::Nesc,
        Preset::FirstEnergy,
        Preset::MonPower,
        Preset::PotomacEdison,
        Preset::Penelec,
        Preset::MetEd,
        Preset::PennPower,
        Preset::WestPennPower,
        Preset::Jcpl,
        Preset::OhioEdison,
        Preset::ToledoEdison,
        Preset::IlluminatingCompany,
    ];

    /// Clearance fields this preset sets.
    pub fn rules(self) -> PresetRules {
        if self.is_first_energy_family() {
            FIRST_ENERGY_RULES
        } else {
            PresetRules::default()
        }
    }

    pub fn is_first_energy_family(self) -> bool {
        !matches!(self, Preset::Nesc)
    }

    /// Parse preset from a name (returns Option instead of Result).
    ///
    /// Case, spaces, dashes, underscores and `&` are ignored, so `"JCP&L"`,
    /// `"jcpl"` and `"jcp-l"` all resolve.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '&' | '.'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "nesc" | "default" => Some(Preset::Nesc),
            "firstenergy" | "fe" => Some(Preset::FirstEnergy),
            "monpower" | "monongahelapower" => Some(Preset::MonPower),
            "potomacedison" => Some(Preset::PotomacEdison),
            "penelec" => Some(Preset::Penelec),
            "meted" | "metropolitanedison" => Some(Preset::MetEd),
            "pennpower" => Some(Preset::PennPower),
            "westpennpower" | "westpenn" => Some(Preset::WestPennPower),
            "jcpl" | "jerseycentralpowerlight" => Some(Preset::Jcpl),
            "ohioedison" => Some(Preset::OhioEdison),
            "toledoedison" => Some(Preset::ToledoEdison),
            "illuminatingcompany" | "cei" => Some(Preset::IlluminatingCompany),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Nesc => "nesc",
            Preset::FirstEnergy => "firstEnergy",
            Preset::MonPower => "monPower",
            Preset::PotomacEdison => "potomacEdison",
            Preset::Penelec => "penelec",
            Preset::MetEd => "metEd",
            Preset::PennPower => "pennPower",
            Preset::WestPennPower => "westPennPower",
            Preset::Jcpl => "jcpl",
            Preset::OhioEdison => "ohioEdison",
            Preset::ToledoEdison => "toledoEdison",
            Preset::IlluminatingCompany => "illuminatingCompany",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Preset::Nesc => "NESC baseline",
            Preset::FirstEnergy => "FirstEnergy",
            Preset::MonPower => "Mon Power",
            Preset::PotomacEdison => "Potomac Edison",
            Preset::Penelec => "Penelec",
            Preset::MetEd => "Met-Ed",
            Preset::PennPower => "Penn Power",
            Preset::WestPennPower => "West Penn Power",
            Preset::Jcpl => "JCP&L",
            Preset::OhioEdison => "Ohio Edison",
            Preset::ToledoEdison => "Toledo Edison",
            Preset::IlluminatingCompany => "The Illuminating Company",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::parse(s).ok_or_else(|| {
            let valid: Vec<&str> = Preset::ALL.iter().map(|p| p.as_str()).collect();
            format!(
                "Invalid preset: '{}'. Valid options: {}",
                s,
                valid.join(", ")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_punctuation_and_case() {
        assert_eq!(Preset::parse("JCP&L"), Some(Preset::Jcpl));
        assert_eq!(Preset::parse("met-ed"), Some(Preset::MetEd));
        assert_eq!(Preset::parse("First Energy"), Some(Preset::FirstEnergy));
        assert_eq!(Preset::parse("nesc"), Some(Preset::Nesc));
        assert_eq!(Preset::parse("unknown utility"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for preset in Preset::ALL {
            assert_eq!(Preset::parse(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn nesc_sets_nothing() {
        assert_eq!(Preset::Nesc.rules(), PresetRules::default());
        assert!(!Preset::Nesc.is_first_energy_family());
    }

    #[test]
    fn first_energy_family_shares_rules() {
        for preset in Preset::ALL.into_iter().filter(|p| p.is_first_energy_family()) {
            assert_eq!(preset.rules(), FIRST_ENERGY_RULES);
        }
    }

    #[test]
    fn from_str_lists_valid_options() {
        let err = "bogus".parse::<Preset>().unwrap_err();
        assert!(err.contains("firstEnergy"));
    }
}
