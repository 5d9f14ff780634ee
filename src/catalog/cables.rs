//! Cable-type catalog.
//!
//! Values are nominal manufacturer figures for common aerial communication
//! builds. Rated tension is the figure used for sag and guying estimates.

use serde::Serialize;

/// Physical properties of an attachment cable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CableSpec {
    pub key: &'static str,
    pub name: &'static str,
    /// Outside diameter, inches
    pub diameter_in: f64,
    /// Unit weight, lb/ft
    pub weight_lb_per_ft: f64,
    /// Rated tension, lb
    pub rated_tension_lb: f64,
}

/// Key used when the input names no cable or an unknown one.
pub const DEFAULT_CABLE_KEY: &str = "adss-48";

pub const CABLE_CATALOG: &[CableSpec] = &[
    CableSpec {
        key: "adss-24",
        name: "ADSS 24-fiber",
        diameter_in: 0.47,
        weight_lb_per_ft: 0.065,
        rated_tension_lb: 1800.0,
    },
    CableSpec {
        key: "adss-48",
        name: "ADSS 48-fiber",
        diameter_in: 0.52,
        weight_lb_per_ft: 0.08,
        rated_tension_lb: 2000.0,
    },
    CableSpec {
        key: "adss-96",
        name: "ADSS 96-fiber",
        diameter_in: 0.60,
        weight_lb_per_ft: 0.105,
        rated_tension_lb: 2500.0,
    },
    CableSpec {
        key: "adss-144",
        name: "ADSS 144-fiber",
        diameter_in: 0.68,
        weight_lb_per_ft: 0.13,
        rated_tension_lb: 3000.0,
    },
    CableSpec {
        key: "fiber-lashed-6m",
        name: "Fiber lashed to 6M strand",
        diameter_in: 0.80,
        weight_lb_per_ft: 0.25,
        rated_tension_lb: 6000.0,
    },
    CableSpec {
        key: "coax-500",
        name: "Coax .500 lashed",
        diameter_in: 0.75,
        weight_lb_per_ft: 0.22,
        rated_tension_lb: 6000.0,
    },
    CableSpec {
        key: "copper-25pr",
        name: "Copper 25-pair",
        diameter_in: 0.60,
        weight_lb_per_ft: 0.30,
        rated_tension_lb: 1500.0,
    },
    CableSpec {
        key: "strand-6m",
        name: "6M messenger strand",
        diameter_in: 0.25,
        weight_lb_per_ft: 0.121,
        rated_tension_lb: 6650.0,
    },
    CableSpec {
        key: "strand-10m",
        name: "10M messenger strand",
        diameter_in: 0.3125,
        weight_lb_per_ft: 0.205,
        rated_tension_lb: 11200.0,
    },
];

/// Look up a cable by key, case-insensitively.
pub fn find_cable(key: &str) -> Option<&'static CableSpec> {
    let key = key.trim();
    CABLE_CATALOG
        .iter()
        .find(|spec| spec.key.eq_ignore_ascii_case(key))
}

pub fn default_cable() -> &'static CableSpec {
    // The catalog is a compile-time constant containing the default key.
    find_cable(DEFAULT_CABLE_KEY).unwrap_or(&CABLE_CATALOG[0])
}
