//! Wood pole class table and setting depth.

use serde::Serialize;

/// ANSI O5.1 class properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleClassInfo {
    pub class: &'static str,
    pub min_top_circumference_in: f64,
    /// Horizontal load applied 2ft below the top, lb
    pub horizontal_load_lb: f64,
}

const POLE_CLASSES: &[PoleClassInfo] = &[
    class("H6", 39.0, 11_400.0),
    class("H5", 37.0, 10_000.0),
    class("H4", 35.0, 8_700.0),
    class("H3", 33.0, 7_500.0),
    class("H2", 31.0, 6_400.0),
    class("H1", 29.0, 5_400.0),
    class("1", 27.0, 4_500.0),
    class("2", 25.0, 3_700.0),
    class("3", 23.0, 3_000.0),
    class("4", 21.0, 2_400.0),
    class("5", 19.0, 1_900.0),
    class("6", 17.0, 1_500.0),
    class("7", 15.0, 1_200.0),
    class("9", 15.0, 740.0),
    class("10", 12.0, 370.0),
];

const fn class(
    class: &'static str,
    min_top_circumference_in: f64,
    horizontal_load_lb: f64,
) -> PoleClassInfo {
    PoleClassInfo {
        class,
        min_top_circumference_in,
        horizontal_load_lb,
    }
}

/// Look up a class from strings like `"4"`, `"Class 4"`, `"h1"`.
pub fn pole_class_info(raw: &str) -> Option<&'static PoleClassInfo> {
    let normalized = raw.trim().to_uppercase();
    let normalized = normalized
        .strip_prefix("CLASS")
        .unwrap_or(&normalized)
        .trim();
    if normalized.is_empty() {
        return None;
    }
    POLE_CLASSES.iter().find(|info| info.class == normalized)
}

/// Setting depth by the 10%-plus-two-feet rule.
pub fn setting_depth_ft(pole_height_ft: f64) -> f64 {
    pole_height_ft * 0.1 + 2.0
}
