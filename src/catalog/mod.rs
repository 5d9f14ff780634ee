//! Static reference data: cable types and pole classes.

pub mod cables;
pub mod poles;

pub use cables::{default_cable, find_cable, CableSpec, CABLE_CATALOG, DEFAULT_CABLE_KEY};
pub use poles::{pole_class_info, setting_depth_ft, PoleClassInfo};
