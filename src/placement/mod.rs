//! Attachment placement: which conductor controls, where the new cable goes,
//! and the owner checks that follow.

pub mod conductor;
pub mod owner_checks;
pub mod recommend;

pub use conductor::{
    collect_candidates, select_controlling_conductor, ConductorInputs, ConductorKind,
    ConductorSelection, ControllingConductor,
};
pub use owner_checks::{first_energy_checks, MidspanContext, OwnerCheckInputs};
pub use recommend::{
    recommend_attachment, Placement, PlacementContext, PlacementScenario, Recommendation,
    RecommendationBasis,
};
