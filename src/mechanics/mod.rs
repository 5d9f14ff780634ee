//! Span mechanics and guying.

pub mod guy;
pub mod sag;

pub use guy::{calculate_down_guy, GuyResult, GUY_REQUIRED_TENSION_LB};
pub use sag::{
    analyze_span, calculate_sag, midspan_gap_in, nominal_line_sag, span_length_findings,
    wind_load_per_ft, wind_pressure_psf, NeighborAttachSource, SpanLoading, SpanRequest,
    SpanResult,
};
