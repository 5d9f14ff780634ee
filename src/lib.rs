// Export modules for library usage
pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod findings;
pub mod geo;
pub mod make_ready;
pub mod mechanics;
pub mod output;
pub mod owner;
pub mod placement;
pub mod units;

// Re-export commonly used types
pub use crate::analysis::{compute_analysis, AnalysisInput, AnalysisOutcome, AnalysisResult};

pub use crate::core::{ExistingLine, LineKind, PowerReference, SpanEnvironment, VoltageClass};

pub use crate::config::{
    get_nesc_clearances, resolve_clearances, ClearanceTable, Preset, SubmissionProfile,
};

pub use crate::errors::{CalcError, ErrorCode, ErrorKind};

pub use crate::findings::{CostItem, Findings};

pub use crate::mechanics::{calculate_down_guy, calculate_sag, GuyResult};

pub use crate::units::{
    format_feet_inches, format_feet_inches_tick_marks, format_feet_inches_verbose, parse_feet,
    parse_feet_str, FormatOptions, HeightValue,
};
