pub mod analysis_flow;

pub use analysis_flow::{AnalysisOutcome, PresentationAnalyzer, NO_DATA_COMMENT};
