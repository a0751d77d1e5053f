mod error;
mod ll1;

pub use crate::error::{AnalysisError, Conflict, Diagnostic, GrammarError, Stage};
pub use crate::ll1::*;
