mod grammars;

pub use crate::grammars::*;
