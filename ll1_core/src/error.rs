use std::error::Error;
use std::fmt;

use crate::{Production, Symbol};

/// Errors that prevent a grammar from being built at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// No well-formed production was found
    Empty,
    /// The requested start symbol is not defined by any rule
    UnknownStartSymbol(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            GrammarError::Empty => write!(f, "Grammar error: no productions found"),
            GrammarError::UnknownStartSymbol(name) => write!(
                f,
                "Grammar error: start symbol {} is not defined by any rule",
                name
            ),
        }
    }
}

impl Error for GrammarError {}

/// Analysis stage a fixpoint loop belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LeftFactoring,
    LeftRecursion,
    First,
    Follow,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Stage::LeftFactoring => write!(f, "left factoring"),
            Stage::LeftRecursion => write!(f, "left recursion elimination"),
            Stage::First => write!(f, "FIRST sets"),
            Stage::Follow => write!(f, "FOLLOW sets"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A fixpoint loop did not settle within its iteration bound
    NonConvergence { stage: Stage, limit: usize },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            AnalysisError::NonConvergence { stage, limit } => write!(
                f,
                "Analysis error: {} did not converge within {} iterations",
                stage, limit
            ),
        }
    }
}

impl Error for AnalysisError {}

/// Recoverable anomaly found while reading or rewriting a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A line that is not of the form `A -> x | y`; the line is skipped
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },
    /// A name that looks like a nonterminal but has no rule; it is read as a terminal
    UndeclaredSymbol { name: String, lhs: String },
    /// An `A -> A` alternative, which derives nothing and was dropped
    CyclicAlternative { nonterminal: String },
    /// Every alternative of the nonterminal was left recursive
    NoBaseAlternative { nonterminal: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Diagnostic::MalformedLine {
                line,
                content,
                reason,
            } => write!(f, "line {}: {} (skipped `{}`)", line, reason, content),
            Diagnostic::UndeclaredSymbol { name, lhs } => write!(
                f,
                "{} is used in a rule for {} but never defined, treating it as a terminal",
                name, lhs
            ),
            Diagnostic::CyclicAlternative { nonterminal } => write!(
                f,
                "dropped cyclic alternative {} -> {}",
                nonterminal, nonterminal
            ),
            Diagnostic::NoBaseAlternative { nonterminal } => write!(
                f,
                "every alternative of {} is left recursive, it derives no terminal string",
                nonterminal
            ),
        }
    }
}

/// Two alternatives of one nonterminal claiming the same table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub nonterminal: String,
    pub lookahead: Symbol,
    /// Alternative kept in the cell
    pub existing: Production,
    /// Alternative that was refused
    pub rejected: Production,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "LL(1) conflict at [{}, {}]: {} -> {} vs. {} -> {}",
            self.nonterminal,
            self.lookahead,
            self.nonterminal,
            self.existing,
            self.nonterminal,
            self.rejected
        )
    }
}
