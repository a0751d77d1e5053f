use std::fmt;

/// Text used when writing the empty string
pub const EPSILON: &str = "ε";

/// Text used when writing the end-of-input sentinel
pub const END_MARKER: &str = "$";

/// A grammar symbol
///
/// Whether a name is a terminal or a nonterminal is decided once, when the grammar is read:
/// every name that appears on the left-hand side of some line is a nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Epsilon,
    EndMarker,
}

impl Symbol {
    pub fn terminal<S: Into<String>>(name: S) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn nonterminal<S: Into<String>>(name: S) -> Self {
        Symbol::Nonterminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Symbol::Terminal(_) => true,
            _ => false,
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        match self {
            Symbol::Nonterminal(_) => true,
            _ => false,
        }
    }

    /// Whether this symbol can label a column of the parsing table
    pub fn is_lookahead(&self) -> bool {
        match self {
            Symbol::Terminal(_) | Symbol::EndMarker => true,
            _ => false,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
            Symbol::EndMarker => write!(f, "{}", END_MARKER),
        }
    }
}
