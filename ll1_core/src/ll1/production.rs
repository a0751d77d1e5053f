use std::fmt;

use crate::Symbol;

/// Right-hand side of one alternative
///
/// A production is either the lone `Epsilon` symbol or a non-empty sequence of terminals and
/// nonterminals. `Production::new` normalizes any other input into one of these two shapes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        let symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|symbol| *symbol != Symbol::Epsilon && *symbol != Symbol::EndMarker)
            .collect();
        if symbols.is_empty() {
            Self::epsilon()
        } else {
            Self { symbols }
        }
    }

    pub fn epsilon() -> Self {
        Self {
            symbols: vec![Symbol::Epsilon],
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbols[0] == Symbol::Epsilon
    }

    /// The symbols as written, `[Epsilon]` for the empty production
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The symbols that are actually derived, empty for the empty production
    pub fn body(&self) -> &[Symbol] {
        if self.is_epsilon() {
            &self.symbols[..0]
        } else {
            &self.symbols[..]
        }
    }

    pub fn first_symbol(&self) -> Option<&Symbol> {
        self.body().first()
    }

    /// Whether the production begins with the nonterminal `name`
    pub fn is_left_recursive_in(&self, name: &str) -> bool {
        self.first_symbol().and_then(Symbol::as_nonterminal) == Some(name)
    }

    /// Append a symbol, turning the empty production into a one-symbol production
    pub fn followed_by(&self, symbol: Symbol) -> Self {
        let mut symbols = self.body().to_vec();
        symbols.push(symbol);
        Production::new(symbols)
    }
}

impl From<Vec<Symbol>> for Production {
    fn from(symbols: Vec<Symbol>) -> Self {
        Production::new(symbols)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let strings: Vec<String> = self.symbols.iter().map(|s| format!("{}", s)).collect();
        write!(f, "{}", strings.join(" "))
    }
}
