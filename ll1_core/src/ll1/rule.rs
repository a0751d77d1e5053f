use std::fmt;

use crate::Production;

/// All alternatives of one nonterminal, in source order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: String,
    pub alternatives: Vec<Production>,
}

impl Rule {
    pub fn new<S: Into<String>>(lhs: S) -> Self {
        Self {
            lhs: lhs.into(),
            alternatives: Vec::new(),
        }
    }

    /// Add an alternative unless an identical one is already present
    ///
    /// Returns whether the alternative was added.
    pub fn push(&mut self, production: Production) -> bool {
        if self.alternatives.contains(&production) {
            false
        } else {
            self.alternatives.push(production);
            true
        }
    }

    pub fn with_alternatives<S, I>(lhs: S, alternatives: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = Production>,
    {
        let mut rule = Rule::new(lhs);
        for production in alternatives {
            rule.push(production);
        }
        rule
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let alternatives: Vec<String> = self
            .alternatives
            .iter()
            .map(|alternative| format!("{}", alternative))
            .collect();
        write!(f, "{} -> {}", self.lhs, alternatives.join(" | "))
    }
}
