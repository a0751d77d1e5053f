use std::collections::HashSet;
use std::fmt;

use crate::error::GrammarError;
use crate::{Production, Rule, Symbol};

/// Smallest bound handed to the fixpoint loops
const MIN_ITERATION_LIMIT: usize = 64;

/// A context-free grammar
///
/// Rules are kept in the order their nonterminals were first defined, and every nonterminal
/// has exactly one `Rule`. Any `Symbol::Nonterminal` appearing on a right-hand side names one
/// of these rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Build a grammar, merging rules that share a left-hand side
    ///
    /// Right-hand side nonterminals without a rule of their own are demoted to terminals.
    pub fn new<S: Into<String>>(start: S, rules: Vec<Rule>) -> Result<Self, GrammarError> {
        let start = start.into();
        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut merged: Vec<Rule> = Vec::new();
        for rule in rules {
            match merged.iter_mut().find(|r| r.lhs == rule.lhs) {
                Some(existing) => {
                    for production in rule.alternatives {
                        existing.push(production);
                    }
                }
                None => merged.push(rule),
            }
        }

        if !merged.iter().any(|rule| rule.lhs == start) {
            return Err(GrammarError::UnknownStartSymbol(start));
        }

        let defined: HashSet<String> = merged.iter().map(|rule| rule.lhs.clone()).collect();
        let rules = merged
            .into_iter()
            .map(|rule| {
                let alternatives = rule
                    .alternatives
                    .into_iter()
                    .map(|production| demote_undefined(production, &defined));
                Rule::with_alternatives(rule.lhs, alternatives)
            })
            .collect();

        Ok(Self { start, rules })
    }

    /// Assemble a grammar from rules a transformation already keeps consistent
    pub(crate) fn from_parts(start: String, rules: Vec<Rule>) -> Self {
        debug_assert!(rules.iter().any(|rule| rule.lhs == start));
        Self { start, rules }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_parts(self) -> (String, Vec<Rule>) {
        (self.start, self.rules)
    }

    pub fn rule(&self, nonterminal: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.lhs == nonterminal)
    }

    /// Alternatives of `nonterminal`, empty when it has no rule
    pub fn alternatives(&self, nonterminal: &str) -> &[Production] {
        self.rule(nonterminal)
            .map_or(&[][..], |rule| &rule.alternatives[..])
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    /// Nonterminals in definition order
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.lhs.as_str())
    }

    /// Every `(lhs, production)` pair, rule by rule
    pub fn productions(&self) -> impl Iterator<Item = (&str, &Production)> {
        self.rules.iter().flat_map(|rule| {
            rule.alternatives
                .iter()
                .map(move |production| (rule.lhs.as_str(), production))
        })
    }

    /// Terminal names in order of first appearance
    pub fn terminals(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut terminals = Vec::new();
        for (_, production) in self.productions() {
            for symbol in production.body() {
                if let Symbol::Terminal(t) = symbol {
                    if seen.insert(t.as_str()) {
                        terminals.push(t.clone());
                    }
                }
            }
        }
        terminals
    }

    pub fn alternative_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.alternatives.len()).sum()
    }

    /// Number of symbols written on all right-hand sides, `ε` included
    pub fn symbol_count(&self) -> usize {
        self.productions()
            .map(|(_, production)| production.symbols().len())
            .sum()
    }

    /// Default bound on the number of changing rounds a fixpoint loop may take on this grammar
    ///
    /// The set computations grow sets over the vocabulary, so they need at most a quadratic
    /// number of rounds in its size. Left factoring strips one shared symbol per round from
    /// some group of alternatives, so its rounds are bounded by the symbols written in the
    /// grammar instead.
    pub fn iteration_limit(&self) -> usize {
        let vocabulary = self.terminals().len() + self.rules.len() + 2;
        let written = self.symbol_count() + self.alternative_count();
        (vocabulary * vocabulary)
            .max(written)
            .max(MIN_ITERATION_LIMIT)
    }
}

fn demote_undefined(production: Production, defined: &HashSet<String>) -> Production {
    let symbols = production
        .symbols()
        .iter()
        .map(|symbol| match symbol {
            Symbol::Nonterminal(n) if !defined.contains(n) => Symbol::Terminal(n.clone()),
            other => other.clone(),
        })
        .collect();
    Production::new(symbols)
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for rule in self.rules.iter() {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
