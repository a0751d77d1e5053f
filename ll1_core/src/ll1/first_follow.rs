use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AnalysisError, Stage};
use crate::{Grammar, Symbol};

/// FIRST sets of every terminal and nonterminal of a grammar
///
/// `FIRST(X)` holds the terminals that can begin a string derived from `X`, plus `Epsilon` when
/// `X` can derive the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

/// FOLLOW sets of every nonterminal of a grammar
///
/// `FOLLOW(A)` holds the terminals that can appear right after `A` in a sentential form, plus
/// `EndMarker` when `A` can end one. It never holds `Epsilon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    sets: BTreeMap<String, BTreeSet<Symbol>>,
}

impl FirstSets {
    /// Compute the FIRST sets as a fixpoint over all productions
    ///
    /// Every round applies each production once. Sets only grow and are bounded by the
    /// terminals of the grammar, so the loop ends; `limit` bounds the number of rounds that
    /// still changed something.
    pub fn compute(grammar: &Grammar, limit: usize) -> Result<Self, AnalysisError> {
        let mut sets = BTreeMap::new();
        for terminal in grammar.terminals() {
            let symbol = Symbol::Terminal(terminal);
            let mut set = BTreeSet::new();
            set.insert(symbol.clone());
            sets.insert(symbol, set);
        }
        for nonterminal in grammar.nonterminals() {
            sets.insert(Symbol::nonterminal(nonterminal), BTreeSet::new());
        }
        let mut first_sets = FirstSets { sets };

        let mut rounds = 0;
        loop {
            let mut changed = false;
            for (lhs, production) in grammar.productions() {
                let addition = first_sets.of_sequence(production.body());
                let key = Symbol::nonterminal(lhs);
                if let Some(set) = first_sets.sets.get_mut(&key) {
                    for symbol in addition {
                        changed |= set.insert(symbol);
                    }
                }
            }
            if !changed {
                break;
            }
            rounds += 1;
            log::debug!("FIRST sets grew in round {}", rounds);
            if rounds > limit {
                return Err(AnalysisError::NonConvergence {
                    stage: Stage::First,
                    limit,
                });
            }
        }

        Ok(first_sets)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&BTreeSet<Symbol>> {
        self.sets.get(symbol)
    }

    /// FIRST set of a nonterminal, empty if the grammar has no such nonterminal
    pub fn of_nonterminal(&self, name: &str) -> BTreeSet<Symbol> {
        self.sets
            .get(&Symbol::nonterminal(name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_nullable(&self, name: &str) -> bool {
        self.sets
            .get(&Symbol::nonterminal(name))
            .map_or(false, |set| set.contains(&Symbol::Epsilon))
    }

    /// FIRST set of a symbol sequence `X1 X2 ... Xk`
    ///
    /// Collects `FIRST(X1)` without `Epsilon`, moves on to `X2` while the previous symbols are
    /// nullable, and adds `Epsilon` only if every symbol is. The empty sequence yields `{Epsilon}`.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<Symbol> {
        let mut result = BTreeSet::new();
        for symbol in symbols {
            match symbol {
                Symbol::Epsilon => continue,
                Symbol::Terminal(_) | Symbol::EndMarker => {
                    result.insert(symbol.clone());
                    return result;
                }
                Symbol::Nonterminal(_) => {
                    let set = match self.sets.get(symbol) {
                        Some(set) => set,
                        None => return result,
                    };
                    result.extend(set.iter().filter(|s| **s != Symbol::Epsilon).cloned());
                    if !set.contains(&Symbol::Epsilon) {
                        return result;
                    }
                }
            }
        }
        result.insert(Symbol::Epsilon);
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BTreeSet<Symbol>)> {
        self.sets.iter()
    }
}

impl FollowSets {
    /// Compute the FOLLOW sets as a fixpoint over all productions
    ///
    /// `FOLLOW(start)` is seeded with `EndMarker`. For every `A -> ... B γ`, `FIRST(γ)` without
    /// `Epsilon` is added to `FOLLOW(B)`, and `FOLLOW(A)` as well when `γ` is nullable.
    pub fn compute(
        grammar: &Grammar,
        first_sets: &FirstSets,
        limit: usize,
    ) -> Result<Self, AnalysisError> {
        let mut sets: BTreeMap<String, BTreeSet<Symbol>> = grammar
            .nonterminals()
            .map(|n| (n.to_owned(), BTreeSet::new()))
            .collect();
        if let Some(set) = sets.get_mut(grammar.start()) {
            set.insert(Symbol::EndMarker);
        }

        let mut rounds = 0;
        loop {
            let mut changed = false;
            for (lhs, production) in grammar.productions() {
                let body = production.body();
                for (idx, symbol) in body.iter().enumerate() {
                    let name = match symbol {
                        Symbol::Nonterminal(name) => name,
                        _ => continue,
                    };
                    let rest = first_sets.of_sequence(&body[idx + 1..]);
                    let mut addition: BTreeSet<Symbol> = rest
                        .iter()
                        .filter(|s| **s != Symbol::Epsilon)
                        .cloned()
                        .collect();
                    if rest.contains(&Symbol::Epsilon) {
                        if let Some(follow_lhs) = sets.get(lhs) {
                            addition.extend(follow_lhs.iter().cloned());
                        }
                    }
                    if let Some(set) = sets.get_mut(name) {
                        for symbol in addition {
                            changed |= set.insert(symbol);
                        }
                    }
                }
            }
            if !changed {
                break;
            }
            rounds += 1;
            log::debug!("FOLLOW sets grew in round {}", rounds);
            if rounds > limit {
                return Err(AnalysisError::NonConvergence {
                    stage: Stage::Follow,
                    limit,
                });
            }
        }

        Ok(FollowSets { sets })
    }

    /// FOLLOW set of a nonterminal, empty if the grammar has no such nonterminal
    pub fn of_nonterminal(&self, name: &str) -> BTreeSet<Symbol> {
        self.sets.get(name).cloned().unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<Symbol>> {
        self.sets.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<Symbol>)> {
        self.sets.iter()
    }
}
