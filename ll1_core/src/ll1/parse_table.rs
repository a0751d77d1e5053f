use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::Conflict;
use crate::{FirstSets, FollowSets, Grammar, Production, Symbol};

/// LL(1) parsing table
///
/// Maps a nonterminal and a lookahead (a terminal or `EndMarker`) to the alternative a
/// predictive parser has to expand. When two alternatives claim the same cell the first one
/// stays in the table and the clash is recorded in `conflicts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    pub grammar: Grammar,
    entries: BTreeMap<String, BTreeMap<Symbol, Production>>,
    pub conflicts: Vec<Conflict>,
}

impl ParseTable {
    /// Fill the table from the FIRST and FOLLOW sets of `grammar`
    ///
    /// For every `A -> α`, the cells `[A, t]` for `t` in `FIRST(α)` get `α`. When `α` is
    /// nullable, so do the cells `[A, t]` for `t` in `FOLLOW(A)`.
    pub fn generate(grammar: Grammar, first_sets: &FirstSets, follow_sets: &FollowSets) -> Self {
        let mut generator = ParseTableGenerator {
            entries: BTreeMap::new(),
            conflicts: Vec::new(),
        };

        for rule in grammar.rules() {
            let follow = follow_sets.of_nonterminal(&rule.lhs);
            for alternative in rule.alternatives.iter() {
                let first = first_sets.of_sequence(alternative.body());
                for lookahead in first.iter().filter(|s| **s != Symbol::Epsilon) {
                    generator.insert(&rule.lhs, lookahead, alternative);
                }
                if first.contains(&Symbol::Epsilon) {
                    for lookahead in follow.iter() {
                        generator.insert(&rule.lhs, lookahead, alternative);
                    }
                }
            }
        }

        ParseTable {
            grammar,
            entries: generator.entries,
            conflicts: generator.conflicts,
        }
    }

    /// The alternative to expand for `nonterminal` on `lookahead`
    pub fn get(&self, nonterminal: &str, lookahead: &Symbol) -> Option<&Production> {
        self.entries
            .get(nonterminal)
            .and_then(|row| row.get(lookahead))
    }

    /// Whether no cell was claimed twice
    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Table columns: terminals in order of appearance in the grammar, then `EndMarker`
    pub fn lookaheads(&self) -> Vec<Symbol> {
        let mut columns: Vec<Symbol> = self
            .grammar
            .terminals()
            .into_iter()
            .map(Symbol::Terminal)
            .collect();
        columns.push(Symbol::EndMarker);
        columns
    }

    /// All filled cells, row by row
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Symbol, &Production)> {
        self.entries.iter().flat_map(|(nonterminal, row)| {
            row.iter()
                .map(move |(lookahead, production)| (nonterminal.as_str(), lookahead, production))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct ParseTableGenerator {
    entries: BTreeMap<String, BTreeMap<Symbol, Production>>,
    conflicts: Vec<Conflict>,
}

impl ParseTableGenerator {
    fn insert(&mut self, nonterminal: &str, lookahead: &Symbol, production: &Production) {
        let row = self
            .entries
            .entry(nonterminal.to_owned())
            .or_insert_with(BTreeMap::new);
        match row.entry(lookahead.clone()) {
            Entry::Vacant(cell) => {
                cell.insert(production.clone());
            }
            Entry::Occupied(cell) => {
                if cell.get() != production {
                    let conflict = Conflict {
                        nonterminal: nonterminal.to_owned(),
                        lookahead: lookahead.clone(),
                        existing: cell.get().clone(),
                        rejected: production.clone(),
                    };
                    log::warn!("{}", conflict);
                    self.conflicts.push(conflict);
                }
            }
        }
    }
}
