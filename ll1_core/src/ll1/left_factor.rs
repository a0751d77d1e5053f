use std::collections::{HashMap, HashSet};

use crate::error::{AnalysisError, Stage};
use crate::{Grammar, Production, Rule, Symbol};

/// Left factor a grammar
///
/// All alternatives of a nonterminal that begin with the same symbol are grouped in a single
/// step: they are replaced by their longest common prefix followed by a fresh nonterminal,
/// whose alternatives are the remaining suffixes (`ε` for an empty suffix). Suffixes may share
/// prefixes again, so rounds are repeated over the whole grammar until no nonterminal has two
/// alternatives sharing a first symbol.
///
/// Fresh nonterminals are named after the nonterminal they were split from: `A1`, `A2`, ...,
/// numbered per original nonterminal and skipping names already in use.
pub fn left_factor(grammar: Grammar, limit: usize) -> Result<Grammar, AnalysisError> {
    let mut factorizer = Factorizer::new(grammar);
    let mut rounds = 0;
    while factorizer.round() {
        rounds += 1;
        if rounds > limit {
            return Err(AnalysisError::NonConvergence {
                stage: Stage::LeftFactoring,
                limit,
            });
        }
    }
    log::debug!("left factoring settled after {} rounds", rounds);
    Ok(Grammar::from_parts(factorizer.start, factorizer.rules))
}

/// Whether two alternatives of `rule` begin with the same symbol
pub fn has_common_prefix(rule: &Rule) -> bool {
    let mut firsts = HashSet::new();
    rule.alternatives
        .iter()
        .filter_map(Production::first_symbol)
        .any(|symbol| !firsts.insert(symbol))
}

struct Factorizer {
    start: String,
    rules: Vec<Rule>,
    used_names: HashSet<String>,
    /// Original nonterminal each fresh nonterminal was split from
    origins: HashMap<String, String>,
    counters: HashMap<String, usize>,
}

impl Factorizer {
    fn new(grammar: Grammar) -> Self {
        let mut used_names: HashSet<String> = grammar.terminals().into_iter().collect();
        used_names.extend(grammar.nonterminals().map(str::to_owned));
        let (start, rules) = grammar.into_parts();
        Self {
            start,
            rules,
            used_names,
            origins: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    /// Factor every rule once. Returns whether anything changed.
    fn round(&mut self) -> bool {
        let mut changed = false;
        let mut fresh_rules = Vec::new();
        for idx in 0..self.rules.len() {
            if !has_common_prefix(&self.rules[idx]) {
                continue;
            }
            let lhs = self.rules[idx].lhs.clone();
            let alternatives = std::mem::replace(&mut self.rules[idx].alternatives, Vec::new());
            let mut factored = Rule::new(lhs.clone());

            let groups = group_by_first_symbol(&alternatives);
            let mut emitted = HashSet::new();
            for alternative in alternatives.iter() {
                let group = match alternative.first_symbol().and_then(|s| groups.get(s)) {
                    Some(group) if group.len() > 1 => group,
                    _ => {
                        factored.push(alternative.clone());
                        continue;
                    }
                };
                let first = &alternative.body()[0];
                if !emitted.insert(first.clone()) {
                    continue;
                }
                let members: Vec<&Production> = group.iter().map(|&i| &alternatives[i]).collect();
                let prefix = common_prefix(&members);
                let fresh = self.fresh_name(&lhs);

                let mut head = prefix.to_vec();
                head.push(Symbol::Nonterminal(fresh.clone()));
                factored.push(Production::new(head));

                let suffixes = members
                    .iter()
                    .map(|member| Production::new(member.body()[prefix.len()..].to_vec()));
                let fresh_rule = Rule::with_alternatives(fresh, suffixes);
                log::debug!("factored {} into {}", lhs, fresh_rule);
                fresh_rules.push(fresh_rule);
                changed = true;
            }
            self.rules[idx] = factored;
        }
        self.rules.extend(fresh_rules);
        changed
    }

    fn fresh_name(&mut self, lhs: &str) -> String {
        let origin = self
            .origins
            .get(lhs)
            .cloned()
            .unwrap_or_else(|| lhs.to_owned());
        let counter = self.counters.entry(origin.clone()).or_insert(0);
        let name = loop {
            *counter += 1;
            let candidate = format!("{}{}", origin, counter);
            if !self.used_names.contains(&candidate) {
                break candidate;
            }
        };
        self.used_names.insert(name.clone());
        self.origins.insert(name.clone(), origin);
        name
    }
}

/// Indices of the alternatives starting with each first symbol
fn group_by_first_symbol(alternatives: &[Production]) -> HashMap<&Symbol, Vec<usize>> {
    let mut groups: HashMap<&Symbol, Vec<usize>> = HashMap::new();
    for (idx, alternative) in alternatives.iter().enumerate() {
        if let Some(first) = alternative.first_symbol() {
            groups.entry(first).or_insert_with(Vec::new).push(idx);
        }
    }
    groups
}

fn common_prefix<'p>(members: &[&'p Production]) -> &'p [Symbol] {
    let first = members[0].body();
    let len = members[1..].iter().fold(first.len(), |len, member| {
        first
            .iter()
            .zip(member.body())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    });
    &first[..len]
}
