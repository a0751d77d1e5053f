use std::collections::HashSet;

use crate::error::{AnalysisError, Diagnostic, Stage};
use crate::{Grammar, Production, Rule, Symbol};

/// Remove immediate left recursion
///
/// Each nonterminal `A -> A α1 | ... | A αn | β1 | ... | βm` is rewritten into
///
/// ```text
/// A  -> β1 A' | ... | βm A'
/// A' -> α1 A' | ... | αn A' | ε
/// ```
///
/// with `A'` inserted right after `A`. Alternatives `A -> A` derive nothing and are dropped.
///
/// Only immediate left recursion is removed. A grammar with indirect left recursion
/// (`A -> B α`, `B -> A β`) keeps it, and the FIRST/FOLLOW computation will still terminate on it,
/// but the resulting table will report conflicts.
pub fn eliminate_left_recursion(
    grammar: Grammar,
    limit: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Grammar, AnalysisError> {
    let mut used_names: HashSet<String> = grammar.terminals().into_iter().collect();
    used_names.extend(grammar.nonterminals().map(str::to_owned));
    let (start, mut rules) = grammar.into_parts();

    let mut passes = 0;
    loop {
        let (rewritten, changed) = eliminate_pass(rules, &mut used_names, diagnostics);
        rules = rewritten;
        if !changed {
            break;
        }
        passes += 1;
        if passes > limit {
            return Err(AnalysisError::NonConvergence {
                stage: Stage::LeftRecursion,
                limit,
            });
        }
    }
    log::debug!("left recursion removed after {} passes", passes);
    Ok(Grammar::from_parts(start, rules))
}

/// Whether some alternative of `rule` begins with `rule.lhs` itself
pub fn is_left_recursive(rule: &Rule) -> bool {
    rule.alternatives
        .iter()
        .any(|alternative| alternative.is_left_recursive_in(&rule.lhs))
}

fn eliminate_pass(
    rules: Vec<Rule>,
    used_names: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Vec<Rule>, bool) {
    let mut changed = false;
    let mut result = Vec::with_capacity(rules.len());

    for rule in rules {
        if !is_left_recursive(&rule) {
            result.push(rule);
            continue;
        }
        changed = true;

        let Rule { lhs, alternatives } = rule;
        let (recursive, base): (Vec<Production>, Vec<Production>) = alternatives
            .into_iter()
            .partition(|alternative| alternative.is_left_recursive_in(&lhs));

        let mut tails = Vec::new();
        for alternative in recursive {
            let tail = &alternative.body()[1..];
            if tail.is_empty() {
                let diagnostic = Diagnostic::CyclicAlternative {
                    nonterminal: lhs.clone(),
                };
                log::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            } else {
                tails.push(Production::new(tail.to_vec()));
            }
        }

        if tails.is_empty() {
            result.push(Rule::with_alternatives(lhs, base));
            continue;
        }

        if base.is_empty() {
            let diagnostic = Diagnostic::NoBaseAlternative {
                nonterminal: lhs.clone(),
            };
            log::warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        let tail_name = fresh_tail_name(&lhs, used_names);
        let tail_symbol = Symbol::Nonterminal(tail_name.clone());

        let head = Rule::with_alternatives(
            lhs,
            base.iter()
                .map(|beta| beta.followed_by(tail_symbol.clone())),
        );
        let tail = Rule::with_alternatives(
            tail_name,
            tails
                .iter()
                .map(|alpha| alpha.followed_by(tail_symbol.clone()))
                .chain(Some(Production::epsilon())),
        );
        log::debug!("removed left recursion: {} / {}", head, tail);
        result.push(head);
        result.push(tail);
    }

    (result, changed)
}

fn fresh_tail_name(lhs: &str, used_names: &mut HashSet<String>) -> String {
    let mut name = format!("{}'", lhs);
    while used_names.contains(&name) {
        name.push('\'');
    }
    used_names.insert(name.clone());
    name
}
