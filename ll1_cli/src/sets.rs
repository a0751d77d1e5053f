use std::collections::BTreeSet;

use ll1_core::{Analysis, Symbol};

/// FIRST and FOLLOW listings, one `FIRST(X) = { a b }` line per nonterminal
pub fn render_sets(analysis: &Analysis) -> String {
    let grammar = analysis.grammar();
    let mut lines = Vec::new();

    lines.push("FIRST sets:".to_owned());
    for nonterminal in grammar.nonterminals() {
        let set = analysis.first_sets.of_nonterminal(nonterminal);
        lines.push(format!("FIRST({}) = {}", nonterminal, render_set(&set)));
    }

    lines.push(String::new());
    lines.push("FOLLOW sets:".to_owned());
    for nonterminal in grammar.nonterminals() {
        let set = analysis.follow_sets.of_nonterminal(nonterminal);
        lines.push(format!("FOLLOW({}) = {}", nonterminal, render_set(&set)));
    }

    lines.join("\n")
}

fn render_set(set: &BTreeSet<Symbol>) -> String {
    let mut result = "{ ".to_owned();
    for symbol in set.iter() {
        result.push_str(&format!("{} ", symbol));
    }
    result.push('}');
    result
}
