#![cfg(test)]

use std::collections::BTreeSet;

use ll1_core::{
    has_common_prefix, is_left_recursive, left_factor, FirstSets, FollowSets, ParseTable, Symbol,
};
use matches::assert_matches;
use test_utils::{alternatives, analyze, read, symbols, ALL};

fn cell(table: &ParseTable, nonterminal: &str, lookahead: &str) -> Option<String> {
    let lookahead = match lookahead {
        "$" => Symbol::EndMarker,
        terminal => Symbol::terminal(terminal),
    };
    table.get(nonterminal, &lookahead).map(|p| p.to_string())
}

#[test]
fn test_sums() {
    let analysis = analyze(test_utils::SUMS);
    let grammar = analysis.grammar();
    assert_eq!(alternatives(grammar, "E"), vec!["T E'"]);
    assert_eq!(alternatives(grammar, "E'"), vec!["+ T E'", "ε"]);
    assert_eq!(alternatives(grammar, "T"), vec!["id"]);

    let first = &analysis.first_sets;
    assert_eq!(first.of_nonterminal("T"), symbols(&["id"]));
    assert_eq!(first.of_nonterminal("E"), symbols(&["id"]));

    let follow = &analysis.follow_sets;
    assert_eq!(follow.of_nonterminal("E"), symbols(&["$"]));
    assert_eq!(follow.of_nonterminal("E'"), symbols(&["$"]));
    assert_eq!(follow.of_nonterminal("T"), symbols(&["+", "$"]));

    let table = &analysis.table;
    assert_eq!(table.len(), 4);
    assert_eq!(cell(table, "E", "id").unwrap(), "T E'");
    assert_eq!(cell(table, "E'", "+").unwrap(), "+ T E'");
    assert_eq!(cell(table, "E'", "$").unwrap(), "ε");
    assert_eq!(cell(table, "T", "id").unwrap(), "id");
    assert!(table.conflicts.is_empty());
}

#[test]
fn test_expressions() {
    let analysis = analyze(test_utils::EXPRESSIONS);
    assert_eq!(
        analysis.grammar().to_string(),
        "E -> T E'\n\
         E' -> + T E' | ε\n\
         T -> F T'\n\
         T' -> * F T' | ε\n\
         F -> ( E ) | id\n"
    );

    let follow = &analysis.follow_sets;
    assert_eq!(follow.of_nonterminal("E"), symbols(&[")", "$"]));
    assert_eq!(follow.of_nonterminal("T'"), symbols(&["+", ")", "$"]));
    assert_eq!(follow.of_nonterminal("F"), symbols(&["*", "+", ")", "$"]));

    let table = &analysis.table;
    assert!(table.is_ll1());
    assert_eq!(table.len(), 13);
    assert_eq!(cell(table, "E", "(").unwrap(), "T E'");
    assert_eq!(cell(table, "E'", ")").unwrap(), "ε");
    assert_eq!(cell(table, "T'", "+").unwrap(), "ε");
    assert_eq!(cell(table, "T'", "*").unwrap(), "* F T'");
    assert_eq!(cell(table, "F", "(").unwrap(), "( E )");
    assert_eq!(cell(table, "F", "+"), None);
}

#[test]
fn test_dangling_else() {
    let analysis = analyze(test_utils::DANGLING_ELSE);
    let grammar = analysis.grammar();
    assert_eq!(alternatives(grammar, "S"), vec!["i E t S S1", "a"]);
    assert_eq!(alternatives(grammar, "S1"), vec!["ε", "e S"]);

    let conflicts = analysis.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].nonterminal, "S1");
    assert_eq!(conflicts[0].lookahead, Symbol::terminal("e"));
    assert!(conflicts[0].existing.is_epsilon());
    assert_eq!(conflicts[0].rejected.to_string(), "e S");

    // The table is still complete
    assert_eq!(cell(&analysis.table, "S1", "e").unwrap(), "ε");
    assert_eq!(cell(&analysis.table, "S1", "$").unwrap(), "ε");
    assert_eq!(cell(&analysis.table, "S", "i").unwrap(), "i E t S S1");
}

#[test]
fn test_statements() {
    let analysis = analyze(test_utils::STATEMENTS);
    let factored = &analysis.factored;
    assert_eq!(alternatives(factored, "Stmt"), vec!["id Stmt1", "return Stmt2"]);
    assert_eq!(alternatives(factored, "Stmt1"), vec![":= Expr ;", "( Stmt3"]);
    assert_eq!(alternatives(factored, "Stmt2"), vec!["Expr ;", ";"]);
    assert_eq!(alternatives(factored, "Stmt3"), vec!["Args ) ;", ") ;"]);
    assert_eq!(alternatives(factored, "Args"), vec!["Expr Args1"]);
    assert_eq!(alternatives(factored, "Args1"), vec!["ε", ", Args"]);
    assert!(analysis.table.is_ll1());
    assert_eq!(cell(&analysis.table, "Args1", ")").unwrap(), "ε");
    assert_eq!(cell(&analysis.table, "Stmt3", "num").unwrap(), "Args ) ;");
}

#[test]
fn test_declarations() {
    let analysis = analyze(test_utils::DECLARATIONS);
    let first = &analysis.first_sets;
    assert_eq!(
        first.of_nonterminal("Decl"),
        symbols(&["static", "const", "int", "float"])
    );
    assert!(first.is_nullable("Mods"));
    assert!(first.is_nullable("Init"));
    assert!(!first.is_nullable("Decl"));
    assert_eq!(analysis.follow_sets.of_nonterminal("Mods"), symbols(&["int", "float"]));
    assert_eq!(analysis.follow_sets.of_nonterminal("Init"), symbols(&[";"]));

    let table = &analysis.table;
    assert!(table.is_ll1());
    assert_eq!(cell(table, "Mods", "int").unwrap(), "ε");
    assert_eq!(cell(table, "Mods", "const").unwrap(), "Mod Mods");
    assert_eq!(cell(table, "Init", ";").unwrap(), "ε");
    assert_eq!(cell(table, "Init", "=").unwrap(), "= num");
}

#[test]
fn test_indirect_left_recursion_is_reported_as_conflicts() {
    let analysis = analyze(test_utils::INDIRECT);
    assert_eq!(analysis.grammar(), &analysis.original);
    assert_eq!(analysis.first_sets.of_nonterminal("A"), symbols(&["c", "d"]));
    assert_eq!(analysis.conflicts().len(), 2);
    assert_matches!(
        analysis.conflicts()[0].lookahead,
        Symbol::Terminal(ref t) if t == "c"
    );
}

#[test]
fn test_no_shared_prefix_means_no_rewrite() {
    let grammar = read("A -> a x | b y");
    let limit = grammar.iteration_limit();
    assert_eq!(left_factor(grammar.clone(), limit).unwrap(), grammar);
}

#[test]
fn test_duplicate_alternatives() {
    let analysis = analyze("S -> a | a");
    assert_eq!(alternatives(analysis.grammar(), "S"), vec!["a"]);
    assert!(analysis.conflicts().is_empty());
}

#[test]
fn test_properties_of_every_fixture() {
    for (name, text) in ALL {
        let analysis = analyze(text);
        let grammar = analysis.grammar();

        for rule in analysis.factored.rules() {
            assert!(!has_common_prefix(rule), "{}: {} is not factored", name, rule.lhs);
        }
        for rule in grammar.rules() {
            assert!(!is_left_recursive(rule), "{}: {} is left recursive", name, rule.lhs);
            assert!(!has_common_prefix(rule), "{}: {} shares a prefix", name, rule.lhs);
        }

        for terminal in grammar.terminals() {
            let symbol = Symbol::terminal(terminal);
            let expected: BTreeSet<Symbol> = vec![symbol.clone()].into_iter().collect();
            assert_eq!(
                analysis.first_sets.get(&symbol),
                Some(&expected),
                "{}: FIRST({})",
                name,
                symbol
            );
        }

        let start_follow = analysis.follow_sets.of_nonterminal(grammar.start());
        assert!(start_follow.contains(&Symbol::EndMarker), "{}", name);
        for (nonterminal, set) in analysis.follow_sets.iter() {
            assert!(!set.contains(&Symbol::Epsilon), "{}: FOLLOW({})", name, nonterminal);
        }

        let limit = grammar.iteration_limit();
        let first = FirstSets::compute(grammar, limit).unwrap();
        let follow = FollowSets::compute(grammar, &first, limit).unwrap();
        assert_eq!(first, analysis.first_sets, "{}", name);
        assert_eq!(follow, analysis.follow_sets, "{}", name);

        let table = ParseTable::generate(grammar.clone(), &first, &follow);
        assert_eq!(table, analysis.table, "{}", name);
    }
}
