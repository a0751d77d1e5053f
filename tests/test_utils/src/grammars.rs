use std::collections::BTreeSet;

use ll1_core::{parse, Analysis, AnalysisOptions, Grammar, Symbol, END_MARKER, EPSILON};

/// Left-recursive arithmetic expressions
pub const EXPRESSIONS: &str = "\
E -> E + T | T
T -> T * F | F
F -> ( E ) | id
";

/// The smallest left-recursive expression grammar
pub const SUMS: &str = "\
E -> E + T | T
T -> id
";

/// If-then-else with an optional else branch; not LL(1) after factoring
pub const DANGLING_ELSE: &str = "\
S -> i E t S | i E t S e S | a
E -> b
";

/// Statements whose alternatives share prefixes of different lengths
pub const STATEMENTS: &str = "\
Stmt -> id := Expr ; | id ( Args ) ; | id ( ) ; | return Expr ; | return ;
Args -> Expr | Expr , Args
Expr -> num | id
";

/// Declarations with nullable parts, written with the `eps` token
pub const DECLARATIONS: &str = "\
Decl -> Mods Type id Init ;
Mods -> Mod Mods | eps
Mod -> static | const
Type -> int | float
Init -> = num | eps
";

/// Indirect left recursion, which is not removed
pub const INDIRECT: &str = "\
A -> B a | c
B -> A b | d
";

/// Every fixture, by name
pub const ALL: &[(&str, &str)] = &[
    ("expressions", EXPRESSIONS),
    ("sums", SUMS),
    ("dangling_else", DANGLING_ELSE),
    ("statements", STATEMENTS),
    ("declarations", DECLARATIONS),
    ("indirect", INDIRECT),
];

/// Run the whole pipeline with default settings, accepting `eps` for the empty string
pub fn analyze(text: &str) -> Analysis {
    let read = ll1_core::GrammarReader::new()
        .epsilon("eps")
        .read(text)
        .expect("fixture grammar should be readable");
    Analysis::from_read(read, &AnalysisOptions::default()).expect("analysis should converge")
}

pub fn read(text: &str) -> Grammar {
    parse(text).expect("fixture grammar should be readable").grammar
}

/// Alternatives of a nonterminal, written out
pub fn alternatives(grammar: &Grammar, nonterminal: &str) -> Vec<String> {
    grammar
        .alternatives(nonterminal)
        .iter()
        .map(|production| production.to_string())
        .collect()
}

/// Set of symbols from their written names; `ε` and `$` stand for `Epsilon` and `EndMarker`
pub fn symbols(names: &[&str]) -> BTreeSet<Symbol> {
    names
        .iter()
        .map(|&name| match name {
            EPSILON => Symbol::Epsilon,
            END_MARKER => Symbol::EndMarker,
            terminal => Symbol::terminal(terminal),
        })
        .collect()
}
