use crate::error::{AnalysisError, Conflict, Diagnostic};
use crate::{
    eliminate_left_recursion, left_factor, FirstSets, FollowSets, Grammar, ParseTable,
    ReadGrammar,
};

/// Settings shared by all fixpoint loops of an analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Fixed bound on the rounds of every fixpoint loop. Defaults to
    /// `Grammar::iteration_limit` of the grammar each loop runs on.
    pub iteration_limit: Option<usize>,
}

impl AnalysisOptions {
    fn limit_for(&self, grammar: &Grammar) -> usize {
        self.iteration_limit
            .unwrap_or_else(|| grammar.iteration_limit())
    }
}

/// Every artifact of the LL(1) pipeline
///
/// The grammar is left factored, then stripped of immediate left recursion; FIRST, FOLLOW and
/// the parsing table are derived from that final grammar. The intermediate grammars are kept
/// so they can be inspected.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub original: Grammar,
    pub factored: Grammar,
    pub first_sets: FirstSets,
    pub follow_sets: FollowSets,
    pub table: ParseTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn run(grammar: Grammar, options: &AnalysisOptions) -> Result<Self, AnalysisError> {
        Self::run_with_diagnostics(grammar, Vec::new(), options)
    }

    /// Run on a grammar fresh from the reader, keeping the reader's diagnostics
    pub fn from_read(read: ReadGrammar, options: &AnalysisOptions) -> Result<Self, AnalysisError> {
        Self::run_with_diagnostics(read.grammar, read.diagnostics, options)
    }

    fn run_with_diagnostics(
        grammar: Grammar,
        mut diagnostics: Vec<Diagnostic>,
        options: &AnalysisOptions,
    ) -> Result<Self, AnalysisError> {
        let original = grammar.clone();

        log::info!("left factoring {} nonterminals", grammar.rules().len());
        let limit = options.limit_for(&grammar);
        let factored = left_factor(grammar, limit)?;

        log::info!("removing left recursion");
        let limit = options.limit_for(&factored);
        let grammar = eliminate_left_recursion(factored.clone(), limit, &mut diagnostics)?;

        log::info!("computing FIRST and FOLLOW sets");
        let limit = options.limit_for(&grammar);
        let first_sets = FirstSets::compute(&grammar, limit)?;
        let follow_sets = FollowSets::compute(&grammar, &first_sets, limit)?;

        log::info!("building the parsing table");
        let table = ParseTable::generate(grammar, &first_sets, &follow_sets);
        if !table.is_ll1() {
            log::warn!(
                "grammar is not LL(1): {} conflicting cells",
                table.conflicts.len()
            );
        }

        Ok(Self {
            original,
            factored,
            first_sets,
            follow_sets,
            table,
            diagnostics,
        })
    }

    /// The final, transformed grammar
    pub fn grammar(&self) -> &Grammar {
        &self.table.grammar
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.table.conflicts
    }
}
