use std::collections::HashSet;

use combine::parser::char::string;
use combine::{
    attempt, choice, eof, many, many1, not_followed_by, satisfy, sep_by1, skip_many, token,
};
use combine::{ParseError, Parser, Stream};

use crate::error::{Diagnostic, GrammarError};
use crate::{Grammar, Production, Rule, Symbol, EPSILON};

/// Reads grammars written as lines of `A -> x y | z`
///
/// Tokens are separated by whitespace. `→` is accepted in place of `->`, and several lines may
/// define the same nonterminal. Lines that do not have this shape are skipped and reported as
/// diagnostics.
#[derive(Debug, Clone)]
pub struct GrammarReader {
    epsilon: String,
    start: Option<String>,
}

/// Result of reading a grammar: the grammar plus everything that was skipped or guessed
#[derive(Debug, Clone)]
pub struct ReadGrammar {
    pub grammar: Grammar,
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for GrammarReader {
    fn default() -> Self {
        Self {
            epsilon: EPSILON.to_owned(),
            start: None,
        }
    }
}

/// Read a grammar with the default settings
pub fn parse(text: &str) -> Result<ReadGrammar, GrammarError> {
    GrammarReader::default().read(text)
}

impl GrammarReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token standing for the empty string, in addition to `ε`
    pub fn epsilon<S: Into<String>>(mut self, token: S) -> Self {
        self.epsilon = token.into();
        self
    }

    /// Use `name` as the start symbol instead of the first left-hand side
    pub fn start<S: Into<String>>(mut self, name: S) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn read(&self, text: &str) -> Result<ReadGrammar, GrammarError> {
        let mut diagnostics = Vec::new();
        let mut lines = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let reason = match production_line().parse(line) {
                Ok((ref raw, _)) if raw.alternatives.iter().all(Vec::is_empty) => "no alternatives",
                Ok((raw, _)) => {
                    lines.push(raw);
                    continue;
                }
                Err(_) => malformed_reason(line),
            };
            let diagnostic = Diagnostic::MalformedLine {
                line: idx + 1,
                content: line.to_owned(),
                reason: reason.to_owned(),
            };
            log::warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        let defined: HashSet<&str> = lines.iter().map(|raw| raw.lhs.as_str()).collect();
        let mut reported = HashSet::new();
        let mut rules: Vec<Rule> = Vec::new();

        for raw in lines.iter() {
            let mut rule = Rule::new(raw.lhs.clone());
            for alternative in raw.alternatives.iter() {
                if alternative.is_empty() {
                    log::debug!("skipping empty alternative of {}", raw.lhs);
                    continue;
                }
                let symbols = alternative
                    .iter()
                    .map(|name| {
                        if *name == self.epsilon || name == EPSILON {
                            Symbol::Epsilon
                        } else if defined.contains(name.as_str()) {
                            Symbol::Nonterminal(name.clone())
                        } else {
                            if looks_like_nonterminal(name) && reported.insert(name.clone()) {
                                let diagnostic = Diagnostic::UndeclaredSymbol {
                                    name: name.clone(),
                                    lhs: raw.lhs.clone(),
                                };
                                log::warn!("{}", diagnostic);
                                diagnostics.push(diagnostic);
                            }
                            Symbol::Terminal(name.clone())
                        }
                    })
                    .collect();
                let production = Production::new(symbols);
                if !rule.push(production) {
                    log::debug!("dropping duplicate alternative of {}", raw.lhs);
                }
            }
            rules.push(rule);
        }

        let start = match (&self.start, lines.first()) {
            (Some(start), _) => start.clone(),
            (None, Some(first)) => first.lhs.clone(),
            (None, None) => return Err(GrammarError::Empty),
        };

        let grammar = Grammar::new(start, rules)?;
        Ok(ReadGrammar {
            grammar,
            diagnostics,
        })
    }
}

fn looks_like_nonterminal(name: &str) -> bool {
    name.chars().next().map_or(false, |c| c.is_ascii_uppercase())
}

fn malformed_reason(line: &str) -> &'static str {
    let line = line.trim_start();
    if !line.contains("->") && !line.contains('→') {
        "missing `->` separator"
    } else if line.starts_with("->") || line.starts_with('→') {
        "missing left-hand side"
    } else {
        "expected `A -> x y | z`"
    }
}

/// One line as written, before names are classified
struct RawLine {
    lhs: String,
    alternatives: Vec<Vec<String>>,
}

fn production_line<I>() -> impl Parser<Input = I, Output = RawLine>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (
        blanks(),
        lhs(),
        blanks(),
        arrow(),
        blanks(),
        sep_by1::<Vec<Vec<String>>, _, _>(alternative(), (token('|'), blanks())),
        eof(),
    )
        .map(|(_, lhs, _, _, _, alternatives, _)| RawLine { lhs, alternatives })
}

fn blanks<I>() -> impl Parser<Input = I, Output = ()>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    skip_many(satisfy(char::is_whitespace))
}

fn lhs<I>() -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    // A `-` belongs to the name unless it starts the arrow
    many1::<String, _>(choice((
        satisfy(|c: char| !c.is_whitespace() && c != '|' && c != '-' && c != '→'),
        attempt(token('-').skip(not_followed_by(token('>')))),
    )))
}

fn arrow<I>() -> impl Parser<Input = I, Output = ()>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    choice((attempt(string("->")), string("→"))).map(|_| ())
}

fn alternative<I>() -> impl Parser<Input = I, Output = Vec<String>>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    many::<Vec<String>, _>(name().skip(blanks()))
}

fn name<I>() -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    many1::<String, _>(satisfy(|c: char| !c.is_whitespace() && c != '|'))
}
