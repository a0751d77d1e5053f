use std::error::Error;
use std::fs::File;
use std::io::Read;

use clap::ArgMatches;
use ll1_core::{Analysis, AnalysisOptions, GrammarReader};

/// Read a grammar file and run the whole analysis on it
pub fn analyze_file(
    filename: &str,
    reader: &GrammarReader,
    options: &AnalysisOptions,
) -> Result<Analysis, Box<dyn Error>> {
    let content = read_grammar_file(filename)?;
    log::info!("reading grammar from {}", filename);
    let read = reader.read(&content)?;
    let analysis = Analysis::from_read(read, options)?;
    Ok(analysis)
}

/// Run the analysis configured by the options shared by every subcommand
pub fn analyze(matches: &ArgMatches) -> Result<Analysis, Box<dyn Error>> {
    let filename = matches.value_of("file").unwrap_or_default();

    let mut reader = GrammarReader::new();
    if let Some(epsilon) = matches.value_of("epsilon") {
        reader = reader.epsilon(epsilon);
    }
    if let Some(start) = matches.value_of("start") {
        reader = reader.start(start);
    }

    let iteration_limit = match matches.value_of("max-iterations") {
        Some(value) => Some(parse_iteration_limit(value)?),
        None => None,
    };
    let options = AnalysisOptions { iteration_limit };

    analyze_file(filename, &reader, &options)
}

fn parse_iteration_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|err| format!("invalid value `{}` for --max-iterations: {}", value, err))
}

fn read_grammar_file(filename: &str) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(filename)?;

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    Ok(content)
}

#[cfg(test)]
mod test {
    use super::*;
    use ll1_core::Diagnostic;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn grammar_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_analyze_file() {
        let file = grammar_file("E -> E + T | T\nT -> id\n");
        let analysis = analyze_file(
            file.path().to_str().unwrap(),
            &GrammarReader::new(),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.grammar().rules().len(), 3);
        assert!(analysis.conflicts().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_reported() {
        let file = grammar_file("S -> a S | eps\n\nnot a rule\n");
        let analysis = analyze_file(
            file.path().to_str().unwrap(),
            &GrammarReader::new().epsilon("eps"),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.diagnostics.len(), 1);
        match &analysis.diagnostics[0] {
            Diagnostic::MalformedLine { line, .. } => assert_eq!(*line, 3),
            other => panic!("unexpected diagnostic {:?}", other),
        }
        assert!(analysis.grammar().alternatives("S")[1].is_epsilon());
    }

    #[test]
    fn test_invalid_iteration_limit_names_the_flag() {
        assert_eq!(parse_iteration_limit("12"), Ok(12));
        let err = parse_iteration_limit("ten").unwrap_err();
        assert!(err.starts_with("invalid value `ten` for --max-iterations"));
    }

    #[test]
    fn test_missing_file() {
        let result = analyze_file(
            "/nonexistent/grammar.txt",
            &GrammarReader::new(),
            &AnalysisOptions::default(),
        );
        assert!(result.is_err());
    }
}
