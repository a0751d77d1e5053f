use std::error::Error;
use std::fs;
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

mod load;
mod sets;
mod table;

fn main() {
    if let Err(err) = cli() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn cli() -> Result<(), Box<dyn Error>> {
    let matches = App::new("ll1")
        .about("Left factors a grammar, removes its left recursion and builds its LL(1) table")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            SubCommand::with_name("grammar")
                .args(&common_args())
                .arg(
                    Arg::with_name("factored")
                        .long("factored")
                        .help("Stop after left factoring, keeping left recursion"),
                ).arg(output_arg("Write the grammar to a file"))
                .about("Prints the grammar after left factoring and left recursion removal"),
        ).subcommand(
            SubCommand::with_name("sets")
                .args(&common_args())
                .arg(output_arg("Write the FIRST and FOLLOW sets to a file"))
                .about("Prints the FIRST and FOLLOW sets of the transformed grammar"),
        ).subcommand(
            SubCommand::with_name("table")
                .args(&common_args())
                .arg(
                    Arg::with_name("csv")
                        .long("csv")
                        .takes_value(true)
                        .help("Write the parsing table to a specified CSV file"),
                ).arg(
                    Arg::with_name("sort-terminals")
                        .long("sort-terminals")
                        .help("Order the columns by terminal name instead of first appearance"),
                ).arg(
                    Arg::with_name("deny-conflicts")
                        .long("deny-conflicts")
                        .help("Exit with an error if the grammar is not LL(1)"),
                ).about("Prints the LL(1) parsing table and its conflicts"),
        ).setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    if let Some(grammar_opts) = matches.subcommand_matches("grammar") {
        init_logging(grammar_opts)?;
        let analysis = load::analyze(grammar_opts)?;
        let grammar = if grammar_opts.is_present("factored") {
            &analysis.factored
        } else {
            analysis.grammar()
        };
        emit(&grammar.to_string(), grammar_opts.value_of("output"))?;
    }

    if let Some(sets_opts) = matches.subcommand_matches("sets") {
        init_logging(sets_opts)?;
        let analysis = load::analyze(sets_opts)?;
        emit(&sets::render_sets(&analysis), sets_opts.value_of("output"))?;
    }

    if let Some(table_opts) = matches.subcommand_matches("table") {
        init_logging(table_opts)?;
        let analysis = load::analyze(table_opts)?;
        let columns = table::column_order(&analysis.table, table_opts.is_present("sort-terminals"));

        if let Some(csv_filename) = table_opts.value_of("csv") {
            table::write_table_csv(&analysis.table, &columns, csv_filename)?;
        } else {
            table::print_table(&analysis.table, &columns);
        }

        if table_opts.is_present("deny-conflicts") {
            table::check_conflicts(&analysis.table)?;
        }
    }

    Ok(())
}

/// Arguments understood by every subcommand
fn common_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("file")
            .help("Grammar file with one `A -> x y | z` rule per line")
            .required(true),
        Arg::with_name("epsilon")
            .long("epsilon")
            .takes_value(true)
            .help("Token standing for the empty string, in addition to ε"),
        Arg::with_name("start")
            .long("start")
            .takes_value(true)
            .help("Start symbol, instead of the first left-hand side"),
        Arg::with_name("max-iterations")
            .long("max-iterations")
            .takes_value(true)
            .help("Bound on the rounds of every fixpoint computation"),
        Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("Log more details, may be repeated"),
        Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .help("Do not log anything, not even warnings"),
    ]
}

fn output_arg<'a, 'b>(help: &'b str) -> Arg<'a, 'b> {
    Arg::with_name("output")
        .long("output")
        .short("o")
        .takes_value(true)
        .help(help)
}

fn init_logging(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    // Warnings are shown by default, each -v adds a level
    let verbosity = 1 + matches.occurrences_of("verbose") as usize;
    stderrlog::new()
        .verbosity(verbosity)
        .quiet(matches.is_present("quiet"))
        .init()
        .map_err(|err| format!("failed to set up logging: {}", err))?;
    Ok(())
}

/// Print `text`, or write it to `output` when given
fn emit(text: &str, output: Option<&str>) -> Result<(), Box<dyn Error>> {
    match output {
        Some(filename) => {
            fs::write(filename, text)?;
            log::info!("wrote {}", filename);
        }
        None => println!("{}", text),
    }
    Ok(())
}
