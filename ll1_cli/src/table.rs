use std::error::Error;
use std::fmt;
use std::fs::File;

use prettytable as pt;
use prettytable::cell;
use prettytable::row;

use ll1_core::{ParseTable, Symbol};

/// Marker for cells without an entry
const EMPTY_CELL: &str = "-";

pub fn print_table(parse_table: &ParseTable, columns: &[Symbol]) {
    let pretty_table = generate_pretty_table(parse_table, columns);
    println!("{}", pretty_table);
    print_conflicts(parse_table);
}

pub fn write_table_csv(
    parse_table: &ParseTable,
    columns: &[Symbol],
    csv_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let pretty_table = generate_pretty_table(parse_table, columns);
    let csv_file = File::create(csv_filename)?;
    pretty_table.to_csv(csv_file)?;
    log::info!("wrote parsing table to {}", csv_filename);
    print_conflicts(parse_table);
    Ok(())
}

/// Columns of the table: terminals in grammar order, or sorted by name, then `$`
pub fn column_order(parse_table: &ParseTable, sort_terminals: bool) -> Vec<Symbol> {
    let mut columns = parse_table.lookaheads();
    if sort_terminals {
        columns.sort();
    }
    columns
}

/// Fail when the grammar is not LL(1)
pub fn check_conflicts(parse_table: &ParseTable) -> Result<(), TableError> {
    if parse_table.is_ll1() {
        Ok(())
    } else {
        Err(TableError::Conflicts(parse_table.conflicts.len()))
    }
}

fn print_conflicts(parse_table: &ParseTable) {
    if !parse_table.conflicts.is_empty() {
        println!("Conflicts:");
    }
    for conflict in parse_table.conflicts.iter() {
        println!("{}", conflict);
    }
}

fn generate_pretty_table(parse_table: &ParseTable, columns: &[Symbol]) -> pt::Table {
    let mut table = pt::Table::new();

    let mut title_row = row!["Nonterminal"];
    for column in columns.iter().map(|c| format!("{}", c)) {
        title_row.add_cell(cell!(column));
    }
    table.add_row(title_row);

    for nonterminal in parse_table.grammar.nonterminals() {
        let mut row = row![nonterminal];
        for column in columns.iter() {
            row.add_cell(cell![parse_table
                .get(nonterminal, column)
                .map_or(EMPTY_CELL.to_owned(), |p| format!("{}", p))]);
        }
        table.add_row(row);
    }

    table
}

#[derive(Debug)]
pub enum TableError {
    Conflicts(usize),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            TableError::Conflicts(count) => write!(
                f,
                "Grammar is not LL(1): found {} conflicting table cells",
                count
            ),
        }
    }
}

impl Error for TableError {}
