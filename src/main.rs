//! Cellgraph - headless spreadsheet recalculation from the command line

mod error;

use anyhow::{Context, Result};
use cellgraph_core::{Formula, Spreadsheet};
use clap::Parser;
use error::CliError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cellgraph", version)]
#[command(about = "Set spreadsheet cells, recalculate, and print values")]
#[command(after_help = "\
Examples:
  cellgraph -s A1=5 -s 'B1==A1*2' -p B1
  cellgraph budget.sprd -s A1=10 --save
  cellgraph budget.sprd -c 'A1 + B1 / 2'")]
struct Cli {
    /// Spreadsheet file to open (starts empty if it does not exist)
    file: Option<PathBuf>,

    /// Set a cell before anything else happens (repeatable, applied in order)
    #[arg(short, long = "set", value_name = "CELL=CONTENT")]
    set: Vec<String>,

    /// Evaluate a formula against the sheet and print its value
    #[arg(short, long, value_name = "FORMULA")]
    command: Option<String>,

    /// Print only these cells (repeatable); default is every non-empty cell
    #[arg(short, long, value_name = "CELL")]
    print: Vec<String>,

    /// Save the sheet to this file after applying assignments
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save back to FILE after applying assignments
    #[arg(long)]
    save: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_sheet(path: Option<&Path>) -> Result<Spreadsheet> {
    match path {
        Some(p) if p.exists() => {
            Spreadsheet::open(p).with_context(|| format!("opening {}", p.display()))
        }
        _ => Ok(Spreadsheet::new()),
    }
}

fn apply_assignment(sheet: &mut Spreadsheet, assignment: &str) -> Result<()> {
    let (cell, content) = assignment
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAssignment(assignment.to_string()))?;
    let order = sheet
        .set_contents_of_cell(cell.trim(), content)
        .with_context(|| format!("setting {}", cell.trim()))?;
    debug!(cell = cell.trim(), recalculated = ?order, "applied assignment");
    Ok(())
}

/// Sort key placing `A2` before `A10` and `B1` after `A99`.
fn cell_sort_key(name: &str) -> (String, u64) {
    let split = name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len());
    let (letters, digits) = name.split_at(split);
    (letters.to_string(), digits.parse().unwrap_or(u64::MAX))
}

fn print_cells(sheet: &Spreadsheet, cells: &[String]) -> Result<()> {
    let mut names: Vec<String> = if cells.is_empty() {
        sheet.names_of_nonempty_cells().into_iter().collect()
    } else {
        cells.to_vec()
    };
    if cells.is_empty() {
        names.sort_by_key(|name| cell_sort_key(name));
    }

    for name in names {
        let value = sheet.get_cell_value(&name)?;
        println!("{}: {}", name.to_ascii_uppercase(), value);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut sheet = open_sheet(cli.file.as_deref())?;

    for assignment in &cli.set {
        apply_assignment(&mut sheet, assignment)?;
    }

    if cli.save {
        let path = cli.file.as_ref().ok_or(CliError::NoFilePath)?;
        sheet.save_file(path)?;
    }
    if let Some(output) = &cli.output {
        sheet.save_file(output)?;
    }

    if let Some(command) = &cli.command {
        let text = command.strip_prefix('=').unwrap_or(command);
        let formula = Formula::new(text).with_context(|| format!("parsing '{}'", text))?;
        let value = sheet.evaluate_formula(&formula);
        println!("{}", value);
        if value.is_error() {
            return Ok(ExitCode::FAILURE);
        }
    } else {
        print_cells(&sheet, &cli.print)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
