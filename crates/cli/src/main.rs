//! revcheck CLI: run reversible procedures under linear-usage cells
//!
//! - `revcheck list` prints the catalog
//! - `revcheck run NAME...` (or `--all`) runs procedures and reports
//!
//! Exit codes: 0 when every run passes, 1 when any run fails, 2 for usage
//! errors.

mod commands;
mod format;
mod parse;

use std::process;

use revcheck_procedures::{catalog, find, Check, ProcedureError, RunOptions};

use commands::build_cli;
use format::{format_error, format_list, format_report, OutputMode};
use parse::{matches_to_action, verbosity, CliAction};

fn main() {
    let cli = build_cli();
    let matches = cli.get_matches();

    // Determine output mode
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    tracing_subscriber::fmt()
        .with_max_level(verbosity(&matches))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match matches_to_action(&matches) {
        Ok(CliAction::List) => {
            println!("{}", format_list(&catalog(), output_mode));
            0
        }
        Ok(CliAction::Run { names, options }) => run_all(names, &options, output_mode),
        Err(e) => {
            eprintln!("(error) {}", e);
            2
        }
    };
    process::exit(exit_code);
}

fn run_all(names: Option<Vec<String>>, options: &RunOptions, mode: OutputMode) -> i32 {
    let checks: Vec<Result<Box<dyn Check>, (String, ProcedureError)>> = match names {
        None => catalog().into_iter().map(Ok).collect(),
        Some(names) => names
            .iter()
            .map(|name| find(name).map_err(|e| (name.clone(), e)))
            .collect(),
    };

    let mut failed = 0usize;
    for check in checks {
        let check = match check {
            Ok(check) => check,
            Err((name, e)) => {
                eprintln!("{}", format_error(&name, &e, mode));
                failed += 1;
                continue;
            }
        };

        match check.run(options) {
            Ok(report) => println!("{}", format_report(&report, mode)),
            Err(e) => {
                eprintln!("{}", format_error(check.name(), &e, mode));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        0
    } else {
        tracing::warn!(failed, "some runs failed");
        1
    }
}
