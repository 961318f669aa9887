//! Clap command tree

use clap::{Arg, ArgAction, Command};

/// Build the top-level `revcheck` command
pub fn build_cli() -> Command {
    Command::new("revcheck")
        .about("Run reversible procedures under linear-usage cells")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .help("Print reports as JSON"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print only the final bindings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("list").about("List available procedures"))
        .subcommand(
            Command::new("run")
                .about("Run procedures and verify they restore their state")
                .arg(
                    Arg::new("names")
                        .value_name("NAME")
                        .num_args(1..)
                        .required_unless_present("all")
                        .help("Procedures to run"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("names")
                        .help("Run every procedure"),
                )
                .arg(
                    Arg::new("rounds")
                        .long("rounds")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u32))
                        .help("Applications per run (default 2)"),
                )
                .arg(
                    Arg::new("no-round-trip")
                        .long("no-round-trip")
                        .action(ArgAction::SetTrue)
                        .help("Skip the restored-state check"),
                ),
        )
}
