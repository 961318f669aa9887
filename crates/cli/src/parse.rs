//! ArgMatches → CliAction conversion

use clap::ArgMatches;
use revcheck_procedures::RunOptions;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Print the catalog
    List,
    /// Run the named procedures (every procedure when `names` is `None`)
    Run {
        /// Procedures to run
        names: Option<Vec<String>>,
        /// Options for every run
        options: RunOptions,
    },
}

/// Convert clap ArgMatches into a CliAction
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "list" => Ok(CliAction::List),
        "run" => parse_run(sub_matches),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_run(m: &ArgMatches) -> Result<CliAction, String> {
    let names = if m.get_flag("all") {
        None
    } else {
        let names: Vec<String> = m
            .get_many::<String>("names")
            .ok_or("No procedure named")?
            .cloned()
            .collect();
        Some(names)
    };

    let mut options = RunOptions::default();
    if let Some(rounds) = m.get_one::<u32>("rounds") {
        options = options.with_rounds(*rounds);
    }
    if m.get_flag("no-round-trip") {
        options = options.with_round_trip(false);
    }
    options.validate().map_err(|e| e.to_string())?;

    Ok(CliAction::Run { names, options })
}

/// Log level selected by `-v` repetitions
pub fn verbosity(matches: &ArgMatches) -> tracing::Level {
    match matches.get_count("verbose") {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        let matches = build_cli()
            .try_get_matches_from(args)
            .map_err(|e| e.to_string())?;
        matches_to_action(&matches)
    }

    #[test]
    fn test_list() {
        assert_eq!(action(&["revcheck", "list"]), Ok(CliAction::List));
    }

    #[test]
    fn test_run_names_with_defaults() {
        assert_eq!(
            action(&["revcheck", "run", "reverse", "matrix"]),
            Ok(CliAction::Run {
                names: Some(vec!["reverse".to_string(), "matrix".to_string()]),
                options: RunOptions::default(),
            })
        );
    }

    #[test]
    fn test_run_all_with_rounds() {
        assert_eq!(
            action(&["revcheck", "run", "--all", "--rounds", "4"]),
            Ok(CliAction::Run {
                names: None,
                options: RunOptions::soak(4),
            })
        );
    }

    #[test]
    fn test_odd_rounds_need_no_round_trip() {
        let err = action(&["revcheck", "run", "--all", "--rounds", "3"]).unwrap_err();
        assert!(err.contains("even number of rounds"), "{err}");

        assert_eq!(
            action(&["revcheck", "run", "--all", "--rounds", "3", "--no-round-trip"]),
            Ok(CliAction::Run {
                names: None,
                options: RunOptions::soak(3).with_round_trip(false),
            })
        );
    }

    #[test]
    fn test_verbosity_levels() {
        let quiet = build_cli().get_matches_from(["revcheck", "list"]);
        assert_eq!(verbosity(&quiet), tracing::Level::WARN);
        let loud = build_cli().get_matches_from(["revcheck", "-vvv", "list"]);
        assert_eq!(verbosity(&loud), tracing::Level::TRACE);
    }
}
