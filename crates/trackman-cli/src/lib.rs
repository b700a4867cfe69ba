//! Trackman command line
//!
//! Shows and edits the tracking flags stored in a JSON catalog snapshot.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod grid;
pub mod ops;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub use ops::{EditOp, OpOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line definition
#[must_use]
pub fn cli() -> Command {
    Command::new("trackman")
        .version(VERSION)
        .about("Edit tracking flags of orchestrations, ports and pipelines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Editor configuration file (TOML)"),
        )
        .subcommand(
            Command::new("show")
                .about("Print the flag grid of every artifact kind")
                .arg(catalog_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .help("Only this kind (orchestration, send-port, receive-port, pipeline)"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Apply edits in the order given and save them")
                .arg(catalog_arg())
                .arg(
                    Arg::new("set")
                        .long("set")
                        .action(ArgAction::Append)
                        .value_parser(EditOp::parse_set)
                        .value_name("KIND:ID:COLUMN=BOOL")
                        .help("Set one cell"),
                )
                .arg(
                    Arg::new("toggle-column")
                        .long("toggle-column")
                        .action(ArgAction::Append)
                        .value_parser(EditOp::parse_toggle_column)
                        .value_name("KIND:COLUMN")
                        .help("Toggle a column, taking the first row as reference"),
                )
                .arg(
                    Arg::new("toggle-row")
                        .long("toggle-row")
                        .action(ArgAction::Append)
                        .value_parser(EditOp::parse_toggle_row)
                        .value_name("KIND:ID")
                        .help("Toggle a row, taking its first column as reference"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print pending writes without saving"),
                ),
        )
}

fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .long("catalog")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON catalog snapshot")
}

/// Edit operations of an `edit` invocation, in command-line order
#[must_use]
pub fn edit_ops(args: &ArgMatches) -> Vec<EditOp> {
    let mut ops: Vec<(usize, EditOp)> = Vec::new();
    for id in ["set", "toggle-column", "toggle-row"] {
        if let (Some(values), Some(indices)) = (args.get_many::<EditOp>(id), args.indices_of(id)) {
            ops.extend(indices.zip(values.cloned()));
        }
    }
    ops.sort_by_key(|(index, _)| *index);
    ops.into_iter().map(|(_, op)| op).collect()
}

/// Run a parsed command line, writing output to `out`
///
/// # Errors
/// Returns error if the command fails
pub fn run(matches: &ArgMatches, out: &mut impl std::io::Write) -> Result<()> {
    let config = commands::load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("show", args)) => {
            let catalog = required_path(args, "catalog")?;
            let kind = args.get_one::<String>("kind").map(String::as_str);
            commands::show(config, catalog, kind, out)
        }
        Some(("edit", args)) => {
            let catalog = required_path(args, "catalog")?;
            let dry_run = args.get_flag("dry-run");
            commands::edit(config, catalog, &edit_ops(args), dry_run, out)
        }
        Some((name, _)) => anyhow::bail!("unknown command '{name}'"),
        None => anyhow::bail!("no command given"),
    }
}

fn required_path<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a std::path::Path> {
    args.get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .ok_or_else(|| anyhow::anyhow!("missing --{id}"))
}
