//! senchatools - build Sencha/ExtJS apps.
//!
//! Parses arguments, sets up logging and dispatches to the command.

use clap::Parser;
use miette::Result;
use senchatools_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbosity(), args.no_color);
    ui::init_colors(args.no_color);

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, config).await,
        cli::Command::List(list_args) => commands::list_execute(list_args, config).await,
    };

    result.map_err(error::cli_error_to_miette)
}
