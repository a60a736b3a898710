//! Function for building the command line hierarchy.

use super::{
    domain::create_create_domain_subcommand, flags::create_inspect_flags_subcommand,
    timeseries::create_timeseries_subcommand,
};
use clap::{self, Arg, Command};

/// Builds the `smapseries` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
        .subcommand(create_timeseries_subcommand())
        .subcommand(create_create_domain_subcommand())
        .subcommand(create_inspect_flags_subcommand())
}
