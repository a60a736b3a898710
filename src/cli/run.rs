//! Function for running the command line program.

use super::{
    build, domain::run_create_domain_subcommand, flags::run_inspect_flags_subcommand,
    timeseries::run_timeseries_subcommand,
};
use std::time::Instant;

/// Runs the `smapseries` command line program.
pub fn run() {
    let arguments = build::build().get_matches();

    let start_instant = Instant::now();

    if let Some(timeseries_arguments) = arguments.subcommand_matches("timeseries") {
        run_timeseries_subcommand(timeseries_arguments);
    }
    if let Some(create_domain_arguments) = arguments.subcommand_matches("create_domain") {
        run_create_domain_subcommand(create_domain_arguments);
    }
    if let Some(inspect_flags_arguments) = arguments.subcommand_matches("inspect_flags") {
        run_inspect_flags_subcommand(inspect_flags_arguments);
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
