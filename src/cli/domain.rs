//! Command line interface for creating domain files.

use super::utils;
use crate::{domain::DomainCatalog, exit_on_error, exit_with_error, grid::fgr};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Builds a representation of the `create_domain` command line subcommand.
pub fn create_create_domain_subcommand() -> Command<'static> {
    Command::new("create_domain")
        .about("Create a domain table of regularly spaced lon/lat points")
        .long_about(
            "Create a domain table of regularly spaced lon/lat points.\n\
             The table holds one header line followed by one row per point of the\n\
             Cartesian product of the longitude and latitude ranges, with sequentially\n\
             numbered point ids. Both ranges include their upper bound. The default\n\
             resolution matches the 0.125-degree NLDAS-2 grid.",
        )
        .arg(
            Arg::new("output-file")
                .value_name("OUTPUT_FILE")
                .help("Path where the domain table should be created")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("lon-bounds")
                .long("lon-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Limits for the longitudes of the domain [degrees east]")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("lat-bounds")
                .long("lat-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Limits for the latitudes of the domain [degrees north]")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .require_equals(true)
                .value_name("DEGREES")
                .help("Spacing between neighboring points along both axes")
                .takes_value(true)
                .default_value("0.125"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Automatically overwrite any existing file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        )
}

/// Runs the actions for the `create_domain` subcommand using the given arguments.
pub fn run_create_domain_subcommand(arguments: &ArgMatches) {
    let output_file_path = PathBuf::from(utils::get_value_string(arguments, "output-file"));
    let lon_bounds = utils::parse_bounds_strings("lon-bounds", arguments);
    let lat_bounds = utils::parse_bounds_strings("lat-bounds", arguments);
    let resolution = utils::parse_value_string::<fgr>(
        "resolution",
        utils::get_value_string(arguments, "resolution"),
    );

    if output_file_path.exists() && !arguments.is_present("overwrite") {
        exit_with_error!(
            "Error: Output file {} already exists (use --overwrite to replace it)",
            output_file_path.display()
        );
    }

    let catalog = exit_on_error!(
        DomainCatalog::regular(lon_bounds, lat_bounds, resolution),
        "Error: Could not create domain: {}"
    );
    exit_on_error!(
        catalog.write(&output_file_path),
        "Error: Could not write domain file: {}"
    );

    if utils::verbosity_from_arguments(arguments).print_messages() {
        println!(
            "Wrote {} point(s) to {}",
            catalog.len(),
            output_file_path.display()
        );
    }
}
