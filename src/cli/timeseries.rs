//! Command line interface for extracting soil-moisture time series.

use super::utils;
use crate::{io::swath::SwathProduct, timeseries::TimeseriesConfig};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

#[cfg(feature = "hdf5")]
use crate::{
    exit_on_error,
    io::swath::hdf5::{Hdf5SwathReader, Hdf5SwathReaderConfig},
    timeseries::run_timeseries,
};

/// Builds a representation of the `timeseries` command line subcommand.
pub fn create_timeseries_subcommand() -> Command<'static> {
    Command::new("timeseries")
        .about("Extract per-point soil-moisture time series onto a domain")
        .long_about(
            "Extract per-point soil-moisture time series onto a domain.\n\
             For each point of the domain table, the retrievals of the nearest swath\n\
             cell are accumulated over the requested date range and appended to a text\n\
             file named by the point's id. Days are processed in batches to bound\n\
             memory use; the batch size limits how many days are held at once.",
        )
        .arg(
            Arg::new("start-date")
                .long("start-date")
                .require_equals(true)
                .value_name("YYYY-MM-DD")
                .help("First date to process")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("end-date")
                .long("end-date")
                .require_equals(true)
                .value_name("YYYY-MM-DD")
                .help("First date NOT to process")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("batch-days")
                .long("batch-days")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Maximal number of days to hold in memory at once")
                .takes_value(true)
                .default_value("30"),
        )
        .arg(
            Arg::new("domain-file")
                .long("domain-file")
                .require_equals(true)
                .value_name("FILE")
                .help("Path of the domain table naming the points to extract")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("smap-dir")
                .long("smap-dir")
                .require_equals(true)
                .value_name("DIR")
                .help("Directory holding the per-product SMAP subdirectories")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .require_equals(true)
                .value_name("DIR")
                .help("Directory where the per-point series files are written")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("product")
                .long("product")
                .require_equals(true)
                .value_name("TYPE")
                .help("SMAP product to read granules of")
                .takes_value(true)
                .default_value("SMP"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages while processing"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bars for domain points"),
        )
}

/// Runs the actions for the `timeseries` subcommand using the given arguments.
pub fn run_timeseries_subcommand(arguments: &ArgMatches) {
    let start_date =
        utils::parse_date_string("start-date", utils::get_value_string(arguments, "start-date"));
    let end_date =
        utils::parse_date_string("end-date", utils::get_value_string(arguments, "end-date"));
    let days_per_batch = utils::parse_value_string::<usize>(
        "batch-days",
        utils::get_value_string(arguments, "batch-days"),
    );
    let product = utils::parse_value_string::<SwathProduct>(
        "product",
        utils::get_value_string(arguments, "product"),
    );
    let smap_dir = PathBuf::from(utils::get_value_string(arguments, "smap-dir"));
    let verbosity = utils::verbosity_from_arguments(arguments);

    let config = TimeseriesConfig {
        start_date,
        end_date,
        days_per_batch,
        domain_file_path: PathBuf::from(utils::get_value_string(arguments, "domain-file")),
        output_dir: PathBuf::from(utils::get_value_string(arguments, "output-dir")),
    };

    #[cfg(feature = "hdf5")]
    {
        let reader = Hdf5SwathReader::new(Hdf5SwathReaderConfig::new(smap_dir, product, verbosity));
        exit_on_error!(
            run_timeseries(&config, &reader, &verbosity),
            "Error: Could not complete time series extraction: {}"
        );
    }
    #[cfg(not(feature = "hdf5"))]
    {
        let _ = (config, product, smap_dir, verbosity);
        crate::exit_with_error!(
            "Error: Cannot read SMAP granules because the program was compiled without the hdf5 feature"
        );
    }
}
