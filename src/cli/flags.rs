//! Command line interface for inspecting retrieval quality flags.

use clap::{Arg, ArgMatches, Command};

#[cfg(feature = "hdf5")]
use super::utils;
#[cfg(feature = "hdf5")]
use crate::{
    exit_on_error,
    grid::AxisProfile,
    io::swath::{
        self,
        hdf5::{Hdf5SwathReader, Hdf5SwathReaderConfig},
        DayPart, SwathProduct, SwathReader, RETRIEVAL_UNCERTAIN_QUALITY_BIT,
        SURFACE_COASTAL_PROXIMITY_BIT, SURFACE_DENSE_VEGETATION_BIT,
        SURFACE_MOUNTAINOUS_TERRAIN_BIT, SURFACE_STATIC_WATER_BIT,
    },
};

/// Builds a representation of the `inspect_flags` command line subcommand.
pub fn create_inspect_flags_subcommand() -> Command<'static> {
    Command::new("inspect_flags")
        .about("Print quality-flag statistics for one day of SMAP retrievals")
        .long_about(
            "Print quality-flag statistics for one day of SMAP retrievals.\n\
             Reads the AM overpass of the given date, trims it to the given lon/lat\n\
             window and reports how many of the recorded retrievals have each\n\
             quality or surface flag raised.",
        )
        .arg(
            Arg::new("date")
                .value_name("YYYY-MM-DD")
                .help("Date to inspect")
                .required(true)
                .takes_value(true),
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
            Arg::new("lon-bounds")
                .long("lon-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Limits for the longitudes of the inspected window")
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
                .help("Limits for the latitudes of the inspected window")
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
                .help("Print status messages while reading"),
        )
}

/// Runs the actions for the `inspect_flags` subcommand using the given arguments.
#[cfg(feature = "hdf5")]
pub fn run_inspect_flags_subcommand(arguments: &ArgMatches) {
    let date = utils::parse_date_string("date", utils::get_value_string(arguments, "date"));
    let lon_bounds = utils::parse_bounds_strings("lon-bounds", arguments);
    let lat_bounds = utils::parse_bounds_strings("lat-bounds", arguments);
    let product = utils::parse_value_string::<SwathProduct>(
        "product",
        utils::get_value_string(arguments, "product"),
    );
    let smap_dir = utils::get_value_string(arguments, "smap-dir").into();
    let verbosity = utils::verbosity_from_arguments(arguments);

    let reader = Hdf5SwathReader::new(Hdf5SwathReaderConfig::new(smap_dir, product, verbosity));

    let coords = exit_on_error!(
        reader.read_coords(date),
        "Error: Could not read swath coordinates: {}"
    );
    let mut lon_field = coords.longitude;
    let mut lat_field = coords.latitude;
    swath::fill_to_nan(&mut lon_field);
    swath::fill_to_nan(&mut lat_field);

    let lon_profile = AxisProfile::from_column_means(&lon_field);
    let lat_profile = AxisProfile::from_row_means(&lat_field);
    let col_span = exit_on_error!(
        lon_profile.trim_to_interval(lon_bounds.0, lon_bounds.1),
        "Error: Could not trim longitude axis: {}"
    );
    let row_span = exit_on_error!(
        lat_profile.trim_to_interval(lat_bounds.0, lat_bounds.1),
        "Error: Could not trim latitude axis: {}"
    );

    let fields = exit_on_error!(
        reader.read_fields(date, DayPart::Am),
        "Error: Could not read swath fields: {}"
    );
    let slab = fields.trimmed(&row_span, &col_span);
    let mask = swath::retrieval_mask(&slab.longitude);
    let n_recorded = mask.iter().filter(|&&recorded| recorded).count();

    let (n_rows, n_cols) = slab.shape();
    println!(
        "{} AM: {} recorded retrieval(s) in {}x{} trimmed cells",
        date, n_recorded, n_rows, n_cols
    );
    println!("{:<24} {:>8} {:>9}", "flag", "raised", "fraction");
    let flag_counts = [
        (
            "uncertain_quality",
            count_raised(&slab.retrieval_qual_flag, &mask, RETRIEVAL_UNCERTAIN_QUALITY_BIT),
        ),
        (
            "static_water",
            count_raised(&slab.surface_flag, &mask, SURFACE_STATIC_WATER_BIT),
        ),
        (
            "coastal_proximity",
            count_raised(&slab.surface_flag, &mask, SURFACE_COASTAL_PROXIMITY_BIT),
        ),
        (
            "mountainous_terrain",
            count_raised(&slab.surface_flag, &mask, SURFACE_MOUNTAINOUS_TERRAIN_BIT),
        ),
        (
            "dense_vegetation",
            count_raised(&slab.surface_flag, &mask, SURFACE_DENSE_VEGETATION_BIT),
        ),
    ];
    for (flag_name, n_raised) in flag_counts {
        let fraction = if n_recorded == 0 {
            0.0
        } else {
            n_raised as f64 / n_recorded as f64
        };
        println!("{:<24} {:>8} {:>9.4}", flag_name, n_raised, fraction);
    }
}

#[cfg(not(feature = "hdf5"))]
pub fn run_inspect_flags_subcommand(_arguments: &ArgMatches) {
    crate::exit_with_error!(
        "Error: Cannot read SMAP granules because the program was compiled without the hdf5 feature"
    );
}

#[cfg(feature = "hdf5")]
fn count_raised(flags: &ndarray::Array2<u16>, mask: &ndarray::Array2<bool>, bit: u32) -> usize {
    flags
        .iter()
        .zip(mask.iter())
        .filter(|&(&flag_word, &recorded)| recorded && swath::flag_bit_raised(flag_word, bit))
        .count()
}
