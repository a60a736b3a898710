//! Utilities for creating the command line interface.

use crate::{exit_with_error, grid::fgr, io::Verbosity};
use chrono::NaiveDate;
use clap::ArgMatches;
use std::{fmt, str::FromStr};

/// Returns the string value of the given argument, which must be required
/// or have a default value.
pub fn get_value_string<'a>(arguments: &'a ArgMatches, argument_name: &str) -> &'a str {
    arguments
        .value_of(argument_name)
        .expect("No value for argument with default")
}

/// Parses the value of the given argument into the given type, exiting
/// with an error message if the string is invalid.
pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value_string.parse() {
        Ok(value) => value,
        Err(err) => exit_with_error!(
            "Error: Could not parse value of {}: {}",
            argument_name,
            err
        ),
    }
}

/// Parses the value of the given argument as a `YYYY-MM-DD` date.
pub fn parse_date_string(argument_name: &str, value_string: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(value_string, "%Y-%m-%d") {
        Ok(date) => date,
        Err(err) => exit_with_error!(
            "Error: Could not parse value of {} as YYYY-MM-DD date: {}",
            argument_name,
            err
        ),
    }
}

/// Parses the two comma-separated values of the given bounds argument into
/// a (lower, upper) pair.
pub fn parse_bounds_strings(argument_name: &str, arguments: &ArgMatches) -> (fgr, fgr) {
    let value_strings: Vec<_> = arguments
        .values_of(argument_name)
        .expect("No value for required argument")
        .collect();
    if value_strings.len() != 2 {
        exit_with_error!(
            "Error: Expected 2 values for {}, got {}",
            argument_name,
            value_strings.len()
        );
    }
    let lower = parse_value_string::<fgr>(argument_name, value_strings[0]);
    let upper = parse_value_string::<fgr>(argument_name, value_strings[1]);
    if upper < lower {
        exit_with_error!(
            "Error: Upper bound {} for {} is smaller than lower bound {}",
            upper,
            argument_name,
            lower
        );
    }
    (lower, upper)
}

/// Determines the verbosity selected by the `verbose` and `progress` flags.
pub fn verbosity_from_arguments(arguments: &ArgMatches) -> Verbosity {
    if arguments.is_present("progress") {
        Verbosity::Progress
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}
