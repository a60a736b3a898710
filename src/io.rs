//! File input/output.

pub mod series;
pub mod swath;
pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

/// Whether and how to pass non-essential information to the user.
#[derive(Clone, Copy, Debug)]
pub enum Verbosity {
    /// Do not print any non-essential information.
    Quiet,
    /// Print status messages.
    Messages,
    /// Print status messages and show progress bars.
    Progress,
}

impl Verbosity {
    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Creates a progress bar for the given number of iterations.
    /// The bar is hidden unless progress verbosity is selected.
    pub fn create_progress_bar(&self, n_iterations: usize) -> ProgressBar {
        match self {
            Verbosity::Progress => {
                ProgressBar::new(n_iterations as u64).with_style(DEFAULT_PROGRESS_STYLE.clone())
            }
            _ => ProgressBar::hidden(),
        }
    }
}
