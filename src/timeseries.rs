//! Batch extraction of per-point soil-moisture time series.

use crate::{
    domain::DomainCatalog,
    extract::extract_pixel_series,
    grid::fgr,
    io::{series::SeriesWriter, swath::SwathReader, Verbosity},
    volume::{BatchPlan, RetrievalVolume},
};
use chrono::NaiveDate;
use std::{io, path::PathBuf};

/// Margin in degrees added on every side of the domain's bounding window
/// before trimming, so that the true nearest swath cell of a point at the
/// domain edge always lies inside the trimmed region.
pub const WINDOW_PADDING: fgr = 0.5;

/// Configuration parameters for a time-series extraction run.
#[derive(Clone, Debug)]
pub struct TimeseriesConfig {
    /// First date to process.
    pub start_date: NaiveDate,
    /// First date NOT to process.
    pub end_date: NaiveDate,
    /// Maximal number of days held in memory at once.
    pub days_per_batch: usize,
    /// Path of the domain table naming the points to extract.
    pub domain_file_path: PathBuf,
    /// Directory where the per-point series files are written.
    pub output_dir: PathBuf,
}

/// Runs a time-series extraction: loads the domain catalog, then for each
/// batch of days builds the trimmed retrieval volume and appends every
/// domain point's new records to its series file.
///
/// Appends are not atomic and there is no resume bookkeeping: a run that
/// crashes mid-batch loses that batch's unwritten rows, and re-running an
/// already processed date range appends the same rows again.
pub fn run_timeseries<R: SwathReader>(
    config: &TimeseriesConfig,
    reader: &R,
    verbosity: &Verbosity,
) -> io::Result<()> {
    let total_days = config
        .end_date
        .signed_duration_since(config.start_date)
        .num_days();
    if total_days <= 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "End date {} is not after start date {}",
                config.end_date, config.start_date
            ),
        ));
    }
    let plan = BatchPlan::new(config.start_date, total_days as usize, config.days_per_batch)?;

    let catalog = DomainCatalog::from_file(&config.domain_file_path)?;
    let window = catalog.bounding_window().expanded(WINDOW_PADDING);
    let writer = SeriesWriter::new(config.output_dir.clone())?;

    for (batch_idx, batch) in plan.batches().enumerate() {
        if verbosity.print_messages() {
            println!(
                "Processing batch {}/{} ({} day(s) from {})",
                batch_idx + 1,
                plan.n_batches(),
                batch.n_days(),
                batch.start_date()
            );
        }
        let volume = RetrievalVolume::accumulate(reader, &batch, &window)?;

        let progress_bar = verbosity.create_progress_bar(catalog.len());
        for point in catalog.points() {
            let records = extract_pixel_series(&volume, point)?;
            writer.append_records(point, &records)?;
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();
    }
    Ok(())
}
