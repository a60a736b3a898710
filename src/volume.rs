//! Day-batched accumulation of trimmed swath retrievals.

use crate::{
    geometry::GeoWindow,
    grid::AxisProfile,
    io::swath::{self, DayPart, SwathFields, SwathReader},
};
use chrono::{Duration, NaiveDate};
use ndarray::Array2;
use std::io;

/// A partition of a range of consecutive days into batches of bounded
/// length, so that peak memory use is independent of the total run length.
#[derive(Clone, Copy, Debug)]
pub struct BatchPlan {
    start_date: NaiveDate,
    total_days: usize,
    days_per_batch: usize,
}

impl BatchPlan {
    /// Creates a plan covering the given number of days from the given
    /// start date, in batches of at most the given length.
    pub fn new(
        start_date: NaiveDate,
        total_days: usize,
        days_per_batch: usize,
    ) -> io::Result<Self> {
        if total_days == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Number of days to process must be at least one",
            ));
        }
        if days_per_batch == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Batch size must be at least one day",
            ));
        }
        Ok(Self {
            start_date,
            total_days,
            days_per_batch,
        })
    }

    /// Returns the number of batches in the plan. The last batch may be
    /// shorter than the others.
    pub fn n_batches(&self) -> usize {
        (self.total_days + self.days_per_batch - 1) / self.days_per_batch
    }

    /// Returns an iterator over the batches of the plan, in date order.
    pub fn batches(&self) -> impl Iterator<Item = DayBatch> {
        let plan = *self;
        (0..plan.n_batches()).map(move |batch_idx| {
            let day_offset = batch_idx * plan.days_per_batch;
            DayBatch {
                start_date: plan.start_date + Duration::days(day_offset as i64),
                n_days: plan.days_per_batch.min(plan.total_days - day_offset),
            }
        })
    }
}

/// A contiguous run of days processed together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayBatch {
    start_date: NaiveDate,
    n_days: usize,
}

impl DayBatch {
    /// Returns the first date of the batch.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the number of days in the batch.
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Returns an iterator over the dates of the batch.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let batch = *self;
        (0..batch.n_days)
            .map(move |day_offset| batch.start_date + Duration::days(day_offset as i64))
    }
}

/// A single time slot of a batch volume: one overpass of one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub part: DayPart,
}

/// The retrievals of one batch of days, trimmed to a geographic window.
///
/// Holds one trimmed field slab per time slot, in time order (days in read
/// order, AM before PM within each day), together with the trimmed
/// coordinate axis profiles used for nearest-cell lookups. A volume is
/// owned by a single batch iteration and dropped before the next batch's
/// volume is built.
#[derive(Debug)]
pub struct RetrievalVolume {
    slots: Vec<TimeSlot>,
    slabs: Vec<SwathFields>,
    masks: Vec<Array2<bool>>,
    longitudes: AxisProfile,
    latitudes: AxisProfile,
}

impl RetrievalVolume {
    /// Builds the volume for the given batch by reading each day's swath
    /// from the given reader and trimming it to the given window.
    ///
    /// Coordinate axis profiles are derived per day from that day's
    /// coordinate fields, since which swath cells carry valid coordinates
    /// varies between overpasses. The underlying grid is static, so all
    /// days of a batch must trim to a region of the same shape; a day that
    /// does not is reported as invalid data. A missing or unreadable
    /// granule aborts the batch.
    pub fn accumulate<R: SwathReader>(
        reader: &R,
        batch: &DayBatch,
        window: &GeoWindow,
    ) -> io::Result<Self> {
        let mut slots = Vec::with_capacity(2 * batch.n_days());
        let mut slabs = Vec::with_capacity(2 * batch.n_days());
        let mut masks = Vec::with_capacity(2 * batch.n_days());
        let mut trimmed_axes: Option<(AxisProfile, AxisProfile)> = None;

        for date in batch.dates() {
            let coords = reader.read_coords(date)?;
            let mut lon_field = coords.longitude;
            let mut lat_field = coords.latitude;
            swath::fill_to_nan(&mut lon_field);
            swath::fill_to_nan(&mut lat_field);

            let lon_profile = AxisProfile::from_column_means(&lon_field);
            let lat_profile = AxisProfile::from_row_means(&lat_field);

            let col_span = lon_profile
                .trim_to_interval(window.lower_lon(), window.upper_lon())
                .map_err(|err| trim_error(date, "longitude", err))?;
            let row_span = lat_profile
                .trim_to_interval(window.lower_lat(), window.upper_lat())
                .map_err(|err| trim_error(date, "latitude", err))?;

            match &trimmed_axes {
                None => {
                    trimmed_axes = Some((
                        lon_profile.trimmed(&col_span),
                        lat_profile.trimmed(&row_span),
                    ));
                }
                Some((longitudes, latitudes)) => {
                    if col_span.len() != longitudes.len() || row_span.len() != latitudes.len() {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!(
                                "Trimmed region for {} is {}x{} cells, \
                                 but the first day of the batch gave {}x{}",
                                date,
                                row_span.len(),
                                col_span.len(),
                                latitudes.len(),
                                longitudes.len()
                            ),
                        ));
                    }
                }
            }

            for part in DayPart::slice() {
                let fields = reader.read_fields(date, part)?;
                let slab = fields.trimmed(&row_span, &col_span);
                masks.push(swath::retrieval_mask(&slab.longitude));
                slabs.push(slab);
                slots.push(TimeSlot { date, part });
            }
        }

        let (longitudes, latitudes) = trimmed_axes.expect("Batch holds at least one day");
        Ok(Self {
            slots,
            slabs,
            masks,
            longitudes,
            latitudes,
        })
    }

    /// Returns the time slots of the volume, in time order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Returns the number of time slots in the volume.
    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns the trimmed field slab for the given time slot.
    pub fn slab(&self, slot_idx: usize) -> &SwathFields {
        &self.slabs[slot_idx]
    }

    /// Whether the given cell holds a recorded retrieval in the given slot.
    pub fn retrieval_recorded(&self, slot_idx: usize, lat_idx: usize, lon_idx: usize) -> bool {
        self.masks[slot_idx][[lat_idx, lon_idx]]
    }

    /// Returns the trimmed longitude axis profile.
    pub fn longitudes(&self) -> &AxisProfile {
        &self.longitudes
    }

    /// Returns the trimmed latitude axis profile.
    pub fn latitudes(&self) -> &AxisProfile {
        &self.latitudes
    }

    /// Returns the (latitudes, longitudes) shape of the trimmed region.
    pub fn shape(&self) -> (usize, usize) {
        (self.latitudes.len(), self.longitudes.len())
    }
}

fn trim_error(date: NaiveDate, axis_name: &str, err: io::Error) -> io::Error {
    io::Error::new(
        err.kind(),
        format!("Could not trim {} axis for {}: {}", axis_name, date, err),
    )
}
