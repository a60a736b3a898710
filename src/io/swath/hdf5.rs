//! Reading of SMAP swath data from HDF5 granule files.

use super::{
    fdt, swath_file_path, DayPart, SwathCoords, SwathFields, SwathProduct, SwathReader,
    N_SWATH_COLS, N_SWATH_ROWS,
};
use crate::{io::Verbosity, io_result};
use chrono::NaiveDate;
use hdf5_rs::{self as h5, types::FixedAscii};
use ndarray::Array2;
use std::{io, path::PathBuf};

/// Length of the `tb_time_utc` strings in SPL3SMP granules.
const TIME_STRING_LEN: usize = 24;

/// Configuration parameters for the HDF5 swath reader.
#[derive(Clone, Debug)]
pub struct Hdf5SwathReaderConfig {
    /// Path to the directory holding the per-product SMAP subdirectories.
    smap_dir: PathBuf,
    /// Product to read granules of.
    product: SwathProduct,
    /// Whether to print status messages while reading granules.
    verbosity: Verbosity,
}

impl Hdf5SwathReaderConfig {
    /// Creates a new configuration for the HDF5 swath reader.
    pub fn new(smap_dir: PathBuf, product: SwathProduct, verbosity: Verbosity) -> Self {
        Self {
            smap_dir,
            product,
            verbosity,
        }
    }
}

/// Reader for SMAP granule files in HDF5 format.
#[derive(Debug)]
pub struct Hdf5SwathReader {
    config: Hdf5SwathReaderConfig,
}

impl Hdf5SwathReader {
    /// Creates a new HDF5 swath reader with the given configuration.
    pub fn new(config: Hdf5SwathReaderConfig) -> Self {
        Self { config }
    }

    fn open_granule(&self, date: NaiveDate) -> io::Result<h5::File> {
        let file_path = swath_file_path(&self.config.smap_dir, self.config.product, date);
        if !file_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Missing SMAP granule {} for {}",
                    file_path.display(),
                    date
                ),
            ));
        }
        if self.config.verbosity.print_messages() {
            println!("Reading {}", file_path.display());
        }
        io_result!(h5::File::open(&file_path))
    }
}

impl SwathReader for Hdf5SwathReader {
    fn read_coords(&self, date: NaiveDate) -> io::Result<SwathCoords> {
        let file = self.open_granule(date)?;
        let group = io_result!(file.group(DayPart::Am.group_name()))?;
        Ok(SwathCoords {
            longitude: read_dataset(&group, "longitude")?,
            latitude: read_dataset(&group, "latitude")?,
        })
    }

    fn read_fields(&self, date: NaiveDate, part: DayPart) -> io::Result<SwathFields> {
        let file = self.open_granule(date)?;
        let group = io_result!(file.group(part.group_name()))?;
        let read_float = |field_name| read_dataset::<fdt>(&group, &part.dataset_name(field_name));
        let read_flag = |field_name| read_dataset::<u16>(&group, &part.dataset_name(field_name));
        Ok(SwathFields {
            longitude: read_float("longitude")?,
            latitude: read_float("latitude")?,
            soil_moisture: read_float("soil_moisture")?,
            soil_moisture_error: read_float("soil_moisture_error")?,
            tb_v_corrected: read_float("tb_v_corrected")?,
            vegetation_water_content: read_float("vegetation_water_content")?,
            retrieval_qual_flag: read_flag("retrieval_qual_flag")?,
            tb_qual_flag_v: read_flag("tb_qual_flag_v")?,
            surface_flag: read_flag("surface_flag")?,
            tb_time_utc: read_time_dataset(&group, &part.dataset_name("tb_time_utc"))?,
        })
    }
}

/// Reads the given 2D dataset from the given HDF5 group and verifies that
/// it has the expected swath shape.
fn read_dataset<T: h5::H5Type>(group: &h5::Group, dataset_name: &str) -> io::Result<Array2<T>> {
    let dataset = io_result!(group.dataset(dataset_name))?;
    let values: Array2<T> = io_result!(dataset.read_2d())?;
    if values.dim() != (N_SWATH_ROWS, N_SWATH_COLS) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Dataset {} in group {} has shape {:?} (expected ({}, {}))",
                dataset_name,
                group.name(),
                values.dim(),
                N_SWATH_ROWS,
                N_SWATH_COLS
            ),
        ));
    }
    Ok(values)
}

fn read_time_dataset(group: &h5::Group, dataset_name: &str) -> io::Result<Array2<String>> {
    let values = read_dataset::<FixedAscii<TIME_STRING_LEN>>(group, dataset_name)?;
    Ok(values.map(|time_string| time_string.as_str().to_string()))
}
