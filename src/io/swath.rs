//! Access to SMAP soil-moisture swath data.
//!
//! Flag bit meanings are documented at
//! <https://nsidc.org/data/smap/spl3smp/data-fields>.

#[cfg(feature = "hdf5")]
pub mod hdf5;

use chrono::NaiveDate;
use ndarray::{s, Array2};
use std::{
    fmt, io,
    ops::Range,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Floating-point precision assumed for swath field data.
#[allow(non_camel_case_types)]
pub type fdt = f32;

/// Value marking a cell with no valid measurement in SMAP float fields.
pub const FILL_VALUE: fdt = -9999.0;

/// Number of rows (latitudes) in the 36 km EASE-Grid 2.0 swath grid.
pub const N_SWATH_ROWS: usize = 406;
/// Number of columns (longitudes) in the 36 km EASE-Grid 2.0 swath grid.
pub const N_SWATH_COLS: usize = 964;

/// Bit raised in `retrieval_qual_flag` when retrieval quality is uncertain.
pub const RETRIEVAL_UNCERTAIN_QUALITY_BIT: u32 = 0;
/// Bit raised in `surface_flag` for static water.
pub const SURFACE_STATIC_WATER_BIT: u32 = 0;
/// Bit raised in `surface_flag` for coastal proximity.
pub const SURFACE_COASTAL_PROXIMITY_BIT: u32 = 2;
/// Bit raised in `surface_flag` for mountainous terrain.
pub const SURFACE_MOUNTAINOUS_TERRAIN_BIT: u32 = 9;
/// Bit raised in `surface_flag` for dense vegetation.
pub const SURFACE_DENSE_VEGETATION_BIT: u32 = 10;

/// Whether the given bit is raised in the given flag word.
pub fn flag_bit_raised(flags: u16, bit: u32) -> bool {
    (flags >> bit) & 1 == 1
}

/// Supported SMAP products.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwathProduct {
    /// The L3 radiometer-only soil-moisture product (SPL3SMP).
    L3Passive,
}

impl SwathProduct {
    /// Returns the name of the product subdirectory within a SMAP data
    /// directory.
    pub fn subdirectory(&self) -> &'static str {
        match self {
            Self::L3Passive => "SPL3SMP",
        }
    }

    /// Returns the prefix of the product's granule file names.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::L3Passive => "SMAP_L3_SM_P_",
        }
    }
}

impl FromStr for SwathProduct {
    type Err = io::Error;

    fn from_str(product_string: &str) -> Result<Self, Self::Err> {
        match product_string {
            "SMP" => Ok(Self::L3Passive),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Requested SMAP product type {} not supported", product_string),
            )),
        }
    }
}

impl fmt::Display for SwathProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::L3Passive => "SMP",
            }
        )
    }
}

/// Returns the path of the granule file for the given product and date
/// within the given SMAP data directory.
pub fn swath_file_path(smap_dir: &Path, product: SwathProduct, date: NaiveDate) -> PathBuf {
    smap_dir
        .join(product.subdirectory())
        .join(date.format("%Y.%m.%d").to_string())
        .join(format!(
            "{}{}.h5",
            product.file_prefix(),
            date.format("%Y%m%d")
        ))
}

/// Denotes the morning (descending) or evening (ascending) overpass of a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayPart {
    Am,
    Pm,
}

impl DayPart {
    /// Creates an array for iterating over the AM and PM overpasses.
    pub fn slice() -> [Self; 2] {
        [Self::Am, Self::Pm]
    }

    /// Returns the name of the HDF5 group holding this overpass's fields.
    pub fn group_name(&self) -> &'static str {
        match self {
            Self::Am => "Soil_Moisture_Retrieval_Data_AM",
            Self::Pm => "Soil_Moisture_Retrieval_Data_PM",
        }
    }

    /// Returns the dataset name of the given field for this overpass.
    /// PM fields carry a `_pm` suffix.
    pub fn dataset_name(&self, field_name: &str) -> String {
        match self {
            Self::Am => field_name.to_string(),
            Self::Pm => format!("{}_pm", field_name),
        }
    }

    /// Returns the tag used for this overpass in output files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The per-cell coordinate fields of the swath grid.
#[derive(Clone, Debug)]
pub struct SwathCoords {
    /// Longitude of each cell [degrees east], `FILL_VALUE` where missing.
    pub longitude: Array2<fdt>,
    /// Latitude of each cell [degrees north], `FILL_VALUE` where missing.
    pub latitude: Array2<fdt>,
}

/// The per-cell retrieval fields of one overpass of the swath grid.
#[derive(Clone, Debug)]
pub struct SwathFields {
    pub longitude: Array2<fdt>,
    pub latitude: Array2<fdt>,
    pub soil_moisture: Array2<fdt>,
    pub soil_moisture_error: Array2<fdt>,
    pub tb_v_corrected: Array2<fdt>,
    pub vegetation_water_content: Array2<fdt>,
    pub retrieval_qual_flag: Array2<u16>,
    pub tb_qual_flag_v: Array2<u16>,
    pub surface_flag: Array2<u16>,
    pub tb_time_utc: Array2<String>,
}

impl SwathFields {
    /// Returns the (rows, columns) shape of the fields.
    pub fn shape(&self) -> (usize, usize) {
        self.longitude.dim()
    }

    /// Returns a copy of the fields restricted to the given row and column
    /// index spans.
    pub fn trimmed(&self, rows: &Range<usize>, cols: &Range<usize>) -> Self {
        let trim_float = |field: &Array2<fdt>| {
            field.slice(s![rows.clone(), cols.clone()]).to_owned()
        };
        let trim_flag = |field: &Array2<u16>| {
            field.slice(s![rows.clone(), cols.clone()]).to_owned()
        };
        Self {
            longitude: trim_float(&self.longitude),
            latitude: trim_float(&self.latitude),
            soil_moisture: trim_float(&self.soil_moisture),
            soil_moisture_error: trim_float(&self.soil_moisture_error),
            tb_v_corrected: trim_float(&self.tb_v_corrected),
            vegetation_water_content: trim_float(&self.vegetation_water_content),
            retrieval_qual_flag: trim_flag(&self.retrieval_qual_flag),
            tb_qual_flag_v: trim_flag(&self.tb_qual_flag_v),
            surface_flag: trim_flag(&self.surface_flag),
            tb_time_utc: self
                .tb_time_utc
                .slice(s![rows.clone(), cols.clone()])
                .to_owned(),
        }
    }
}

/// Replaces fill values in the given float field with NaN, so that
/// missing samples are skipped by coordinate averaging and searches.
pub fn fill_to_nan(field: &mut Array2<fdt>) {
    field.mapv_inplace(|value| if value == FILL_VALUE { fdt::NAN } else { value });
}

/// Computes the mask of cells holding a recorded retrieval.
///
/// A cell without a retrieval has `FILL_VALUE` in its longitude field.
/// This is the only place where the fill value is compared against raw
/// field data; all downstream filtering goes through the mask.
pub fn retrieval_mask(longitudes: &Array2<fdt>) -> Array2<bool> {
    longitudes.mapv(|longitude| longitude != FILL_VALUE)
}

/// Defines the properties of a reader providing per-day SMAP swath data.
pub trait SwathReader {
    /// Reads the coordinate fields of the swath grid for the given date.
    fn read_coords(&self, date: NaiveDate) -> io::Result<SwathCoords>;

    /// Reads all retrieval fields for the given date and overpass.
    fn read_fields(&self, date: NaiveDate, part: DayPart) -> io::Result<SwathFields>;
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn granule_paths_follow_the_smap_layout() {
        let date = NaiveDate::from_ymd_opt(2015, 4, 10).unwrap();
        let path = swath_file_path(Path::new("/data/smap"), SwathProduct::L3Passive, date);
        assert_eq!(
            path,
            PathBuf::from("/data/smap/SPL3SMP/2015.04.10/SMAP_L3_SM_P_20150410.h5")
        );
    }

    #[test]
    fn unsupported_product_types_are_rejected() {
        assert_eq!("SMP".parse::<SwathProduct>().unwrap(), SwathProduct::L3Passive);
        assert!("SMAP_E".parse::<SwathProduct>().is_err());
    }

    #[test]
    fn pm_dataset_names_carry_suffix() {
        assert_eq!(DayPart::Am.dataset_name("soil_moisture"), "soil_moisture");
        assert_eq!(DayPart::Pm.dataset_name("soil_moisture"), "soil_moisture_pm");
    }

    #[test]
    fn flag_bits_are_extracted_by_position() {
        assert!(flag_bit_raised(0b0000_0001, SURFACE_STATIC_WATER_BIT));
        assert!(!flag_bit_raised(0b0000_0010, SURFACE_STATIC_WATER_BIT));
        assert!(flag_bit_raised(0b0000_0100, SURFACE_COASTAL_PROXIMITY_BIT));
        assert!(flag_bit_raised(1 << 9, SURFACE_MOUNTAINOUS_TERRAIN_BIT));
        assert!(flag_bit_raised(1 << 10, SURFACE_DENSE_VEGETATION_BIT));
        assert!(!flag_bit_raised(1 << 10, SURFACE_MOUNTAINOUS_TERRAIN_BIT));
    }

    #[test]
    fn fill_values_become_nan() {
        let mut field = ndarray::array![[1.0, FILL_VALUE], [FILL_VALUE, 4.0]];
        fill_to_nan(&mut field);
        assert_eq!(field[[0, 0]], 1.0);
        assert!(field[[0, 1]].is_nan());
        assert!(field[[1, 0]].is_nan());
        assert_eq!(field[[1, 1]], 4.0);
    }

    #[test]
    fn retrieval_mask_marks_filled_cells_invalid() {
        let longitudes = ndarray::array![[-100.0, FILL_VALUE]];
        let mask = retrieval_mask(&longitudes);
        assert!(mask[[0, 0]]);
        assert!(!mask[[0, 1]]);
    }
}
