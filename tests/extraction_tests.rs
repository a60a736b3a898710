//! Integration tests driving the full extraction pipeline with a
//! synthetic in-memory swath reader.

use chrono::NaiveDate;
use ndarray::Array2;
use smapseries::{
    io::{
        swath::{fdt, DayPart, SwathCoords, SwathFields, SwathReader, FILL_VALUE},
        Verbosity,
    },
    timeseries::{run_timeseries, TimeseriesConfig},
};
use std::{collections::HashMap, fs, io, path::Path};

/// Swath reader producing a small regular grid with explicitly listed
/// valid cells, everything else fill-valued.
struct SyntheticSwathReader {
    longitudes: Vec<fdt>,
    latitudes: Vec<fdt>,
    valid_cells: HashMap<(NaiveDate, DayPart), Vec<(usize, usize, fdt)>>,
}

impl SyntheticSwathReader {
    fn new(longitudes: Vec<fdt>, latitudes: Vec<fdt>) -> Self {
        Self {
            longitudes,
            latitudes,
            valid_cells: HashMap::new(),
        }
    }

    fn with_valid_cell(
        mut self,
        date: NaiveDate,
        part: DayPart,
        row: usize,
        col: usize,
        soil_moisture: fdt,
    ) -> Self {
        self.valid_cells
            .entry((date, part))
            .or_default()
            .push((row, col, soil_moisture));
        self
    }

    fn shape(&self) -> (usize, usize) {
        (self.latitudes.len(), self.longitudes.len())
    }
}

impl SwathReader for SyntheticSwathReader {
    fn read_coords(&self, _date: NaiveDate) -> io::Result<SwathCoords> {
        let (n_rows, n_cols) = self.shape();
        let mut longitude = Array2::zeros((n_rows, n_cols));
        let mut latitude = Array2::zeros((n_rows, n_cols));
        for row in 0..n_rows {
            for col in 0..n_cols {
                longitude[[row, col]] = self.longitudes[col];
                latitude[[row, col]] = self.latitudes[row];
            }
        }
        Ok(SwathCoords {
            longitude,
            latitude,
        })
    }

    fn read_fields(&self, date: NaiveDate, part: DayPart) -> io::Result<SwathFields> {
        let shape = self.shape();
        let mut fields = SwathFields {
            longitude: Array2::from_elem(shape, FILL_VALUE),
            latitude: Array2::from_elem(shape, FILL_VALUE),
            soil_moisture: Array2::from_elem(shape, FILL_VALUE),
            soil_moisture_error: Array2::from_elem(shape, FILL_VALUE),
            tb_v_corrected: Array2::from_elem(shape, FILL_VALUE),
            vegetation_water_content: Array2::from_elem(shape, FILL_VALUE),
            retrieval_qual_flag: Array2::zeros(shape),
            tb_qual_flag_v: Array2::zeros(shape),
            surface_flag: Array2::zeros(shape),
            tb_time_utc: Array2::from_elem(shape, String::new()),
        };
        if let Some(cells) = self.valid_cells.get(&(date, part)) {
            for &(row, col, soil_moisture) in cells {
                fields.longitude[[row, col]] = self.longitudes[col];
                fields.latitude[[row, col]] = self.latitudes[row];
                fields.soil_moisture[[row, col]] = soil_moisture;
                fields.soil_moisture_error[[row, col]] = 0.01;
                fields.tb_v_corrected[[row, col]] = 250.0;
                fields.vegetation_water_content[[row, col]] = 1.5;
                fields.tb_time_utc[[row, col]] =
                    format!("{}T06:00:00.000Z", date.format("%Y-%m-%d"));
            }
        }
        Ok(fields)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 3x3 grid around (-97.0, 39.5), with descending latitudes as on the
/// swath grid.
fn reader_3x3() -> SyntheticSwathReader {
    SyntheticSwathReader::new(vec![-97.5, -97.0, -96.5], vec![40.0, 39.5, 39.0])
}

fn write_single_point_domain(dir: &Path) -> std::path::PathBuf {
    let domain_file_path = dir.join("domain.txt");
    fs::write(
        &domain_file_path,
        "#     lon       lat         id\n -97.0000   39.5000  idA\n",
    )
    .unwrap();
    domain_file_path
}

#[test]
fn single_valid_slot_yields_a_single_data_row() {
    let dir = tempfile::tempdir().unwrap();
    let domain_file_path = write_single_point_domain(dir.path());
    let output_dir = dir.path().join("output");

    // Only day 1 AM holds a retrieval at the cell nearest to the point;
    // day 1 PM and all of day 2 stay fill-valued.
    let reader = reader_3x3().with_valid_cell(date(2015, 4, 10), DayPart::Am, 1, 1, 0.25);

    let config = TimeseriesConfig {
        start_date: date(2015, 4, 10),
        end_date: date(2015, 4, 12),
        days_per_batch: 2,
        domain_file_path,
        output_dir: output_dir.clone(),
    };
    run_timeseries(&config, &reader, &Verbosity::Quiet).unwrap();

    let content = fs::read_to_string(output_dir.join("idA.txt")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "longitude  -97.0000");
    assert_eq!(lines[1], "latitude    39.5000");
    assert!(lines[2].starts_with("tb_time_utc"));
    assert!(lines[3].starts_with("2015-04-10T06:00:00.000Z"));
    assert!(lines[3].contains("0.2500"));
    assert!(lines[3].ends_with("AM"));
}

#[test]
fn rows_accumulate_across_batches_behind_a_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let domain_file_path = write_single_point_domain(dir.path());
    let output_dir = dir.path().join("output");

    let reader = reader_3x3()
        .with_valid_cell(date(2015, 4, 10), DayPart::Am, 1, 1, 0.25)
        .with_valid_cell(date(2015, 4, 11), DayPart::Pm, 1, 1, 0.30);

    // One-day batches, so the two rows come from separate appends.
    let config = TimeseriesConfig {
        start_date: date(2015, 4, 10),
        end_date: date(2015, 4, 12),
        days_per_batch: 1,
        domain_file_path,
        output_dir: output_dir.clone(),
    };
    run_timeseries(&config, &reader, &Verbosity::Quiet).unwrap();

    let content = fs::read_to_string(output_dir.join("idA.txt")).unwrap();
    assert_eq!(content.matches("longitude").count(), 1);
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[3].contains("0.2500"));
    assert!(lines[3].ends_with("AM"));
    assert!(lines[4].contains("0.3000"));
    assert!(lines[4].ends_with("PM"));
}

#[test]
fn points_without_retrievals_get_header_only_files() {
    let dir = tempfile::tempdir().unwrap();
    let domain_file_path = dir.path().join("domain.txt");
    fs::write(
        &domain_file_path,
        "#     lon       lat         id\n\
          -97.0000   39.5000  idA\n\
          -97.5000   40.0000  idB\n",
    )
    .unwrap();
    let output_dir = dir.path().join("output");

    let reader = reader_3x3().with_valid_cell(date(2015, 4, 10), DayPart::Am, 1, 1, 0.25);

    let config = TimeseriesConfig {
        start_date: date(2015, 4, 10),
        end_date: date(2015, 4, 11),
        days_per_batch: 1,
        domain_file_path,
        output_dir: output_dir.clone(),
    };
    run_timeseries(&config, &reader, &Verbosity::Quiet).unwrap();

    let content_a = fs::read_to_string(output_dir.join("idA.txt")).unwrap();
    assert_eq!(content_a.lines().count(), 4);
    let content_b = fs::read_to_string(output_dir.join("idB.txt")).unwrap();
    assert_eq!(content_b.lines().count(), 3);
}

#[test]
fn end_date_not_after_start_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let domain_file_path = write_single_point_domain(dir.path());

    let config = TimeseriesConfig {
        start_date: date(2015, 4, 10),
        end_date: date(2015, 4, 10),
        days_per_batch: 1,
        domain_file_path,
        output_dir: dir.path().join("output"),
    };
    assert!(run_timeseries(&config, &reader_3x3(), &Verbosity::Quiet).is_err());
}
