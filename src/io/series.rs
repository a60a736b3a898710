//! Writing of per-point retrieval time series as fixed-width text files.

use super::utils as io_utils;
use crate::{domain::DomainPoint, extract::SeriesRecord};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Writer that appends retrieval time series to one file per domain point,
/// named by the point's id.
///
/// The header (two coordinate lines and a column-name line) is written only
/// when a point's file does not yet exist, so repeated batch appends within
/// a run leave a single header. Concurrent writers to the same directory
/// are not supported.
#[derive(Clone, Debug)]
pub struct SeriesWriter {
    output_dir: PathBuf,
}

impl SeriesWriter {
    /// Creates a writer placing series files in the given directory,
    /// creating the directory if necessary.
    pub fn new(output_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Returns the path of the series file for the given point.
    pub fn series_file_path(&self, point: &DomainPoint) -> PathBuf {
        self.output_dir.join(format!("{}.txt", point.id()))
    }

    /// Appends the given records to the given point's series file, writing
    /// the header first if the file does not yet exist.
    ///
    /// An empty record slice still creates the (header-only) file, so every
    /// domain point ends up with an output file.
    pub fn append_records(
        &self,
        point: &DomainPoint,
        records: &[SeriesRecord],
    ) -> io::Result<()> {
        let file_path = self.series_file_path(point);
        let body: String = records.iter().map(format_record_line).collect();
        io_utils::append_to_file_with_header(&file_path, &format_series_header(point), &body)
            .map_err(|err| {
                io::Error::new(
                    err.kind(),
                    format!(
                        "Could not write series file {}: {}",
                        file_path.display(),
                        err
                    ),
                )
            })
    }
}

/// Formats the header of a point's series file: the point's coordinates
/// followed by the column names of the data rows.
pub fn format_series_header(point: &DomainPoint) -> String {
    format!(
        "longitude {:>9.4}\nlatitude  {:>9.4}\n{:<24} {:>13} {:>19} {:>12} {:>19} {:>14} {:>14} {:>24} {:>5}\n",
        point.longitude(),
        point.latitude(),
        "tb_time_utc",
        "soil_moisture",
        "soil_moisture_error",
        "surface_flag",
        "retrieval_qual_flag",
        "tb_v_corrected",
        "tb_qual_flag_v",
        "vegetation_water_content",
        "am_pm",
    )
}

/// Formats one data row of a series file.
pub fn format_record_line(record: &SeriesRecord) -> String {
    format!(
        "{:<24} {:>13.4} {:>19.4} {:>12} {:>19} {:>14.4} {:>14} {:>24.4} {:>5}\n",
        record.tb_time_utc,
        record.soil_moisture,
        record.soil_moisture_error,
        record.surface_flag,
        record.retrieval_qual_flag,
        record.tb_v_corrected,
        record.tb_qual_flag_v,
        record.vegetation_water_content,
        record.part.tag(),
    )
}

/// Reads back the series file at the given path (for inspection and tests).
pub fn read_series_file(file_path: &Path) -> io::Result<String> {
    io_utils::read_text_file(file_path)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::io::swath::DayPart;
    use chrono::NaiveDate;

    fn record(soil_moisture: f32, part: DayPart) -> SeriesRecord {
        SeriesRecord {
            date: NaiveDate::from_ymd_opt(2015, 4, 10).unwrap(),
            part,
            tb_time_utc: "2015-04-10T06:23:15.000Z".to_string(),
            soil_moisture,
            soil_moisture_error: 0.01,
            surface_flag: 1 << 9,
            retrieval_qual_flag: 1,
            tb_v_corrected: 250.25,
            tb_qual_flag_v: 0,
            vegetation_water_content: 1.5,
        }
    }

    #[test]
    fn record_lines_have_fixed_columns() {
        let line = format_record_line(&record(0.25, DayPart::Am));
        assert_eq!(
            line,
            "2015-04-10T06:23:15.000Z        0.2500              0.0100          512                   1       250.2500              0                   1.5000    AM\n"
        );
    }

    #[test]
    fn header_names_all_row_columns() {
        let point = DomainPoint::new(-100.9375, 38.0625, "id000000".to_string());
        let header = format_series_header(&point);
        let mut lines = header.lines();
        assert_eq!(lines.next().unwrap(), "longitude -100.9375");
        assert_eq!(lines.next().unwrap(), "latitude    38.0625");
        let column_line = lines.next().unwrap();
        for column_name in [
            "tb_time_utc",
            "soil_moisture",
            "soil_moisture_error",
            "surface_flag",
            "retrieval_qual_flag",
            "tb_v_corrected",
            "tb_qual_flag_v",
            "vegetation_water_content",
            "am_pm",
        ] {
            assert!(column_line.contains(column_name));
        }
        assert!(lines.next().is_none());
    }

    #[test]
    fn appends_write_the_header_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SeriesWriter::new(dir.path().join("series")).unwrap();
        let point = DomainPoint::new(-97.0, 39.5, "idA".to_string());

        writer
            .append_records(&point, &[record(0.25, DayPart::Am)])
            .unwrap();
        writer
            .append_records(&point, &[record(0.30, DayPart::Pm)])
            .unwrap();

        let content = read_series_file(&writer.series_file_path(&point)).unwrap();
        assert_eq!(content.matches("longitude").count(), 1);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("0.2500"));
        assert!(lines[3].ends_with("AM"));
        assert!(lines[4].contains("0.3000"));
        assert!(lines[4].ends_with("PM"));
    }

    #[test]
    fn empty_series_creates_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SeriesWriter::new(dir.path().to_path_buf()).unwrap();
        let point = DomainPoint::new(-97.0, 39.5, "idB".to_string());

        writer.append_records(&point, &[]).unwrap();

        let content = read_series_file(&writer.series_file_path(&point)).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
