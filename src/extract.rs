//! Extraction of per-point retrieval time series from batch volumes.

use crate::{
    domain::DomainPoint,
    io::swath::{fdt, DayPart},
    volume::RetrievalVolume,
};
use chrono::NaiveDate;
use std::io;

/// One retained time step of a point's retrieval time series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesRecord {
    pub date: NaiveDate,
    pub part: DayPart,
    pub tb_time_utc: String,
    pub soil_moisture: fdt,
    pub soil_moisture_error: fdt,
    pub surface_flag: u16,
    pub retrieval_qual_flag: u16,
    pub tb_v_corrected: fdt,
    pub tb_qual_flag_v: u16,
    pub vegetation_water_content: fdt,
}

/// Extracts the retrieval time series of the swath cell nearest to the
/// given domain point from the given batch volume.
///
/// Time slots in which the cell holds no recorded retrieval are dropped;
/// the remaining records keep the volume's time order. An empty series is
/// a valid outcome, meaning the point saw no retrievals in this batch.
pub fn extract_pixel_series(
    volume: &RetrievalVolume,
    point: &DomainPoint,
) -> io::Result<Vec<SeriesRecord>> {
    let lon_idx = nearest_axis_index(
        volume.longitudes().nearest_index(point.longitude()),
        "longitude",
        point,
    )?;
    let lat_idx = nearest_axis_index(
        volume.latitudes().nearest_index(point.latitude()),
        "latitude",
        point,
    )?;

    let mut records = Vec::new();
    for (slot_idx, slot) in volume.slots().iter().enumerate() {
        if !volume.retrieval_recorded(slot_idx, lat_idx, lon_idx) {
            continue;
        }
        let slab = volume.slab(slot_idx);
        records.push(SeriesRecord {
            date: slot.date,
            part: slot.part,
            tb_time_utc: slab.tb_time_utc[[lat_idx, lon_idx]].clone(),
            soil_moisture: slab.soil_moisture[[lat_idx, lon_idx]],
            soil_moisture_error: slab.soil_moisture_error[[lat_idx, lon_idx]],
            surface_flag: slab.surface_flag[[lat_idx, lon_idx]],
            retrieval_qual_flag: slab.retrieval_qual_flag[[lat_idx, lon_idx]],
            tb_v_corrected: slab.tb_v_corrected[[lat_idx, lon_idx]],
            tb_qual_flag_v: slab.tb_qual_flag_v[[lat_idx, lon_idx]],
            vegetation_water_content: slab.vegetation_water_content[[lat_idx, lon_idx]],
        });
    }
    Ok(records)
}

fn nearest_axis_index(
    index: Option<usize>,
    axis_name: &str,
    point: &DomainPoint,
) -> io::Result<usize> {
    index.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Trimmed {} axis holds no valid coordinates for point {}",
                axis_name,
                point.id()
            ),
        )
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{
        geometry::GeoWindow,
        io::swath::testing::TestSwathReader,
        volume::{BatchPlan, RetrievalVolume},
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn test_volume(reader: &TestSwathReader) -> RetrievalVolume {
        let batch = BatchPlan::new(date(2015, 4, 1), 2, 2)
            .unwrap()
            .batches()
            .next()
            .unwrap();
        let window = GeoWindow::new(-100.25, -99.25, 38.25, 39.25);
        RetrievalVolume::accumulate(reader, &batch, &window).unwrap()
    }

    #[test]
    fn fill_slots_are_dropped_and_order_is_kept() {
        // Valid retrievals in the first and last of the four slots only.
        let reader = TestSwathReader::new(
            vec![-100.5, -100.0, -99.5, -99.0],
            vec![39.0, 38.5, 38.0],
        )
        .with_valid_cell(date(2015, 4, 1), DayPart::Am, 0, 1, 0.30)
        .with_valid_cell(date(2015, 4, 2), DayPart::Pm, 0, 1, 0.35);
        let volume = test_volume(&reader);

        let point = DomainPoint::new(-100.0, 39.0, "idA".to_string());
        let records = extract_pixel_series(&volume, &point).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(2015, 4, 1));
        assert_eq!(records[0].part, DayPart::Am);
        assert_eq!(records[0].soil_moisture, 0.30);
        assert_eq!(records[1].date, date(2015, 4, 2));
        assert_eq!(records[1].part, DayPart::Pm);
        assert_eq!(records[1].soil_moisture, 0.35);
    }

    #[test]
    fn all_fill_series_is_empty_but_not_an_error() {
        let reader = TestSwathReader::new(
            vec![-100.5, -100.0, -99.5, -99.0],
            vec![39.0, 38.5, 38.0],
        );
        let volume = test_volume(&reader);

        let point = DomainPoint::new(-100.0, 39.0, "idA".to_string());
        let records = extract_pixel_series(&volume, &point).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn nearest_cell_is_used_for_points_between_cells() {
        let reader = TestSwathReader::new(
            vec![-100.5, -100.0, -99.5, -99.0],
            vec![39.0, 38.5, 38.0],
        )
        .with_valid_cell(date(2015, 4, 1), DayPart::Am, 1, 1, 0.40);
        let volume = test_volume(&reader);

        // Nearest trimmed cell of (-100.1, 38.6) is (-100.0, 38.5).
        let point = DomainPoint::new(-100.1, 38.6, "idB".to_string());
        let records = extract_pixel_series(&volume, &point).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].soil_moisture, 0.40);
    }
}
