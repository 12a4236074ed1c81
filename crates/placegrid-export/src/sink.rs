//! CSV sinks for place records and planned search points.

use std::fs::File;
use std::path::Path;

use placegrid_core::models::{PlaceRecord, SearchPoint};
use placegrid_core::ports::RecordSink;
use placegrid_core::{PlacegridError, Result};

const RECORD_HEADERS: [&str; 9] = [
    "place_id",
    "name",
    "latitude",
    "longitude",
    "status",
    "categories",
    "rating",
    "user_ratings_total",
    "address",
];

/// CSV-backed [`RecordSink`].
///
/// Rows are flushed after every batch so that a run cancelled between
/// queries still leaves a complete, readable file of everything merged so
/// far.
pub struct CsvSink {
    writer: csv::Writer<File>,
    wrote_header: bool,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(sink_error)?;
        Ok(Self { writer, wrote_header: false })
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, records: &[PlaceRecord]) -> Result<()> {
        if !self.wrote_header {
            self.writer.write_record(RECORD_HEADERS).map_err(sink_error)?;
            self.wrote_header = true;
        }

        for record in records {
            let (latitude, longitude) = match record.coordinate {
                Some(coordinate) => (coordinate.lat.to_string(), coordinate.lon.to_string()),
                None => (String::new(), String::new()),
            };
            self.writer
                .write_record([
                    record.id.clone().unwrap_or_default(),
                    record.name.clone(),
                    latitude,
                    longitude,
                    record.status.clone().unwrap_or_default(),
                    record.categories.join(", "),
                    record.rating.map(|r| r.to_string()).unwrap_or_default(),
                    record.user_ratings_total.map(|n| n.to_string()).unwrap_or_default(),
                    record.address.clone().unwrap_or_default(),
                ])
                .map_err(sink_error)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Write the planned point set, one row per query to be issued.
pub fn write_points(path: &Path, points: &[SearchPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(sink_error)?;
    writer
        .write_record(["point_id", "category", "origin", "latitude", "longitude"])
        .map_err(sink_error)?;

    for (index, point) in points.iter().enumerate() {
        writer
            .write_record([
                (index + 1).to_string(),
                point.profile.category.clone(),
                point.origin.to_string(),
                point.coordinate.lat.to_string(),
                point.coordinate.lon.to_string(),
            ])
            .map_err(sink_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn sink_error(err: csv::Error) -> PlacegridError {
    PlacegridError::Sink { message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placegrid_core::models::{Coordinate, PointOrigin, SearchProfile};

    fn record(id: &str, name: &str) -> PlaceRecord {
        let mut record = PlaceRecord::new(
            Some(id.to_string()),
            name,
            Some(Coordinate::new(24.86, 67.0).unwrap()),
        );
        record.status = Some("OPERATIONAL".to_string());
        record.categories = vec!["hospital".to_string(), "health".to_string()];
        record
    }

    #[test]
    fn test_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&[record("abc", "City Hospital"), record("def", "Metro Clinic")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            RECORD_HEADERS.to_vec()
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "abc");
        assert_eq!(&rows[0][1], "City Hospital");
        assert_eq!(&rows[0][5], "hospital, health");
    }

    #[test]
    fn test_header_written_once_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&[record("abc", "First")]).unwrap();
        sink.write(&[record("def", "Second")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_fields_serialize_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&[PlaceRecord::new(None, "Bare", Some(Coordinate::new(1.0, 2.0).unwrap()))])
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "");
        assert_eq!(&row[1], "Bare");
        assert_eq!(&row[4], "");
    }

    #[test]
    fn test_point_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");

        let profile = SearchProfile::new("hospital", 2000.0);
        let points = vec![
            SearchPoint::new(Coordinate::new(24.8, 67.0).unwrap(), profile.clone(), PointOrigin::Grid),
            SearchPoint::new(
                Coordinate::new(24.9, 67.1).unwrap(),
                profile,
                PointOrigin::GapFill,
            ),
        ];
        write_points(&path, &points).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][2], "grid");
        assert_eq!(&rows[1][2], "gap-fill");
    }
}
