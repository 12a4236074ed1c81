//! Merge a folder of per-category CSV exports into one file.
//!
//! Every row gains a `category` column holding its source file's stem, and
//! columns are aligned by name across files (missing values stay empty).

use std::path::Path;

use placegrid_core::{PlacegridError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub rows: usize,
}

/// Concatenate every `*.csv` in `input_dir` into `output`.
///
/// Files are processed in name order for deterministic output. A `category`
/// column in a source file is ignored; the file stem wins.
pub fn merge_csv_dir(input_dir: &Path, output: &Path) -> Result<MergeSummary> {
    let mut files: Vec<_> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(PlacegridError::Sink {
            message: format!("no .csv files found in {}", input_dir.display()),
        });
    }

    // First pass: union of column names in first-seen order.
    let mut columns: Vec<String> = Vec::new();
    for path in &files {
        let mut reader = csv::Reader::from_path(path).map_err(sink_error)?;
        for header in reader.headers().map_err(sink_error)? {
            if header != "category" && !columns.iter().any(|c| c == header) {
                columns.push(header.to_string());
            }
        }
    }

    let mut writer = csv::Writer::from_path(output).map_err(sink_error)?;
    let mut header_row: Vec<&str> = columns.iter().map(String::as_str).collect();
    header_row.push("category");
    writer.write_record(&header_row).map_err(sink_error)?;

    // Second pass: align each file's rows to the union, tag with the stem.
    let mut rows = 0usize;
    for path in &files {
        let category =
            path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown").to_string();
        let mut reader = csv::Reader::from_path(path).map_err(sink_error)?;
        let headers = reader.headers().map_err(sink_error)?.clone();
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|column| headers.iter().position(|h| h == column))
            .collect();

        for record in reader.records() {
            let record = record.map_err(sink_error)?;
            let mut row: Vec<&str> = positions
                .iter()
                .map(|position| position.and_then(|i| record.get(i)).unwrap_or(""))
                .collect();
            row.push(&category);
            writer.write_record(&row).map_err(sink_error)?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(MergeSummary { files: files.len(), rows })
}

fn sink_error(err: csv::Error) -> PlacegridError {
    PlacegridError::Sink { message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_merge_aligns_columns_and_tags_category() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hospital.csv"),
            "name,latitude,longitude\nCity Hospital,24.8,67.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("pharmacy.csv"),
            "name,rating\nMetro Pharmacy,4.5\n",
        )
        .unwrap();

        let output = dir.path().join("merged.csv");
        let summary = merge_csv_dir(dir.path(), &output).unwrap();
        assert_eq!(summary, MergeSummary { files: 2, rows: 2 });

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["name", "latitude", "longitude", "rating", "category"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        // name-ordered: hospital.csv first
        assert_eq!(&rows[0][0], "City Hospital");
        assert_eq!(&rows[0][4], "hospital");
        assert_eq!(&rows[1][0], "Metro Pharmacy");
        // pharmacy.csv has no latitude column
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][4], "pharmacy");
    }

    #[test]
    fn test_source_category_column_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dentist.csv"), "name,category\nSmile Co,old-value\n").unwrap();

        let output = dir.path().join("merged.csv");
        merge_csv_dir(dir.path(), &output).unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["name", "category"]);
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "dentist");
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = merge_csv_dir(dir.path(), &dir.path().join("merged.csv")).unwrap_err();
        assert!(matches!(err, PlacegridError::Sink { .. }));
    }
}
