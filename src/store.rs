// src/store.rs
// Reading the scraped table back for the chart generator.

use std::path::Path;

use crate::data::CompanyRecord;
use crate::error::ChartError;

/// All rows of a CSV written by `file::RecordWriter`.
///
/// Columns are matched by header name; columns missing from the file read as
/// empty strings.
pub fn load_records(path: &Path) -> Result<Vec<CompanyRecord>, ChartError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let rows = rdr.deserialize().collect::<Result<Vec<CompanyRecord>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::RecordWriter;

    #[test]
    fn reads_back_what_the_writer_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let mut rec = CompanyRecord::skeleton("wolt", "https://www.bildir.az/wolt/");
        rec.name = s!("Wolt");
        rec.description = s!("Sürətli, rahat \"çatdırılma\"");
        rec.overall_rating = s!("4.6");

        let mut w = RecordWriter::create(&path).unwrap();
        w.append(&rec).unwrap();
        w.append(&CompanyRecord::skeleton("x", "u")).unwrap();

        let rows = load_records(&path).unwrap();
        assert_eq!(rows, vec![rec, CompanyRecord::skeleton("x", "u")]);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "slug,category,overall_rating\na,Banklar,3.2\n").unwrap();

        let rows = load_records(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Banklar");
        assert_eq!(rows[0].overall_rating, "3.2");
        assert_eq!(rows[0].total_reviews, "");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_records(&dir.path().join("nope.csv")).is_err());
    }
}
