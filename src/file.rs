// src/file.rs

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use crate::data::CompanyRecord;
use crate::error::ScrapeError;

/// Incremental CSV output: header on creation, then one flushed row per
/// `append`, so an interrupted run keeps every row written so far.
pub struct RecordWriter {
    out: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl RecordWriter {
    /// Ensure the parent dir exists; create/truncate the file; write the header.
    pub fn create(path: &Path) -> Result<Self, ScrapeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let file = File::create(path)?; // truncate/overwrite
        let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        out.write_record(CompanyRecord::FIELDS)?;
        out.flush()?;

        Ok(Self { out, path: path.to_path_buf(), rows: 0 })
    }

    pub fn append(&mut self, rec: &CompanyRecord) -> Result<(), ScrapeError> {
        self.out.serialize(rec)?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str) -> CompanyRecord {
        CompanyRecord::skeleton(slug, &format!("https://www.bildir.az/{slug}/"))
    }

    #[test]
    fn header_is_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/data.csv");
        let w = RecordWriter::create(&path).unwrap();
        assert_eq!(w.rows(), 0);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("slug,name,category,founded,"));
        assert!(text.trim_end().ends_with("star1_pct,profile_url"));
    }

    #[test]
    fn rows_are_on_disk_before_the_writer_drops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut w = RecordWriter::create(&path).unwrap();

        w.append(&record("a")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);

        w.append(&record("b")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
        assert_eq!(w.rows(), 2);
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut w = RecordWriter::create(&path).unwrap();

        let mut rec = record("kapital-bank");
        rec.description = s!("Bank, sığorta və lizinq");
        w.append(&rec).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Bank, sığorta və lizinq\""));
    }

    #[test]
    fn create_truncates_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "old,content\n1,2\n3,4\n").unwrap();

        RecordWriter::create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn file_in_place_of_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "").unwrap();

        let err = RecordWriter::create(&blocker.join("data.csv"));
        assert!(matches!(err, Err(ScrapeError::Io(_))));
    }
}
