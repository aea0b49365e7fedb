//! Append-only audit log stored as CSV
//!
//! The header is written only when the file is missing or empty. Appends are
//! serialised through a mutex and each batch is written with a single
//! `write_all`, so concurrent writers never interleave partial lines.

use crate::app::models::AuditRecord;
use crate::config::AuditConfig;
use crate::constants::AUDIT_COLUMNS;
use crate::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.log_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records to the log; returns the number written
    pub async fn append(&self, records: &[AuditRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().await;

        let needs_header = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to inspect audit log {}", self.path.display()),
                    e,
                ));
            }
        };

        let bytes = encode(records, needs_header).map_err(|e| {
            Error::csv_parsing(
                self.path.display().to_string(),
                "Failed to encode audit records",
                Some(e),
            )
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                Error::io(
                    format!("Failed to open audit log {}", self.path.display()),
                    e,
                )
            })?;
        file.write_all(&bytes).await.map_err(|e| {
            Error::io(
                format!("Failed to append to audit log {}", self.path.display()),
                e,
            )
        })?;
        file.flush()
            .await
            .map_err(|e| Error::io("Failed to flush audit log", e))?;

        info!(
            "Appended {} audit records to {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }

    /// Every record in the log, newest first
    ///
    /// A missing or empty file holds zero records.
    pub async fn load(&self) -> Result<Vec<AuditRecord>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Audit log {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read audit log {}", self.path.display()),
                    e,
                ));
            }
        };

        if content.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_slice());

        let mut records = Vec::new();
        for result in reader.deserialize::<AuditRecord>() {
            let record = result.map_err(|e| {
                Error::csv_parsing(
                    self.path.display().to_string(),
                    "Malformed audit record",
                    Some(e),
                )
            })?;
            records.push(record);
        }

        // stable, so records sharing a second keep reverse file order
        records.reverse();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!("Loaded {} audit records", records.len());
        Ok(records)
    }
}

fn encode(records: &[AuditRecord], with_header: bool) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(AUDIT_COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn audit(user: &str, timestamp: NaiveDateTime, new_value: &str) -> AuditRecord {
        AuditRecord {
            user: user.to_string(),
            timestamp,
            row_id: 3,
            column_name: "Waste_Weight_kg".to_string(),
            old_value: "6".to_string(),
            new_value: new_value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_log_has_zero_records() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit_logs.csv"));

        assert!(log.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_log_has_zero_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit_logs.csv");
        std::fs::write(&path, "").unwrap();

        assert!(AuditLog::new(&path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit_logs.csv");
        let log = AuditLog::new(&path);

        log.append(&[audit("dana", at(9, 0, 0), "5.5")]).await.unwrap();
        log.append(&[audit("lee", at(10, 0, 0), "4")]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "user,timestamp,row_id,column_name,old_value,new_value",
                "dana,2024-03-10 09:00:00,3,Waste_Weight_kg,6,5.5",
                "lee,2024-03-10 10:00:00,3,Waste_Weight_kg,6,4",
            ]
        );
    }

    #[tokio::test]
    async fn test_load_newest_first() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit_logs.csv"));

        log.append(&[
            audit("dana", at(9, 0, 0), "5.5"),
            audit("lee", at(11, 0, 0), "4"),
            audit("kim", at(10, 0, 0), "3"),
        ])
        .await
        .unwrap();

        let users: Vec<String> = log.load().await.unwrap().into_iter().map(|r| r.user).collect();
        assert_eq!(users, vec!["lee", "kim", "dana"]);
    }

    #[tokio::test]
    async fn test_values_with_commas_round_trip() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit_logs.csv"));
        let mut record = audit("dana", at(9, 0, 0), "Salt, Sea");
        record.column_name = "Product_Name".to_string();

        log.append(std::slice::from_ref(&record)).await.unwrap();
        assert_eq!(log.load().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_whole_lines() {
        let dir = TempDir::new().unwrap();
        let log = Arc::new(AuditLog::new(dir.path().join("audit_logs.csv")));

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                log.append(&[audit(&format!("user{}", i), at(12, 0, i), "1")])
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let records = log.load().await.unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].user, "user7");
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("user,timestamp").count(), 1);
    }

    #[tokio::test]
    async fn test_append_nothing_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit_logs.csv"));

        assert_eq!(log.append(&[]).await.unwrap(), 0);
        assert!(!log.path().exists());
    }
}
