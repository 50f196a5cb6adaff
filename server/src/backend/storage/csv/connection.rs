use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::{CsvAssetRepository, CsvBudgetRepository, CsvExpenseRepository};
use crate::backend::storage::traits::Connection;

pub const EXPENSES_FILE_NAME: &str = "kakeibo.csv";
pub const ASSETS_FILE_NAME: &str = "assets.csv";
pub const BUDGET_FILE_NAME: &str = "budget.csv";

/// Byte-order mark written at the start of every file
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CsvConnection owns the data directory and serialises writes to it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection, creating the data directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(EXPENSES_FILE_NAME)
    }

    pub fn assets_file_path(&self) -> PathBuf {
        self.base_directory.join(ASSETS_FILE_NAME)
    }

    pub fn budget_file_path(&self) -> PathBuf {
        self.base_directory.join(BUDGET_FILE_NAME)
    }

    /// Hold this guard across any read-modify-write of the data files
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read a whole file with any leading BOM removed.
    /// Returns `None` when the file does not exist.
    pub fn read_without_bom(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        if !path.exists() {
            return Ok(None);
        }

        let mut bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        Ok(Some(bytes))
    }

    /// Build a lenient reader: ragged rows are allowed and whitespace is trimmed
    pub fn csv_reader<'a>(&self, bytes: &'a [u8]) -> ::csv::Reader<&'a [u8]> {
        ::csv::ReaderBuilder::new()
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_reader(bytes)
    }

    /// Overwrite `path` with a BOM, `header` and whatever `write_rows` emits.
    ///
    /// Rows go to a temp file first which is then renamed over the target.
    pub fn write_atomically<F>(&self, path: &Path, header: &[&str], write_rows: F) -> Result<()>
    where
        F: FnOnce(&mut ::csv::Writer<BufWriter<File>>) -> Result<()>,
    {
        let temp_path = path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut buffered = BufWriter::new(file);
            buffered.write_all(UTF8_BOM)?;

            let mut csv_writer = ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(buffered);
            csv_writer.write_record(header)?;
            write_rows(&mut csv_writer)?;
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Rewrote {}", path.display());
        Ok(())
    }

    /// Append rows to `path`. A missing or empty file gets the BOM and header first.
    pub fn append<F>(&self, path: &Path, header: &[&str], write_rows: F) -> Result<()>
    where
        F: FnOnce(&mut ::csv::Writer<BufWriter<File>>) -> Result<()>,
    {
        let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut buffered = BufWriter::new(file);
        if is_new {
            buffered.write_all(UTF8_BOM)?;
        }

        let mut csv_writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(buffered);
        if is_new {
            csv_writer.write_record(header)?;
        }
        write_rows(&mut csv_writer)?;
        csv_writer.flush()?;

        debug!("Appended to {}", path.display());
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = CsvExpenseRepository;
    type AssetRepository = CsvAssetRepository;
    type BudgetRepository = CsvBudgetRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        CsvExpenseRepository::new(self.clone())
    }

    fn create_asset_repository(&self) -> Self::AssetRepository {
        CsvAssetRepository::new(self.clone())
    }

    fn create_budget_repository(&self) -> Self::BudgetRepository {
        CsvBudgetRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.expenses_file_path(), nested.join(EXPENSES_FILE_NAME));
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let bytes = connection
            .read_without_bom(&connection.budget_file_path())
            .unwrap();
        assert!(bytes.is_none());
    }

    #[test]
    fn test_append_writes_bom_once() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("sample.csv");

        for value in ["1", "2"] {
            connection
                .append(&path, &["value"], |w| {
                    w.write_record([value])?;
                    Ok(())
                })
                .unwrap();
        }

        let raw = fs::read(&path).unwrap();
        assert!(raw.starts_with(UTF8_BOM));
        let text = String::from_utf8(raw[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["value", "1", "2"]);

        let stripped = connection.read_without_bom(&path).unwrap().unwrap();
        assert!(stripped.starts_with(b"value"));
    }

    #[test]
    fn test_write_atomically_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("sample.csv");
        fs::write(&path, "old,content\n").unwrap();

        connection
            .write_atomically(&path, &["value"], |w| {
                w.write_record(["42"])?;
                Ok(())
            })
            .unwrap();

        let stripped = connection.read_without_bom(&path).unwrap().unwrap();
        let text = String::from_utf8(stripped).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["value", "42"]);
        assert!(!path.with_extension("tmp").exists());
    }
}
