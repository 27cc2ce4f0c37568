//! Append-only CSV log of ranked snapshots.
//!
//! Each append loads the whole table, validates it against the configured
//! column set, and writes the old rows plus the new ones to a temporary file
//! in the same directory before renaming it over the log. A crash or a
//! failed write therefore leaves either the previous log or the new one on
//! disk, never a truncated mix.
//!
//! The log assumes a single writer. Two processes appending to the same
//! path concurrently can lose each other's rows; nothing here locks the
//! file.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::error::PersistError;
use crate::models::{LOG_COLUMNS, RankedTicker};

/// Name of the optional trailing capture-instant column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Format of the `timestamp` column (UTC, microsecond precision).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Column layout of the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogSchema {
    /// The 22 ticker and rank columns.
    #[default]
    Standard,
    /// [`LogSchema::Standard`] followed by a `timestamp` column.
    WithTimestamp,
}

impl LogSchema {
    /// Returns the header row for this layout.
    pub fn columns(self) -> Vec<&'static str> {
        let mut columns = LOG_COLUMNS.to_vec();
        if self == Self::WithTimestamp {
            columns.push(TIMESTAMP_COLUMN);
        }
        columns
    }

    fn row(self, record: &RankedTicker) -> Vec<String> {
        let mut row = record.to_row();
        if self == Self::WithTimestamp {
            row.push(record.timestamp.format(TIMESTAMP_FORMAT).to_string());
        }
        row
    }
}

/// Handle on a snapshot log file.
#[derive(Debug, Clone)]
pub struct SnapshotLog {
    path: PathBuf,
    schema: LogSchema,
}

impl SnapshotLog {
    pub fn new(path: impl Into<PathBuf>, schema: LogSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> LogSchema {
        self.schema
    }

    /// Appends `records` after every row already in the log.
    ///
    /// Creates the log (and missing parent directories) with a header row if
    /// it does not exist. An empty snapshot leaves an existing log untouched.
    /// Returns the number of rows appended.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the existing log cannot be read, does
    /// not match the configured columns, or the replacement cannot be
    /// written. The log on disk is unchanged in every error case.
    pub fn append_snapshot(&self, records: &[RankedTicker]) -> Result<usize, PersistError> {
        let existing = self.load_rows()?;

        if records.is_empty() && existing.is_some() {
            debug!(path = %self.path.display(), "Empty snapshot, log unchanged");
            return Ok(0);
        }

        let existing = existing.unwrap_or_default();
        self.rewrite(&existing, records)?;

        info!(
            path = %self.path.display(),
            appended = records.len(),
            total_rows = existing.len() + records.len(),
            "Appended snapshot to log"
        );
        Ok(records.len())
    }

    /// Returns the number of data rows in the log, `0` if it does not exist.
    pub fn row_count(&self) -> Result<usize, PersistError> {
        Ok(self.load_rows()?.map_or(0, |rows| rows.len()))
    }

    /// Reads every data row, or `None` if the log does not exist yet.
    fn load_rows(&self) -> Result<Option<Vec<StringRecord>>, PersistError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let headers = reader.headers()?.clone();

        if headers.is_empty() {
            warn!(path = %self.path.display(), "Log file is empty, rewriting header");
            return Ok(Some(Vec::new()));
        }

        if !headers.iter().eq(self.schema.columns()) {
            return Err(PersistError::SchemaMismatch {
                path: self.path.clone(),
                found: headers.iter().map(String::from).collect(),
            });
        }

        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Some(rows))
    }

    /// Resolves the file the log path refers to, following symlinks.
    ///
    /// A log that does not exist yet resolves to its configured path.
    fn resolve_target(&self) -> Result<PathBuf, PersistError> {
        match fs::canonicalize(&self.path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(self.path.clone()),
            Err(source) => Err(PersistError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes header, `existing` and `records` to a temporary file next to
    /// the resolved log file and renames it over that file.
    ///
    /// The replacement keeps the previous file's permissions; a new log is
    /// created world-readable (`0644` on unix).
    fn rewrite(
        &self,
        existing: &[StringRecord],
        records: &[RankedTicker],
    ) -> Result<(), PersistError> {
        let target = self.resolve_target()?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| PersistError::Io {
            path: dir.clone(),
            source,
        })?;

        let temp = tempfile::Builder::new()
            .prefix(".gainers-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|source| PersistError::Io {
                path: dir.clone(),
                source,
            })?;

        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            writer.write_record(self.schema.columns())?;
            for row in existing {
                writer.write_record(row)?;
            }
            for record in records {
                writer.write_record(self.schema.row(record))?;
            }
            writer.flush().map_err(|source| PersistError::Io {
                path: temp.path().to_path_buf(),
                source,
            })?;
        }

        temp.as_file().sync_all().map_err(|source| PersistError::Io {
            path: temp.path().to_path_buf(),
            source,
        })?;

        let permissions = match fs::metadata(&target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => new_log_permissions(),
            Err(source) => {
                return Err(PersistError::Io {
                    path: target.clone(),
                    source,
                });
            }
        };
        if let Some(permissions) = permissions {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|source| PersistError::Io {
                    path: temp.path().to_path_buf(),
                    source,
                })?;
        }

        temp.persist(&target).map_err(|e| PersistError::Io {
            path: target.clone(),
            source: e.error,
        })?;

        sync_dir(&dir).map_err(|source| PersistError::Io { path: dir, source })?;

        Ok(())
    }
}

#[cfg(unix)]
fn new_log_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_log_permissions() -> Option<fs::Permissions> {
    None
}

/// Flushes the directory entry so the rename survives a power loss.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
