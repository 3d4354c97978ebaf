//! File sink
//!
//! Writes one line per record to a caller-owned, already-open file:
//!
//! ```text
//! 2024-05-01 12:30:45.123 INF [svc] started
//! ```
//!
//! The sink never opens, rotates or closes the file. Every logger writing to
//! the same path shares one process-wide lock, looked up by canonical path.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::record::Record;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// An open file plus the path it was opened from
#[derive(Clone)]
pub struct FileHandle {
    path: PathBuf,
    file: Arc<File>,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>, file: Arc<File>) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &Arc<File> {
        &self.file
    }

    /// Canonical path, if the file can be resolved on disk
    pub fn canonical_path(&self) -> io::Result<PathBuf> {
        fs::canonicalize(&self.path)
    }

    /// Path identifying this file in registries: canonical when possible,
    /// otherwise made absolute against the working directory.
    pub fn registry_key(&self) -> PathBuf {
        match self.canonical_path() {
            Ok(path) => path,
            Err(_) if self.path.is_absolute() => self.path.clone(),
            Err(_) => env::current_dir()
                .map(|cwd| cwd.join(&self.path))
                .unwrap_or_else(|_| self.path.clone()),
        }
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .finish()
    }
}

/// Type alias for a per-file write lock
pub type FileLock = Arc<Mutex<()>>;

/// Canonical path to write lock
#[derive(Debug, Default)]
pub struct FileLockTable {
    locks: Mutex<HashMap<PathBuf, FileLock>>,
}

impl FileLockTable {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Lock shared by every handle on the same file.
    ///
    /// If the path cannot be canonicalized the handle gets a lock of its
    /// own and no cross-handle serialization happens.
    pub fn lock_for(&self, handle: &FileHandle) -> FileLock {
        match handle.canonical_path() {
            Ok(path) => self.locks.lock().entry(path).or_default().clone(),
            Err(err) => {
                tracing::warn!(
                    path = %handle.path().display(),
                    error = %err,
                    "cannot canonicalize log file path, writes will not be shared-locked"
                );
                FileLock::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static FILE_LOCKS: Lazy<FileLockTable> = Lazy::new(FileLockTable::new);

/// The process-wide lock table
pub fn file_locks() -> &'static FileLockTable {
    &FILE_LOCKS
}

/// Sink writing formatted lines to a [`FileHandle`]
#[derive(Clone)]
pub struct FileSink {
    handle: FileHandle,
    lock: FileLock,
}

impl FileSink {
    pub fn new(handle: FileHandle) -> Self {
        let lock = file_locks().lock_for(&handle);
        Self { handle, lock }
    }

    pub fn handle(&self) -> &FileHandle {
        &self.handle
    }

    pub fn lock(&self) -> &FileLock {
        &self.lock
    }

    /// Render one newline-terminated line
    pub fn format_line(record: &Record<'_>) -> String {
        format!(
            "{} {:>3} [{}] {}\n",
            record.time.format(TIMESTAMP_FORMAT),
            record.level.abbreviation(),
            record.logger,
            record.message
        )
    }

    /// Write a record under the file lock.
    ///
    /// # Panics
    ///
    /// Panics if the write fails. Failed log writes are not retried.
    pub fn write(&self, record: &Record<'_>) {
        let line = Self::format_line(record);
        let _guard = self.lock.lock();
        let mut file: &File = &self.handle.file;
        if let Err(err) = file.write_all(line.as_bytes()) {
            panic!(
                "failed to write log record to {}: {}",
                self.handle.path.display(),
                err
            );
        }
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink")
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use std::fs::OpenOptions;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn open(path: &Path) -> FileHandle {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        FileHandle::new(path, Arc::new(file))
    }

    #[test]
    fn test_format_line() {
        let line = FileSink::format_line(&Record::new("svc", Level::Info, "started"));
        assert!(line.ends_with(" INF [svc] started\n"), "got {:?}", line);

        // yyyy-mm-dd hh:mm:ss.mmm
        let timestamp = &line[..23];
        assert_eq!(timestamp.len(), 23);
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[10..11], " ");
        assert_eq!(&timestamp[19..20], ".");
        assert!(timestamp[20..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_write_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let sink = FileSink::new(open(&path));

        sink.write(&Record::new("svc", Level::Debug, "one"));
        sink.write(&Record::new("svc", Level::Error, "two"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" DBG [svc] one"));
        assert!(lines[1].ends_with(" ERR [svc] two"));
    }

    #[test]
    fn test_same_path_shares_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let a = FileSink::new(open(&path));
        let b = FileSink::new(open(&path));
        assert!(Arc::ptr_eq(a.lock(), b.lock()));

        let other = FileSink::new(open(&dir.path().join("other.log")));
        assert!(!Arc::ptr_eq(a.lock(), other.lock()));
    }

    #[test]
    fn test_non_canonical_path_shares_lock() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let path = dir.path().join("shared.log");
        let indirect = dir.path().join("nested").join("..").join("shared.log");

        let a = FileSink::new(open(&path));
        let b = FileSink::new(open(&indirect));
        assert!(Arc::ptr_eq(a.lock(), b.lock()));
        assert_eq!(a.handle().registry_key(), b.handle().registry_key());
    }

    #[test]
    fn test_uncanonicalizable_path_gets_own_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.log");
        let handle = open(&path);
        fs::remove_file(&path).unwrap();

        let table = FileLockTable::new();
        let first = table.lock_for(&handle);
        let second = table.lock_for(&handle);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(table.is_empty());
        assert_eq!(handle.registry_key(), path);
    }

    #[test]
    fn test_write_failure_panics_without_retry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readonly.log");
        fs::write(&path, "").unwrap();
        let file = OpenOptions::new().read(true).open(&path).unwrap();
        let sink = FileSink::new(FileHandle::new(&path, Arc::new(file)));

        let result = catch_unwind(AssertUnwindSafe(|| {
            sink.write(&Record::new("svc", Level::Error, "lost"));
        }));
        let payload = result.unwrap_err();
        let message = payload.downcast_ref::<String>().unwrap();
        assert!(message.contains("readonly.log"), "got {:?}", message);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        // The lock is released by the unwind.
        let writable = FileSink::new(open(&path));
        assert!(Arc::ptr_eq(sink.lock(), writable.lock()));
        writable.write(&Record::new("svc", Level::Info, "recovered"));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.ends_with(" INF [svc] recovered\n"));
    }
}
