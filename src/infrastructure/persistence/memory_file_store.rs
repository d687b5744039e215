//! In-memory file store
//!
//! A `FileStore` that keeps files in a map. It counts every byte handed out
//! by its readers, which lets tests prove an operation did not read a whole
//! file, and it can be switched into a mode where every write fails.

use crate::domain::repositories::FileStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

type FileMap = Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>;

/// In-memory filesystem
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: FileMap,
    bytes_read: Arc<AtomicU64>,
    writes_fail: AtomicBool,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file
    pub fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), data.into());
    }

    /// Returns a copy of a file's content
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    /// Returns every stored path
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    /// Total bytes returned by all readers so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn reset_bytes_read(&self) {
        self.bytes_read.store(0, Ordering::Relaxed);
    }

    /// Makes `create` (and therefore every write) fail with `PermissionDenied`
    pub fn set_writes_fail(&self, fail: bool) {
        self.writes_fail.store(fail, Ordering::Relaxed);
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }
}

impl FileStore for InMemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        self.files
            .lock()
            .get(path)
            .map(|data| data.len() as u64)
            .ok_or_else(|| Self::not_found(path))
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let data = self.contents(path).ok_or_else(|| Self::not_found(path))?;
        Ok(Box::new(CountingReader {
            inner: io::Cursor::new(data),
            counter: Arc::clone(&self.bytes_read),
        }))
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        if self.writes_fail.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only store: {}", path.display()),
            ));
        }
        self.files.lock().insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemoryWriter {
            path: path.to_path_buf(),
            files: Arc::clone(&self.files),
        }))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut files = self.files.lock();
        let data = files.remove(from).ok_or_else(|| Self::not_found(from))?;
        files.insert(to.to_path_buf(), data);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        if self.writes_fail.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only store: {}", to.display()),
            ));
        }
        let mut files = self.files.lock();
        let data = files.get(from).cloned().ok_or_else(|| Self::not_found(from))?;
        let len = data.len() as u64;
        files.insert(to.to_path_buf(), data);
        Ok(len)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }
}

struct CountingReader {
    inner: io::Cursor<Vec<u8>>,
    counter: Arc<AtomicU64>,
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

/// Appends straight into the shared map, so content is visible without a flush
struct MemoryWriter {
    path: PathBuf,
    files: FileMap,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.lock();
        let file = files
            .get_mut(&self.path)
            .ok_or_else(|| InMemoryFileStore::not_found(&self.path))?;
        file.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_counted() {
        let store = InMemoryFileStore::new();
        store.insert("/mem/data.bin", vec![7u8; 1000]);

        let mut reader = store.open_read(Path::new("/mem/data.bin")).unwrap();
        let mut buf = [0u8; 10];
        reader.read_exact(&mut buf).unwrap();

        assert_eq!(store.bytes_read(), 10);
    }

    #[test]
    fn test_writes_can_be_made_to_fail() {
        let store = InMemoryFileStore::new();
        store.set_writes_fail(true);
        let err = store.write_all(Path::new("/mem/out.bin"), b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(store.paths().is_empty());
    }

    #[test]
    fn test_writer_content_visible_immediately() {
        let store = InMemoryFileStore::new();
        let mut writer = store.create(Path::new("/mem/out.bin")).unwrap();
        writer.write_all(b"abc").unwrap();
        assert_eq!(store.contents(Path::new("/mem/out.bin")).unwrap(), b"abc");
    }
}
