//! File store trait
//!
//! Defines the filesystem operations the conversion core needs, so the
//! codec, detector and registry can run against a real disk or a fake.

use std::io::{self, Read, Write};
use std::path::Path;

/// Trait for the filesystem access used by conversions
///
/// # Example
///
/// ```ignore
/// let store = LocalFileStore::new();
/// let size = store.file_size(Path::new("photo.png"))?;
/// let mut reader = store.open_read(Path::new("photo.png"))?;
/// ```
pub trait FileStore: Send + Sync {
    /// Returns true if a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Returns the file size from metadata, without reading content
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Opens a file for sequential reading
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Creates (or truncates) a file for writing
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    /// Renames a file, replacing the destination if it exists
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies a file, overwriting the destination, and returns the bytes copied
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Removes a file
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Reads a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut text = String::new();
        self.open_read(path)?.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Writes `data` to a new file at `path`
    fn write_all(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut writer = self.create(path)?;
        writer.write_all(data)?;
        writer.flush()
    }
}
