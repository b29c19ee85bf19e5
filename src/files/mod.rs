use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Read access to the files being served.
///
/// This trait abstracts file-system access so that the handler can be exercised
/// with mocks, e.g. to simulate I/O failures other than a missing file.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; a missing file is reported with
    /// [`io::ErrorKind::NotFound`].
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Production file source backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSource;

#[async_trait]
impl FileSource for LocalFileSource {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_existing_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let bytes = tokio_test::block_on(LocalFileSource.read(&path)).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("[package]"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-file.txt");
        let err = tokio_test::block_on(LocalFileSource.read(&path)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_directory_is_not_readable_as_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
        let err = tokio_test::block_on(LocalFileSource.read(&path)).unwrap_err();
        assert_ne!(err.kind(), io::ErrorKind::NotFound);
    }
}
