//! Byte sources for uploads.
//!
//! A source is consumed by value and read exactly once. Its length, when known up front,
//! lets oversized videos be rejected before any byte is buffered.

use std::io;
use std::io::Cursor;
use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

/// A source opened for its single read.
pub struct OpenedSource {
    /// Length reported by the source, if it has one. Not trusted for the size check.
    pub declared_len: Option<u64>,
    pub reader: Pin<Box<dyn AsyncRead + Send>>,
}

#[async_trait]
pub trait ByteSource: Send {
    async fn open(self) -> io::Result<OpenedSource>;
}

/// Bytes already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn open(self) -> io::Result<OpenedSource> {
        Ok(OpenedSource {
            declared_len: Some(self.data.len() as u64),
            reader: Box::pin(Cursor::new(self.data)),
        })
    }
}

/// A local file, opened lazily so open failures surface inside the upload.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ByteSource for FileSource {
    async fn open(self) -> io::Result<OpenedSource> {
        let file = tokio::fs::File::open(&self.path).await?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", self.path.display()),
            ));
        }
        Ok(OpenedSource {
            declared_len: Some(metadata.len()),
            reader: Box::pin(file),
        })
    }
}

/// Any async reader, with an optional caller-declared length.
pub struct ReaderSource<R> {
    reader: R,
    declared_len: Option<u64>,
}

impl<R> ReaderSource<R>
where
    R: AsyncRead + Send + 'static,
{
    pub fn new(reader: R, declared_len: Option<u64>) -> Self {
        Self {
            reader,
            declared_len,
        }
    }
}

#[async_trait]
impl<R> ByteSource for ReaderSource<R>
where
    R: AsyncRead + Send + 'static,
{
    async fn open(self) -> io::Result<OpenedSource> {
        Ok(OpenedSource {
            declared_len: self.declared_len,
            reader: Box::pin(self.reader),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::AsyncReadExt;

    async fn read_all(source: impl ByteSource) -> (Option<u64>, Vec<u8>) {
        let mut opened = source.open().await.unwrap();
        let mut data = Vec::new();
        opened.reader.read_to_end(&mut data).await.unwrap();
        (opened.declared_len, data)
    }

    #[tokio::test]
    async fn test_memory_source() {
        let (len, data) = read_all(MemorySource::new(b"abc".to_vec())).await;
        assert_eq!(len, Some(3));
        assert_eq!(data, b"abc");
    }

    #[tokio::test]
    async fn test_file_source_reports_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"video bytes").unwrap();
        file.flush().unwrap();

        let (len, data) = read_all(FileSource::new(file.path())).await;
        assert_eq!(len, Some(11));
        assert_eq!(data, b"video bytes");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileSource::new(dir.path().join("missing.mp4")).open().await;
        assert_eq!(result.err().unwrap().kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_file_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileSource::new(dir.path()).open().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reader_source_without_length() {
        let reader = Cursor::new(vec![7u8; 5]);
        let (len, data) = read_all(ReaderSource::new(reader, None)).await;
        assert_eq!(len, None);
        assert_eq!(data, vec![7u8; 5]);
    }
}
