//! In-memory ZIP archive construction
//!
//! Bundles a list of on-disk files into a single downloadable archive.
//! The buffer is scoped to one request and released with the response.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use thiserror::Error;
use zip::ZipWriter;
use zip::write::FileOptions;

/// A single file to add to the archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Name the file takes inside the archive
    pub name: String,
    /// On-disk location of the file's bytes
    pub path: PathBuf,
}

/// Archive construction errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to add entry '{name}': {source}")]
    Entry {
        name: String,
        source: zip::result::ZipError,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to finish archive: {0}")]
    Finish(zip::result::ZipError),
}

/// Build a ZIP archive from the given entries
///
/// Entries are added in order with Deflate compression. An empty entry
/// list produces a valid, empty archive.
pub fn build(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in entries {
            zip.start_file(&entry.name, options)
                .map_err(|e| ArchiveError::Entry {
                    name: entry.name.clone(),
                    source: e,
                })?;
            let data = std::fs::read(&entry.path).map_err(|e| ArchiveError::Read {
                path: entry.path.display().to_string(),
                source: e,
            })?;
            zip.write_all(&data).map_err(|e| ArchiveError::Entry {
                name: entry.name.clone(),
                source: e.into(),
            })?;
        }

        zip.finish().map_err(ArchiveError::Finish)?;
    }

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_archive(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).expect("archive should parse")
    }

    #[test]
    fn test_empty_entry_list_builds_valid_empty_archive() {
        let bytes = build(&[]).expect("empty archive should build");
        let archive = read_archive(bytes);
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_entries_keep_names_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        std::fs::write(&a, b"alpha-bytes").unwrap();
        std::fs::write(&b, b"beta-bytes").unwrap();

        let bytes = build(&[
            ArchiveEntry {
                name: "first.jpg".to_string(),
                path: a,
            },
            ArchiveEntry {
                name: "second.jpg".to_string(),
                path: b,
            },
        ])
        .expect("archive should build");

        let mut archive = read_archive(bytes);
        assert_eq!(archive.len(), 2);

        let mut data = Vec::new();
        archive
            .by_name("first.jpg")
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        assert_eq!(data, b"alpha-bytes");
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = build(&[ArchiveEntry {
            name: "gone.jpg".to_string(),
            path: PathBuf::from("/nonexistent/gone.jpg"),
        }])
        .unwrap_err();
        assert!(matches!(err, ArchiveError::Read { .. }));
    }
}
