//! ZIP packing for build outputs.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Buffer size for file copies into the archive.
const BUFFER_SIZE: usize = 64 * 1024;

/// Unified error type for archive operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Nothing exists at the path the build reported.
    #[error("Build output not found: {path}")]
    OutputMissing {
        /// The path that was expected to hold the build output.
        path: PathBuf,
    },

    /// The output location has no parent directory to place the archive in.
    #[error("Cannot determine parent directory for: {path}")]
    NoParentDir {
        /// The path whose parent could not be determined.
        path: PathBuf,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP library error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory walk error.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Archive filename for a build finished at `at`: `<stem>_<YYYYMMDD>_<HHMMSS>.zip`.
pub fn timestamped_name(stem: &str, at: DateTime<Local>) -> String {
    let stem = if stem.is_empty() { "build" } else { stem };
    format!("{}_{}.zip", stem, at.format("%Y%m%d_%H%M%S"))
}

/// Packs a build output into a ZIP archive at `archive_path`.
///
/// A directory output keeps its own name as the top-level entry prefix, so
/// unpacking the archive reproduces the directory. A single-file output
/// becomes a one-entry archive. Returns the number of files written.
pub fn pack(output: &Path, archive_path: &Path) -> Result<usize, ArchiveError> {
    if !output.exists() {
        return Err(ArchiveError::OutputMissing {
            path: output.to_path_buf(),
        });
    }

    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    if output.is_dir() {
        let base = output.parent().ok_or_else(|| ArchiveError::NoParentDir {
            path: output.to_path_buf(),
        })?;
        for entry in WalkDir::new(output).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
            write_entry(&mut writer, entry.path(), &entry_name(relative), options)?;
            entries += 1;
        }
    } else {
        let name = output
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("output");
        write_entry(&mut writer, output, name, options)?;
        entries = 1;
    }

    writer.finish()?;
    Ok(entries)
}

/// ZIP entries always use forward slashes, whatever the platform.
fn entry_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_entry(
    writer: &mut ZipWriter<File>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<(), ArchiveError> {
    writer.start_file(name, options)?;
    let mut file = File::open(path)?;
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
    }
    Ok(())
}
