//! File I/O for org files: reading with encoding checks, atomic writes, and
//! directory scanning.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on org files.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads an org file into a string, never mutating the source.
///
/// # Errors
///
/// Returns `FsError::NotFound` / `PermissionDenied` for unreadable files and
/// `FsError::InvalidEncoding` for non-UTF-8 content.
pub fn read_org_text(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;

    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 byte order mark detected; convert to UTF-8".into(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    // Strip UTF-8 BOM if present
    Ok(content
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Writes a file atomically: write to a temp file in the same directory, then
/// rename over the destination.
pub fn write_text(path: &Path, content: &str) -> Result<(), FsError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir
        && !dir.exists()
    {
        std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))?;
    }

    let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new("."))).map_err(|e| {
        FsError::AtomicWrite {
            path: path.into(),
            source: e,
        }
    })?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| FsError::AtomicWrite {
            path: path.into(),
            source: e,
        })?;
    tmp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;
    Ok(())
}

/// Appends a line to an existing file, adding a leading newline when the file
/// does not already end with one.
pub fn append_line(path: &Path, line: &str) -> Result<(), FsError> {
    let mut content = read_org_text(path)?;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');
    write_text(path, &content)
}

/// Returns true for files the synchronizer should process: `.org` extension,
/// not hidden, not an editor scratch or sync-conflict artifact.
pub fn is_note_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !name.ends_with(".org") {
        return false;
    }
    if name.starts_with('.') || name.starts_with('#') || name.ends_with('~') {
        return false;
    }
    if name.contains(".sync-conflict") {
        return false;
    }
    true
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with('.') && n != ".")
}

/// Scans a directory recursively for eligible org files, sorted by path.
///
/// Hidden directories are skipped entirely. A missing directory yields an
/// empty list, since an empty notes directory and an absent one mean the same
/// thing to a sync.
pub fn scan_org_files(dir: &Path) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory { path: dir.into() });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden_dir(e))
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.into());
            match e.into_io_error() {
                Some(io_err) => FsError::from_io(&path, io_err),
                None => FsError::NotADirectory { path },
            }
        })?;
        if entry.file_type().is_file() && is_note_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
