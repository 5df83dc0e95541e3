use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

// Versioned scene file: <base>_v<digits>.ma
// Examples: "lighting_v003.ma", "ep_01_anim_V12.MA"
static VERSIONED_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*)_v(\d+)\.(ma)$").unwrap());

// Same decomposition applied to a file stem once the extension is gone
static VERSIONED_STEM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(.*)_v\d+$").unwrap());

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {path}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A scene file whose name carries a version suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedFile {
    pub path: PathBuf,
    /// Full file name, e.g. `lighting_v003.ma`
    pub file_name: String,
    /// Name without version suffix or extension, e.g. `lighting`
    pub base_name: String,
    pub version: u64,
    /// Extension as written on disk, without the dot
    pub extension: String,
}

impl VersionedFile {
    /// File name without extension, e.g. `lighting_v003`
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(&self.extension)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.file_name)
    }
}

/// Parse a file name as `<base>_v<digits>.ma`.
///
/// Returns `None` when the name does not match or the version does not fit
/// in a `u64`.
pub fn parse_versioned_name(file_name: &str) -> Option<(String, u64, String)> {
    let captures = VERSIONED_FILE_REGEX.captures(file_name)?;

    let base_name = captures.get(1)?.as_str().to_string();
    let version: u64 = captures.get(2)?.as_str().parse().ok()?;
    let extension = captures.get(3)?.as_str().to_string();

    Some((base_name, version, extension))
}

/// Split a file stem such as `lighting_v003` into its unversioned base
pub fn unversioned_base(stem: &str) -> Option<&str> {
    VERSIONED_STEM_REGEX
        .captures(stem)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Recursively collect every versioned scene file under `root`, sorted by path
pub fn scan_versioned_files(root: &Path) -> Result<Vec<VersionedFile>, ScannerError> {
    debug!(path = ?root, "Scanning for versioned scene files");

    if !root.exists() {
        return Err(ScannerError::PathNotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(ScannerError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            // An unlistable root is fatal; anything deeper is skipped
            Err(e) if dir.as_path() == root => {
                return Err(if e.kind() == std::io::ErrorKind::PermissionDenied {
                    ScannerError::PermissionDenied(dir)
                } else {
                    ScannerError::IoError { path: dir, source: e }
                });
            }
            Err(e) => {
                warn!(path = ?dir, error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = ?dir, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();

            trace!(entry = ?path, "Examining entry");

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!(path = ?path, error = %e, "Skipping entry with unknown type");
                    continue;
                }
            };
            if file_type.is_dir() {
                pending.push(path);
                continue;
            }

            // Linked directories are listed but never descended into
            if file_type.is_symlink() && path.is_dir() {
                trace!(path = ?path, "Skipping linked directory");
                continue;
            }

            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().to_string(),
                None => continue,
            };

            let Some((base_name, version, extension)) = parse_versioned_name(&name) else {
                trace!(name = %name, "Skipping unversioned file");
                continue;
            };

            debug!(name = %name, version, "Found versioned file");
            files.push(VersionedFile {
                path,
                file_name: name,
                base_name,
                version,
                extension,
            });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(count = files.len(), "Scan complete");

    Ok(files)
}

/// Pick the file with the highest version.
///
/// Comparison is strictly greater-than over the input order, so with the
/// path-sorted output of [`scan_versioned_files`] ties resolve to the
/// lexicographically smallest path.
pub fn select_latest(files: &[VersionedFile]) -> Option<&VersionedFile> {
    let mut best: Option<&VersionedFile> = None;

    for file in files {
        if best.map_or(true, |current| file.version > current.version) {
            best = Some(file);
        }
    }

    if let Some(latest) = best {
        debug!(path = ?latest.path, version = latest.version, "Selected latest version");
    }

    best
}
