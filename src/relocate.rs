/// Folder provisioning and file relocation primitives.
///
/// This module performs the filesystem side of a sort run: it creates
/// destination directories level by level and moves or copies one file at a
/// time into its resolved destination. Both operations honor the dry-run
/// flag, and every failure is a typed value so the walker can apply its
/// continue-or-abort policy in one place.
use crate::config::MoveOrCopy;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while provisioning folders or relocating files.
#[derive(Debug)]
pub enum SortError {
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move or copy a file to its destination.
    RelocationFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },
    /// Failed to enumerate a directory during the walk.
    ScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The walk was interrupted through its cancellation token.
    Cancelled,
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::RelocationFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to relocate {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
            Self::ScanFailed { path, source } => {
                write!(f, "Failed to scan {}: {}", path.display(), source)
            }
            Self::Cancelled => write!(f, "Sort cancelled"),
        }
    }
}

impl std::error::Error for SortError {}

/// Result type for sort engine operations.
pub type SortResult<T> = Result<T, SortError>;

/// What a folder provisioning call found at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    /// The directory was absent; it was created (or would be, on a dry run).
    Created,
    /// The directory already exists.
    AlreadyExists,
}

impl std::fmt::Display for ProvisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::AlreadyExists => write!(f, "already exists"),
        }
    }
}

/// Ensure one destination directory level exists.
///
/// Creates only the single leaf; parents must already exist, which holds when
/// the caller provisions year-then-month in order. When `execute` is false
/// the path is evaluated but never created.
///
/// # Errors
///
/// Returns `SortError::DirectoryCreationFailed` if creation fails.
pub fn provision_dir(path: &Path, execute: bool) -> SortResult<ProvisionStatus> {
    if path.exists() {
        return Ok(ProvisionStatus::AlreadyExists);
    }

    if execute {
        fs::create_dir(path).map_err(|e| SortError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    Ok(ProvisionStatus::Created)
}

/// The decision for one file against its destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationPlan {
    /// A file with this name already exists at the destination; never
    /// overwritten.
    AlreadyExists { target: PathBuf },
    /// The file is already in its destination directory.
    SamePath,
    /// The file can be relocated to `target`.
    Proceed { target: PathBuf },
}

/// Decide whether a file can be relocated into `dest_dir`.
///
/// The collision check runs first: a pre-existing file at the target path
/// always prevents relocation. A file already at its computed target is
/// recognized as correctly placed.
///
/// # Errors
///
/// Returns `SortError::RelocationFailed` if the source path has no file name
/// component.
pub fn plan_relocation(source: &Path, dest_dir: &Path) -> SortResult<RelocationPlan> {
    let file_name = source
        .file_name()
        .ok_or_else(|| SortError::RelocationFailed {
            source_path: source.to_path_buf(),
            destination: dest_dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;

    let target = dest_dir.join(file_name);

    if target.exists() {
        return Ok(RelocationPlan::AlreadyExists { target });
    }

    if source == target {
        return Ok(RelocationPlan::SamePath);
    }

    Ok(RelocationPlan::Proceed { target })
}

/// Move or copy a file to its planned target path.
///
/// A move is a rename where possible, with a copy-and-delete fallback for
/// targets on a different filesystem. A copy preserves permissions (via
/// `fs::copy`) and carries the source modification time to the destination.
///
/// # Errors
///
/// Returns `SortError::RelocationFailed` if the underlying filesystem
/// operation fails.
pub fn execute_relocation(source: &Path, target: &Path, mode: MoveOrCopy) -> SortResult<()> {
    match mode {
        MoveOrCopy::Move => move_file(source, target),
        MoveOrCopy::Copy => copy_file(source, target),
    }
}

fn move_file(source: &Path, target: &Path) -> SortResult<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    // Rename fails across filesystems; fall back to copy and delete.
    copy_file(source, target)?;
    fs::remove_file(source).map_err(|e| SortError::RelocationFailed {
        source_path: source.to_path_buf(),
        destination: target.to_path_buf(),
        source: e,
    })
}

fn copy_file(source: &Path, target: &Path) -> SortResult<()> {
    fs::copy(source, target).map_err(|e| SortError::RelocationFailed {
        source_path: source.to_path_buf(),
        destination: target.to_path_buf(),
        source: e,
    })?;

    // fs::copy preserves permissions only; carry the modification time over
    // best-effort.
    if let Ok(metadata) = fs::metadata(source)
        && let Ok(modified) = metadata.modified()
        && let Ok(dest_file) = fs::File::options().write(true).open(target)
    {
        let _ = dest_file.set_modified(modified);
    }

    Ok(())
}
