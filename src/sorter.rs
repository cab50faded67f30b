//! Recursive traversal and placement engine.
//!
//! `MediaSorter` walks the source tree depth-first in native enumeration
//! order, classifies each file, derives and provisions its destination, and
//! relocates it. Counters track photos and videos that were (or, on a dry
//! run, would be) relocated, plus every directory descended into below the
//! root. The `proceed_on_error` policy is applied here and nowhere else: a
//! folder-creation failure abandons the affected file and the walk continues,
//! while a relocation or scan failure either logs-and-continues or aborts the
//! whole run with the counters accumulated so far.

use crate::classify::{Classification, Classifier, MediaKind};
use crate::config::{CompiledConfig, MoveOrCopy};
use crate::destination::{creation_time, month_dir, year_dir};
use crate::relocate::{
    RelocationPlan, SortError, SortResult, execute_relocation, plan_relocation, provision_dir,
};
use chrono::{DateTime, Local};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// Cooperative cancellation flag for a sort run.
///
/// Cloned handles share one flag; the walker checks it at every
/// directory-entry boundary, so cancellation lands between files and never
/// mid-operation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the walk stop at the next entry boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The aggregated result of one sort invocation.
///
/// Counters reflect files that were (or on a dry run, would be) relocated and
/// directories descended into; they are meaningful even when `success` is
/// false, in which case they cover the portion of the tree walked before the
/// abort and `error_detail` names the triggering failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub success: bool,
    pub photo_count: u64,
    pub video_count: u64,
    pub folder_count: u64,
    pub error_detail: Option<String>,
}

/// Sort a source tree according to a compiled configuration.
pub fn sort(config: &CompiledConfig) -> SortOutcome {
    MediaSorter::new(config).sort()
}

/// The traversal engine for one sort run.
pub struct MediaSorter<'a> {
    config: &'a CompiledConfig,
    classifier: Classifier<'a>,
    cancel: CancelToken,
    photo_count: u64,
    video_count: u64,
    folder_count: u64,
}

impl<'a> MediaSorter<'a> {
    pub fn new(config: &'a CompiledConfig) -> Self {
        Self::with_cancel_token(config, CancelToken::new())
    }

    /// Build a sorter whose walk can be interrupted through `cancel`.
    pub fn with_cancel_token(config: &'a CompiledConfig, cancel: CancelToken) -> Self {
        Self {
            config,
            classifier: Classifier::new(
                &config.skip_patterns,
                &config.photo_extensions,
                &config.video_extensions,
            ),
            cancel,
            photo_count: 0,
            video_count: 0,
            folder_count: 0,
        }
    }

    /// Walk the source tree and return the aggregated outcome.
    pub fn sort(mut self) -> SortOutcome {
        let config = self.config;
        info!("Sorting media under {}", config.source_path.display());
        if !config.execute {
            info!("Dry run: no files or folders will be modified");
        }

        match self.walk_dir(&config.source_path) {
            Ok(()) => {
                info!(
                    "Processed {} photo files and {} video files across {} folders",
                    self.photo_count, self.video_count, self.folder_count
                );
                self.into_outcome(true, None)
            }
            Err(e) => {
                error!("Sort aborted: {}", e);
                let detail = e.to_string();
                self.into_outcome(false, Some(detail))
            }
        }
    }

    fn into_outcome(self, success: bool, error_detail: Option<String>) -> SortOutcome {
        SortOutcome {
            success,
            photo_count: self.photo_count,
            video_count: self.video_count,
            folder_count: self.folder_count,
            error_detail,
        }
    }

    /// Depth-first walk of one directory.
    ///
    /// Returns an error only for failures the configured policy does not
    /// absorb; the caller unwinds with partial counters intact.
    fn walk_dir(&mut self, dir: &Path) -> SortResult<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                return self.absorb_or_abort(SortError::ScanFailed {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        };

        for entry in entries {
            if self.cancel.is_cancelled() {
                warn!("Cancellation requested, stopping walk");
                return Err(SortError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.absorb_or_abort(SortError::ScanFailed {
                        path: dir.to_path_buf(),
                        source: e,
                    })?;
                    continue;
                }
            };

            let Ok(file_type) = entry.file_type() else {
                warn!("Cannot determine type of {}, skipping", entry.path().display());
                continue;
            };

            if file_type.is_dir() {
                debug!("Found dir: {}", entry.path().display());
                self.folder_count += 1;
                self.walk_dir(&entry.path())?;
            } else if file_type.is_file() {
                self.process_file(&entry)?;
            }
        }

        Ok(())
    }

    /// Classify one file and, if it is media, place it.
    fn process_file(&mut self, entry: &DirEntry) -> SortResult<()> {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        debug!("Found file: {}", path.display());

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Cannot stat {}: {}, skipping", path.display(), e);
                return Ok(());
            }
        };

        let kind = match self.classifier.classify(&name, metadata.len()) {
            Classification::Skip(reason) => {
                debug!("Skipping {}: {}", name, reason);
                return Ok(());
            }
            Classification::Media(kind) => kind,
        };

        let created = creation_time(&metadata);
        debug!(
            "Created date of {} is {}",
            name,
            created.format("%Y-%m-%d %H:%M:%S")
        );

        let base = match kind {
            MediaKind::Photo => self.config.target_photo_path.as_path(),
            MediaKind::Video => self.config.target_video_path.as_path(),
        };

        let Some(dest_dir) = self.provision_destination(base, created) else {
            // Destination could not be provisioned; this file is abandoned
            // and the walk continues.
            return Ok(());
        };

        match plan_relocation(&path, &dest_dir) {
            Ok(RelocationPlan::AlreadyExists { target }) => {
                debug!("Skipping {}: already exists at {}", name, target.display());
                Ok(())
            }
            Ok(RelocationPlan::SamePath) => {
                debug!("Skipping {}: already in place", name);
                Ok(())
            }
            Ok(RelocationPlan::Proceed { target }) => {
                match kind {
                    MediaKind::Photo => self.photo_count += 1,
                    MediaKind::Video => self.video_count += 1,
                }
                if self.config.execute {
                    let verb = match self.config.move_or_copy {
                        MoveOrCopy::Move => "Moving",
                        MoveOrCopy::Copy => "Copying",
                    };
                    debug!("{} {} {} to {}", verb, kind.label(), path.display(), target.display());
                    if let Err(e) = execute_relocation(&path, &target, self.config.move_or_copy) {
                        return self.absorb_or_abort(e);
                    }
                } else {
                    debug!(
                        "Would relocate {} {} to {}",
                        kind.label(),
                        path.display(),
                        target.display()
                    );
                }
                Ok(())
            }
            Err(e) => self.absorb_or_abort(e),
        }
    }

    /// Provision the year folder and, when configured, the month folder
    /// inside it. Returns the final destination directory, or `None` when a
    /// level could not be created.
    fn provision_destination(&self, base: &Path, created: DateTime<Local>) -> Option<PathBuf> {
        let year = year_dir(base, created);
        match provision_dir(&year, self.config.execute) {
            Ok(status) => debug!("Year folder {}: {}", year.display(), status),
            Err(e) => {
                warn!("{}, file abandoned", e);
                return None;
            }
        }

        if !self.config.use_month {
            return Some(year);
        }

        let month = month_dir(&year, created, self.config.use_month_name);
        match provision_dir(&month, self.config.execute) {
            Ok(status) => debug!("Month folder {}: {}", month.display(), status),
            Err(e) => {
                warn!("{}, file abandoned", e);
                return None;
            }
        }
        Some(month)
    }

    /// The single place the `proceed_on_error` policy is applied.
    fn absorb_or_abort(&self, error: SortError) -> SortResult<()> {
        if self.config.proceed_on_error && !matches!(error, SortError::Cancelled) {
            warn!("{}, continuing", error);
            Ok(())
        } else {
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_cancel_token_default_is_live() {
        assert!(!CancelToken::default().is_cancelled());
    }
}
