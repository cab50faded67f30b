//! mediasort - Sort photos and videos into date-based folder trees
//!
//! This library scans a source directory tree, classifies files into photo
//! and video categories by extension, and relocates (moves or copies) each
//! file into a destination tree organized by the file's creation date, with
//! dry-run support and configurable year/month granularity.

pub mod classify;
pub mod cli;
pub mod config;
pub mod destination;
pub mod output;
pub mod relocate;
pub mod sorter;

pub use classify::{Classification, Classifier, MediaKind, SkipReason};
pub use config::{CompiledConfig, ConfigError, MoveOrCopy, SortConfig};
pub use destination::{creation_time, month_name, resolve_destination};
pub use relocate::{ProvisionStatus, RelocationPlan, SortError, SortResult};
pub use sorter::{CancelToken, MediaSorter, SortOutcome, sort};

pub use cli::{Cli, run_cli};
