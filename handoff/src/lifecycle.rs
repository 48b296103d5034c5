//! Lifecycle folder registry and archive naming
//!
//! A lifecycle unit is a directory under `.lifecycle/` acting as the audit
//! trail and validation gate for one piece of work. The registry only
//! answers existence questions; it never mutates anything. Archive entries
//! are written by the transfer operations and, once written, are never
//! touched again.

use crate::layout::WorkspaceLayout;
use crate::role::Role;
use crate::unit::UnitName;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Archive timestamp format, second resolution, local time
const ARCHIVE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Direction tag encoded into an archive entry's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    /// Planner → worker, archived as `<TS>_request_to_<role>.md`
    RequestTo,
    /// Worker → planner, archived as `<TS>_response_from_<role>.md`
    ResponseFrom,
}

impl TransferDirection {
    /// The tag as it appears in archive file names
    pub fn tag(&self) -> &'static str {
        match self {
            Self::RequestTo => "request_to",
            Self::ResponseFrom => "response_from",
        }
    }
}

impl std::fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Current archive timestamp, `YYYYMMDD_HHMMSS`
pub fn archive_stamp() -> String {
    Local::now().format(ARCHIVE_STAMP_FORMAT).to_string()
}

/// Archive entry file name for one transfer.
///
/// `attempt` 1 yields `<stamp>_<tag>_<role>.md`; later attempts splice a
/// counter into the timestamp field (`<stamp>-2_<tag>_<role>.md`) so a
/// same-second double transfer never overwrites an earlier entry while the
/// `*_<tag>_<role>.md` shape stays intact.
pub fn archive_file_name(
    direction: TransferDirection,
    role: Role,
    stamp: &str,
    attempt: u32,
) -> String {
    if attempt <= 1 {
        format!("{}_{}_{}.md", stamp, direction.tag(), role)
    } else {
        format!("{}-{}_{}_{}.md", stamp, attempt, direction.tag(), role)
    }
}

/// First archive path under `unit_dir` that does not exist yet
pub fn unique_archive_path(
    unit_dir: &Path,
    direction: TransferDirection,
    role: Role,
    stamp: &str,
) -> PathBuf {
    let mut attempt = 1;
    loop {
        let candidate = unit_dir.join(archive_file_name(direction, role, stamp, attempt));
        if !candidate.exists() {
            return candidate;
        }
        attempt += 1;
    }
}

/// Predicate layer over the lifecycle directory tree
pub struct LifecycleRegistry<'a> {
    layout: &'a WorkspaceLayout,
}

impl<'a> LifecycleRegistry<'a> {
    pub fn new(layout: &'a WorkspaceLayout) -> Self {
        Self { layout }
    }

    /// Does the lifecycle unit exist?
    pub fn exists(&self, unit: &UnitName) -> bool {
        self.layout.unit_dir(unit).is_dir()
    }

    /// Does the unit contain a requirements artifact?
    pub fn has_requirements(&self, unit: &UnitName) -> bool {
        self.layout.requirements_file(unit).is_file()
    }
}
