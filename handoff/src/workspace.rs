//! Typed workspace operations
//!
//! The protocol's entire state lives in the directory tree, so the
//! filesystem verbs are pulled into one place with explicit names: stage
//! probes, `deliver`, `archive`, `clear`. Transfers compose these in
//! copy-then-delete order; an interrupted run leaves the artifact present at
//! both ends, never at neither. `fs::rename` is deliberately not offered.

use crate::layout::WorkspaceLayout;
use crate::lifecycle::{self, LifecycleRegistry, TransferDirection};
use crate::role::Role;
use crate::unit::UnitName;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A handoff workspace rooted at one project directory
pub struct Workspace {
    layout: WorkspaceLayout,
}

impl Workspace {
    /// Open a workspace at the given project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: WorkspaceLayout::new(root),
        }
    }

    /// The resolved layout
    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Lifecycle predicates for this workspace
    pub fn registry(&self) -> LifecycleRegistry<'_> {
        LifecycleRegistry::new(&self.layout)
    }

    /// Is an artifact staged at this path?
    pub fn is_staged(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Read a staged artifact's text
    pub fn read_staged(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Copy a staged artifact to its destination, creating the destination's
    /// directory on first use. Returns whether an unconsumed artifact was
    /// overwritten. Overwriting is permitted: a crash between copy and
    /// delete must be repairable by re-running the transfer.
    pub fn deliver(&self, src: &Path, dest: &Path) -> io::Result<bool> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let overwrote = dest.exists();
        fs::copy(src, dest)?;
        debug!(src = %src.display(), dest = %dest.display(), overwrote, "delivered artifact");
        Ok(overwrote)
    }

    /// Copy a staged artifact into a unit's archive under a collision-free
    /// timestamped name. Returns the archive entry's path.
    pub fn archive(
        &self,
        unit: &UnitName,
        direction: TransferDirection,
        role: Role,
        src: &Path,
    ) -> io::Result<PathBuf> {
        let stamp = lifecycle::archive_stamp();
        let dest =
            lifecycle::unique_archive_path(&self.layout.unit_dir(unit), direction, role, &stamp);
        fs::copy(src, &dest)?;
        debug!(entry = %dest.display(), "archived artifact");
        Ok(dest)
    }

    /// Delete a staged artifact after it has been copied onward
    pub fn clear(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)?;
        debug!(path = %path.display(), "cleared staged artifact");
        Ok(())
    }

    /// Delete an artifact if it is present; absence is not an error.
    /// Returns whether anything was removed.
    pub fn clear_if_present(&self, path: &Path) -> io::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "cleared artifact");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
