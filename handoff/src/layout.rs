//! Workspace layout resolver
//!
//! Computes every well-known path in a handoff workspace from a single
//! anchor (the project root). Pure path arithmetic: nothing here touches the
//! filesystem, and the same anchor always resolves to the same paths. Role
//! directories are created lazily by the delivery step, never here.

use crate::role::Role;
use crate::unit::UnitName;
use std::path::{Path, PathBuf};

/// Planner's shared planning directory
pub const PLAN_DIR: &str = ".plan";
/// Root directory holding all lifecycle units
pub const LIFECYCLE_DIR: &str = ".lifecycle";
/// Staged/delivered request file name
pub const REQUEST_FILE: &str = "request.md";
/// Staged/delivered response file name
pub const RESPONSE_FILE: &str = "response.md";
/// Requirements artifact file name inside a lifecycle unit
pub const REQUIREMENTS_FILE: &str = "requirements.md";

/// Resolved paths for one workspace anchor
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    /// Resolve the layout for a project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The workspace anchor
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The planner's directory, `.plan/`
    pub fn plan_dir(&self) -> PathBuf {
        self.root.join(PLAN_DIR)
    }

    /// A worker's directory, `.<role>/`
    pub fn role_dir(&self, role: Role) -> PathBuf {
        self.root.join(role.dir_name())
    }

    /// Root of all lifecycle units, `.lifecycle/`
    pub fn lifecycle_root(&self) -> PathBuf {
        self.root.join(LIFECYCLE_DIR)
    }

    /// `.lifecycle/<unit>/`
    pub fn unit_dir(&self, unit: &UnitName) -> PathBuf {
        self.lifecycle_root().join(unit.as_str())
    }

    /// `.lifecycle/<unit>/requirements.md`
    pub fn requirements_file(&self, unit: &UnitName) -> PathBuf {
        self.unit_dir(unit).join(REQUIREMENTS_FILE)
    }

    /// The planner's staged outgoing request, `.plan/request.md`
    pub fn staged_request(&self) -> PathBuf {
        self.plan_dir().join(REQUEST_FILE)
    }

    /// The planner's inbox for responses, `.plan/response.md`
    pub fn planner_response_inbox(&self) -> PathBuf {
        self.plan_dir().join(RESPONSE_FILE)
    }

    /// A worker's inbox, `.<role>/request.md`
    pub fn role_request_inbox(&self, role: Role) -> PathBuf {
        self.role_dir(role).join(REQUEST_FILE)
    }

    /// A worker's staged outgoing response, `.<role>/response.md`
    pub fn role_response_outbox(&self, role: Role) -> PathBuf {
        self.role_dir(role).join(RESPONSE_FILE)
    }

    /// The reference string a staged request must contain to be bound to a
    /// unit's requirements artifact. Always forward-slash, regardless of
    /// platform, since it is matched as text rather than resolved as a path.
    pub fn requirements_reference(&self, unit: &UnitName) -> String {
        format!("{}/{}/{}", LIFECYCLE_DIR, unit.as_str(), REQUIREMENTS_FILE)
    }
}
