//! File-based handoff protocol between a planner and fixed worker roles
//!
//! A planner stages a request in `.plan/`, binds it to a lifecycle unit
//! under `.lifecycle/`, and hands it to one of the worker roles (dev, test,
//! review, doc). The worker later stages a response in its own directory and
//! hands it back. Every transfer is a single synchronous invocation that
//! validates its gates, copies the artifact to its destination and into the
//! unit's append-only archive, and only then deletes the staged original.
//!
//! There is no daemon, no locking, and no network: the directory tree is the
//! whole protocol state, and the CLI in `main.rs` is the only driver.
//!
//! ```bash
//! handoff send-request dev issue-42
//! handoff send-response dev issue-42
//! ```

pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod role;
pub mod transcript;
pub mod transfer;
pub mod unit;
pub mod workspace;

pub use error::{HandoffError, HandoffResult, TransferStep};
pub use layout::WorkspaceLayout;
pub use lifecycle::{LifecycleRegistry, TransferDirection};
pub use role::Role;
pub use transcript::Transcript;
pub use transfer::{send_request, send_response, TransferReceipt};
pub use unit::UnitName;
pub use workspace::Workspace;
