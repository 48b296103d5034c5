//! Request and response transfer operations
//!
//! The two entry points of the protocol. Each checks its validation gates in
//! a fixed order with no partial effect, then mutates the workspace in
//! copy-deliver, copy-archive, delete-original order. There is no rollback:
//! a failure after the first mutation leaves the workspace in a reported,
//! manually repairable state, and re-running the transfer is safe because
//! delivery overwrites.

use crate::error::{HandoffError, HandoffResult, TransferStep};
use crate::lifecycle::TransferDirection;
use crate::role::Role;
use crate::transcript::Transcript;
use crate::unit::UnitName;
use crate::workspace::Workspace;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Where a successful transfer put the artifact
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    /// Destination the artifact was delivered to
    pub delivered_to: PathBuf,
    /// Immutable archive entry recorded for the lifecycle unit
    pub archived_as: PathBuf,
}

/// Send the planner's staged request to a worker role.
///
/// Gates, in order: a request is staged, the lifecycle unit exists, the unit
/// has a requirements artifact, and the staged text references that
/// artifact's path. Then: deliver to the role inbox, archive under the unit,
/// clear the staged original.
pub fn send_request<W: Write>(
    ws: &Workspace,
    role: Role,
    unit: &UnitName,
    transcript: &mut Transcript<W>,
) -> HandoffResult<TransferReceipt> {
    let layout = ws.layout();
    let staged = layout.staged_request();

    if !ws.is_staged(&staged) {
        return Err(HandoffError::MissingStagedRequest { path: staged });
    }

    let registry = ws.registry();
    if !registry.exists(unit) {
        return Err(HandoffError::UnknownUnit {
            unit: unit.to_string(),
            path: layout.unit_dir(unit),
        });
    }
    if !registry.has_requirements(unit) {
        return Err(HandoffError::MissingRequirements {
            unit: unit.to_string(),
            path: layout.requirements_file(unit),
        });
    }

    let reference = layout.requirements_reference(unit);
    let text = ws.read_staged(&staged)?;
    if !text.contains(&reference) {
        return Err(HandoffError::UnboundRequest { reference });
    }

    debug!(%role, %unit, "request transfer validated");

    let inbox = layout.role_request_inbox(role);
    let overwrote = ws
        .deliver(&staged, &inbox)
        .map_err(|e| HandoffError::step_failed(TransferStep::Deliver, &inbox, e))?;
    if overwrote {
        transcript.warn(format!(
            "overwrote an unconsumed request at {}",
            inbox.display()
        ));
    }
    transcript.step(format!("delivered request to {}", inbox.display()));

    let entry = ws
        .archive(unit, TransferDirection::RequestTo, role, &staged)
        .map_err(|e| HandoffError::step_failed(TransferStep::Archive, layout.unit_dir(unit), e))?;
    transcript.step(format!("archived copy as {}", entry.display()));

    ws.clear(&staged)
        .map_err(|e| HandoffError::step_failed(TransferStep::Cleanup, &staged, e))?;
    transcript.step(format!("cleared staged request at {}", staged.display()));

    Ok(TransferReceipt {
        delivered_to: inbox,
        archived_as: entry,
    })
}

/// Send a worker's staged response back to the planner.
///
/// Gates, in order: a response is staged in the role's directory and the
/// lifecycle unit exists. No requirements gate: that gate only applies when
/// work is initiated. Then: deliver to the planner's inbox, archive under
/// the unit, clear the staged original, and clear the worker's delivered
/// request if one is still present (the request is fulfilled).
pub fn send_response<W: Write>(
    ws: &Workspace,
    role: Role,
    unit: &UnitName,
    transcript: &mut Transcript<W>,
) -> HandoffResult<TransferReceipt> {
    let layout = ws.layout();
    let staged = layout.role_response_outbox(role);

    if !ws.is_staged(&staged) {
        return Err(HandoffError::MissingStagedResponse { path: staged });
    }

    if !ws.registry().exists(unit) {
        return Err(HandoffError::UnknownUnit {
            unit: unit.to_string(),
            path: layout.unit_dir(unit),
        });
    }

    debug!(%role, %unit, "response transfer validated");

    let inbox = layout.planner_response_inbox();
    let overwrote = ws
        .deliver(&staged, &inbox)
        .map_err(|e| HandoffError::step_failed(TransferStep::Deliver, &inbox, e))?;
    if overwrote {
        transcript.warn(format!(
            "overwrote an unconsumed response at {}",
            inbox.display()
        ));
    }
    transcript.step(format!("delivered response to {}", inbox.display()));

    let entry = ws
        .archive(unit, TransferDirection::ResponseFrom, role, &staged)
        .map_err(|e| HandoffError::step_failed(TransferStep::Archive, layout.unit_dir(unit), e))?;
    transcript.step(format!("archived copy as {}", entry.display()));

    ws.clear(&staged)
        .map_err(|e| HandoffError::step_failed(TransferStep::Cleanup, &staged, e))?;
    transcript.step(format!("cleared staged response at {}", staged.display()));

    // Best-effort: a still-delivered request means this response fulfils it.
    let request = layout.role_request_inbox(role);
    match ws.clear_if_present(&request) {
        Ok(true) => transcript.step(format!("request fulfilled; cleared {}", request.display())),
        Ok(false) => {}
        Err(e) => transcript.warn(format!(
            "could not clear fulfilled request at {}: {}",
            request.display(),
            e
        )),
    }

    Ok(TransferReceipt {
        delivered_to: inbox,
        archived_as: entry,
    })
}
