//! End-to-end tests for the handoff protocol
//!
//! Exercises complete workflows against a real temporary workspace:
//! - the full request → response round trip
//! - validation failures that must leave the workspace untouched
//! - archive naming, overwrite warnings, and clean retry behavior

use handoff::{
    send_request, send_response, HandoffError, Role, Transcript, UnitName, Workspace,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn transcript() -> Transcript<Vec<u8>> {
    Transcript::new(Vec::new())
}

/// Create `.lifecycle/<unit>/requirements.md` and stage a bound request
fn stage_bound_request(ws: &Workspace, unit: &UnitName) {
    let layout = ws.layout();
    fs::create_dir_all(layout.unit_dir(unit)).unwrap();
    fs::write(layout.requirements_file(unit), "the requirements").unwrap();
    fs::create_dir_all(layout.plan_dir()).unwrap();
    fs::write(
        layout.staged_request(),
        format!("see {}", layout.requirements_reference(unit)),
    )
    .unwrap();
}

/// Names of archive entries recorded for a unit
fn archive_entries(ws: &Workspace, unit: &UnitName) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(ws.layout().unit_dir(unit))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n != "requirements.md")
        .collect();
    names.sort();
    names
}

/// Every entry under the workspace root, for zero-write assertions
fn snapshot(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, acc: &mut Vec<String>) {
        if !dir.is_dir() {
            return;
        }
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            acc.push(path.strip_prefix(root).unwrap().display().to_string());
            if path.is_dir() {
                walk(&path, root, acc);
            }
        }
    }
    let mut acc = Vec::new();
    walk(root, root, &mut acc);
    acc.sort();
    acc
}

#[test]
fn test_full_round_trip() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    // Planner side: requirements authored, request staged and bound.
    stage_bound_request(&ws, &unit);
    assert_eq!(
        fs::read_to_string(layout.staged_request()).unwrap(),
        "see .lifecycle/demo/requirements.md"
    );

    // Request transfer to dev.
    send_request(&ws, Role::Dev, &unit, &mut transcript()).unwrap();

    assert!(layout.role_request_inbox(Role::Dev).is_file());
    assert!(!layout.staged_request().exists());
    let entries = archive_entries(&ws, &unit);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with("_request_to_dev.md"));

    // Worker side: response staged.
    fs::write(layout.role_response_outbox(Role::Dev), "done, see diff").unwrap();

    // Response transfer back to the planner.
    send_response(&ws, Role::Dev, &unit, &mut transcript()).unwrap();

    assert_eq!(
        fs::read_to_string(layout.planner_response_inbox()).unwrap(),
        "done, see diff"
    );
    assert!(!layout.role_response_outbox(Role::Dev).exists());
    assert!(!layout.role_request_inbox(Role::Dev).exists());

    let entries = archive_entries(&ws, &unit);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|n| n.ends_with("_request_to_dev.md")));
    assert!(entries.iter().any(|n| n.ends_with("_response_from_dev.md")));
}

#[test]
fn test_unknown_role_never_reaches_the_filesystem() {
    // Role validation happens at parse time, before any workspace access.
    for bad in ["ops", "planner", "", "Dev "] {
        assert!(matches!(
            bad.parse::<Role>(),
            Err(HandoffError::UnknownRole { .. })
        ));
    }
}

#[test]
fn test_unit_names_with_separators_write_nothing() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    stage_bound_request(&ws, &UnitName::new("demo").unwrap());
    let before = snapshot(dir.path());

    for bad in ["a/b", "a\\b", "../demo", ""] {
        assert!(matches!(
            UnitName::new(bad),
            Err(HandoffError::InvalidUnitName { .. })
        ));
    }

    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_missing_requirements_blocks_request_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    fs::create_dir_all(layout.unit_dir(&unit)).unwrap();
    fs::create_dir_all(layout.plan_dir()).unwrap();
    fs::write(
        layout.staged_request(),
        "see .lifecycle/demo/requirements.md",
    )
    .unwrap();
    let before = snapshot(dir.path());

    let err = send_request(&ws, Role::Dev, &unit, &mut transcript()).unwrap_err();
    assert!(matches!(err, HandoffError::MissingRequirements { .. }));
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_unbound_request_blocks_transfer() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let unit = UnitName::new("demo").unwrap();
    stage_bound_request(&ws, &unit);
    fs::write(
        ws.layout().staged_request(),
        "mentions .lifecycle/other/requirements.md only",
    )
    .unwrap();
    let before = snapshot(dir.path());

    let err = send_request(&ws, Role::Dev, &unit, &mut transcript()).unwrap_err();
    assert!(matches!(err, HandoffError::UnboundRequest { .. }));
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_response_requires_existing_unit_only() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    fs::create_dir_all(layout.role_dir(Role::Review)).unwrap();
    fs::write(layout.role_response_outbox(Role::Review), "lgtm").unwrap();

    // Unit missing: rejected.
    let err = send_response(&ws, Role::Review, &unit, &mut transcript()).unwrap_err();
    assert!(matches!(err, HandoffError::UnknownUnit { .. }));

    // Unit present but without requirements.md: accepted.
    fs::create_dir_all(layout.unit_dir(&unit)).unwrap();
    send_response(&ws, Role::Review, &unit, &mut transcript()).unwrap();
    assert_eq!(
        fs::read_to_string(layout.planner_response_inbox()).unwrap(),
        "lgtm"
    );
}

#[test]
fn test_same_second_transfers_keep_both_archive_entries() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    stage_bound_request(&ws, &unit);
    send_request(&ws, Role::Dev, &unit, &mut transcript()).unwrap();

    // Re-stage and send again immediately; the archive must not lose the
    // first entry even within the same second.
    fs::write(
        layout.staged_request(),
        "see .lifecycle/demo/requirements.md (v2)",
    )
    .unwrap();
    let mut t = transcript();
    send_request(&ws, Role::Dev, &unit, &mut t).unwrap();

    let entries = archive_entries(&ws, &unit);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|n| n.ends_with("_request_to_dev.md")));

    // The second delivery overwrote the unconsumed first one, loudly.
    let out = String::from_utf8(t.into_inner()).unwrap();
    assert!(out.contains("! overwrote an unconsumed request"));
}

#[test]
fn test_response_retry_without_new_staging_fails_cleanly() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    fs::create_dir_all(layout.unit_dir(&unit)).unwrap();
    fs::create_dir_all(layout.role_dir(Role::Dev)).unwrap();
    fs::write(layout.role_response_outbox(Role::Dev), "first answer").unwrap();
    send_response(&ws, Role::Dev, &unit, &mut transcript()).unwrap();

    let err = send_response(&ws, Role::Dev, &unit, &mut transcript()).unwrap_err();
    assert!(matches!(err, HandoffError::MissingStagedResponse { .. }));
    assert_eq!(
        fs::read_to_string(layout.planner_response_inbox()).unwrap(),
        "first answer"
    );
}

#[test]
fn test_requests_fan_out_to_every_role() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let layout = ws.layout();
    let unit = UnitName::new("demo").unwrap();

    for role in Role::ALL {
        stage_bound_request(&ws, &unit);
        send_request(&ws, role, &unit, &mut transcript()).unwrap();
        assert!(layout.role_request_inbox(role).is_file());
    }

    assert_eq!(archive_entries(&ws, &unit).len(), Role::ALL.len());
}
