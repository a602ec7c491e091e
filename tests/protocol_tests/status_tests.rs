//! Status Taxonomy Tests

use kvbridge::protocol::ResponseStatus;

#[test]
fn test_only_success_is_success() {
    assert!(ResponseStatus::Success.success());
    assert!(!ResponseStatus::NotFound.success());
    assert!(!ResponseStatus::Locked.success());
    assert!(!ResponseStatus::Unknown(0).success());
}

#[test]
fn test_from_code_known_codes() {
    assert_eq!(ResponseStatus::from_code(0x00), ResponseStatus::Success);
    assert_eq!(ResponseStatus::from_code(0x01), ResponseStatus::NotFound);
    assert_eq!(ResponseStatus::from_code(0x09), ResponseStatus::Locked);
    assert_eq!(ResponseStatus::from_code(0x82), ResponseStatus::OutOfMemory);
    assert_eq!(ResponseStatus::from_code(0x85), ResponseStatus::ServerBusy);
    assert_eq!(ResponseStatus::from_code(0x86), ResponseStatus::TemporaryFailure);
    assert_eq!(
        ResponseStatus::from_code(0xa4),
        ResponseStatus::SyncWriteReCommitInProgress
    );
}

#[test]
fn test_from_code_unknown_keeps_raw_code() {
    let status = ResponseStatus::from_code(0x1234);
    assert_eq!(status, ResponseStatus::Unknown(0x1234));
    assert_eq!(status.code(), Some(0x1234));
}

#[test]
fn test_local_statuses_have_no_code() {
    assert_eq!(ResponseStatus::Timeout.code(), None);
    assert_eq!(ResponseStatus::Canceled.code(), None);
}

#[test]
fn test_code_matches_from_code_for_wire_statuses() {
    for code in [0x00u16, 0x01, 0x02, 0x03, 0x09, 0x0e, 0x24, 0x82, 0x85, 0x86, 0xa1, 0xa2, 0xa3, 0xa4] {
        assert_eq!(ResponseStatus::from_code(code).code(), Some(code));
    }
}

#[test]
fn test_display_and_from_name_agree() {
    let statuses = [
        ResponseStatus::NotFound,
        ResponseStatus::ServerBusy,
        ResponseStatus::SyncWriteReCommitInProgress,
        ResponseStatus::Timeout,
    ];
    for status in statuses {
        assert_eq!(ResponseStatus::from_name(&status.to_string()), Some(status));
    }
    assert_eq!(ResponseStatus::from_name("locked"), Some(ResponseStatus::Locked));
    assert_eq!(ResponseStatus::from_name("bogus"), None);
}

#[test]
fn test_unknown_display_shows_code() {
    assert_eq!(ResponseStatus::Unknown(0x7f).to_string(), "UNKNOWN(0x7f)");
}
