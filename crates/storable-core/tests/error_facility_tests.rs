use storable_core::errors::{ErrorKind, ErrorReport, HostError, StorageError};

#[test]
fn test_decode_verifiable_by_kind() {
    let err = StorageError::Decode {
        key: "bad".to_string(),
        reason: "EOF while parsing".to_string(),
    };

    let report: ErrorReport = err.into();

    assert_eq!(report.kind(), ErrorKind::Decode);
    assert_eq!(report.code(), "ERR_DECODE");
    assert_eq!(report.key(), Some("bad"));
    assert!(report.message().contains("Cannot parse the value stored with key 'bad'"));
}

#[test]
fn test_host_rejections_keep_distinct_kinds() {
    let cases = vec![
        (
            HostError::QuotaExceeded {
                required: 9,
                quota: 8,
            },
            ErrorKind::QuotaExceeded,
        ),
        (HostError::Disabled, ErrorKind::StorageDisabled),
        (
            HostError::Unavailable {
                reason: "read-only filesystem".to_string(),
            },
            ErrorKind::StorageUnavailable,
        ),
    ];

    for (source, expected) in cases {
        let report: ErrorReport = StorageError::WriteRejected {
            key: "k".to_string(),
            source,
        }
        .into();
        assert_eq!(report.kind(), expected);
        assert_eq!(report.op(), Some("set_item"));
    }
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ErrorKind::Decode, "ERR_DECODE"),
        (ErrorKind::Encode, "ERR_ENCODE"),
        (ErrorKind::QuotaExceeded, "ERR_QUOTA_EXCEEDED"),
        (ErrorKind::StorageDisabled, "ERR_STORAGE_DISABLED"),
        (ErrorKind::StorageUnavailable, "ERR_STORAGE_UNAVAILABLE"),
        (ErrorKind::Io, "ERR_IO"),
        (ErrorKind::CorruptSnapshot, "ERR_CORRUPT_SNAPSHOT"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_io_error_has_no_key() {
    let err = StorageError::io(
        "write_snapshot",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );

    assert_eq!(err.key(), None);
    let report: ErrorReport = err.into();
    assert_eq!(report.kind(), ErrorKind::Io);
    assert_eq!(report.op(), Some("write_snapshot"));
}

#[test]
fn test_write_rejected_exposes_source() {
    use std::error::Error;

    let err = StorageError::WriteRejected {
        key: "k".to_string(),
        source: HostError::Disabled,
    };

    let source = err.source().expect("should carry host error");
    assert_eq!(source.to_string(), "Storage is disabled");
}
