//! Integration tests for creation variants and per-level options.
//!
//! Covers templates, access control, compression and externally owned
//! transactions, and how each of them reaches every created level.

mod common;

use common::{builder, created, creation_paths, memory_fs};
use longpath::create::{CreateOptions, CreateVariant};
use longpath::native::{codes, AccessControl, NativeCall, NativeError, Transaction};
use longpath::path::PathCanonicalizer;

// =============================================================================
// Templates
// =============================================================================

#[test]
fn test_template_applies_to_every_new_level() {
    let fs = memory_fs();
    fs.add_directory(r"C:\templates\secure").unwrap();
    fs.add_directory(r"C:\data").unwrap();

    let options = CreateOptions::new().with_template(r"C:\templates\secure");
    builder(&fs).create_all(r"C:\data\x\y", &options).unwrap();

    let templated: Vec<(String, String)> = fs
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            NativeCall::CreateFromTemplate { template, path } => Some((template, path)),
            _ => None,
        })
        .collect();
    assert_eq!(
        templated,
        vec![
            (r"\\?\C:\templates\secure".to_string(), r"\\?\C:\data\x".to_string()),
            (r"\\?\C:\templates\secure".to_string(), r"\\?\C:\data\x\y".to_string()),
        ]
    );
}

#[test]
fn test_relative_template_resolves_against_base() {
    let fs = memory_fs();
    fs.add_directory(r"C:\work\tpl").unwrap();

    let options = CreateOptions::new().with_template("tpl");
    builder(&fs).create_all("out", &options).unwrap();

    assert!(fs.calls().iter().any(|call| matches!(
        call,
        NativeCall::CreateFromTemplate { template, .. } if template == r"\\?\C:\work\tpl"
    )));
}

#[test]
fn test_missing_template_fails_at_first_level() {
    let fs = memory_fs();
    let options = CreateOptions::new().with_template(r"C:\nowhere");

    let err = builder(&fs).create_all(r"C:\a\b", &options).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.path(), Some(r"C:\a"));
    assert_eq!(fs.creation_calls(), 1);
}

#[test]
fn test_template_copies_compression() {
    let fs = memory_fs();
    fs.add_directory(r"C:\packed").unwrap();
    fs.add_directory(r"C:\out").unwrap();
    builder(&fs)
        .create_all(r"C:\packed\child", &CreateOptions::new().with_compression(true))
        .unwrap();
    assert!(fs.is_compressed(r"C:\packed\child"));

    let options = CreateOptions::new().with_template(r"C:\packed\child");
    builder(&fs).create_all(r"C:\out\copy", &options).unwrap();
    assert!(fs.is_compressed(r"C:\out\copy"));
}

// =============================================================================
// Variant selection
// =============================================================================

#[test]
fn test_variant_selection() {
    let fs = memory_fs().with_transactions(true);
    let caps = longpath::NativeFileSystem::capabilities(&fs);
    let target = PathCanonicalizer::new()
        .normalize(r"C:\t", longpath::PathFormat::FullPath)
        .unwrap();

    assert_eq!(CreateVariant::select(caps, false, false, &target).unwrap(), CreateVariant::Plain);
    assert_eq!(CreateVariant::select(caps, true, false, &target).unwrap(), CreateVariant::Template);
    assert_eq!(CreateVariant::select(caps, true, true, &target).unwrap(), CreateVariant::Transacted);
}

#[test]
fn test_template_without_support_fails_before_native_calls() {
    let fs = memory_fs().with_templates(false);
    fs.add_directory(r"C:\tpl").unwrap();

    let err = builder(&fs)
        .create_all(r"C:\a", &CreateOptions::new().with_template(r"C:\tpl"))
        .unwrap_err();

    assert!(err.is_unsupported());
    assert!(fs.calls().is_empty());
}

// =============================================================================
// Access control
// =============================================================================

#[test]
fn test_access_control_reaches_every_new_level() {
    let fs = memory_fs();
    fs.add_directory(r"C:\srv").unwrap();
    let acl = AccessControl::new().with_mode(0o750);

    let options = CreateOptions::new().with_access_control(acl.clone());
    builder(&fs).create_all(r"C:\srv\app\logs", &options).unwrap();

    assert_eq!(fs.security_of(r"C:\srv"), None);
    assert_eq!(fs.security_of(r"C:\srv\app"), Some(acl.clone()));
    assert_eq!(fs.security_of(r"C:\srv\app\logs"), Some(acl));
}

#[test]
fn test_access_control_not_acquired_for_existing_target() {
    let fs = memory_fs();
    fs.add_directory(r"C:\exists").unwrap();
    let options =
        CreateOptions::new().with_access_control(AccessControl::new().with_sddl("D:P(A;;GA;;;SY)"));

    let handle = builder(&fs).create_all(r"C:\exists", &options).unwrap();
    assert!(!handle.was_created());
    assert_eq!(fs.security_of(r"C:\exists"), None);
}

// =============================================================================
// Compression
// =============================================================================

#[test]
fn test_compression_of_created_levels_only() {
    let fs = memory_fs();
    fs.add_directory(r"C:\archive").unwrap();

    let options = CreateOptions::new().with_compression(true);
    let handle = builder(&fs).create_all(r"C:\archive\2023\q4", &options).unwrap();

    assert!(!fs.is_compressed(r"C:\archive"));
    for level in created(&handle) {
        assert!(fs.is_compressed(&level), "{level} should be compressed");
    }

    let toggles: Vec<String> = fs
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            NativeCall::SetCompression { path, enabled: true } => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, creation_paths(&fs));
}

#[test]
fn test_compression_skipped_for_concurrently_created_level() {
    let fs = memory_fs();
    fs.create_concurrently(r"C:\raced", longpath::native::EntryKind::Directory);

    let options = CreateOptions::new().with_compression(true);
    builder(&fs).create_all(r"C:\raced\mine", &options).unwrap();

    assert!(!fs.is_compressed(r"C:\raced"));
    assert!(fs.is_compressed(r"C:\raced\mine"));
}

#[test]
fn test_compression_access_denied() {
    let fs = memory_fs();
    fs.fail_compression(r"C:\c\d", NativeError::new(codes::ERROR_ACCESS_DENIED));

    let err = builder(&fs)
        .create_all(r"C:\c\d\e", &CreateOptions::new().with_compression(true))
        .unwrap_err();

    assert!(err.is_access_denied());
    assert_eq!(err.path(), Some(r"C:\c\d"));
    assert!(fs.is_directory(r"C:\c\d"));
    assert!(fs.entry(r"C:\c\d\e").is_none());
}

// =============================================================================
// Transactions
// =============================================================================

#[test]
fn test_transacted_levels_roll_back_together() {
    let fs = memory_fs().with_transactions(true);
    fs.add_directory(r"C:\base").unwrap();
    let tx = Transaction::from_raw(0x51);

    let options = CreateOptions::new().with_transaction(tx);
    let handle = builder(&fs).create_all(r"C:\base\t1\t2", &options).unwrap();

    assert_eq!(handle.transaction(), Some(tx));
    assert_eq!(fs.transaction_of(r"C:\base\t1"), Some(tx));
    assert_eq!(fs.transaction_of(r"C:\base"), None);

    // The caller owns the transaction; rolling it back removes every level.
    assert_eq!(fs.rollback(tx), 2);
    assert!(fs.is_directory(r"C:\base"));
    assert!(fs.entry(r"C:\base\t1").is_none());
}

#[test]
fn test_transacted_levels_survive_commit() {
    let fs = memory_fs().with_transactions(true);
    let tx = Transaction::from_raw(0x52);

    builder(&fs)
        .create_all(r"C:\kept", &CreateOptions::new().with_transaction(tx))
        .unwrap();
    fs.commit(tx);

    assert_eq!(fs.rollback(tx), 0);
    assert!(fs.is_directory(r"C:\kept"));
    assert_eq!(fs.transaction_of(r"C:\kept"), None);
}

#[test]
fn test_transacted_template_creation() {
    let fs = memory_fs().with_transactions(true);
    fs.add_directory(r"C:\tpl").unwrap();
    let tx = Transaction::from_raw(0x53);

    let options = CreateOptions::new().with_template(r"C:\tpl").with_transaction(tx);
    builder(&fs).create_all(r"C:\new", &options).unwrap();

    assert!(fs.calls().iter().any(|call| matches!(
        call,
        NativeCall::CreateTransacted { template: Some(template), transaction, .. }
            if template == r"\\?\C:\tpl" && *transaction == tx
    )));
}

#[test]
fn test_transacted_compression_binds_transaction() {
    let fs = memory_fs().with_transactions(true);
    let tx = Transaction::from_raw(0x54);

    let options = CreateOptions::new().with_transaction(tx).with_compression(true);
    builder(&fs).create_all(r"C:\zipped", &options).unwrap();

    assert!(fs.is_compressed(r"C:\zipped"));
}
