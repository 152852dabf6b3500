//! End-to-end notification tests
//!
//! Drives the notifier the way the gateway does: factory from settings, then
//! deliveries of received message units into a temporary target directory.

use signal_notifier::{MessageDeliverer, SignalNotifierFactory, Stage};
use signal_types::{
    Description, ElementNode, ErrorDetail, ErrorSignal, MessageUnit, Receipt, Severity, UserMessage,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tempfile::{tempdir, TempDir};

const SMD_NS: &str = "http://holodeck-b2b.org/schemas/2015/08/smd";

fn factory(target: &Path, include_receipt_content: bool) -> SignalNotifierFactory {
    let mut settings = HashMap::new();
    settings.insert("targetDirectory".to_string(), target.display().to_string());
    if include_receipt_content {
        settings.insert("includeReceiptContent".to_string(), "yes".to_string());
    }
    SignalNotifierFactory::init(&settings).unwrap()
}

fn setup() -> (TempDir, SignalNotifierFactory) {
    let dir = tempdir().unwrap();
    let factory = factory(dir.path(), false);
    (dir, factory)
}

fn receipt(message_id: &str) -> MessageUnit {
    MessageUnit::Receipt(Receipt {
        message_id: message_id.to_string(),
        ref_to_message_id: "ref-1".to_string(),
        timestamp: UNIX_EPOCH + Duration::from_millis(1_760_861_730_123),
        content: vec![
            ElementNode::new("Ack").with_namespace("urn:ack").with_text("ok"),
            ElementNode::new("Trailer").with_namespace("urn:ack"),
        ],
    })
}

fn error_signal(message_id: &str) -> MessageUnit {
    MessageUnit::Error(ErrorSignal {
        message_id: message_id.to_string(),
        ref_to_message_id: String::new(),
        timestamp: UNIX_EPOCH + Duration::from_secs(1_760_861_730),
        errors: vec![ErrorDetail {
            code: "EBMS:0004".to_string(),
            severity: Severity::Failure,
            detail: "Payload could not be processed".to_string(),
            short_description: "Other".to_string(),
            category: String::new(),
            origin: "ebMS".to_string(),
            description: Some(Description {
                text: "Unknown error".to_string(),
                language: "en".to_string(),
            }),
        }],
    })
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_receipt_written_to_smd_file() {
    let (dir, factory) = setup();
    let notifier = factory.create_deliverer();

    let path = notifier.notify(&receipt("msg1")).unwrap();
    assert_eq!(path, dir.path().join("msg1.smd.xml"));

    let xml = fs::read_to_string(&path).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    assert!(xml.contains(&format!(r#"<SignalMessage xmlns="{}">"#, SMD_NS)));
    assert!(xml.contains("<Timestamp>2025-10-19T08:15:30.123Z</Timestamp>"));
    assert!(xml.contains("<MessageId>msg1</MessageId>"));
    assert!(xml.contains("<RefToMessageId>ref-1</RefToMessageId>"));
    assert!(xml.contains(r#"<Ack xmlns="urn:ack">ok</Ack>"#));
    // First-child mode drops the rest of the content
    assert!(!xml.contains("Trailer"));
    assert!(xml.ends_with('\n'));
}

#[test]
fn test_full_receipt_content_configured() {
    let dir = tempdir().unwrap();
    let notifier = factory(dir.path(), true).create_deliverer();

    let path = notifier.notify(&receipt("msg-full")).unwrap();
    let xml = fs::read_to_string(path).unwrap();
    assert!(xml.contains(r#"<Ack xmlns="urn:ack">ok</Ack>"#));
    assert!(xml.contains(r#"<Trailer xmlns="urn:ack"/>"#));
}

#[test]
fn test_error_written_to_smd_file() {
    let (dir, factory) = setup();
    let notifier = factory.create_deliverer();

    notifier.deliver(&error_signal("err-1")).unwrap();

    let xml = fs::read_to_string(dir.path().join("err-1.smd.xml")).unwrap();
    assert!(xml.contains("<Timestamp>2025-10-19T08:15:30.000Z</Timestamp>"));
    assert!(!xml.contains("RefToMessageId"));
    assert!(xml.contains(
        r#"<Error errorCode="EBMS:0004" origin="ebMS" severity="FAILURE" shortDescription="Other">"#
    ));
    assert!(xml.contains(r#"<Description xml:lang="en">Unknown error</Description>"#));
    assert!(xml.contains("<ErrorDetail>Payload could not be processed</ErrorDetail>"));
    assert!(!xml.contains("<Receipt"));
}

#[test]
fn test_collisions_get_numbered_names() {
    let (dir, factory) = setup();
    let notifier = factory.create_deliverer();

    let paths: Vec<PathBuf> = (0..3)
        .map(|_| notifier.notify(&receipt("msg1")).unwrap())
        .collect();

    assert_eq!(
        paths,
        vec![
            dir.path().join("msg1.smd.xml"),
            dir.path().join("msg1-1.smd.xml"),
            dir.path().join("msg1-2.smd.xml"),
        ]
    );
}

#[test]
fn test_existing_files_are_not_overwritten() {
    let (dir, factory) = setup();
    fs::write(dir.path().join("msg2.smd.xml"), "foreign").unwrap();

    let path = factory.create_deliverer().notify(&error_signal("msg2")).unwrap();
    assert_eq!(path, dir.path().join("msg2-1.smd.xml"));
    assert_eq!(
        fs::read_to_string(dir.path().join("msg2.smd.xml")).unwrap(),
        "foreign"
    );
}

#[test]
fn test_message_id_is_sanitized() {
    let (dir, factory) = setup();
    let notifier = factory.create_deliverer();

    let path = notifier.notify(&receipt("urn:uuid:abc@def")).unwrap();
    assert_eq!(path, dir.path().join("urn_uuid_abc_def.smd.xml"));

    // The document keeps the original id
    let xml = fs::read_to_string(path).unwrap();
    assert!(xml.contains("<MessageId>urn:uuid:abc@def</MessageId>"));
}

#[test]
fn test_user_message_creates_no_file() {
    let (dir, factory) = setup();
    let unit = MessageUnit::UserMessage(UserMessage {
        message_id: "user-1".to_string(),
    });

    let error = factory.create_deliverer().deliver(&unit).unwrap_err();
    assert_eq!(error.stage(), Stage::Classify);
    assert_eq!(error.message_id(), "user-1");
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_vanished_directory_is_reported() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("spool");
    let notifier = factory(&target, false).create_deliverer();
    fs::remove_dir(&target).unwrap();

    let error = notifier.notify(&receipt("msg3")).unwrap_err();
    assert_eq!(error.stage(), Stage::Allocate);
    assert!(!target.exists());
}

#[test]
fn test_concurrent_deliveries_get_distinct_files() {
    const WRITERS: usize = 8;
    let (dir, factory) = setup();
    let notifier = factory.create_deliverer();

    let mut paths: Vec<PathBuf> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|_| scope.spawn(|| notifier.notify(&receipt("shared")).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), WRITERS);

    let names = file_names(dir.path());
    assert_eq!(names.len(), WRITERS);
    assert!(names.contains(&"shared.smd.xml".to_string()));
    for n in 1..WRITERS {
        assert!(names.contains(&format!("shared-{}.smd.xml", n)));
    }

    // Every file is a complete document
    for name in names {
        let xml = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(xml.trim_end().ends_with("</SignalMessage>"));
    }
}

#[test]
fn test_message_unit_from_json() {
    let (dir, factory) = setup();
    let unit: MessageUnit = serde_json::from_str(
        r#"{
            "type": "receipt",
            "message_id": "json-1",
            "timestamp": "2025-10-19T08:15:30.123Z",
            "content": [
                {
                    "namespace_uri": "urn:ack",
                    "prefix": "a",
                    "local_name": "Ack",
                    "attributes": [{ "local_name": "ref", "value": "x" }],
                    "children": [{ "text": "done" }]
                }
            ]
        }"#,
    )
    .unwrap();

    let path = factory.create_deliverer().notify(&unit).unwrap();
    assert_eq!(path, dir.path().join("json-1.smd.xml"));

    let xml = fs::read_to_string(path).unwrap();
    assert!(xml.contains("<Timestamp>2025-10-19T08:15:30.123Z</Timestamp>"));
    assert!(xml.contains(r#"<a:Ack xmlns:a="urn:ack" ref="x">done</a:Ack>"#));
}
