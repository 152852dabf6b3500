//! Encoded SMD document tests
//!
//! Validates the XML actually written for error and receipt signals: fixed
//! namespace, element layout, omitted optional parts and embedded content.

use signal_types::{Description, ElementNode, ErrorDetail, ErrorSignal, Receipt, Severity};
use smd_codec::{write_document, SignalDocumentBuilder, SMD_NAMESPACE};
use std::time::{Duration, UNIX_EPOCH};

const EBBP: &str = "http://docs.oasis-open.org/ebxml-bp/ebbp-signals-2.0";
const DSIG: &str = "http://www.w3.org/2000/09/xmldsig#";

fn render(doc: &smd_codec::SignalMetaData) -> String {
    let bytes = write_document(doc, Vec::new()).unwrap();
    String::from_utf8(bytes).unwrap()
}

fn error_signal() -> ErrorSignal {
    ErrorSignal {
        message_id: "err-42@gateway.example".to_string(),
        ref_to_message_id: "msg-42@partner.example".to_string(),
        timestamp: UNIX_EPOCH + Duration::from_millis(1_760_861_730_123),
        errors: vec![
            ErrorDetail {
                code: "EBMS:0101".to_string(),
                severity: Severity::Failure,
                detail: "Signature verification failed".to_string(),
                short_description: "FailedAuthentication".to_string(),
                category: "Processing".to_string(),
                origin: "security".to_string(),
                description: Some(Description {
                    text: "The signature of the message is invalid".to_string(),
                    language: "en".to_string(),
                }),
            },
            ErrorDetail {
                code: "EBMS:0301".to_string(),
                severity: Severity::Warning,
                detail: String::new(),
                short_description: "MissingReceipt".to_string(),
                category: "Communication".to_string(),
                origin: "reliability".to_string(),
                description: Some(Description {
                    text: String::new(),
                    language: "en".to_string(),
                }),
            },
        ],
    }
}

#[test]
fn test_error_document_layout() {
    let xml = render(&SignalDocumentBuilder::from_error(&error_signal()));

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    assert!(xml.contains(&format!(r#"<SignalMessage xmlns="{}">"#, SMD_NAMESPACE)));
    assert!(xml.contains("<Timestamp>2025-10-19T08:15:30.123Z</Timestamp>"));
    assert!(xml.contains("<MessageId>err-42@gateway.example</MessageId>"));
    assert!(xml.contains("<RefToMessageId>msg-42@partner.example</RefToMessageId>"));

    assert_eq!(xml.matches("<Error ").count(), 2);
    assert!(xml.contains(
        r#"<Error category="Processing" errorCode="EBMS:0101" origin="security" severity="FAILURE" shortDescription="FailedAuthentication">"#
    ));
    assert!(xml.contains(
        r#"<Description xml:lang="en">The signature of the message is invalid</Description>"#
    ));
    assert!(xml.contains("<ErrorDetail>Signature verification failed</ErrorDetail>"));

    // The second error has an empty description and no detail
    assert_eq!(xml.matches("<Description").count(), 1);
    assert!(xml.contains(
        r#"<Error category="Communication" errorCode="EBMS:0301" origin="reliability" severity="WARNING" shortDescription="MissingReceipt"/>"#
    ));

    assert!(!xml.contains("<Receipt"));
    // Nothing but the root declares a namespace
    assert_eq!(xml.matches("xmlns").count(), 1);
}

#[test]
fn test_receipt_document_embeds_first_child() {
    let nri = ElementNode::new("NonRepudiationInformation")
        .with_namespace(EBBP)
        .with_prefix("ebbp")
        .with_child(
            ElementNode::new("MessagePartNRInformation")
                .with_namespace(EBBP)
                .with_prefix("ebbp")
                .with_child(
                    ElementNode::new("Reference")
                        .with_namespace(DSIG)
                        .with_prefix("ds")
                        .with_attribute("URI", "cid:payload-1"),
                ),
        );
    let receipt = Receipt {
        message_id: "rcpt-7@gateway.example".to_string(),
        ref_to_message_id: "msg-7@partner.example".to_string(),
        timestamp: UNIX_EPOCH + Duration::from_millis(1_760_861_730_123),
        content: vec![nri, ElementNode::new("Extra").with_text("dropped")],
    };

    let doc = SignalDocumentBuilder::from_receipt(&receipt, false).unwrap();
    let xml = render(&doc);

    assert!(xml.contains("<Receipt>"));
    assert!(xml.contains(&format!(
        r#"<ebbp:NonRepudiationInformation xmlns:ebbp="{}">"#,
        EBBP
    )));
    assert!(xml.contains("<ebbp:MessagePartNRInformation>"));
    assert!(xml.contains(&format!(
        r#"<ds:Reference xmlns:ds="{}" URI="cid:payload-1"/>"#,
        DSIG
    )));
    assert!(!xml.contains("Extra"));
    assert!(!xml.contains("<Error"));
}

#[test]
fn test_receipt_document_with_full_content() {
    let receipt = Receipt {
        message_id: "rcpt-8".to_string(),
        ref_to_message_id: String::new(),
        timestamp: UNIX_EPOCH,
        content: vec![
            ElementNode::new("First").with_namespace("urn:one"),
            ElementNode::new("Second").with_text("kept"),
        ],
    };

    let doc = SignalDocumentBuilder::new(true)
        .build(signal_types::Signal::Receipt(&receipt))
        .unwrap();
    let xml = render(&doc);

    assert!(xml.contains(r#"<First xmlns="urn:one"/>"#));
    assert!(xml.contains(r#"<Second xmlns="">kept</Second>"#));
    assert!(xml.find("<First").unwrap() < xml.find("<Second").unwrap());
    assert!(xml.contains("<Timestamp>1970-01-01T00:00:00.000Z</Timestamp>"));
    assert!(!xml.contains("RefToMessageId"));
}
