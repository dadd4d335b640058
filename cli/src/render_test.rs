use chat::Source;

use super::*;

#[test]
fn user_message_is_indented_under_header() {
    let out = message(&Message::user("line one\nline two"));
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[0].ends_with(" UTC] you>"));
    assert_eq!(&lines[1..], ["  line one", "  line two"]);
}

#[test]
fn assistant_sources_are_listed() {
    let msg = Message::assistant(
        "answer",
        vec![Source::new("Runbook", "/docs/runbook.md", "Restart the service...")],
    );
    let out = message(&msg);
    assert!(out.contains("chatbw>"));
    assert!(out.contains("Source References"));
    assert!(out.contains("  - Runbook (/docs/runbook.md)"));
    assert!(out.contains("    Restart the service..."));
}

#[test]
fn assistant_without_sources_has_no_reference_block() {
    let out = message(&Message::assistant("plain", Vec::new()));
    assert!(!out.contains("Source References"));
}

#[test]
fn header_shows_utc_hour_and_minute() {
    let mut msg = Message::user("hi");
    msg.timestamp = time::macros::datetime!(2024-03-05 14:07:59 UTC);
    assert!(message(&msg).starts_with("[14:07 UTC] you>"));
}
