use super::*;

#[test]
fn user_message_has_no_sources() {
    let msg = Message::user("how do I reset a password?");
    assert!(msg.is_user());
    assert_eq!(msg.author, Author::User);
    assert!(msg.sources.is_empty());
}

#[test]
fn assistant_message_keeps_sources_in_order() {
    let sources = vec![Source::new("A", "/a", "first"), Source::new("B", "/b", "second")];
    let msg = Message::assistant("reply", sources.clone());
    assert!(!msg.is_user());
    assert_eq!(msg.sources, sources);
}

#[test]
fn message_ids_are_unique() {
    let a = Message::user("x");
    let b = Message::user("x");
    assert_ne!(a.id, b.id);
}

#[test]
fn welcome_is_assistant_greeting() {
    let msg = Message::welcome();
    assert_eq!(msg.author, Author::Assistant);
    assert!(msg.content.contains("**ChatBW**"));
    assert!(msg.sources.is_empty());
}

#[test]
fn source_serializes_with_plain_keys() {
    let src = Source::new("Guide", "/docs/guide.md", "intro");
    let value = serde_json::to_value(&src).unwrap();
    assert_eq!(value, serde_json::json!({ "title": "Guide", "path": "/docs/guide.md", "excerpt": "intro" }));
}
