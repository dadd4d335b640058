use super::*;
use crate::message::Author;

// =============================================================
// Seeding
// =============================================================

#[test]
fn new_conversation_is_seeded_with_welcome() {
    let conv = Conversation::new();
    assert_eq!(conv.len(), 1);
    assert_eq!(conv.messages()[0].author, Author::Assistant);
    assert!(conv.draft().is_empty());
    assert_eq!(conv.revision(), 0);
}

// =============================================================
// submit_user_text
// =============================================================

#[test]
fn submit_appends_user_message_and_clears_draft() {
    let mut conv = Conversation::new();
    conv.set_draft("reset password");
    let submission = conv.submit_user_text("reset password").unwrap();

    assert_eq!(conv.len(), 2);
    let last = conv.messages().last().unwrap();
    assert_eq!(last.author, Author::User);
    assert_eq!(last.content, "reset password");
    assert_eq!(last.id, submission.message_id);
    assert_eq!(submission.text, "reset password");
    assert!(conv.draft().is_empty());
}

#[test]
fn submit_whitespace_is_ignored_and_draft_kept() {
    let mut conv = Conversation::new();
    conv.set_draft("   \n\t ");
    for text in ["", " ", "\n\t  "] {
        assert!(conv.submit_user_text(text).is_none());
    }
    assert_eq!(conv.len(), 1);
    assert_eq!(conv.draft(), "   \n\t ");
    assert_eq!(conv.revision(), 0);
}

#[test]
fn submit_keeps_text_verbatim() {
    let mut conv = Conversation::new();
    let submission = conv.submit_user_text("  padded  ").unwrap();
    assert_eq!(submission.text, "  padded  ");
    assert_eq!(conv.messages()[1].content, "  padded  ");
}

#[test]
fn submit_draft_uses_current_draft() {
    let mut conv = Conversation::new();
    conv.set_draft("vpn access");
    let submission = conv.submit_draft().unwrap();
    assert_eq!(submission.text, "vpn access");
    assert!(conv.draft().is_empty());
    assert!(conv.submit_draft().is_none());
}

// =============================================================
// append ordering + notification
// =============================================================

#[test]
fn append_preserves_send_order() {
    let mut conv = Conversation::new();
    conv.submit_user_text("first").unwrap();
    conv.append(Message::assistant("reply one", Vec::new()));
    conv.submit_user_text("second").unwrap();

    let contents: Vec<_> = conv.messages().iter().skip(1).map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["first", "reply one", "second"]);
}

#[test]
fn append_bumps_revision_for_subscribers() {
    let mut conv = Conversation::new();
    let mut rx = conv.subscribe();
    assert!(!rx.has_changed().unwrap());

    conv.append(Message::assistant("hi", Vec::new()));
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 1);
    assert_eq!(conv.revision(), 1);
}
