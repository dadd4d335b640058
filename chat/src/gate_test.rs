use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chatbw-gate-{tag}-{}", uuid::Uuid::new_v4()))
}

fn context() -> SessionContext<MemorySessionStore> {
    SessionContext::new(AccessGate::new("BW123!@#"), MemorySessionStore::new())
}

// =============================================================
// login
// =============================================================

#[test]
fn exact_password_opens_chat_and_persists_flag() {
    let mut ctx = context();
    assert_eq!(ctx.view(), View::Auth);

    let session = ctx.login("BW123!@#").unwrap();
    assert_eq!(ctx.view(), View::Chat);
    assert!(ctx.error().is_none());
    assert_eq!(ctx.store().get(AUTH_STORAGE_KEY).unwrap().as_deref(), Some("true"));
    assert!(session.started_at() <= OffsetDateTime::now_utc());
}

#[test]
fn wrong_password_leaves_flag_unset_and_shows_error() {
    let mut ctx = context();
    for attempt in ["", "bw123!@#", "BW123!@# ", " BW123!@#", "BW123"] {
        let err = ctx.login(attempt).unwrap_err();
        assert!(matches!(err, GateError::IncorrectPassword), "{attempt:?}");
        assert_eq!(err.to_string(), INCORRECT_PASSWORD_MESSAGE);
        assert_eq!(ctx.view(), View::Auth);
        assert_eq!(ctx.error(), Some(INCORRECT_PASSWORD_MESSAGE));
        assert!(ctx.store().get(AUTH_STORAGE_KEY).unwrap().is_none());
    }
}

#[test]
fn successful_login_clears_previous_error() {
    let mut ctx = context();
    ctx.login("nope").unwrap_err();
    ctx.login("BW123!@#").unwrap();
    assert!(ctx.error().is_none());
}

// =============================================================
// restore / logout
// =============================================================

#[test]
fn restore_without_flag_stays_on_auth() {
    let mut ctx = context();
    assert!(ctx.restore().unwrap().is_none());
    assert_eq!(ctx.view(), View::Auth);
}

#[test]
fn restore_requires_exact_true_flag() {
    let store = MemorySessionStore::new();
    store.set(AUTH_STORAGE_KEY, "yes").unwrap();
    let mut ctx = SessionContext::new(AccessGate::new("pw"), store);
    assert!(ctx.restore().unwrap().is_none());
}

#[test]
fn logout_clears_flag_and_returns_to_auth() {
    let mut ctx = context();
    let session = ctx.login("BW123!@#").unwrap();
    ctx.logout(session).unwrap();
    assert_eq!(ctx.view(), View::Auth);
    assert!(ctx.store().get(AUTH_STORAGE_KEY).unwrap().is_none());
    assert!(ctx.restore().unwrap().is_none());
}

// =============================================================
// FileSessionStore
// =============================================================

#[test]
fn file_store_persists_across_instances() {
    let dir = temp_dir("persist");
    {
        let mut ctx = SessionContext::new(AccessGate::new("pw"), FileSessionStore::in_dir(&dir));
        ctx.login("pw").unwrap();
    }
    let mut ctx = SessionContext::new(AccessGate::new("pw"), FileSessionStore::in_dir(&dir));
    assert!(ctx.restore().unwrap().is_some());
    assert_eq!(ctx.view(), View::Chat);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_missing_file_reads_empty() {
    let store = FileSessionStore::in_dir(temp_dir("missing"));
    assert!(store.get(AUTH_STORAGE_KEY).unwrap().is_none());
    store.remove(AUTH_STORAGE_KEY).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn file_store_keeps_unrelated_keys() {
    let dir = temp_dir("keys");
    let store = FileSessionStore::in_dir(&dir);
    store.set("theme", "dark").unwrap();
    store.set(AUTH_STORAGE_KEY, "true").unwrap();
    store.remove(AUTH_STORAGE_KEY).unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert!(store.get(AUTH_STORAGE_KEY).unwrap().is_none());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("session.json"), "{not json").unwrap();
    let store = FileSessionStore::in_dir(&dir);
    assert!(matches!(store.get(AUTH_STORAGE_KEY), Err(StoreError::Format(_))));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn gate_debug_hides_password() {
    let gate = AccessGate::new("secret");
    assert!(!format!("{gate:?}").contains("secret"));
}
