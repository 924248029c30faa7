//! Unit tests for `Session`
//!
//! Covers the reset policy, token accounting and duplicate-reply memory.

mod common;

use autoshell::session::tokens::{estimate_history_tokens, estimate_tokens};
use autoshell::{Message, PrepromptStore, Role, Session};
use common::{MAIN_PREAMBLE, preprompt_fixture};

fn session_with_budget(budget: usize, reserve: usize) -> (Session, tempfile::TempDir) {
    let dir = preprompt_fixture();
    let session = Session::new(PrepromptStore::new(dir.path()), budget, reserve)
        .expect("session construction");
    (session, dir)
}

#[test]
fn test_new_session_holds_only_the_preamble() {
    let (session, _dir) = session_with_budget(16384, 2000);
    assert_eq!(session.len(), 1);
    assert_eq!(session.messages()[0].role, Role::System);
    assert_eq!(session.messages()[0].content, MAIN_PREAMBLE);
}

#[test]
fn test_missing_preamble_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Session::new(PrepromptStore::new(dir.path()), 16384, 2000)
        .err()
        .expect("construction must fail without a preamble");
    assert!(err.is_fatal());
}

#[test]
fn test_append_keeps_order_and_recomputes_tokens() {
    let (mut session, _dir) = session_with_budget(16384, 2000);
    session.append(Message::user("list my files"));
    session.append(Message::assistant("ls"));
    session.append(Message::system_output("a.txt\nb.txt\n"));

    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::SystemOutput]
    );
    assert_eq!(
        session.token_count(),
        estimate_history_tokens(session.messages())
    );
}

#[test]
fn test_over_budget_crosses_at_reserve_boundary() {
    let preamble_tokens = 4 + estimate_tokens(MAIN_PREAMBLE);
    let (mut session, _dir) = session_with_budget(preamble_tokens + 60, 10);
    assert!(!session.over_budget());

    // 44 tokens including overhead stays under budget - reserve
    session.append(Message::user("x".repeat(128)));
    assert!(!session.over_budget());

    session.append(Message::user("x".repeat(128)));
    assert!(session.over_budget());
}

#[test]
fn test_reset_discards_everything_but_a_fresh_preamble() {
    let (mut session, _dir) = session_with_budget(16384, 2000);
    session.append(Message::user("hello"));
    session.append(Message::assistant("hi"));
    session.record_reply("hi");

    session.reset().expect("reset");

    assert_eq!(session.len(), 1);
    assert_eq!(session.messages()[0].role, Role::System);
    assert_eq!(session.messages()[0].content, MAIN_PREAMBLE);
    assert!(!session.is_duplicate_reply("hi"));
    assert_eq!(
        session.token_count(),
        estimate_history_tokens(session.messages())
    );
}

#[test]
fn test_reset_is_idempotent() {
    let (mut session, _dir) = session_with_budget(16384, 2000);
    session.append(Message::user("hello"));

    session.reset().expect("first reset");
    let first: Vec<Message> = session.messages().to_vec();
    let first_tokens = session.token_count();

    session.reset().expect("second reset");
    assert_eq!(session.messages(), first.as_slice());
    assert_eq!(session.token_count(), first_tokens);
}

#[test]
fn test_reset_rereads_the_preamble_from_disk() {
    let dir = preprompt_fixture();
    let mut session =
        Session::new(PrepromptStore::new(dir.path()), 16384, 2000).expect("session");

    std::fs::write(dir.path().join("pre_prompt_shell.txt"), "updated preamble")
        .expect("rewrite preamble");
    session.reset().expect("reset");

    assert_eq!(session.messages()[0].content, "updated preamble");
}

#[test]
fn test_duplicate_reply_detection_is_character_exact() {
    let (mut session, _dir) = session_with_budget(16384, 2000);
    assert!(!session.is_duplicate_reply("ls"));

    session.record_reply("ls");
    assert!(session.is_duplicate_reply("ls"));
    assert!(!session.is_duplicate_reply("ls "));
    assert!(!session.is_duplicate_reply("LS"));

    session.record_reply("pwd");
    assert!(!session.is_duplicate_reply("ls"));
    assert!(session.is_duplicate_reply("pwd"));
}
