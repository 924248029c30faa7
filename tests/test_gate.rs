//! Unit tests for the confirmation gate

mod common;

use std::sync::Arc;
use std::time::Duration;

use autoshell::error::AgentError;
use autoshell::{ConfirmationGate, Decision};

#[test]
fn test_key_mapping() {
    assert_eq!(Decision::from_key("y"), Decision::Approved);
    assert_eq!(Decision::from_key("Y"), Decision::Approved);
    assert_eq!(Decision::from_key(""), Decision::Approved);
    assert_eq!(Decision::from_key("\r"), Decision::Approved);
    assert_eq!(Decision::from_key("n"), Decision::Rejected);
    assert_eq!(Decision::from_key("no"), Decision::Rejected);
    assert_eq!(Decision::from_key("yes"), Decision::Rejected);
}

#[test]
fn test_idle_gate_does_not_capture_keys() {
    let gate = ConfirmationGate::new();
    assert!(!gate.is_waiting());
    assert!(!gate.submit_key("y"));
    assert!(!gate.is_waiting());
}

#[tokio::test]
async fn test_one_episode_approved() {
    let gate = ConfirmationGate::new();
    let rx = gate.begin().expect("begin");
    assert!(gate.is_waiting());

    assert!(gate.submit_key("y"));
    assert!(!gate.is_waiting());

    let decision = gate.wait(rx, None).await.expect("decision");
    assert_eq!(decision, Decision::Approved);
}

#[tokio::test]
async fn test_one_episode_rejected() {
    let gate = ConfirmationGate::new();
    let rx = gate.begin().expect("begin");
    assert!(gate.submit_key("n"));
    let decision = gate.wait(rx, None).await.expect("decision");
    assert_eq!(decision, Decision::Rejected);
}

#[tokio::test]
async fn test_exactly_one_decision_is_consumed_per_episode() {
    let gate = ConfirmationGate::new();
    let rx = gate.begin().expect("begin");

    assert!(gate.submit_key("n"));
    // the slot is consumed; later keys fall through as plain input
    assert!(!gate.submit_key("y"));

    assert_eq!(gate.wait(rx, None).await.expect("decision"), Decision::Rejected);
}

#[tokio::test]
async fn test_second_begin_while_waiting_is_an_error() {
    let gate = ConfirmationGate::new();
    let _rx = gate.begin().expect("begin");
    assert!(matches!(gate.begin(), Err(AgentError::Gate(_))));
}

#[tokio::test]
async fn test_waiter_resumes_when_decision_arrives_later() {
    let gate = Arc::new(ConfirmationGate::new());
    let rx = gate.begin().expect("begin");

    let submitter = Arc::clone(&gate);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(submitter.submit_key("Y"));
    });

    let decision = gate.wait(rx, None).await.expect("decision");
    assert_eq!(decision, Decision::Approved);
}

#[tokio::test]
async fn test_timeout_clears_the_slot() {
    let gate = ConfirmationGate::new();
    let rx = gate.begin().expect("begin");

    let err = gate
        .wait(rx, Some(Duration::from_millis(20)))
        .await
        .err()
        .expect("must time out");
    assert!(matches!(err, AgentError::Timeout(_)));

    // the episode is over; the next one starts clean
    assert!(!gate.is_waiting());
    assert!(!gate.submit_key("y"));
    let _rx = gate.begin().expect("begin after timeout");
}
