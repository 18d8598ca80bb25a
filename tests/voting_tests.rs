use sortarm::commands::routine_for_label;
use sortarm::voting::{ConfidenceGate, VoteBuffer};

#[test]
fn unanimity_requires_a_full_window() {
    let mut votes = VoteBuffer::new(10);

    for _ in 0..9 {
        votes.record(3);
        assert!(!votes.is_unanimous());
    }

    votes.record(3);
    assert!(votes.is_unanimous());
    assert_eq!(votes.unanimous_label(), Some(3));
}

#[test]
fn a_single_dissenting_vote_blocks_the_trigger() {
    let mut votes = VoteBuffer::new(10);

    for _ in 0..9 {
        votes.record(0);
    }
    votes.record(1);

    assert!(!votes.is_unanimous());
    assert_eq!(votes.unanimous_label(), None);
    assert_eq!(votes.len(), 10);
}

#[test]
fn eviction_is_oldest_first() {
    let mut votes = VoteBuffer::new(10);

    // One stale dissenting vote followed by ten agreeing ones: the window
    // only becomes unanimous once the dissenter has been evicted.
    votes.record(1);
    for i in 0..10 {
        votes.record(0);
        let expect_unanimous = i == 9;
        assert_eq!(votes.is_unanimous(), expect_unanimous, "after vote {}", i);
    }

    assert_eq!(votes.unanimous_label(), Some(0));
    assert_eq!(votes.len(), 10);
}

#[test]
fn reset_requires_a_fresh_full_window() {
    let mut votes = VoteBuffer::new(10);

    for _ in 0..10 {
        votes.record(2);
    }
    assert!(votes.is_unanimous());

    votes.reset();
    assert!(votes.is_empty());
    assert!(!votes.is_unanimous());

    for _ in 0..9 {
        votes.record(2);
        assert!(!votes.is_unanimous());
    }
    votes.record(2);
    assert!(votes.is_unanimous());
}

#[test]
fn gate_threshold_is_exclusive() {
    let gate = ConfidenceGate::new(0.6, 1);

    // Exactly at the threshold the label survives; strictly below it the
    // fallback is recorded.
    assert_eq!(gate.effective_label(4, 0.6), 4);
    assert_eq!(gate.effective_label(4, 0.59), 1);
    assert_eq!(gate.effective_label(0, 0.95), 0);
}

#[test]
fn ten_stable_frames_trigger_a_mapped_routine() {
    let gate = ConfidenceGate::new(0.6, 1);
    let mut votes = VoteBuffer::new(10);

    let mut fired = None;
    for _ in 0..10 {
        votes.record(gate.effective_label(0, 0.9));
        if let Some(winner) = votes.unanimous_label() {
            fired = Some(winner);
            votes.reset();
        }
    }

    assert_eq!(fired, Some(0));
    assert!(votes.is_empty());
    assert!(routine_for_label(0).is_some());
}

#[test]
fn an_unmapped_unanimous_label_still_consumes_the_window() {
    let mut votes = VoteBuffer::new(10);

    for _ in 0..10 {
        votes.record(3);
    }

    // Label 3 has no routine, but the trigger decision itself stands and the
    // window is cleared after it is consumed.
    assert_eq!(votes.unanimous_label(), Some(3));
    assert!(routine_for_label(3).is_none());
    votes.reset();
    assert!(votes.is_empty());
}

#[test]
fn low_confidence_frames_dilute_the_vote() {
    let gate = ConfidenceGate::new(0.6, 1);
    let mut votes = VoteBuffer::new(10);

    for _ in 0..9 {
        votes.record(gate.effective_label(0, 0.9));
    }
    // The tenth frame agrees on the label but not confidently enough, so the
    // fallback vote breaks unanimity.
    votes.record(gate.effective_label(0, 0.3));

    assert!(!votes.is_unanimous());
}
