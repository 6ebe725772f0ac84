//! Property-based tests for the queue manager
//!
//! Uses proptest to verify queue invariants across random operation sequences.

use cadence_queue::{QueueManager, QueuePosition, Track};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

/// One caller operation, with raw indices that may be out of range
#[derive(Debug, Clone)]
enum Op {
    AddNext,
    AddEnd,
    Remove(usize),
    Move(usize, usize),
    Jump(usize),
    Next,
    Previous,
    Shuffle,
    Unshuffle,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddNext),
        Just(Op::AddEnd),
        (0usize..30).prop_map(Op::Remove),
        (0usize..30, 0usize..30).prop_map(|(from, to)| Op::Move(from, to)),
        (0usize..30).prop_map(Op::Jump),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Shuffle),
        Just(Op::Unshuffle),
    ]
}

fn create_tracks(count: usize) -> Vec<Track> {
    (0..count).map(|i| Track::new(format!("t{}", i), 180)).collect()
}

fn apply(manager: &mut QueueManager, op: &Op, counter: &mut usize) {
    match *op {
        Op::AddNext | Op::AddEnd => {
            *counter += 1;
            let position = if matches!(op, Op::AddNext) {
                QueuePosition::Next
            } else {
                QueuePosition::End
            };
            manager.add_to_queue(Track::new(format!("added{}", counter), 60), position);
        }
        Op::Remove(index) => {
            manager.remove_from_queue(index);
        }
        Op::Move(from, to) => {
            manager.move_in_queue(from, to);
        }
        Op::Jump(index) => {
            manager.jump_to(index);
        }
        Op::Next => {
            manager.next();
        }
        Op::Previous => {
            manager.previous();
        }
        Op::Shuffle => manager.shuffle(),
        Op::Unshuffle => manager.unshuffle(),
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    let unique: HashSet<usize> = order.iter().copied().collect();
    order.len() == len && unique.len() == len && order.iter().all(|&i| i < len)
}

// ===== Property Tests =====

proptest! {
    /// Property: play order is always a permutation of the base order
    #[test]
    fn play_order_is_always_a_permutation(
        initial in 0usize..15,
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut manager = QueueManager::default();
        manager.set_queue(create_tracks(initial), 0);
        let mut counter = 0;

        for op in &ops {
            apply(&mut manager, op, &mut counter);

            let state = manager.state();
            prop_assert!(
                is_permutation(state.play_order(), state.base_order().len()),
                "Not a permutation after {:?}: {:?}",
                op,
                state.play_order()
            );

            // Cursor valid iff queue non-empty
            match state.current_index() {
                Some(cursor) => prop_assert!(cursor < state.len()),
                None => prop_assert!(state.is_empty()),
            }
        }
    }

    /// Property: history never exceeds 20 entries and never starts with the current track
    #[test]
    fn history_bounded_and_never_headed_by_current(
        initial in 1usize..10,
        ops in prop::collection::vec(arbitrary_op(), 1..120)
    ) {
        let mut manager = QueueManager::default();
        manager.set_queue(create_tracks(initial), 0);
        let mut counter = 0;

        for op in &ops {
            apply(&mut manager, op, &mut counter);

            let history = manager.history();
            prop_assert!(history.len() <= 20, "History exceeded 20: {}", history.len());

            if let (Some(head), Some(current)) = (history.first(), manager.current_track()) {
                prop_assert_ne!(&head.id, &current.id, "History head is the current track");
            }
        }
    }

    /// Property: shuffle never changes the current track
    #[test]
    fn shuffle_keeps_current_track(
        count in 1usize..40,
        start in 0usize..40
    ) {
        let mut manager = QueueManager::default();
        manager.set_queue(create_tracks(count), start);

        let before = manager.current_track().cloned();
        manager.shuffle();
        prop_assert_eq!(manager.current_track().cloned(), before);
    }

    /// Property: previous right after next returns to where we were
    #[test]
    fn previous_undoes_next(
        count in 1usize..20,
        ops in prop::collection::vec(arbitrary_op(), 0..30),
        shuffled in any::<bool>()
    ) {
        let mut manager = QueueManager::default();
        manager.set_queue(create_tracks(count), 0);
        let mut counter = 0;
        for op in &ops {
            apply(&mut manager, op, &mut counter);
        }
        if shuffled {
            manager.shuffle();
        }
        prop_assume!(!manager.is_empty());

        let before = manager.current_track().map(|t| t.id.clone());
        manager.next();
        let after = manager.previous().map(|t| t.id.clone());
        prop_assert_eq!(after, before);
    }

    /// Property: save/load round trip reproduces the queue
    #[test]
    fn persistence_round_trip(
        initial in 0usize..15,
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut manager = QueueManager::default();
        manager.set_queue(create_tracks(initial), 0);
        let mut counter = 0;
        for op in &ops {
            apply(&mut manager, op, &mut counter);
        }

        let restored = QueueManager::new(manager.store().clone());
        prop_assert_eq!(restored.state(), manager.state());
    }
}
