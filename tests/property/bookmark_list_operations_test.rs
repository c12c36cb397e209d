//! Property-based tests for bookmark list reconciliation.
//!
//! Optimistic admits, local removals and pushed events are interleaved in
//! arbitrary orders; the list must never hold two entries for one id, and
//! removals must not disturb the relative order of what remains.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use linkshelf::managers::bookmark_list::BookmarkList;
use linkshelf::types::bookmark::Bookmark;
use linkshelf::types::feed::ChangeEvent;
use proptest::prelude::*;

fn bookmark(n: u8) -> Bookmark {
    Bookmark {
        id: format!("bm-{}", n),
        title: format!("Bookmark {}", n),
        url: format!("https://site{}.example.com", n),
        created_at: Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
        user_id: "user-1".to_string(),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Admit(u8),
    FeedInsert(u8),
    FeedDelete(u8),
    LocalRemove(u8),
    FeedUpdate(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    // A small id space forces collisions between optimistic and pushed copies.
    let id = 0u8..8;
    prop_oneof![
        3 => id.clone().prop_map(Op::Admit),
        3 => id.clone().prop_map(Op::FeedInsert),
        1 => id.clone().prop_map(Op::FeedDelete),
        1 => id.clone().prop_map(Op::LocalRemove),
        1 => id.prop_map(Op::FeedUpdate),
    ]
}

fn apply(list: &mut BookmarkList, op: &Op) {
    match op {
        Op::Admit(n) => {
            list.admit(bookmark(*n));
        }
        Op::FeedInsert(n) => {
            list.apply(&ChangeEvent::Insert(bookmark(*n)));
        }
        Op::FeedDelete(n) => {
            list.apply(&ChangeEvent::Delete { id: bookmark(*n).id });
        }
        Op::LocalRemove(n) => {
            list.remove(&bookmark(*n).id);
        }
        Op::FeedUpdate(n) => {
            let mut updated = bookmark(*n);
            updated.title.push_str(" (edited)");
            list.apply(&ChangeEvent::Update(updated));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ids_stay_unique_under_any_interleaving(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mut list = BookmarkList::new();
        for op in &ops {
            apply(&mut list, op);
            let ids: HashSet<&str> = list.bookmarks().iter().map(|b| b.id.as_str()).collect();
            prop_assert_eq!(ids.len(), list.len(), "duplicate id after {:?}", op);
        }
    }

    #[test]
    fn repeated_admits_are_idempotent(ns in proptest::collection::vec(0u8..8, 1..30)) {
        let mut once = BookmarkList::new();
        let mut twice = BookmarkList::new();
        for n in &ns {
            once.admit(bookmark(*n));
            twice.admit(bookmark(*n));
            twice.admit(bookmark(*n));
        }
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn admit_then_feed_insert_is_noop(
        ns in proptest::collection::hash_set(0u8..32, 0..20),
        n in 32u8..64,
    ) {
        let snapshot: Vec<Bookmark> = ns.iter().map(|n| bookmark(*n)).collect();
        let mut list = BookmarkList::from_snapshot(snapshot);
        prop_assert!(list.admit(bookmark(n)));
        let before = list.clone();

        prop_assert!(!list.apply(&ChangeEvent::Insert(bookmark(n))));
        prop_assert_eq!(list.bookmarks()[0].id.clone(), bookmark(n).id);
        prop_assert_eq!(list, before);
    }

    #[test]
    fn remove_keeps_relative_order(
        ns in proptest::collection::hash_set(0u8..64, 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let snapshot: Vec<Bookmark> = ns.iter().map(|n| bookmark(*n)).collect();
        let target = snapshot[pick.index(snapshot.len())].id.clone();
        let mut list = BookmarkList::from_snapshot(snapshot.clone());

        let removed = list.remove(&target);
        prop_assert_eq!(removed.map(|b| b.id), Some(target.clone()));
        prop_assert_eq!(list.len(), snapshot.len() - 1);

        let expected: Vec<Bookmark> = snapshot.into_iter().filter(|b| b.id != target).collect();
        prop_assert_eq!(list.bookmarks(), expected.as_slice());

        // The echoed feed delete finds nothing left to remove.
        let echoed = ChangeEvent::Delete { id: target };
        prop_assert!(!list.apply(&echoed));
    }
}
