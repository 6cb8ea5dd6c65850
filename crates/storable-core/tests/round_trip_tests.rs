//! Round-trip law: a successful `set` is always readable back by `get`

mod common;

use common::new_session_store;
use proptest::prelude::*;
use std::collections::BTreeMap;
use storable_core::Storable;

proptest! {
    #[test]
    fn prop_string_round_trip(key in ".{0,16}", value in ".{0,64}") {
        let (store, _host) = new_session_store();
        prop_assert!(store.set(&key, &value));
        prop_assert_eq!(store.get::<String>(&key).unwrap(), Some(value));
    }

    #[test]
    fn prop_integer_list_round_trip(key in "[a-z]{1,8}", value in prop::collection::vec(any::<i64>(), 0..16)) {
        let (store, _host) = new_session_store();
        prop_assert!(store.set(&key, &value));
        prop_assert_eq!(store.get::<Vec<i64>>(&key).unwrap(), Some(value));
    }

    #[test]
    fn prop_map_round_trip(value in prop::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..8)) {
        let (store, _host) = new_session_store();
        prop_assert!(store.set("map", &value));
        prop_assert_eq!(store.get::<BTreeMap<String, bool>>("map").unwrap(), Some(value));
    }

    #[test]
    fn prop_pop_removes_exactly_one(keys in prop::collection::btree_set("[a-z]{1,6}", 1..10)) {
        let (store, _host) = new_session_store();
        for key in &keys {
            store.set(key, key);
        }
        let victim = keys.iter().next().cloned().unwrap_or_default();
        let before = store.count();

        prop_assert!(store.pop(&victim));
        prop_assert_eq!(store.count(), before - 1);
        prop_assert!(!store.keys().contains(&victim));
    }
}
