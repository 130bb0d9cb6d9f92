//! Property tests for the contact store
//!
//! Names and numbers come from tiny alphabets so that random sequences hit
//! the duplicate rules often.

use std::collections::HashSet;

use phonebook_cli::domain::{normalize_name, normalize_number};
use phonebook_cli::{Contact, ContactId, ContactStore, NewContact};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String, String),
    Delete(usize),
    Filter(String),
}

fn name_strategy() -> impl Strategy<Value = String> {
    let charset = prop_oneof![Just('a'), Just('B'), Just('c'), Just(' ')];
    proptest::collection::vec(charset, 1..4).prop_map(|chars| chars.into_iter().collect())
}

fn number_strategy() -> impl Strategy<Value = String> {
    let charset = prop_oneof![Just('1'), Just('2'), Just('-'), Just(' ')];
    proptest::collection::vec(charset, 1..4).prop_map(|chars| chars.into_iter().collect())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (name_strategy(), number_strategy()).prop_map(|(name, number)| Op::Add(name, number)),
        1 => (0usize..8).prop_map(Op::Delete),
        1 => name_strategy().prop_map(Op::Filter),
    ]
}

fn apply(store: &mut ContactStore, op: &Op) {
    match op {
        Op::Add(name, number) => {
            let _ = store.add_contact(NewContact::new(name.as_str(), number.as_str()));
        }
        Op::Delete(index) => {
            let id: Option<ContactId> = store.contacts().nth(*index).map(|c| c.id.clone());
            if let Some(id) = id {
                store.delete_contact(&id);
            }
        }
        Op::Filter(text) => store.set_filter(text),
    }
}

fn snapshot(store: &ContactStore) -> Vec<Contact> {
    store.contacts().cloned().collect()
}

proptest! {
    #[test]
    fn stored_names_numbers_and_ids_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut store = ContactStore::new();
        for op in &ops {
            apply(&mut store, op);
        }

        let ids: HashSet<_> = store.contacts().map(|c| c.id.clone()).collect();
        let names: HashSet<_> = store.contacts().map(|c| normalize_name(&c.name)).collect();
        let numbers: HashSet<_> = store.contacts().map(|c| normalize_number(&c.number).to_string()).collect();

        prop_assert_eq!(ids.len(), store.len());
        prop_assert_eq!(names.len(), store.len());
        prop_assert_eq!(numbers.len(), store.len());
    }

    #[test]
    fn visible_contacts_are_the_filtered_collection(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        filter in name_strategy(),
    ) {
        let mut store = ContactStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        store.set_filter(&filter);

        let needle = filter.to_lowercase();
        let expected: Vec<&Contact> = store
            .contacts()
            .filter(|c| c.name.trim().to_lowercase().contains(&needle))
            .collect();
        let visible: Vec<&Contact> = store.visible_contacts().collect();

        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn rejected_add_changes_nothing(
        ops in proptest::collection::vec(op_strategy(), 1..30),
        name in name_strategy(),
        number in number_strategy(),
    ) {
        let mut store = ContactStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let before = snapshot(&store);
        let filter_before = store.filter().to_string();

        match store.add_contact(NewContact::new(name.as_str(), number.as_str())) {
            Ok(contact) => {
                prop_assert_eq!(&contact.name, &name);
                let contact = contact.clone();
                prop_assert_eq!(store.contacts().next(), Some(&contact));
                let after = snapshot(&store);
                prop_assert_eq!(&after[1..], &before[..]);
            }
            Err(e) => {
                prop_assert_eq!(&e.name, &name);
                prop_assert_eq!(snapshot(&store), before);
            }
        }
        prop_assert_eq!(store.filter(), filter_before.as_str());
    }

    #[test]
    fn delete_keeps_relative_order(
        ops in proptest::collection::vec(op_strategy(), 1..30),
        index in 0usize..8,
    ) {
        let mut store = ContactStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let before = snapshot(&store);
        prop_assume!(!before.is_empty());
        let index = index % before.len();

        let removed = store.delete_contact(&before[index].id);
        prop_assert_eq!(removed.as_ref(), Some(&before[index]));

        let mut expected = before.clone();
        expected.remove(index);
        prop_assert_eq!(snapshot(&store), expected);

        // A second delete with the same id is a no-op
        prop_assert!(store.delete_contact(&before[index].id).is_none());
        prop_assert_eq!(store.len(), before.len() - 1);
    }
}
