//! Property tests for search, sort and selection.

use proptest::prelude::*;

use std::cmp::Ordering;

use datatable::{
    Direction, MatchPass, Record, SelectionSet, Value, compare_values, search, search_with_pass,
    sort,
};

fn record() -> impl Strategy<Value = Record> {
    (any::<i64>(), "[a-zA-Z@. ]{0,12}", proptest::option::of(any::<bool>())).prop_map(
        |(id, name, active)| {
            let record = Record::new().set("id", id).set("name", name);
            match active {
                Some(active) => record.set("active", active),
                None => record,
            }
        },
    )
}

fn records() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record(), 0..24)
}

/// Records carrying a distinct `seq`, in shuffled order.
fn unique_records() -> impl Strategy<Value = Vec<Record>> {
    records()
        .prop_flat_map(|records| {
            let seqs: Vec<i64> = (0..records.len() as i64).collect();
            (Just(records), Just(seqs).prop_shuffle())
        })
        .prop_map(|(records, seqs)| {
            records
                .into_iter()
                .zip(seqs)
                .map(|(record, seq)| record.set("seq", seq))
                .collect()
        })
}

/// Integers and floats around 2^53, where `f64` can no longer hold every
/// integer.
fn large_number() -> impl Strategy<Value = Value> {
    const TWO_53: i64 = 1 << 53;
    prop_oneof![
        (-4i64..=4).prop_map(|k| Value::Int(TWO_53 + k)),
        (-4i64..=4).prop_map(|k| Value::Float((TWO_53 + k) as f64)),
        Just(Value::Float(TWO_53 as f64 + 0.5)),
        Just(Value::Float(f64::NAN)),
    ]
}

fn indices_where(data: &[Record], matches: impl Fn(&str) -> bool) -> Vec<usize> {
    (0..data.len())
        .filter(|&i| data[i].string_values().any(|v| matches(&v.to_lowercase())))
        .collect()
}

proptest! {
    #[test]
    fn test_empty_query_returns_everything(data in records()) {
        prop_assert_eq!(search(&data, ""), data);
    }

    #[test]
    fn test_search_result_is_ordered_subset(data in records(), query in "[a-z.@]{1,3}") {
        let result = search_with_pass(&data, &query);
        prop_assert!(result.indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(result.indices.iter().all(|&i| i < data.len()));

        let query = query.to_lowercase();
        for &i in &result.indices {
            let hit = data[i]
                .string_values()
                .any(|value| value.to_lowercase().contains(query.as_str()));
            prop_assert!(hit);
        }
    }

    #[test]
    fn test_search_picks_precise_pass_or_exact_fallback(data in records(), query in "[a-zA-Z.@]{1,3}") {
        let result = search_with_pass(&data, &query);
        let query = query.to_lowercase();
        let q = query.as_str();

        let precise = indices_where(&data, |v| v.starts_with(q) || v.ends_with(q));
        let loose = indices_where(&data, |v| v.contains(q));

        if !precise.is_empty() {
            prop_assert_eq!(result.pass, MatchPass::Precise);
            prop_assert_eq!(result.indices, precise);
        } else if !loose.is_empty() {
            prop_assert_eq!(result.pass, MatchPass::Loose);
            prop_assert_eq!(result.indices, loose);
        } else {
            prop_assert_eq!(result.pass, MatchPass::None);
            prop_assert!(result.indices.is_empty());
        }
    }

    #[test]
    fn test_sort_orders_large_mixed_numbers(values in proptest::collection::vec(large_number(), 0..48)) {
        let data: Vec<Record> = values.into_iter().map(|v| Record::new().set("k", v)).collect();
        for direction in [Direction::Asc, Direction::Desc] {
            let sorted = sort(&data, "k", direction);
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0].get("k").unwrap(), pair[1].get("k").unwrap());
                let ordering = match direction {
                    Direction::Asc => compare_values(a, b),
                    Direction::Desc => compare_values(b, a),
                };
                prop_assert_ne!(ordering, Ordering::Greater);
            }
        }
    }

    #[test]
    fn test_sort_is_idempotent(data in records(), desc in any::<bool>()) {
        let direction = if desc { Direction::Desc } else { Direction::Asc };
        let once = sort(&data, "name", direction);
        let twice = sort(&once, "name", direction);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_a_permutation(data in records()) {
        let sorted = sort(&data, "active", Direction::Asc);
        prop_assert_eq!(sorted.len(), data.len());
        for record in &data {
            let expected = data.iter().filter(|r| *r == record).count();
            let found = sorted.iter().filter(|r| *r == record).count();
            prop_assert_eq!(expected, found);
        }
    }

    #[test]
    fn test_descending_reverses_ascending_on_unique_keys(data in unique_records()) {
        let mut asc = sort(&data, "seq", Direction::Asc);
        asc.reverse();
        prop_assert_eq!(asc, sort(&data, "seq", Direction::Desc));
    }

    #[test]
    fn test_toggle_twice_restores_selection(data in unique_records(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!data.is_empty());
        let mut selection = SelectionSet::with_key(|r| {
            r.get_int("seq").ok().flatten().unwrap_or_default().to_string()
        });
        let first = &data[0];
        selection.toggle(first);
        let before = selection.selected();

        let row = &data[pick.index(data.len())];
        selection.toggle(row);
        selection.toggle(row);

        let mut after = selection.selected();
        let mut before = before;
        after.sort_by_key(|r| r.get_int("seq").ok().flatten());
        before.sort_by_key(|r| r.get_int("seq").ok().flatten());
        prop_assert_eq!(after, before);
    }

    #[test]
    fn test_select_all_selects_every_displayed_row(data in unique_records()) {
        prop_assume!(!data.is_empty());
        let mut selection = SelectionSet::with_key(|r| {
            r.get_int("seq").ok().flatten().unwrap_or_default().to_string()
        });
        prop_assert!(selection.toggle_all(&data));
        prop_assert!(selection.is_all_selected(&data));
        prop_assert_eq!(selection.len(), data.len());

        prop_assert!(!selection.toggle_all(&data));
        prop_assert!(selection.is_empty());
    }
}
