//! Tests for parameter negotiation.

use std::cell::RefCell;
use std::rc::Rc;

use datatable::{Direction, PageSize, ParamNegotiator, ParamState};

fn recording(per_page: u64) -> (ParamNegotiator, Rc<RefCell<Vec<ParamState>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let negotiator =
        ParamNegotiator::new(per_page).with_sink(move |state| sink.borrow_mut().push(state.clone()));
    (negotiator, log)
}

#[test]
fn test_initial_state() {
    let negotiator = ParamNegotiator::new(10);
    let state = negotiator.state();
    assert_eq!(state.key(), "");
    assert_eq!(state.page(), 1);
    assert_eq!(state.per_page(), 10);
    assert_eq!(state.sort_by(), None);
    assert_eq!(state.sort_direction(), None);
}

#[test]
fn test_first_sort_is_descending_then_alternates() {
    let (mut negotiator, _) = recording(10);
    assert_eq!(negotiator.toggle_sort("name").sort_direction, Direction::Desc);
    assert_eq!(negotiator.toggle_sort("name").sort_direction, Direction::Asc);
    assert_eq!(negotiator.toggle_sort("name").sort_direction, Direction::Desc);
}

#[test]
fn test_sort_direction_carries_across_columns() {
    let (mut negotiator, _) = recording(10);
    negotiator.toggle_sort("name");
    let state = negotiator.toggle_sort("id");
    assert_eq!(state.sort_by, "id");
    assert_eq!(state.sort_direction, Direction::Asc);
}

#[test]
fn test_every_change_publishes_complete_snapshot() {
    let (mut negotiator, log) = recording(10);

    negotiator.set_key("ali");
    negotiator.toggle_sort("name");
    negotiator.next_page(true);
    negotiator.set_page_size(PageSize::Rows(50));

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    let last = &log[3];
    assert_eq!(last.key(), "ali");
    assert_eq!(last.page(), 2);
    assert_eq!(last.per_page(), 50);
    assert_eq!(last.sort_by(), Some("name"));
    assert_eq!(last.sort_direction(), Some(Direction::Desc));
    // Earlier snapshots already carry the facets set before them.
    assert_eq!(log[1].key(), "ali");
    assert_eq!(log[2].sort_by(), Some("name"));
}

#[test]
fn test_previous_is_noop_on_first_page() {
    let (mut negotiator, log) = recording(10);
    assert!(!negotiator.can_go_previous());
    assert!(!negotiator.previous_page());
    assert_eq!(negotiator.state().page(), 1);
    assert!(log.borrow().is_empty());

    negotiator.next_page(true);
    assert!(negotiator.previous_page());
    assert_eq!(negotiator.state().page(), 1);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_next_is_disabled_without_rows() {
    let (mut negotiator, log) = recording(10);
    assert!(!negotiator.can_go_next(false));
    assert!(!negotiator.next_page(false));
    assert_eq!(negotiator.state().page(), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_unchanged_state_publishes_nothing() {
    let (mut negotiator, log) = recording(10);
    assert!(!negotiator.set_key(""));
    assert!(!negotiator.set_page_size(PageSize::Rows(10)));
    assert!(!negotiator.set_page(1));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_non_positive_values_clamp_to_one() {
    let (mut negotiator, _) = recording(10);
    negotiator.set_page(5);
    assert!(negotiator.set_page(-2));
    assert_eq!(negotiator.state().page(), 1);

    assert!(negotiator.set_per_page(0));
    assert_eq!(negotiator.state().per_page(), 1);
}

#[test]
fn test_all_page_size_publishes_sentinel() {
    let (mut negotiator, log) = recording(10);
    negotiator.set_page_size(PageSize::All);

    let json = serde_json::to_value(&log.borrow()[0]).unwrap();
    assert_eq!(json["perPage"], serde_json::json!(999_999_999_999u64));
    assert_eq!(log.borrow()[0].page_size(), PageSize::All);
}

#[test]
fn test_detach_stops_publishing() {
    let (mut negotiator, log) = recording(10);
    negotiator.detach();
    assert!(!negotiator.has_sink());
    negotiator.set_key("x");
    negotiator.publish();
    assert!(log.borrow().is_empty());
    assert_eq!(negotiator.state().key(), "x");
}

#[test]
fn test_zero_row_page_size_is_clamped_to_one() {
    let (mut negotiator, log) = recording(10);
    assert!(negotiator.set_page_size(PageSize::Rows(0)));
    assert_eq!(negotiator.state().per_page(), 1);
    assert_eq!(log.borrow()[0].per_page(), 1);

    // Already at 1: the clamped value is no change.
    assert!(!negotiator.set_page_size(PageSize::Rows(0)));
    assert_eq!(log.borrow().len(), 1);
}
