use super::*;

fn failure() -> ClientError {
    ClientError::Status { status: 503 }
}

#[test]
fn starts_loading_without_data() {
    let slot: FetchSlot<Vec<i64>> = FetchSlot::new("events");
    assert!(slot.is_loading());
    assert!(slot.data().is_none());
    assert!(slot.error().is_none());
}

#[test]
fn issues_one_ticket_per_distinct_locator() {
    let mut slot: FetchSlot<Vec<i64>> = FetchSlot::new("events");
    assert!(slot.request("http://localhost:5000/api/events").is_some());
    assert!(slot.request("http://localhost:5000/api/events").is_none());
    assert!(slot.request("http://other/api/events").is_some());
    assert_eq!(slot.locator(), Some("http://other/api/events"));
}

#[test]
fn settles_current_ticket() {
    let mut slot = FetchSlot::new("events");
    let ticket = slot.request("/events").expect("ticket");

    assert!(slot.settle(ticket, Ok(vec![1, 2])));
    assert_eq!(slot.data(), Some(&vec![1, 2]));
    assert!(!slot.is_loading());
}

#[test]
fn failure_status_becomes_error_state() {
    let mut slot: FetchSlot<Vec<i64>> = FetchSlot::new("orgs");
    let ticket = slot.request("/orgs").expect("ticket");

    assert!(slot.settle(ticket, Err(failure())));
    assert!(slot.data().is_none());
    assert_eq!(slot.error(), Some("request failed with status 503"));
    assert!(!slot.is_loading());
}

#[test]
fn result_from_outdated_locator_is_dropped() {
    let mut slot = FetchSlot::new("events");
    let old = slot.request("/v1/events").expect("old ticket");
    let new = slot.request("/v2/events").expect("new ticket");

    assert!(!slot.settle(old, Ok(vec![1])));
    assert!(slot.data().is_none());
    assert!(slot.is_loading());

    assert!(slot.settle(new, Ok(vec![2])));
    assert_eq!(slot.data(), Some(&vec![2]));

    // A late error from the old locator must not clobber the newer result.
    assert!(!slot.settle(old, Err(failure())));
    assert!(slot.error().is_none());
}

#[test]
fn reload_supersedes_in_flight_request() {
    let mut slot: FetchSlot<Vec<i64>> = FetchSlot::new("events");
    assert!(slot.reload().is_none());

    let first = slot.request("/events").expect("ticket");
    let second = slot.reload().expect("reload ticket");
    assert_ne!(first, second);
    assert!(second.generation() > first.generation());

    assert!(!slot.settle(first, Ok(vec![1])));
    assert!(slot.settle(second, Ok(vec![3])));
    assert_eq!(slot.data(), Some(&vec![3]));
}

#[test]
fn cancelled_slot_ignores_everything() {
    let mut slot = FetchSlot::new("events");
    let ticket = slot.request("/events").expect("ticket");
    slot.cancel();

    assert!(slot.is_cancelled());
    assert!(!slot.settle(ticket, Ok(vec![1])));
    assert!(slot.data().is_none());
    assert!(slot.request("/other").is_none());
    assert!(slot.reload().is_none());
}
