//! Tests for the event system.

use super::*;
use std::sync::Mutex;

#[test]
fn test_event_support_new() {
    let support: SearchEventSupport<u32> = SearchEventSupport::new();

    assert_eq!(support.listener_count(), 0);
    assert!(!support.has_listeners());
}

#[test]
fn test_event_support_fire_events() {
    let mut support: SearchEventSupport<u32> = SearchEventSupport::new();
    let listener = Arc::new(CountingEventListener::new());
    support.add_listener(listener.clone());

    let path = ChoicePath::from(vec![0, 1]);
    support.fire_search_started();
    support.fire_run_finished(&path, RunKind::Failure);
    support.fire_run_finished(&path, RunKind::Success);
    support.fire_solution_found(&7, &path);
    support.fire_search_ended(&SearchStatistics::new());

    assert_eq!(listener.search_started_count(), 1);
    assert_eq!(listener.run_finished_count(), 2);
    assert_eq!(listener.failed_run_count(), 1);
    assert_eq!(listener.solution_found_count(), 1);
    assert_eq!(listener.search_ended_count(), 1);
}

#[test]
fn test_counting_listener_reset() {
    let listener = CountingEventListener::new();
    SearchEventListener::<u32>::on_search_started(&listener);
    SearchEventListener::<u32>::on_search_started(&listener);
    assert_eq!(listener.search_started_count(), 2);

    listener.reset();
    assert_eq!(listener.search_started_count(), 0);
}

#[test]
fn test_clear_listeners() {
    let mut support: SearchEventSupport<u32> = SearchEventSupport::new();
    support.add_listener(Arc::new(CountingEventListener::new()));
    support.add_listener(Arc::new(LoggingEventListener::with_prefix("test ")));
    assert_eq!(support.listener_count(), 2);

    support.clear_listeners();
    assert!(!support.has_listeners());
}

#[derive(Debug)]
struct OrderListener {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl SearchEventListener<u32> for OrderListener {
    fn on_search_started(&self) {
        self.log.lock().unwrap().push(self.name);
    }
}

#[test]
fn test_listeners_fire_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut support: SearchEventSupport<u32> = SearchEventSupport::new();
    for name in ["first", "second", "third"] {
        support.add_listener(Arc::new(OrderListener {
            name,
            log: Arc::clone(&log),
        }));
    }

    support.fire_search_started();
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}
