use super::*;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_tasks = Rc::clone(&log);
    let make = move |label: &'static str| {
        let log = Rc::clone(&log_for_tasks);
        Box::new(move || log.borrow_mut().push(label)) as Box<dyn FnOnce()>
    };
    (log, make)
}

// =============================================================
// after_change modes
// =============================================================

#[test]
fn none_runs_inline() {
    let detector = QueueDetector::new();
    let (log, task) = recorder();

    after_change(&detector, ChangeDetection::None, task("ran"));

    assert_eq!(*log.borrow(), vec!["ran"]);
    assert_eq!(detector.detections(), 0);
    assert_eq!(detector.pending_idle(), 0);
    assert_eq!(detector.pending_delayed(), 0);
}

#[test]
fn force_detection_flushes_then_runs_inline() {
    let detector = Rc::new(QueueDetector::new());
    let seen = Rc::new(Cell::new(usize::MAX));

    let probe = Rc::clone(&detector);
    let seen_in_task = Rc::clone(&seen);
    after_change(detector.as_ref(), ChangeDetection::ForceDetection, move || {
        seen_in_task.set(probe.detections());
    });

    assert_eq!(seen.get(), 1);
    assert_eq!(detector.detections(), 1);
}

#[test]
fn wait_for_detection_runs_after_idle_point_only() {
    let detector = QueueDetector::new();
    let (log, task) = recorder();

    after_change(&detector, ChangeDetection::WaitForDetection, task("idle"));
    assert!(log.borrow().is_empty());
    assert_eq!(detector.run_delayed(), 0);
    assert!(log.borrow().is_empty());

    assert_eq!(detector.flush_idle(), 1);
    assert_eq!(*log.borrow(), vec!["idle"]);

    // Runs once.
    assert_eq!(detector.flush_idle(), 0);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn simple_delay_runs_on_next_turn_only() {
    let detector = QueueDetector::new();
    let (log, task) = recorder();

    after_change(&detector, ChangeDetection::SimpleDelay, task("later"));
    assert_eq!(detector.flush_idle(), 0);
    assert!(log.borrow().is_empty());

    assert_eq!(detector.run_delayed(), 1);
    assert_eq!(*log.borrow(), vec!["later"]);
}

#[test]
fn delayed_tasks_run_in_queue_order() {
    let detector = QueueDetector::new();
    let (log, task) = recorder();

    after_change(&detector, ChangeDetection::SimpleDelay, task("a"));
    after_change(&detector, ChangeDetection::SimpleDelay, task("b"));
    detector.run_delayed();

    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn idle_task_queued_during_flush_waits_for_next_flush() {
    let detector = Rc::new(QueueDetector::new());
    let (log, task) = recorder();

    let inner = Rc::clone(&detector);
    let second = task("second");
    let first = task("first");
    detector.on_idle(Box::new(move || {
        first();
        inner.on_idle(second);
    }));

    assert_eq!(detector.flush_idle(), 1);
    assert_eq!(*log.borrow(), vec!["first"]);
    assert_eq!(detector.pending_idle(), 1);

    assert_eq!(detector.flush_idle(), 1);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

// =============================================================
// ChangeDetection parsing
// =============================================================

#[test]
fn change_detection_default_is_wait() {
    assert_eq!(ChangeDetection::default(), ChangeDetection::WaitForDetection);
}

#[test]
fn change_detection_parses_short_and_long_names() {
    assert_eq!("force".parse::<ChangeDetection>(), Ok(ChangeDetection::ForceDetection));
    assert_eq!("Wait".parse::<ChangeDetection>(), Ok(ChangeDetection::WaitForDetection));
    assert_eq!(" simple_delay ".parse::<ChangeDetection>(), Ok(ChangeDetection::SimpleDelay));
    assert_eq!("NONE".parse::<ChangeDetection>(), Ok(ChangeDetection::None));
}

#[test]
fn change_detection_rejects_unknown_mode() {
    let err = "later".parse::<ChangeDetection>().unwrap_err();
    assert!(matches!(err, ChatError::ConfigParse(msg) if msg.contains("later")));
}
