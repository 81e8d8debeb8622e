//! Deferred callbacks timed against the reactive update cycle.
//!
//! DESIGN
//! ======
//! DOM measurements (scroll height, focus targets) are only valid once the
//! rendered DOM reflects current state. `after_change` lets a caller choose
//! when a callback runs relative to pending view updates. The framework side
//! sits behind `ChangeDetector`, so the room controller runs the same way in
//! the browser, during server rendering, and in tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

#[cfg(test)]
#[path = "deferred_test.rs"]
mod deferred_test;

/// A callback queued for later execution.
pub type Deferred = Box<dyn FnOnce()>;

/// When a deferred callback runs relative to pending view updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDetection {
    /// Flush pending updates synchronously, then run immediately.
    ForceDetection,
    /// Run once, after the next point where no update work is pending.
    #[default]
    WaitForDetection,
    /// Run on the next event-loop turn.
    SimpleDelay,
    /// Run immediately, inline.
    None,
}

impl FromStr for ChangeDetection {
    type Err = ChatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "force" | "force_detection" => Ok(Self::ForceDetection),
            "wait" | "wait_for_detection" => Ok(Self::WaitForDetection),
            "delay" | "simple_delay" => Ok(Self::SimpleDelay),
            "none" => Ok(Self::None),
            other => Err(ChatError::ConfigParse(format!(
                "unknown change detection mode '{other}' (expected force, wait, delay or none)"
            ))),
        }
    }
}

/// Hooks into the UI framework's update cycle.
pub trait ChangeDetector {
    /// Apply pending view updates now.
    fn detect_changes(&self);

    /// Run `task` once, after pending view updates have been applied.
    fn on_idle(&self, task: Deferred);

    /// Run `task` on the next event-loop turn.
    fn defer(&self, task: Deferred);
}

/// Run `task` under the given timing strategy.
pub fn after_change(detector: &dyn ChangeDetector, method: ChangeDetection, task: impl FnOnce() + 'static) {
    match method {
        ChangeDetection::ForceDetection => {
            detector.detect_changes();
            task();
        }
        ChangeDetection::WaitForDetection => detector.on_idle(Box::new(task)),
        ChangeDetection::SimpleDelay => detector.defer(Box::new(task)),
        ChangeDetection::None => task(),
    }
}

// =============================================================================
// HEADLESS DETECTOR
// =============================================================================

/// Detector with explicit queues, for server rendering and tests.
///
/// Nothing runs until the owner calls `flush_idle` or `run_delayed`. Tasks
/// queued while a flush is running wait for the next flush.
#[derive(Default)]
pub struct QueueDetector {
    detections: Cell<usize>,
    idle: RefCell<Vec<Deferred>>,
    delayed: RefCell<VecDeque<Deferred>>,
}

impl QueueDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `detect_changes` calls so far.
    pub fn detections(&self) -> usize {
        self.detections.get()
    }

    pub fn pending_idle(&self) -> usize {
        self.idle.borrow().len()
    }

    pub fn pending_delayed(&self) -> usize {
        self.delayed.borrow().len()
    }

    /// Signal an idle point: run every task queued before this call.
    pub fn flush_idle(&self) -> usize {
        let tasks = std::mem::take(&mut *self.idle.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    /// Advance one event-loop turn: run every delayed task queued before this call.
    pub fn run_delayed(&self) -> usize {
        let tasks = std::mem::take(&mut *self.delayed.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl ChangeDetector for QueueDetector {
    fn detect_changes(&self) {
        self.detections.set(self.detections.get() + 1);
    }

    fn on_idle(&self, task: Deferred) {
        self.idle.borrow_mut().push(task);
    }

    fn defer(&self, task: Deferred) {
        self.delayed.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for QueueDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueDetector")
            .field("detections", &self.detections.get())
            .field("pending_idle", &self.pending_idle())
            .field("pending_delayed", &self.pending_delayed())
            .finish()
    }
}

// =============================================================================
// BROWSER DETECTOR
// =============================================================================

/// Detector backed by the Leptos executor and browser timers.
///
/// Render effects run on the local executor, so forcing detection polls it.
/// The next animation frame is the first point where the DOM reflects them.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDetector;

#[cfg(feature = "hydrate")]
impl ChangeDetector for BrowserDetector {
    fn detect_changes(&self) {
        leptos::task::Executor::poll_local();
    }

    fn on_idle(&self, task: Deferred) {
        leptos::prelude::request_animation_frame(task);
    }

    fn defer(&self, task: Deferred) {
        leptos::prelude::set_timeout(task, std::time::Duration::ZERO);
    }
}

/// Detector for the current build: browser-backed under `hydrate`, queued otherwise.
pub fn default_detector() -> Rc<dyn ChangeDetector> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(BrowserDetector)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(QueueDetector::new())
    }
}
