//! Multicast observable streams for single-threaded UI code.
//!
//! DESIGN
//! ======
//! A `Subject` keeps its observers in registration order and hands each
//! subscriber a `Subscription` that removes the observer when dropped, so a
//! view that owns its subscriptions cannot outlive them by accident.
//!
//! Emission snapshots the observer list first. Observers may subscribe,
//! unsubscribe, or emit again while being called; an observer removed
//! mid-emission is skipped, and an observer is never re-entered by its own
//! nested emission.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[cfg(test)]
#[path = "subject_test.rs"]
mod subject_test;

/// Boxed observer callback, as passed across trait boundaries.
pub type Observer<T> = Box<dyn FnMut(T)>;

type Slot<T> = Rc<RefCell<dyn FnMut(T)>>;

struct Registry<T> {
    next_id: u64,
    observers: Vec<(u64, Slot<T>)>,
    replay: bool,
    latest: Option<T>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.observers.iter().any(|(oid, _)| *oid == id)
    }
}

/// A multicast stream of `T` values.
///
/// Clones share the same observer list.
pub struct Subject<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: Clone + 'static> Subject<T> {
    /// A subject that only delivers values emitted after subscription.
    pub fn new() -> Self {
        Self::with_registry(false, None)
    }

    /// A subject that replays the latest value to each new subscriber.
    pub fn replaying(initial: T) -> Self {
        Self::with_registry(true, Some(initial))
    }

    fn with_registry(replay: bool, latest: Option<T>) -> Self {
        Self { inner: Rc::new(RefCell::new(Registry { next_id: 0, observers: Vec::new(), replay, latest })) }
    }

    /// Register `observer`; it stays registered until the returned handle drops.
    pub fn subscribe(&self, observer: impl FnMut(T) + 'static) -> Subscription {
        let slot: Slot<T> = Rc::new(RefCell::new(observer));
        let (id, replayed) = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.observers.push((id, Rc::clone(&slot)));
            let replayed = if reg.replay { reg.latest.clone() } else { None };
            (id, replayed)
        };

        if let Some(value) = replayed {
            (&mut *slot.borrow_mut())(value);
        }

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().observers.retain(|(oid, _)| *oid != id);
            }
        })
    }

    /// Deliver `value` to every current observer, in subscription order.
    pub fn emit(&self, value: T) {
        let snapshot: Vec<(u64, Slot<T>)> = {
            let mut reg = self.inner.borrow_mut();
            if reg.replay {
                reg.latest = Some(value.clone());
            }
            reg.observers.iter().map(|(id, slot)| (*id, Rc::clone(slot))).collect()
        };

        for (id, slot) in snapshot {
            if !self.inner.borrow().contains(id) {
                continue;
            }
            let Ok(mut observer) = slot.try_borrow_mut() else {
                log::debug!("skipping re-entrant delivery to observer {id}");
                continue;
            };
            (&mut *observer)(value.clone());
        }
    }

    /// Latest emitted value, for replaying subjects.
    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscribers", &reg.observers.len())
            .field("replay", &reg.replay)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle to a registered observer. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}
