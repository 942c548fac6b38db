#![forbid(unsafe_code)]

//! Observable value holder with change notification and version tracking.
//!
//! # Design
//!
//! [`Store<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Every [`set`](Store::set) replaces the value
//! wholesale and notifies all live subscribers in registration order.
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(clone of T)              |
//! | `with()`      | O(1)                       |
//! | `set()`       | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: a subscriber may call `set()` on the same store.
//!   No borrow is held while callbacks run. The nested publish reaches every
//!   subscriber with the newer value, and the outer notification stops there:
//!   no subscriber is handed a value older than one it has already seen.
//! - **Subscriber leak**: if [`Subscription`] guards are stored forever,
//!   callbacks accumulate. Dead weak references are pruned lazily during
//!   notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info_span};
use web_time::Instant;

/// Subscriber callback, owned strongly by its [`Subscription`] guard and
/// weakly by the store.
type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct StoreInner<T> {
    value: T,
    version: u64,
    /// Subscribers stored as weak references. Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning a `Store` creates a new handle to the **same** inner state.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each `set`/`update`.
/// 2. Every `set` notifies, even when the new value equals the old one.
/// 3. Subscribers are notified in registration order.
/// 4. Dead subscribers (dropped [`Subscription`] guards) are never called.
/// 5. The last value every live subscriber receives is the current value,
///    including when a subscriber calls `set` during notification.
pub struct Store<T> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Create a store holding `value`. The initial version is 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls [`set`](Self::set) on the same store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, bump the version and notify every live subscriber.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Compute a new value from a clone of the current one and publish it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Subscribe to changes. The callback receives the new value after every
    /// `set`.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        // `Rc<dyn Fn(&T)>` cannot coerce to `dyn Any` directly, so box the Rc.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Current version number.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Collect live callbacks first so no borrow is held during calls.
        let (callbacks, value, version) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> = inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            if callbacks.is_empty() {
                return;
            }
            (callbacks, inner.value.clone(), inner.version)
        };

        let subscribers = callbacks.len() as u64;
        let started = Instant::now();
        let span = info_span!(
            "store.publish",
            subscribers,
            version,
            duration_us = tracing::field::Empty
        );
        let _entered = span.enter();

        let mut superseded = false;
        for cb in &callbacks {
            // A nested set already delivered a newer value to everyone.
            if self.inner.borrow().version != version {
                superseded = true;
                break;
            }
            cb(&value);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        span.record("duration_us", duration_us);
        debug!(subscribers, version, duration_us, superseded, "store published");
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the only strong reference to the callback, so
/// the store's weak entry can no longer be upgraded.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
