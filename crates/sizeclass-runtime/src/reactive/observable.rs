#![forbid(unsafe_code)]

//! Observable values with change notification and version tracking.
//!
//! # Role in sizeclass
//!
//! This is the width source of the runtime. The platform layer owns an
//! `Observable<f64>` holding the measured width, and
//! [`BreakpointProvider`](crate::BreakpointProvider) subscribes to it. The
//! provider republishes its snapshots through a second
//! `Observable<BreakpointContext<K>>`, so dependents use the same
//! subscription API for both. Equal-value sets are dropped here, which is
//! what keeps a steady width from re-triggering class recomputation.
//!
//! # Design
//!
//! [`Observable<T>`] keeps a value in shared storage (`Rc<RefCell<..>>`).
//! Width sources are the typical producers: a platform layer calls
//! [`set`](Observable::set) on every resize and any number of listeners,
//! most importantly [`BreakpointProvider`](crate::BreakpointProvider),
//! react to the change.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing mutation.
//! 2. `set(v)` where `v == current` is a no-op: no version bump, no callbacks.
//! 3. Subscribers are notified in registration order.
//! 4. No borrow is held while callbacks run, so a callback may read or
//!    write any observable, including the one that notified it.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: `Subscription` guards kept forever keep their
//!   callbacks alive. Dropped guards are pruned lazily on the next notify.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct Shared<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` yields another handle to the same state.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("version", &shared.version)
            .field("subscribers", &shared.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not call [`set`](Self::set) on this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return;
            }
            shared.value = value;
            shared.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut shared = self.shared.borrow_mut();
            let before = shared.value.clone();
            f(&mut shared.value);
            let changed = shared.value != before;
            if changed {
                shared.version += 1;
            }
            changed
        };
        if changed {
            self.notify();
        }
    }

    /// Register `callback` for future changes.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.shared
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of value-changing mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (callbacks, value) = {
            let mut shared = self.shared.borrow_mut();
            shared.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> = shared
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (callbacks, shared.value.clone())
        };

        if callbacks.is_empty() {
            return;
        }

        let _span = tracing::trace_span!(
            "sizeclass.notify",
            subscribers = callbacks.len() as u64
        )
        .entered();
        for callback in &callbacks {
            callback(&value);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it unsubscribes: the observable only holds a weak reference.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
