#![forbid(unsafe_code)]

//! Binds a live width source to a breakpoint table.
//!
//! [`BreakpointProvider`] subscribes to an [`Observable<f64>`] width and
//! keeps a [`BreakpointContext`] current. Dependents subscribe to the
//! provider and hear about a change only when the active class or the table
//! actually changes, not on every pixel of a resize.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use sizeclass_core::BreakpointTable;
//! use sizeclass_runtime::{BreakpointProvider, Observable};
//!
//! let table = Rc::new(BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?);
//! let width = Observable::new(400.0);
//! let provider = BreakpointProvider::new(table, &width);
//! assert_eq!(provider.active(), Some("mobile"));
//!
//! width.set(900.0);
//! assert_eq!(provider.active(), Some("tablet"));
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```
//!
//! # Invariants
//!
//! 1. After any width or table change the snapshot equals
//!    `BreakpointContext::for_width(table, width)`.
//! 2. Recomputation is memoized on (table generation, width bits); feeding
//!    the same inputs twice does no work.
//! 3. Subscribers are notified only when the snapshot changes.
//!
//! # Failure Modes
//!
//! - Width below every threshold: the snapshot has no active breakpoint.
//!   That is a normal state (e.g. before the first measurement).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use sizeclass_core::{BreakpointTable, active_position};
use tracing::{debug, info_span};
use web_time::Instant;

use crate::context::BreakpointContext;
use crate::reactive::{Observable, Subscription};

/// Inputs of the last recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoKey {
    table_generation: u64,
    width_bits: u64,
}

struct ProviderState<K> {
    table: RefCell<Rc<BreakpointTable<K>>>,
    table_generation: Cell<u64>,
    width: Observable<f64>,
    memo: Cell<Option<MemoKey>>,
    recomputes: Cell<u64>,
    context: Observable<BreakpointContext<K>>,
}

impl<K: fmt::Debug + 'static> ProviderState<K> {
    fn recompute(&self, width: f64) {
        let key = MemoKey {
            table_generation: self.table_generation.get(),
            width_bits: width.to_bits(),
        };
        if self.memo.get() == Some(key) {
            return;
        }
        self.memo.set(Some(key));
        self.recomputes.set(self.recomputes.get() + 1);

        let start = Instant::now();
        let span = info_span!(
            "sizeclass.recompute",
            width,
            table_generation = key.table_generation,
            duration_us = tracing::field::Empty
        )
        .entered();

        let table = Rc::clone(&self.table.borrow());
        let position = active_position(&table, width);
        let previous = self.context.with(BreakpointContext::active_position);
        if previous != position {
            debug!(
                from = ?previous.and_then(|p| table.name_at(p)),
                to = ?position.and_then(|p| table.name_at(p)),
                width,
                "breakpoint changed"
            );
        }
        let next = BreakpointContext::from_position(table, position);

        span.record("duration_us", start.elapsed().as_micros() as u64);
        self.context.set(next);
    }
}

/// Keeps the active breakpoint in sync with a width source.
///
/// Not `Send`: the provider, its width source and its subscribers live on
/// one UI thread.
pub struct BreakpointProvider<K> {
    state: Rc<ProviderState<K>>,
    _width_subscription: Subscription,
}

impl<K: fmt::Debug + 'static> BreakpointProvider<K> {
    /// Bind `table` to `width`, computing the initial snapshot immediately.
    pub fn new(table: impl Into<Rc<BreakpointTable<K>>>, width: &Observable<f64>) -> Self {
        let table = table.into();
        let initial = width.get();
        let state = Rc::new(ProviderState {
            context: Observable::new(BreakpointContext::for_width(Rc::clone(&table), initial)),
            table: RefCell::new(table),
            table_generation: Cell::new(0),
            width: width.clone(),
            memo: Cell::new(Some(MemoKey {
                table_generation: 0,
                width_bits: initial.to_bits(),
            })),
            recomputes: Cell::new(1),
        });

        let weak: Weak<ProviderState<K>> = Rc::downgrade(&state);
        let subscription = width.subscribe(move |&w| {
            if let Some(state) = weak.upgrade() {
                state.recompute(w);
            }
        });

        Self {
            state,
            _width_subscription: subscription,
        }
    }

    /// Replace the table and recompute against the current width.
    pub fn set_table(&self, table: impl Into<Rc<BreakpointTable<K>>>) {
        *self.state.table.borrow_mut() = table.into();
        let generation = self.state.table_generation.get() + 1;
        self.state.table_generation.set(generation);
        debug!(generation, "breakpoint table replaced");
        self.state.recompute(self.state.width.get());
    }

    /// Current snapshot.
    #[must_use]
    pub fn context(&self) -> BreakpointContext<K> {
        self.state.context.get()
    }

    /// Observable handle to the snapshot, for wiring into other reactive code.
    #[must_use]
    pub fn contexts(&self) -> Observable<BreakpointContext<K>> {
        self.state.context.clone()
    }

    /// Current table.
    #[must_use]
    pub fn table(&self) -> Rc<BreakpointTable<K>> {
        Rc::clone(&self.state.table.borrow())
    }

    /// Last observed width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.state.width.get()
    }

    /// Ordinal position of the active breakpoint.
    #[must_use]
    pub fn active_position(&self) -> Option<usize> {
        self.state.context.with(|ctx| ctx.active_position())
    }

    /// Number of non-memoized recomputations, including the initial one.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.state.recomputes.get()
    }

    /// Register `callback` for snapshot changes.
    pub fn subscribe(&self, callback: impl Fn(&BreakpointContext<K>) + 'static) -> Subscription {
        self.state.context.subscribe(callback)
    }

    /// Run `f` with the current snapshot entered as a scope.
    pub fn scope<R>(&self, f: impl FnOnce(&BreakpointContext<K>) -> R) -> R {
        let ctx = self.context();
        let _guard = ctx.enter();
        f(&ctx)
    }
}

impl<K: Clone + fmt::Debug + 'static> BreakpointProvider<K> {
    /// Name of the active breakpoint.
    #[must_use]
    pub fn active(&self) -> Option<K> {
        self.state.context.with(|ctx| ctx.active().cloned())
    }
}

impl<K: fmt::Debug + 'static> fmt::Debug for BreakpointProvider<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointProvider")
            .field("width", &self.width())
            .field("context", &self.context())
            .field("recomputes", &self.recompute_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
