#![forbid(unsafe_code)]

//! Reactive width binding for sizeclass.
//!
//! # Role in sizeclass
//! `sizeclass-runtime` connects the pure resolution logic in
//! `sizeclass-core` to a changing width. A platform layer feeds widths into
//! an [`Observable<f64>`]; a [`BreakpointProvider`] turns them into
//! [`BreakpointContext`] snapshots and notifies dependents when the active
//! class changes. Snapshots can also be entered as thread-local scopes so
//! nested code can query them through [`context`] without extra parameters.
//!
//! # Key Components
//! - [`Observable`] and [`Subscription`]: shared values with change callbacks.
//! - [`BreakpointProvider`]: width source to snapshot, memoized.
//! - [`BreakpointContext`] and [`ScopeGuard`]: snapshots and scopes.

pub mod context;
pub mod provider;
pub mod reactive;

pub use context::{BreakpointContext, ScopeGuard};
pub use provider::BreakpointProvider;
pub use reactive::{Observable, Subscription};
