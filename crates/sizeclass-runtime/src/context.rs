#![forbid(unsafe_code)]

//! Breakpoint snapshots and scoped propagation.
//!
//! A [`BreakpointContext`] is an immutable snapshot of a table and its
//! active breakpoint. It can be passed explicitly, or entered as a scope so
//! that nested code reaches it through [`current`] and the free functions
//! in this module without threading a parameter through every call.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use sizeclass_core::{BreakpointTable, Query};
//! use sizeclass_runtime::context::{self, BreakpointContext};
//!
//! let table = Rc::new(BreakpointTable::new([("mobile", 0), ("tablet", 720)])?);
//! let ctx = BreakpointContext::for_width(table, 800.0);
//!
//! let _scope = ctx.enter();
//! assert!(context::is_up(&"mobile")?);
//! assert_eq!(context::value(&Query::new().at("mobile", 4))?, Some(4));
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```
//!
//! # Invariants
//!
//! 1. Scopes nest; the most recently entered live scope for a given name
//!    type wins.
//! 2. Dropping a [`ScopeGuard`] removes only its own scope, whatever order
//!    guards are dropped in.
//! 3. Scopes are per thread.
//!
//! # Failure Modes
//!
//! - No scope entered for the requested name type:
//!   [`BreakpointError::UsedOutsideScope`].

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::Rc;

use sizeclass_core::{BreakpointError, BreakpointTable, Query, Resolver, Result, active_position};

/// An immutable table + active-breakpoint snapshot.
pub struct BreakpointContext<K> {
    table: Rc<BreakpointTable<K>>,
    active: Option<usize>,
}

impl<K> Clone for BreakpointContext<K> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
            active: self.active,
        }
    }
}

/// Same table instance and same active position.
impl<K> PartialEq for BreakpointContext<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table) && self.active == other.active
    }
}

impl<K: fmt::Debug> fmt::Debug for BreakpointContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointContext")
            .field("active", &self.active())
            .field("table", &format_args!("{}", self.table))
            .finish()
    }
}

impl<K> BreakpointContext<K> {
    /// Snapshot for `width`.
    #[must_use]
    pub fn for_width(table: Rc<BreakpointTable<K>>, width: f64) -> Self {
        let active = active_position(&table, width);
        Self { table, active }
    }

    /// Snapshot at an ordinal position; out-of-range positions are inactive.
    #[must_use]
    pub fn from_position(table: Rc<BreakpointTable<K>>, active: Option<usize>) -> Self {
        let active = active.filter(|&position| position < table.len());
        Self { table, active }
    }

    /// The shared table.
    #[must_use]
    pub fn table(&self) -> &Rc<BreakpointTable<K>> {
        &self.table
    }

    /// Name of the active breakpoint.
    #[must_use]
    pub fn active(&self) -> Option<&K> {
        self.active.and_then(|position| self.table.name_at(position))
    }

    /// Ordinal position of the active breakpoint.
    #[must_use]
    pub fn active_position(&self) -> Option<usize> {
        self.active
    }

    /// Borrowing resolver over this snapshot.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_, K> {
        Resolver::from_position(&self.table, self.active)
    }
}

impl<K> BreakpointContext<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Snapshot whose active breakpoint is `active`.
    pub fn at(table: Rc<BreakpointTable<K>>, active: &K) -> Result<Self> {
        let position = table.position(active)?;
        Ok(Self {
            table,
            active: Some(position),
        })
    }

    /// See [`Resolver::up`].
    pub fn up(&self, name: &K) -> Result<bool> {
        self.resolver().up(name)
    }

    /// See [`Resolver::down`].
    pub fn down(&self, name: &K) -> Result<bool> {
        self.resolver().down(name)
    }

    /// See [`Resolver::between`].
    pub fn between(&self, lower: &K, upper: &K) -> Result<bool> {
        self.resolver().between(lower, upper)
    }

    /// See [`Resolver::is`].
    pub fn is(&self, names: &[K]) -> Result<bool> {
        self.resolver().is(names)
    }

    /// See [`Resolver::not`].
    pub fn not(&self, names: &[K]) -> Result<bool> {
        self.resolver().not(names)
    }

    /// Nearest-lower match of `query`.
    #[must_use]
    pub fn resolve<'q, T>(&self, query: &'q Query<K, T>) -> Option<&'q T> {
        self.resolver().resolve(query)
    }

    /// Nearest-lower match of `query`, cloned.
    #[must_use]
    pub fn value<T: Clone>(&self, query: &Query<K, T>) -> Option<T> {
        self.resolve(query).cloned()
    }
}

// ---------------------------------------------------------------------------
// Scopes
// ---------------------------------------------------------------------------

struct Scope {
    id: u64,
    context: Box<dyn Any>,
}

thread_local! {
    static SCOPES: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

/// Keeps a scope entered; leaving happens on drop.
///
/// Each guard owns exactly one entry. Dropping guards out of order removes
/// only their own entries, so scopes entered later stay current.
#[must_use = "the scope is left as soon as the guard is dropped"]
pub struct ScopeGuard {
    id: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard").field("id", &self.id).finish()
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // The removed context is dropped after the borrow is released.
        let removed = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes
                .iter()
                .rposition(|scope| scope.id == self.id)
                .map(|index| scopes.remove(index))
        });
        drop(removed);
    }
}

impl<K: 'static> BreakpointContext<K> {
    /// Make this snapshot the current scope for `K` until the guard drops.
    pub fn enter(&self) -> ScopeGuard {
        let id = NEXT_SCOPE_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        let context: Box<dyn Any> = Box::new(self.clone());
        let depth = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes.push(Scope { id, context });
            scopes.len()
        });
        tracing::trace!(id, depth, active = ?self.active, "breakpoint scope entered");
        ScopeGuard {
            id,
            _not_send: PhantomData,
        }
    }

    /// Run `f` with this snapshot entered.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }
}

/// Number of scopes entered on this thread.
#[must_use]
pub fn depth() -> usize {
    SCOPES.with(|scopes| scopes.borrow().len())
}

/// Innermost scope for name type `K`.
pub fn current<K: 'static>() -> Result<BreakpointContext<K>> {
    SCOPES.with(|scopes| {
        scopes
            .borrow()
            .iter()
            .rev()
            .find_map(|scope| scope.context.downcast_ref::<BreakpointContext<K>>())
            .cloned()
            .ok_or(BreakpointError::UsedOutsideScope)
    })
}

/// Active breakpoint of the current scope.
pub fn active<K: Clone + 'static>() -> Result<Option<K>> {
    Ok(current::<K>()?.active().cloned())
}

/// Is the current scope's active breakpoint at or above `name`?
pub fn is_up<K>(name: &K) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    current::<K>()?.up(name)
}

/// Is the current scope's active breakpoint at or below `name`?
pub fn is_down<K>(name: &K) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    current::<K>()?.down(name)
}

/// Is the current scope's active breakpoint within `lower..=upper`?
pub fn is_between<K>(lower: &K, upper: &K) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    current::<K>()?.between(lower, upper)
}

/// Is the current scope's active breakpoint any of `names`?
pub fn is_class<K>(names: &[K]) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    current::<K>()?.is(names)
}

/// Is the current scope's active breakpoint none of `names`?
pub fn is_not<K>(names: &[K]) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    current::<K>()?.not(names)
}

/// Resolve `query` against the current scope.
pub fn value<K, T>(query: &Query<K, T>) -> Result<Option<T>>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    T: Clone,
{
    Ok(current::<K>()?.value(query))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Rc<BreakpointTable<&'static str>> {
        Rc::new(
            BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)]).unwrap(),
        )
    }

    #[test]
    fn snapshot_predicates() {
        let ctx = BreakpointContext::for_width(table(), 800.0);
        assert_eq!(ctx.active(), Some(&"tablet"));
        assert!(ctx.up(&"mobile").unwrap());
        assert!(ctx.down(&"desktop").unwrap());
        assert!(ctx.between(&"mobile", &"desktop").unwrap());
        assert!(ctx.is(&["tablet"]).unwrap());
        assert!(ctx.not(&["mobile"]).unwrap());
    }

    #[test]
    fn snapshot_value() {
        let ctx = BreakpointContext::at(table(), &"desktop").unwrap();
        let margin = Query::new().at("mobile", 20).at("tablet", 35);
        assert_eq!(ctx.value(&margin), Some(35));
    }

    #[test]
    fn equality_is_table_identity_and_position() {
        let shared = table();
        let a = BreakpointContext::for_width(Rc::clone(&shared), 800.0);
        let b = BreakpointContext::for_width(Rc::clone(&shared), 900.0);
        let c = BreakpointContext::for_width(table(), 800.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn outside_scope_is_an_error() {
        assert_eq!(
            current::<&'static str>().unwrap_err(),
            BreakpointError::UsedOutsideScope
        );
        assert!(is_up(&"mobile").is_err());
        assert!(value(&Query::new().at("mobile", 1)).is_err());
    }

    #[test]
    fn scope_makes_context_current() {
        let ctx = BreakpointContext::for_width(table(), 1300.0);
        ctx.scope(|| {
            assert_eq!(active::<&str>().unwrap(), Some("desktop"));
            assert!(is_up(&"tablet").unwrap());
            assert!(!is_down(&"tablet").unwrap());
            assert!(is_between(&"tablet", &"desktop").unwrap());
            assert!(is_class(&["desktop"]).unwrap());
            assert!(is_not(&["mobile", "tablet"]).unwrap());
        });
        assert!(current::<&'static str>().is_err());
    }

    #[test]
    fn inner_scope_wins_and_unwinds() {
        let outer = BreakpointContext::for_width(table(), 100.0);
        let inner = BreakpointContext::for_width(table(), 1500.0);

        let _outer = outer.enter();
        assert_eq!(active::<&str>().unwrap(), Some("mobile"));
        {
            let _inner = inner.enter();
            assert_eq!(depth(), 2);
            assert_eq!(active::<&str>().unwrap(), Some("desktop"));
        }
        assert_eq!(depth(), 1);
        assert_eq!(active::<&str>().unwrap(), Some("mobile"));
    }

    #[test]
    fn out_of_order_drops_keep_live_scopes() {
        let shared = table();
        let at = |width: f64| BreakpointContext::for_width(Rc::clone(&shared), width);

        let a = at(100.0).enter();
        let b = at(800.0).enter();
        drop(a);
        assert_eq!(active::<&str>().unwrap(), Some("tablet"));

        let c = at(100.0).enter();
        let d = at(1500.0).enter();
        drop(b);
        assert_eq!(depth(), 2);
        assert_eq!(active::<&str>().unwrap(), Some("desktop"));

        drop(d);
        assert_eq!(active::<&str>().unwrap(), Some("mobile"));
        drop(c);
        assert_eq!(depth(), 0);
        assert!(current::<&'static str>().is_err());
    }

    #[test]
    fn scopes_are_keyed_by_name_type() {
        let numeric = Rc::new(BreakpointTable::new([(0_u8, 0), (1, 500)]).unwrap());
        let _numeric = BreakpointContext::for_width(numeric, 600.0).enter();
        assert_eq!(active::<u8>().unwrap(), Some(1));
        assert_eq!(
            active::<&'static str>().unwrap_err(),
            BreakpointError::UsedOutsideScope
        );
    }

    #[test]
    fn inactive_scope_is_not_outside_scope() {
        let table = Rc::new(BreakpointTable::new([("small", 50), ("large", 500)]).unwrap());
        let ctx = BreakpointContext::for_width(table, 10.0);
        ctx.scope(|| {
            assert_eq!(active::<&str>().unwrap(), None);
            assert!(!is_up(&"small").unwrap());
            assert_eq!(value(&Query::new().at("small", 1)).unwrap(), None);
        });
    }

    #[test]
    fn unknown_name_inside_scope_is_unknown_breakpoint() {
        let ctx = BreakpointContext::for_width(table(), 800.0);
        ctx.scope(|| {
            assert!(matches!(
                is_up(&"watch"),
                Err(BreakpointError::UnknownBreakpoint { .. })
            ));
        });
    }
}
