#![forbid(unsafe_code)]

//! Active-breakpoint derivation and ordinal predicates.
//!
//! Breakpoints model "at least this wide": the active breakpoint for a width
//! is the entry with the greatest threshold that does not exceed it. All
//! comparisons between breakpoints go through ordinal positions in the
//! table, never through the names themselves.
//!
//! # Usage
//!
//! ```
//! use sizeclass_core::{BreakpointTable, Resolver};
//!
//! let table = BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?;
//! let bp = Resolver::for_width(&table, 800.0);
//!
//! assert_eq!(bp.active(), Some(&"tablet"));
//! assert!(bp.up(&"mobile")?);
//! assert!(bp.down(&"desktop")?);
//! assert!(bp.between(&"mobile", &"desktop")?);
//! assert!(bp.is(&["tablet"])?);
//! assert!(bp.not(&["mobile"])?);
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```
//!
//! # Invariants
//!
//! 1. Width equal to a threshold selects that breakpoint.
//! 2. `active_position` is monotone in width.
//! 3. `up(A)` and `down(A)` both hold for the active breakpoint `A`.
//! 4. `between(x, y) == up(x) && down(y)`; never true when `x` is above `y`.
//!
//! # Failure Modes
//!
//! - Width below every threshold (or NaN): no active breakpoint. The
//!   predicates still answer, treating the missing class as lower than
//!   every breakpoint: `up` is false, `down` is true, `is` is false.
//! - Any unknown name passed to a predicate:
//!   [`BreakpointError::UnknownBreakpoint`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::error::{Absence, Result};
use crate::query::Query;
use crate::table::BreakpointTable;

/// Ordinal position of the active breakpoint for `width`.
///
/// Binary-searches the ascending thresholds for the last entry `<= width`.
/// With duplicate thresholds this is the last-positioned one, the same
/// entry a top-down linear scan would stop at.
#[must_use]
pub fn active_position<K>(table: &BreakpointTable<K>, width: f64) -> Option<usize> {
    if width.is_nan() {
        return None;
    }
    table
        .thresholds()
        .partition_point(|&threshold| threshold <= width)
        .checked_sub(1)
}

/// Name of the active breakpoint for `width`, or `None` if the width is
/// below every threshold.
#[must_use]
pub fn active_breakpoint<K>(table: &BreakpointTable<K>, width: impl Into<f64>) -> Option<&K> {
    active_position(table, width.into()).and_then(|position| table.name_at(position))
}

/// A table paired with its active breakpoint.
///
/// Cheap to copy; holds a borrow of the table and an ordinal.
pub struct Resolver<'t, K> {
    table: &'t BreakpointTable<K>,
    active: Option<usize>,
}

impl<K> Clone for Resolver<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Resolver<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Resolver<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("active", &self.active())
            .field("breakpoints", &self.table.len())
            .finish()
    }
}

impl<'t, K> Resolver<'t, K> {
    /// Resolver for the breakpoint active at `width`.
    #[must_use]
    pub fn for_width(table: &'t BreakpointTable<K>, width: f64) -> Self {
        let active = active_position(table, width);
        tracing::trace!(width, active, "active breakpoint derived");
        Self { table, active }
    }

    /// Resolver for an already-known ordinal position.
    ///
    /// Positions outside the table are treated as "no active breakpoint".
    #[must_use]
    pub fn from_position(table: &'t BreakpointTable<K>, active: Option<usize>) -> Self {
        Self {
            table,
            active: active.filter(|&position| position < table.len()),
        }
    }

    /// Resolver with no active breakpoint.
    #[must_use]
    pub fn inactive(table: &'t BreakpointTable<K>) -> Self {
        Self {
            table,
            active: None,
        }
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &'t BreakpointTable<K> {
        self.table
    }

    /// Name of the active breakpoint.
    #[must_use]
    pub fn active(&self) -> Option<&'t K> {
        self.active.and_then(|position| self.table.name_at(position))
    }

    /// Ordinal position of the active breakpoint.
    #[must_use]
    pub fn active_position(&self) -> Option<usize> {
        self.active
    }
}

impl<'t, K> Resolver<'t, K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Resolver whose active breakpoint is `active`.
    pub fn at(table: &'t BreakpointTable<K>, active: &K) -> Result<Self> {
        let position = table.position(active)?;
        Ok(Self {
            table,
            active: Some(position),
        })
    }

    /// Resolver whose active breakpoint is `active`, or inactive for `None`.
    pub fn at_optional(table: &'t BreakpointTable<K>, active: Option<&K>) -> Result<Self> {
        match active {
            Some(name) => Self::at(table, name),
            None => Ok(Self::inactive(table)),
        }
    }

    /// Order of the active breakpoint relative to `name`.
    ///
    /// A missing active breakpoint orders below everything.
    pub fn ordering(&self, name: &K) -> Result<Ordering> {
        let other = self.table.position(name)?;
        Ok(match self.active {
            Some(active) => active.cmp(&other),
            None => Ordering::Less,
        })
    }

    /// Is the active breakpoint at or above `name`?
    pub fn up(&self, name: &K) -> Result<bool> {
        Ok(self.ordering(name)?.is_ge())
    }

    /// Is the active breakpoint at or below `name`?
    pub fn down(&self, name: &K) -> Result<bool> {
        Ok(self.ordering(name)?.is_le())
    }

    /// Is the active breakpoint within `lower..=upper`?
    ///
    /// Always false when `lower` is ordinally above `upper`.
    pub fn between(&self, lower: &K, upper: &K) -> Result<bool> {
        let up = self.up(lower)?;
        let down = self.down(upper)?;
        Ok(up && down)
    }

    /// Is the active breakpoint any of `names`?
    pub fn is(&self, names: &[K]) -> Result<bool> {
        let mut hit = false;
        for name in names {
            let position = self.table.position(name)?;
            hit |= self.active == Some(position);
        }
        Ok(hit)
    }

    /// Is the active breakpoint none of `names`?
    pub fn not(&self, names: &[K]) -> Result<bool> {
        self.is(names).map(|hit| !hit)
    }

    /// Nearest-lower match of `query` against the active breakpoint.
    #[must_use]
    pub fn resolve<'q, T>(&self, query: &'q Query<K, T>) -> Option<&'q T> {
        query.lookup(self.table, self.active?)
    }

    /// Like [`resolve`](Self::resolve), reporting why nothing matched.
    pub fn resolve_explained<'q, T>(
        &self,
        query: &'q Query<K, T>,
    ) -> std::result::Result<&'q T, Absence> {
        let active = self.active.ok_or(Absence::NoActiveBreakpoint)?;
        query
            .lookup(self.table, active)
            .ok_or(Absence::UnresolvedQuery)
    }
}

// ---------------------------------------------------------------------------
// Free-function forms
// ---------------------------------------------------------------------------

/// Is `active` at or above `name`?
pub fn up<K>(table: &BreakpointTable<K>, active: Option<&K>, name: &K) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Resolver::at_optional(table, active)?.up(name)
}

/// Is `active` at or below `name`?
pub fn down<K>(table: &BreakpointTable<K>, active: Option<&K>, name: &K) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Resolver::at_optional(table, active)?.down(name)
}

/// Is `active` within `lower..=upper`?
pub fn between<K>(
    table: &BreakpointTable<K>,
    active: Option<&K>,
    lower: &K,
    upper: &K,
) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Resolver::at_optional(table, active)?.between(lower, upper)
}

/// Is `active` any of `names`?
pub fn is<K>(table: &BreakpointTable<K>, active: Option<&K>, names: &[K]) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Resolver::at_optional(table, active)?.is(names)
}

/// Is `active` none of `names`?
pub fn not<K>(table: &BreakpointTable<K>, active: Option<&K>, names: &[K]) -> Result<bool>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Resolver::at_optional(table, active)?.not(names)
}

/// Nearest-lower match of `query` for `active`.
///
/// `Ok(None)` means no value applies; `Err` means `active` is not in the table.
pub fn resolve<'q, K, T>(
    table: &BreakpointTable<K>,
    active: Option<&K>,
    query: &'q Query<K, T>,
) -> Result<Option<&'q T>>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    Ok(Resolver::at_optional(table, active)?.resolve(query))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
