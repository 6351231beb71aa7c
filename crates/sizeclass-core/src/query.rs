#![forbid(unsafe_code)]

//! Responsive value queries: pick a value based on the active breakpoint.
//!
//! A [`Query<K, T>`] is a partial map from breakpoint names to values. It is
//! resolved mobile-first: a value set for a smaller breakpoint applies to
//! every larger breakpoint until overridden.
//!
//! # Usage
//!
//! ```
//! use sizeclass_core::{BreakpointTable, Query, Resolver};
//!
//! let table = BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?;
//! let margin = Query::new().at("mobile", 20).at("desktop", 50);
//!
//! // tablet inherits from mobile
//! assert_eq!(Resolver::for_width(&table, 800.0).resolve(&margin), Some(&20));
//! assert_eq!(Resolver::for_width(&table, 1400.0).resolve(&margin), Some(&50));
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```
//!
//! # Invariants
//!
//! 1. An entry for the active breakpoint always wins.
//! 2. Otherwise the nearest entry *below* the active breakpoint wins.
//! 3. Resolution never falls forward to a larger breakpoint.
//! 4. Resolution is a pure function of (table, active position, query).
//!
//! # Failure Modes
//!
//! - No entry at or below the active breakpoint: `None`.
//! - Keys the table does not know never match; [`Query::validate`] reports
//!   them.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{BreakpointError, Result};
use crate::table::BreakpointTable;

/// A partial breakpoint → value map with nearest-lower resolution.
#[derive(Clone)]
pub struct Query<K, T> {
    values: FxHashMap<K, T>,
}

impl<K, T> Query<K, T>
where
    K: Eq + Hash,
{
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// Set the value for `name` (builder pattern).
    #[must_use]
    pub fn at(mut self, name: K, value: T) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Set the value for `name`, returning the previous one.
    pub fn set(&mut self, name: K, value: T) -> Option<T> {
        self.values.insert(name, value)
    }

    /// Remove the value for `name`, reverting it to inheritance.
    pub fn clear(&mut self, name: &K) -> Option<T> {
        self.values.remove(name)
    }

    /// The explicit value for `name`, without fallback.
    #[must_use]
    pub fn get(&self, name: &K) -> Option<&T> {
        self.values.get(name)
    }

    /// Whether `name` has an explicit value.
    #[must_use]
    pub fn contains(&self, name: &K) -> bool {
        self.values.contains_key(name)
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the query has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Walk from `active` down to position 0, returning the first hit.
    pub(crate) fn lookup(&self, table: &BreakpointTable<K>, active: usize) -> Option<&T> {
        let names = table.names();
        let start = active.min(names.len().checked_sub(1)?);
        names[..=start]
            .iter()
            .rev()
            .find_map(|name| self.values.get(name))
    }

    /// Explicit entries in the table's ascending order.
    ///
    /// Keys the table does not contain are skipped.
    pub fn explicit_values<'a>(
        &'a self,
        table: &'a BreakpointTable<K>,
    ) -> impl Iterator<Item = (&'a K, &'a T)> + 'a {
        table
            .names()
            .iter()
            .filter_map(|name| self.values.get(name).map(|value| (name, value)))
    }

    /// Map every value to a new type, keeping the same keys.
    #[must_use]
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Query<K, U>
    where
        K: Clone,
    {
        Query {
            values: self
                .values
                .iter()
                .map(|(name, value)| (name.clone(), f(value)))
                .collect(),
        }
    }
}

impl<K, T> Query<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Fail on the first key the table does not contain.
    pub fn validate(&self, table: &BreakpointTable<K>) -> Result<()> {
        match self.values.keys().find(|name| !table.contains(name)) {
            Some(name) => Err(BreakpointError::unknown(name)),
            None => Ok(()),
        }
    }

    /// Resolve against `table` with `active` as the active breakpoint.
    ///
    /// Returns `Ok(None)` when nothing applies and `Err` when `active` is
    /// not in the table.
    pub fn resolve<'q>(&'q self, table: &BreakpointTable<K>, active: &K) -> Result<Option<&'q T>> {
        let position = table.position(active)?;
        Ok(self.lookup(table, position))
    }

    /// [`resolve`](Self::resolve), cloning the result.
    pub fn resolve_cloned(&self, table: &BreakpointTable<K>, active: &K) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.resolve(table, active).map(|value| value.cloned())
    }
}

impl<K: Eq + Hash, T> Default for Query<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, T: PartialEq> PartialEq for Query<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Eq + Hash, T: Eq> Eq for Query<K, T> {}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Query<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

impl<K: Eq + Hash, T> FromIterator<(K, T)> for Query<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, T> Extend<(K, T)> for Query<K, T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
