#![forbid(unsafe_code)]

//! Ordered breakpoint tables.
//!
//! A [`BreakpointTable`] maps opaque breakpoint names to numeric thresholds
//! and fixes their canonical order: ascending by threshold.
//!
//! # Usage
//!
//! ```
//! use sizeclass_core::BreakpointTable;
//!
//! // Insertion order does not matter; entries are sorted by threshold.
//! let table = BreakpointTable::new([("desktop", 1200), ("mobile", 0), ("tablet", 720)])?;
//! assert_eq!(table.names(), &["mobile", "tablet", "desktop"]);
//! assert_eq!(table.position(&"tablet")?, 1);
//! assert_eq!(table.threshold(&"desktop")?, 1200.0);
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```
//!
//! # Invariants
//!
//! 1. Names are unique.
//! 2. `names()[i]` has threshold `thresholds()[i]`, and `thresholds()` is
//!    non-decreasing.
//! 3. Entries with equal thresholds keep their insertion order (stable sort).
//! 4. The table is immutable once built.
//!
//! # Failure Modes
//!
//! - Repeated name at construction: [`BreakpointError::DuplicateBreakpoint`].
//! - NaN threshold at construction: [`BreakpointError::InvalidThreshold`].
//! - Lookup of a name not in the table: [`BreakpointError::UnknownBreakpoint`].

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{BreakpointError, Result};

/// An immutable, threshold-ordered set of named breakpoints.
///
/// Negative and duplicate thresholds are accepted; they only change which
/// breakpoint a width selects. An empty table is legal and never has an
/// active breakpoint.
#[derive(Debug, Clone)]
pub struct BreakpointTable<K> {
    /// Names in ascending threshold order.
    names: Vec<K>,
    /// Thresholds, parallel to `names`.
    thresholds: Vec<f64>,
    /// Name -> ordinal position.
    index: FxHashMap<K, usize>,
}

impl<K> BreakpointTable<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Build a table from `(name, threshold)` pairs in any order.
    pub fn new<T, I>(entries: I) -> Result<Self>
    where
        T: Into<f64>,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut seen: FxHashSet<K> = FxHashSet::default();
        let mut pairs: Vec<(K, f64)> = Vec::new();
        for (name, threshold) in entries {
            let threshold = threshold.into();
            if threshold.is_nan() {
                return Err(BreakpointError::invalid_threshold(&name));
            }
            if !seen.insert(name.clone()) {
                return Err(BreakpointError::duplicate(&name));
            }
            pairs.push((name, threshold));
        }

        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut names = Vec::with_capacity(pairs.len());
        let mut thresholds = Vec::with_capacity(pairs.len());
        let mut index = FxHashMap::default();
        for (position, (name, threshold)) in pairs.into_iter().enumerate() {
            index.insert(name.clone(), position);
            names.push(name);
            thresholds.push(threshold);
        }

        tracing::debug!(
            breakpoints = names.len(),
            smallest = thresholds.first().copied(),
            largest = thresholds.last().copied(),
            "breakpoint table built"
        );

        Ok(Self {
            names,
            thresholds,
            index,
        })
    }

    /// Threshold of `name`.
    pub fn threshold(&self, name: &K) -> Result<f64> {
        self.position(name).map(|position| self.thresholds[position])
    }

    /// Ordinal position of `name` in ascending threshold order.
    pub fn position(&self, name: &K) -> Result<usize> {
        self.try_position(name)
            .ok_or_else(|| BreakpointError::unknown(name))
    }

    /// Ordinal position of `name`, or `None` if the table lacks it.
    #[must_use]
    pub fn try_position(&self, name: &K) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the table contains `name`.
    #[must_use]
    pub fn contains(&self, name: &K) -> bool {
        self.index.contains_key(name)
    }
}

impl<K> BreakpointTable<K> {
    /// Names in ascending threshold order.
    #[must_use]
    pub fn names(&self) -> &[K] {
        &self.names
    }

    /// Thresholds in ascending order, parallel to [`names`](Self::names).
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Name at ordinal `position`.
    #[must_use]
    pub fn name_at(&self, position: usize) -> Option<&K> {
        self.names.get(position)
    }

    /// Smallest breakpoint.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.names.first()
    }

    /// Largest breakpoint.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.names.last()
    }

    /// Number of breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no breakpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(name, threshold)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.names.iter().zip(self.thresholds.iter().copied())
    }
}

// The index is derived from `names`, so equality only looks at the entries.
impl<K: PartialEq> PartialEq for BreakpointTable<K> {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.thresholds == other.thresholds
    }
}

impl<K: fmt::Debug> fmt::Display for BreakpointTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BreakpointTable(")?;
        for (i, (name, threshold)) in self.names.iter().zip(&self.thresholds).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name:?}={threshold}")?;
        }
        write!(f, ")")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> BreakpointTable<&'static str> {
        BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])
            .expect("valid table")
    }

    #[test]
    fn names_in_ascending_order() {
        let table = standard();
        assert_eq!(table.names(), &["mobile", "tablet", "desktop"]);
        assert_eq!(table.thresholds(), &[0.0, 720.0, 1200.0]);
    }

    #[test]
    fn out_of_order_input_is_sorted() {
        let table =
            BreakpointTable::new([("desktop", 1200), ("mobile", 0), ("tablet", 720)]).unwrap();
        assert_eq!(table.names(), &["mobile", "tablet", "desktop"]);
        assert_eq!(table.position(&"desktop").unwrap(), 2);
    }

    #[test]
    fn threshold_and_position_lookup() {
        let table = standard();
        assert_eq!(table.threshold(&"tablet").unwrap(), 720.0);
        assert_eq!(table.position(&"mobile").unwrap(), 0);
        assert_eq!(table.try_position(&"watch"), None);
        assert!(table.contains(&"desktop"));
        assert!(!table.contains(&"watch"));
    }

    #[test]
    fn unknown_lookup_is_an_error() {
        let table = standard();
        let err = table.threshold(&"watch").unwrap_err();
        assert!(matches!(err, BreakpointError::UnknownBreakpoint { .. }));
        assert!(table.position(&"watch").is_err());
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = BreakpointTable::new([("a", 0), ("b", 10), ("a", 20)]).unwrap_err();
        assert_eq!(
            err,
            BreakpointError::DuplicateBreakpoint {
                name: "\"a\"".to_string()
            }
        );
    }

    #[test]
    fn nan_threshold_rejected() {
        let err = BreakpointTable::new([("a", 0.0), ("b", f64::NAN)]).unwrap_err();
        assert!(matches!(err, BreakpointError::InvalidThreshold { .. }));
    }

    #[test]
    fn equal_thresholds_keep_insertion_order() {
        let table = BreakpointTable::new([("b", 10), ("a", 10), ("c", 0)]).unwrap();
        assert_eq!(table.names(), &["c", "b", "a"]);
    }

    #[test]
    fn negative_and_infinite_thresholds_allowed() {
        let table =
            BreakpointTable::new([("floor", f64::NEG_INFINITY), ("neg", -5.0), ("zero", 0.0)])
                .unwrap();
        assert_eq!(table.first(), Some(&"floor"));
        assert_eq!(table.last(), Some(&"zero"));
    }

    #[test]
    fn empty_table() {
        let table = BreakpointTable::<u8>::new(Vec::<(u8, f64)>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.first(), None);
    }

    #[test]
    fn integer_names() {
        let table = BreakpointTable::new([(2_u8, 600_u16), (1, 0), (3, 1000)]).unwrap();
        assert_eq!(table.names(), &[1, 2, 3]);
        assert_eq!(table.name_at(1), Some(&2));
        assert_eq!(table.name_at(3), None);
    }

    #[test]
    fn iter_pairs() {
        let table = standard();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(&"mobile", 0.0), (&"tablet", 720.0), (&"desktop", 1200.0)]);
    }

    #[test]
    fn display_format() {
        let s = standard().to_string();
        assert_eq!(
            s,
            "BreakpointTable(\"mobile\"=0, \"tablet\"=720, \"desktop\"=1200)"
        );
    }
}
