#![forbid(unsafe_code)]

//! Error model for breakpoint resolution.
//!
//! # Design
//!
//! Two kinds of failure exist and they are kept apart on purpose:
//!
//! 1. **Setup errors** ([`BreakpointError`]): a name that is not in the
//!    table, a table built with a repeated name, or an operator used without
//!    a scope. These are returned as `Err` and callers propagate them with `?`.
//! 2. **Data-dependent absence** ([`Absence`]): the width is below every
//!    threshold, or a query has no entry at or below the active class. These
//!    are normal runtime states and surface as `None` from the regular API.
//!    [`Absence`] only exists so diagnostics can say *why* a value is missing.

use std::fmt;

/// Configuration and wiring errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BreakpointError {
    /// A breakpoint name was looked up that the table does not contain.
    #[error("unknown breakpoint: {name}")]
    UnknownBreakpoint {
        /// Debug rendering of the offending name.
        name: String,
    },
    /// The same name was supplied twice while building a table.
    #[error("duplicate breakpoint: {name}")]
    DuplicateBreakpoint {
        /// Debug rendering of the offending name.
        name: String,
    },
    /// A threshold has no position in an ascending order (NaN).
    #[error("breakpoint {name} has a NaN threshold")]
    InvalidThreshold {
        /// Debug rendering of the offending name.
        name: String,
    },
    /// A scoped operator was called with no breakpoint scope entered.
    #[error("breakpoint operator used outside of a breakpoint scope")]
    UsedOutsideScope,
}

impl BreakpointError {
    pub(crate) fn unknown(name: &impl fmt::Debug) -> Self {
        Self::UnknownBreakpoint {
            name: format!("{name:?}"),
        }
    }

    pub(crate) fn duplicate(name: &impl fmt::Debug) -> Self {
        Self::DuplicateBreakpoint {
            name: format!("{name:?}"),
        }
    }

    pub(crate) fn invalid_threshold(name: &impl fmt::Debug) -> Self {
        Self::InvalidThreshold {
            name: format!("{name:?}"),
        }
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownBreakpoint { .. } => "unknown_breakpoint",
            Self::DuplicateBreakpoint { .. } => "duplicate_breakpoint",
            Self::InvalidThreshold { .. } => "invalid_threshold",
            Self::UsedOutsideScope => "used_outside_scope",
        }
    }
}

/// Standard result type for sizeclass APIs.
pub type Result<T> = std::result::Result<T, BreakpointError>;

/// Why a resolution produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// The width is below every threshold in the table.
    NoActiveBreakpoint,
    /// The query has no entry at or below the active breakpoint.
    UnresolvedQuery,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveBreakpoint => write!(f, "no breakpoint is active"),
            Self::UnresolvedQuery => {
                write!(f, "query has no value at or below the active breakpoint")
            }
        }
    }
}
