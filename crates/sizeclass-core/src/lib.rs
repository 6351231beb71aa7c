#![forbid(unsafe_code)]

//! Breakpoint resolution and responsive value queries.
//!
//! # Role in sizeclass
//! `sizeclass-core` is the pure logic layer. It turns a width into a named
//! breakpoint class and answers questions about that class. It performs no
//! measurement and holds no reactive state; `sizeclass-runtime` binds it to
//! a live width source.
//!
//! # Primary responsibilities
//! - **BreakpointTable**: named thresholds, sorted ascending.
//! - **Active derivation**: [`active_breakpoint`] picks the greatest
//!   threshold not exceeding the width.
//! - **Predicates**: [`Resolver::up`], [`Resolver::down`],
//!   [`Resolver::between`], [`Resolver::is`], [`Resolver::not`].
//! - **Queries**: [`Query`] resolves with nearest-lower fallback.
//! - **Configuration**: [`config::BreakpointConfig`] (feature `config`).
//!
//! # Example
//!
//! ```
//! use sizeclass_core::{BreakpointTable, Query, Resolver, active_breakpoint};
//!
//! let table = BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?;
//! assert_eq!(active_breakpoint(&table, 720), Some(&"tablet"));
//!
//! let bp = Resolver::for_width(&table, 300.0);
//! let color = Query::new().at("mobile", "red").at("tablet", "green");
//! assert_eq!(bp.resolve(&color), Some(&"red"));
//! # Ok::<(), sizeclass_core::BreakpointError>(())
//! ```

#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod query;
pub mod resolver;
pub mod table;

#[cfg(feature = "config")]
pub use config::{BreakpointConfig, ConfigError};
pub use error::{Absence, BreakpointError, Result};
pub use query::Query;
pub use resolver::{
    Resolver, active_breakpoint, active_position, between, down, is, not, resolve, up,
};
pub use table::BreakpointTable;
