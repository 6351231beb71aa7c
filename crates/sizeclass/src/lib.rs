#![forbid(unsafe_code)]

//! sizeclass public facade crate.
//!
//! Re-exports the breakpoint table, resolver and query types from
//! `sizeclass-core` and, with the `runtime` feature, the reactive provider
//! and scoped context from `sizeclass-runtime`. Most applications only need
//! the [`prelude`].
//!
//! ```
//! use sizeclass::prelude::*;
//!
//! let table = BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?;
//! let bp = Resolver::for_width(&table, 800.0);
//! assert!(bp.between(&"mobile", &"tablet")?);
//! assert_eq!(bp.resolve(&Query::new().at("mobile", 20).at("desktop", 50)), Some(&20));
//! # Ok::<(), sizeclass::BreakpointError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use sizeclass_core::{
    Absence, BreakpointError, BreakpointTable, Query, Resolver, Result, active_breakpoint,
    active_position, between, down, is, not, resolve, up,
};

#[cfg(feature = "config")]
pub use sizeclass_core::{BreakpointConfig, ConfigError};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use sizeclass_runtime::{
    BreakpointContext, BreakpointProvider, Observable, ScopeGuard, Subscription, context,
};

#[cfg(feature = "config")]
/// Load a breakpoint table from a TOML or JSON file, picked by extension.
///
/// Files without a `.json` extension are read as TOML.
pub fn load_table(
    path: impl AsRef<std::path::Path>,
) -> std::result::Result<BreakpointTable<String>, ConfigError> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => BreakpointConfig::from_json_file(path)?,
        _ => BreakpointConfig::from_toml_file(path)?,
    };
    tracing::debug!(path = %path.display(), "breakpoint config loaded");
    config.into_table()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{BreakpointError, BreakpointTable, Query, Resolver, active_breakpoint};

    #[cfg(feature = "runtime")]
    pub use crate::{BreakpointContext, BreakpointProvider, Observable, context};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use sizeclass_core as core;
#[cfg(feature = "runtime")]
pub use sizeclass_runtime as runtime;
