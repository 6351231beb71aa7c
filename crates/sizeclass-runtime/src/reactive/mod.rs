#![forbid(unsafe_code)]

//! Reactive primitives for width sources.

pub mod observable;

pub use observable::{Observable, Subscription};
