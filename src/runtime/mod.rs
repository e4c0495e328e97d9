//! Runtime support for reactive primitives.
//!
//! This module provides the dependency tracking behind signals, memos and
//! effects. There is no ambient runtime: callers create a [`Runtime`] and pass
//! it to whatever needs one.

mod context;

pub use context::Runtime;
pub(crate) use context::{EffectFn, RuntimeInner};
