//! Fine-grained reactive primitives.
//!
//! This module provides the core building blocks for reactive programming:
//! - Signals: Reactive state containers
//! - Memos: Cached computed values
//! - Effects: Side effects that react to changes

mod effect;
mod memo;
mod signal;

pub use effect::Effect;
pub use memo::Memo;
pub use signal::Signal;

use crate::runtime::Runtime;

impl Runtime {
    /// Create a signal owned by this runtime.
    pub fn signal<T: Clone + Send + Sync + 'static>(&self, initial: T) -> Signal<T> {
        Signal::new(self, initial)
    }

    /// Create a memo owned by this runtime.
    pub fn memo<T, F>(&self, compute: F) -> Memo<T>
    where
        T: Clone + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Memo::new(self, compute)
    }

    /// Create an effect owned by this runtime.
    ///
    /// The effect runs immediately and then again whenever any signal
    /// it reads changes. Dropping the returned handle stops it.
    pub fn effect<F>(&self, effect: F) -> Effect
    where
        F: Fn() + Send + Sync + 'static,
    {
        Effect::new(self, effect)
    }
}
