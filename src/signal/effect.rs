use crate::runtime::{EffectFn, Runtime, RuntimeInner};
use std::sync::{Arc, Weak};

/// A side effect that runs when its dependencies change.
///
/// Effects automatically track signal reads and re-run when those signals change.
/// The effect runs immediately on creation to establish initial dependencies,
/// and unregisters itself when dropped.
///
/// # Examples
///
/// ```
/// use roster::runtime::Runtime;
/// use roster::{Effect, Signal};
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
///
/// let runtime = Runtime::new();
/// let signal = Signal::new(&runtime, 5);
/// let last_value = Arc::new(AtomicI32::new(0));
///
/// let _effect = Effect::new(&runtime, {
///     let signal = signal.clone();
///     let last_value = last_value.clone();
///     move || last_value.store(signal.get(), Ordering::SeqCst)
/// });
///
/// assert_eq!(last_value.load(Ordering::SeqCst), 5);
/// signal.set(10);
/// assert_eq!(last_value.load(Ordering::SeqCst), 10);
/// ```
pub struct Effect {
    id: usize,
    runtime: Weak<RuntimeInner>,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect").field("id", &self.id).finish()
    }
}

impl Effect {
    /// Create a new effect that runs when dependencies change.
    pub fn new<F>(runtime: &Runtime, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        let effect: EffectFn = Arc::new(effect);

        runtime.register_effect(id, Arc::clone(&effect));
        runtime.run_effect(id, &effect);

        Self {
            id,
            runtime: runtime.downgrade(),
        }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.remove_observer(self.id);
        }
    }
}
