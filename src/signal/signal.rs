use crate::runtime::Runtime;
use std::sync::{Arc, PoisonError, RwLock};

/// A reactive signal that holds a value and notifies dependents when changed.
///
/// Reads made inside a memo or effect are tracked; writes mark dependent
/// memos dirty and re-run dependent effects.
#[derive(Clone)]
pub struct Signal<T> {
    value: Arc<RwLock<T>>,
    id: usize,
    runtime: Runtime,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &*value)
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(runtime: &Runtime, initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            id: runtime.next_id(),
            runtime: runtime.clone(),
        }
    }

    /// Get the current value of the signal.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.runtime.track_read(self.id);
        self.with_untracked(f)
    }

    /// Read the value without registering a dependency.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&*value)
    }

    /// Set a new value for the signal.
    pub fn set(&self, new_value: T) {
        self.update(|value| *value = new_value);
    }

    /// Update the value using a function.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut *value);
        }
        self.runtime.notify(self.id);
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
