use crate::runtime::Runtime;
use crate::signal::Signal;

use std::sync::{Arc, PoisonError, RwLock};

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A signal-backed container for application state.
///
/// Reads through [`Store::get`] are tracked by memos and effects like any
/// other signal read; subscribers additionally get the new state after every
/// write. Subscribers must not write back into the same store.
pub struct Store<T> {
    state: Signal<T>,
    subscribers: Arc<RwLock<Vec<Subscriber<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(runtime: &Runtime, initial: T) -> Self {
        Self {
            state: Signal::new(runtime, initial),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state.get()
    }

    /// Read state without registering a dependency.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.state.with_untracked(f)
    }

    /// Update the state using a function.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.state.update(f);
        self.notify();
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        self.update(|state| *state = new_state);
    }

    /// Subscribe to state changes.
    ///
    /// The callback will be called whenever the state is updated.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    /// The underlying signal, for building memos over this store.
    pub fn signal(&self) -> &Signal<T> {
        &self.state
    }

    fn notify(&self) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if subscribers.is_empty() {
            return;
        }
        self.state.with_untracked(|state| {
            for subscriber in subscribers.iter() {
                subscriber(state);
            }
        });
    }
}

impl<T: Clone> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish()
    }
}
