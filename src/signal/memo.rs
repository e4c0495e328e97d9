use crate::runtime::{Runtime, RuntimeInner};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Graph registration shared by every clone of a memo; the last clone to go
/// takes the memo out of the graph.
struct MemoNode {
    id: usize,
    runtime: Weak<RuntimeInner>,
}

impl Drop for MemoNode {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.remove_observer(self.id);
        }
    }
}

/// A memoized computed value that automatically tracks dependencies.
///
/// The computation runs lazily on first read and again only after one of the
/// signals (or memos) it read has changed.
#[derive(Clone)]
pub struct Memo<T> {
    cached_value: Arc<Mutex<Option<T>>>,
    compute: Arc<dyn Fn() -> T + Send + Sync>,
    node: Arc<MemoNode>,
    runtime: Runtime,
}

impl<T> std::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo").field("id", &self.node.id).finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> Memo<T> {
    /// Create a new memo with the given computation function.
    pub fn new<F>(runtime: &Runtime, compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        runtime.register_memo(id);

        Self {
            cached_value: Arc::new(Mutex::new(None)),
            compute: Arc::new(compute),
            node: Arc::new(MemoNode {
                id,
                runtime: runtime.downgrade(),
            }),
            runtime: runtime.clone(),
        }
    }

    /// Get the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Read the memoized value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let id = self.node.id;
        self.runtime.track_read(id);

        let mut cached = self
            .cached_value
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.runtime.is_memo_dirty(id) {
            *cached = None;
        }
        let value = cached.get_or_insert_with(|| {
            let value = self.runtime.run_tracked(id, || (self.compute)());
            self.runtime.mark_memo_clean(id);
            value
        });
        f(value)
    }
}
