use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub(crate) type EffectFn = Arc<dyn Fn() + Send + Sync>;

/// Dependency graph shared by every primitive created against one runtime.
#[derive(Default)]
struct Graph {
    current_observer: Option<usize>,
    // source id -> observers that read it
    dependencies: HashMap<usize, HashSet<usize>>,
    // observer id -> sources it read during its last run
    observer_deps: HashMap<usize, HashSet<usize>>,
    effects: HashMap<usize, EffectFn>,
    memo_dirty: HashMap<usize, bool>,
}

impl Graph {
    fn dependents(&self, source: usize) -> Vec<usize> {
        self.dependencies
            .get(&source)
            .map(|observers| observers.iter().copied().collect())
            .unwrap_or_default()
    }

    fn clear_dependencies(&mut self, observer: usize) {
        if let Some(old_deps) = self.observer_deps.remove(&observer) {
            for source in old_deps {
                if let Some(observers) = self.dependencies.get_mut(&source) {
                    observers.remove(&observer);
                }
            }
        }
    }
}

/// Inner runtime state, shared between the [`Runtime`] handle and the
/// primitives that hold a weak reference back to it.
pub(crate) struct RuntimeInner {
    next_id: AtomicUsize,
    graph: Mutex<Graph>,
}

impl RuntimeInner {
    fn graph(&self) -> MutexGuard<'_, Graph> {
        self.graph.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop an observer and every edge pointing at it or out of it.
    pub(crate) fn remove_observer(&self, observer: usize) {
        // The effect closure may own the last clone of a memo, whose drop
        // takes the graph lock again; release it first.
        let _effect = {
            let mut graph = self.graph();
            graph.memo_dirty.remove(&observer);
            graph.dependencies.remove(&observer);
            graph.clear_dependencies(observer);
            graph.effects.remove(&observer)
        };
    }
}

/// Reactive runtime owning the dependency graph between signals, memos and
/// effects.
///
/// A runtime is an explicit value: the application root creates one and
/// every reactive primitive is created against it. Cloning the handle is
/// cheap and shares the same graph.
///
/// # Examples
///
/// ```
/// use roster::runtime::Runtime;
///
/// let runtime = Runtime::new();
/// let count = runtime.signal(2);
/// let doubled = runtime.memo({
///     let count = count.clone();
///     move || count.get() * 2
/// });
///
/// assert_eq!(doubled.get(), 4);
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// ```
#[derive(Clone)]
pub struct Runtime {
    inner: Arc<RuntimeInner>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("next_id", &self.inner.next_id.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Create a new, empty runtime.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RuntimeInner {
                next_id: AtomicUsize::new(0),
                graph: Mutex::new(Graph::default()),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> std::sync::Weak<RuntimeInner> {
        Arc::downgrade(&self.inner)
    }

    /// Generate the next unique ID for a reactive primitive.
    pub(crate) fn next_id(&self) -> usize {
        self.inner.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Record that the current observer, if any, read `source`.
    pub(crate) fn track_read(&self, source: usize) {
        let mut graph = self.inner.graph();
        if let Some(observer) = graph.current_observer {
            graph
                .dependencies
                .entry(source)
                .or_default()
                .insert(observer);
            graph
                .observer_deps
                .entry(observer)
                .or_default()
                .insert(source);
        }
    }

    /// Propagate a change of `source`.
    ///
    /// Dependent memos (and anything reading them) are marked dirty; effects
    /// reached along the way are re-run once the graph lock is released.
    pub(crate) fn notify(&self, source: usize) {
        let mut pending = Vec::new();
        {
            let mut graph = self.inner.graph();
            let mut stack = graph.dependents(source);
            let mut seen = HashSet::new();

            while let Some(id) = stack.pop() {
                if !seen.insert(id) {
                    continue;
                }
                if let Some(dirty) = graph.memo_dirty.get_mut(&id) {
                    *dirty = true;
                    let next = graph.dependents(id);
                    stack.extend(next);
                } else if let Some(effect) = graph.effects.get(&id) {
                    pending.push((id, Arc::clone(effect)));
                }
            }
        }

        for (id, effect) in pending {
            self.run_effect(id, &effect);
        }
    }

    /// Run `f` with `observer` as the current observer, replacing whatever
    /// it depended on before.
    pub(crate) fn run_tracked<F, R>(&self, observer: usize, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = {
            let mut graph = self.inner.graph();
            graph.clear_dependencies(observer);
            graph.current_observer.replace(observer)
        };

        let result = f();

        self.inner.graph().current_observer = prev;
        result
    }

    pub(crate) fn register_memo(&self, memo: usize) {
        self.inner.graph().memo_dirty.insert(memo, true);
    }

    pub(crate) fn is_memo_dirty(&self, memo: usize) -> bool {
        self.inner
            .graph()
            .memo_dirty
            .get(&memo)
            .copied()
            .unwrap_or(true)
    }

    pub(crate) fn mark_memo_clean(&self, memo: usize) {
        self.inner.graph().memo_dirty.insert(memo, false);
    }

    pub(crate) fn register_effect(&self, effect: usize, run: EffectFn) {
        self.inner.graph().effects.insert(effect, run);
    }

    pub(crate) fn run_effect(&self, effect: usize, run: &EffectFn) {
        self.run_tracked(effect, || run());
    }

    /// Number of live effects; used to check that dropped effects unregister.
    pub fn effect_count(&self) -> usize {
        self.inner.graph().effects.len()
    }

    /// Number of live memos.
    pub fn memo_count(&self) -> usize {
        self.inner.graph().memo_dirty.len()
    }
}
