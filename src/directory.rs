//! The application root: one runtime, one store and the views over it.

use crate::config::Config;
use crate::filter::UserFilter;
use crate::loader::{LoadResult, RemoteLoader};
use crate::model::{User, UserDraft, UserId, UserIdGenerator, ValidationError};
use crate::notify::{Notice, Notifier};
use crate::runtime::Runtime;
use crate::signal::Signal;
use crate::store::{DuplicateIdPolicy, UserStore};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};

/// Progress of the initial remote load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The fetch has not finished; the UI shows a loading indicator.
    Loading,
    Ready,
    Failed,
}

/// Owns the user store and everything derived from it.
///
/// Consumers get it by reference from whoever built it; nothing here is
/// process-global.
pub struct Directory {
    runtime: Runtime,
    store: UserStore,
    filter: UserFilter,
    load_state: Signal<LoadState>,
    notifier: Arc<dyn Notifier>,
    ids: UserIdGenerator,
    load_started: AtomicBool,
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("store", &self.store)
            .field("load_state", &self.load_state())
            .finish_non_exhaustive()
    }
}

impl Directory {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let runtime = Runtime::new();
        let store = UserStore::new(&runtime, config.store.duplicate_ids);
        let filter = UserFilter::new(&runtime, &store);
        let load_state = Signal::new(&runtime, LoadState::Loading);

        Self {
            runtime,
            store,
            filter,
            load_state,
            notifier,
            ids: UserIdGenerator::new(),
            load_started: AtomicBool::new(false),
        }
    }

    /// Replace the generator used for ids of submitted users.
    pub fn with_id_generator(mut self, ids: UserIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }

    pub fn is_loading(&self) -> bool {
        self.load_state() == LoadState::Loading
    }

    /// Run the initial fetch and seed the store with its result.
    ///
    /// On failure the user is notified once, the error is logged and
    /// returned, and the store keeps its previous contents.
    ///
    /// Only the first call talks to the remote source. Later calls make no
    /// request, leave local edits alone and return the current user count.
    pub async fn load(&self, loader: &RemoteLoader) -> LoadResult<usize> {
        if self.load_started.swap(true, Ordering::SeqCst) {
            warn!("Users were already loaded from {}; not fetching again", loader.endpoint);
            return Ok(self.store.len());
        }

        match loader.load_into(&self.store).await {
            Ok(count) => {
                self.load_state.set(LoadState::Ready);
                Ok(count)
            }
            Err(e) => {
                error!("Error fetching users: {e}");
                self.notifier
                    .notify(&Notice::new("Error fetching users", String::new()));
                self.load_state.set(LoadState::Failed);
                Err(e)
            }
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn query(&self) -> String {
        self.filter.query()
    }

    /// The users the list should show for the current query.
    pub fn visible_users(&self) -> Vec<User> {
        self.filter.users()
    }

    /// Detail lookup.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.store.get(id)
    }

    /// Validate a creation form and, if it passes, add the user.
    ///
    /// Validation failures are reported to the user and never reach the
    /// store. Under [`DuplicateIdPolicy::Skip`] an id that is already taken
    /// is reported the same way instead of being silently dropped.
    pub fn submit(&self, draft: UserDraft) -> Result<User, ValidationError> {
        let user = match draft.into_user(self.ids.next_id()) {
            Ok(user) if self.rejects_id(user.id) => {
                return Err(self.reject(ValidationError::DuplicateId(user.id)));
            }
            Ok(user) => user,
            Err(e) => return Err(self.reject(e)),
        };

        info!("Adding user {} ({})", user.id, user.name);
        self.store.add(user.clone());
        self.notifier
            .notify(&Notice::new("Success", "User added successfully!"));
        Ok(user)
    }

    fn rejects_id(&self, id: UserId) -> bool {
        self.store.policy() == DuplicateIdPolicy::Skip && self.store.get(id).is_some()
    }

    fn reject(&self, e: ValidationError) -> ValidationError {
        warn!("Rejected user submission: {e}");
        self.notifier
            .notify(&Notice::new("Validation Error", e.to_string()));
        e
    }

    pub fn update_user(&self, user: User) {
        self.store.update(user);
    }

    pub fn delete_user(&self, id: UserId) {
        self.store.delete(id);
    }
}
