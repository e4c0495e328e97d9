//! Derived, search-filtered views of the user collection.

use crate::model::User;
use crate::runtime::Runtime;
use crate::signal::{Memo, Signal};
use crate::store::UserStore;

/// Whether `user` matches an already lower-cased query.
fn matches(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle) || user.email.to_lowercase().contains(needle)
}

/// Users whose name or email contains `query`, ignoring case.
///
/// An empty or whitespace-only query returns every user. Otherwise the query
/// is matched as typed, surrounding whitespace included.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return users.to_vec();
    }

    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| matches(user, &needle))
        .cloned()
        .collect()
}

/// The filtered list as a computed view over the store and a query signal.
///
/// Recomputed lazily, only after the collection or the query changed.
#[derive(Clone, Debug)]
pub struct UserFilter {
    query: Signal<String>,
    view: Memo<Vec<User>>,
}

impl UserFilter {
    pub fn new(runtime: &Runtime, store: &UserStore) -> Self {
        let query = Signal::new(runtime, String::new());
        let view = Memo::new(runtime, {
            let users = store.signal().clone();
            let query = query.clone();
            move || users.with(|users| query.with(|query| filter_users(users, query)))
        });

        Self { query, view }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.query.set(query.into());
    }

    pub fn query(&self) -> String {
        self.query.get()
    }

    pub fn users(&self) -> Vec<User> {
        self.view.get()
    }

    pub fn with_users<R>(&self, f: impl FnOnce(&[User]) -> R) -> R {
        self.view.with(|users| f(users))
    }
}
