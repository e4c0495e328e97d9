use crate::model::{User, UserId};
use crate::runtime::Runtime;
use crate::signal::Signal;
use crate::store::Store;

use log::{debug, warn};
use serde::Deserialize;

/// What `add` does with a user whose id is already in the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateIdPolicy {
    /// Append anyway. Later `update`/`delete` calls then see several entries.
    #[default]
    Allow,
    /// Leave the collection unchanged and log a warning.
    Skip,
}

impl std::str::FromStr for DuplicateIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown duplicate id policy '{other}'")),
        }
    }
}

/// A mutation of the user collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    ReplaceAll(Vec<User>),
    Add(User),
    Update(User),
    Delete(UserId),
}

impl UserAction {
    fn name(&self) -> &'static str {
        match self {
            Self::ReplaceAll(_) => "replace_all",
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

/// Apply `action` to `users`. Total: no action can fail.
pub fn reduce(users: &mut Vec<User>, action: UserAction, policy: DuplicateIdPolicy) {
    match action {
        UserAction::ReplaceAll(next) => *users = next,
        UserAction::Add(user) => {
            if policy == DuplicateIdPolicy::Skip && users.iter().any(|u| u.id == user.id) {
                warn!("Skipping add of user {}: id already present", user.id);
                return;
            }
            users.push(user);
        }
        UserAction::Update(user) => {
            if let Some(slot) = users.iter_mut().find(|u| u.id == user.id) {
                *slot = user;
            }
        }
        UserAction::Delete(id) => users.retain(|u| u.id != id),
    }
}

/// The single in-memory holder of the user collection.
///
/// Owned by the application root and handed to consumers by reference; clones
/// share the same collection.
#[derive(Clone, Debug)]
pub struct UserStore {
    store: Store<Vec<User>>,
    policy: DuplicateIdPolicy,
}

impl UserStore {
    /// An empty store.
    pub fn new(runtime: &Runtime, policy: DuplicateIdPolicy) -> Self {
        Self {
            store: Store::new(runtime, Vec::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicateIdPolicy {
        self.policy
    }

    pub fn dispatch(&self, action: UserAction) {
        debug!("Dispatching {}", action.name());
        let policy = self.policy;
        self.store.update(|users| reduce(users, action, policy));
    }

    /// Replace the entire collection, preserving the given order.
    pub fn replace_all(&self, users: Vec<User>) {
        self.dispatch(UserAction::ReplaceAll(users));
    }

    /// Append `user` to the end of the collection.
    pub fn add(&self, user: User) {
        self.dispatch(UserAction::Add(user));
    }

    /// Replace the first entry with the same id, in place. No-op if absent.
    pub fn update(&self, user: User) {
        self.dispatch(UserAction::Update(user));
    }

    /// Remove every entry with `id`. No-op if absent.
    pub fn delete(&self, id: UserId) {
        self.dispatch(UserAction::Delete(id));
    }

    /// Snapshot of the collection. Tracked when read inside a memo or effect.
    pub fn users(&self) -> Vec<User> {
        self.store.get()
    }

    /// Borrow the collection without cloning or tracking.
    pub fn with_users<R>(&self, f: impl FnOnce(&[User]) -> R) -> R {
        self.store.read(|users| f(users))
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.with_users(|users| users.iter().find(|u| u.id == id).cloned())
    }

    pub fn len(&self) -> usize {
        self.with_users(<[User]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `callback` with the new collection after every dispatched action.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&[User]) + Send + Sync + 'static,
    {
        self.store.subscribe(move |users: &Vec<User>| callback(users));
    }

    /// The collection signal, for derived views.
    pub fn signal(&self) -> &Signal<Vec<User>> {
        self.store.signal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn user(id: UserId, name: &str) -> User {
        User::new(id, name, format!("{}@x.com", name.to_lowercase()))
    }

    fn names(store: &UserStore) -> Vec<String> {
        store.users().into_iter().map(|u| u.name).collect()
    }

    #[test]
    fn starts_empty() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Allow);
        assert!(store.is_empty());
        assert_eq!(store.users(), Vec::<User>::new());
    }

    #[test]
    fn ana_bo_scenario() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::default());

        store.replace_all(vec![User::new(1, "Ana", "ana@x.com")]);
        store.add(User::new(2, "Bo", "bo@x.com"));
        assert_eq!(names(&store), ["Ana", "Bo"]);

        store.update(User::new(1, "Ana K", "ana@x.com"));
        assert_eq!(names(&store), ["Ana K", "Bo"]);

        store.delete(2);
        assert_eq!(names(&store), ["Ana K"]);
    }

    #[test]
    fn update_and_delete_of_absent_id_are_noops() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Allow);
        store.replace_all(vec![user(1, "Ana"), user(2, "Bo")]);
        let before = store.users();

        store.update(user(9, "Ghost"));
        store.delete(9);
        assert_eq!(store.users(), before);
    }

    #[test]
    fn duplicate_ids_are_accepted_by_default() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Allow);
        store.add(user(1, "Ana"));
        store.add(user(1, "Twin"));
        assert_eq!(store.len(), 2);

        // update touches only the first match
        store.update(user(1, "Ana K"));
        assert_eq!(names(&store), ["Ana K", "Twin"]);

        // delete removes every match
        store.delete(1);
        assert!(store.is_empty());
    }

    #[test]
    fn skip_policy_rejects_duplicate_add() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Skip);
        store.add(user(1, "Ana"));
        store.add(user(1, "Twin"));
        store.add(user(2, "Bo"));
        assert_eq!(names(&store), ["Ana", "Bo"]);
    }

    #[test]
    fn get_finds_by_id() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Allow);
        store.replace_all(vec![user(1, "Ana"), user(2, "Bo")]);
        assert_eq!(store.get(2).map(|u| u.name), Some("Bo".to_string()));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn subscribers_see_every_dispatch() {
        let store = UserStore::new(&Runtime::new(), DuplicateIdPolicy::Allow);
        let last_len = Arc::new(AtomicUsize::new(usize::MAX));
        let calls = Arc::new(AtomicUsize::new(0));
        store.subscribe({
            let last_len = last_len.clone();
            let calls = calls.clone();
            move |users| {
                last_len.store(users.len(), Ordering::SeqCst);
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.add(user(1, "Ana"));
        store.add(user(2, "Bo"));
        store.delete(1);

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(last_len.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("SKIP".parse::<DuplicateIdPolicy>(), Ok(DuplicateIdPolicy::Skip));
        assert_eq!("allow".parse::<DuplicateIdPolicy>(), Ok(DuplicateIdPolicy::Allow));
        assert!("reject".parse::<DuplicateIdPolicy>().is_err());
    }
}
