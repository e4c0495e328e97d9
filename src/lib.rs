//! # Roster
//!
//! A reactive, client-side user directory.
//!
//! Roster keeps a list of users in memory, seeds it once from a REST
//! collection endpoint and lets a UI add, update, delete and search them.
//!
//! ## Reactive core
//!
//! - `Runtime` - Explicit dependency graph; every primitive is created against one
//! - `Signal<T>` - Reactive values that notify dependents when changed
//! - `Memo<T>` - Computed values that automatically track dependencies
//! - `Effect` - Side effects that run when dependencies change
//! - `Store<T>` - Signal-backed state container with subscribers
//!
//! ## User directory
//!
//! - `UserStore` - The user collection and its replace/add/update/delete reducer
//! - `UserFilter` - Case-insensitive name/email search as a computed view
//! - `RemoteLoader` - One-shot fetch of the collection endpoint
//! - `Directory` - Application root wiring the above to a `Notifier`
//!
//! ```
//! use roster::runtime::Runtime;
//! use roster::{DuplicateIdPolicy, User, UserFilter, UserStore};
//!
//! let runtime = Runtime::new();
//! let store = UserStore::new(&runtime, DuplicateIdPolicy::Allow);
//! let filter = UserFilter::new(&runtime, &store);
//!
//! store.replace_all(vec![User::new(1, "Ana", "ana@x.com")]);
//! store.add(User::new(2, "Bo", "bo@x.com"));
//! filter.set_query("bo");
//!
//! assert_eq!(filter.users(), vec![User::new(2, "Bo", "bo@x.com")]);
//! ```

pub mod config;
pub mod directory;
pub mod filter;
pub mod loader;
pub mod logger;
pub mod model;
pub mod notify;
pub mod runtime;
pub mod signal;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, ConfigError};
pub use directory::{Directory, LoadState};
pub use filter::{filter_users, UserFilter};
pub use loader::{LoadError, RemoteLoader};
pub use model::{Address, Company, User, UserDraft, UserId, ValidationError};
pub use notify::{LogNotifier, Notice, Notifier, RecordingNotifier};
pub use signal::{Effect, Memo, Signal};
pub use store::{DuplicateIdPolicy, Store, UserAction, UserStore};
