//! High-level state management with stores.
//!
//! [`Store`] is the generic signal-backed container; [`UserStore`] layers the
//! user collection reducer on top of it.

mod store;
mod users;

pub use store::Store;
pub use users::{reduce, DuplicateIdPolicy, UserAction, UserStore};
