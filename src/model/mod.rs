//! User records and the creation-form draft that produces them.

mod draft;
mod user;

pub use draft::{is_valid_email, UserDraft, UserIdGenerator, ValidationError};
pub use user::{Address, Company, User, UserId};
