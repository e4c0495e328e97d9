use crate::model::{Address, Company, User, UserId};

use std::sync::LazyLock;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Reasons a [`UserDraft`] is rejected before reaching the store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Email is required.")]
    EmailRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// The store refuses duplicate ids and one with this id already exists.
    #[error("A user with id {0} already exists.")]
    DuplicateId(UserId),
}

/// Raw contents of the user creation form.
///
/// Every field is free text; `name` and `email` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: String,
    pub city: String,
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Check required fields in form order: name, then email presence, then
    /// email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }

    /// Validate and build the [`User`] to add. Blank optional fields are
    /// dropped rather than stored as empty strings.
    pub fn into_user(self, id: UserId) -> Result<User, ValidationError> {
        self.validate()?;

        Ok(User {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(&self.phone),
            website: non_blank(&self.website),
            company: non_blank(&self.company).map(|name| Company { name: Some(name) }),
            address: non_blank(&self.city).map(|city| Address {
                city: Some(city),
                ..Address::default()
            }),
        })
    }
}

/// Hands out ids for locally created users.
///
/// Ids are wall-clock milliseconds, bumped when two calls land in the same
/// millisecond so they stay strictly increasing.
#[derive(Debug, Default)]
pub struct UserIdGenerator {
    last: AtomicI64,
}

impl UserIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose ids are all greater than `last`, even if the clock
    /// is behind it.
    pub fn starting_after(last: UserId) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    pub fn next_id(&self) -> UserId {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_checked_first() {
        let draft = UserDraft::new("   ", "");
        assert_eq!(draft.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn blank_email_is_required() {
        let draft = UserDraft::new("Ana", "  ");
        assert_eq!(draft.validate(), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["ana", "ana@x", "@x.com", "ana@@x.com", "a na@x.com", "ana@x."] {
            let draft = UserDraft::new("Ana", email);
            assert_eq!(
                draft.validate(),
                Err(ValidationError::InvalidEmail),
                "{email} should be invalid"
            );
        }
    }

    #[test]
    fn email_is_trimmed_before_matching() {
        assert!(UserDraft::new("Ana", "  ana@x.com ").validate().is_ok());
    }

    #[test]
    fn into_user_trims_and_drops_blank_fields() {
        let draft = UserDraft {
            name: " Ana ".into(),
            email: "ana@x.com".into(),
            phone: "   ".into(),
            website: " ana.dev ".into(),
            company: "Acme".into(),
            city: String::new(),
        };

        let user = draft.into_user(42).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.phone, None);
        assert_eq!(user.website.as_deref(), Some("ana.dev"));
        assert_eq!(user.company_name(), Some("Acme"));
        assert_eq!(user.address, None);
    }

    #[test]
    fn city_becomes_address() {
        let mut draft = UserDraft::new("Bo", "bo@x.com");
        draft.city = "Lisbon".into();
        let user = draft.into_user(1).unwrap();
        assert_eq!(user.city(), Some("Lisbon"));
        assert_eq!(user.address.unwrap().street, None);
    }

    #[test]
    fn message_text_matches_form_alerts() {
        assert_eq!(ValidationError::NameRequired.to_string(), "Name is required.");
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn generated_ids_strictly_increase() {
        let ids = UserIdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert!(first < second && second < third);
        assert!(first > 1_600_000_000_000);
    }

    #[test]
    fn starting_after_a_future_id_continues_from_it() {
        let future = Utc::now().timestamp_millis() + 86_400_000;
        let ids = UserIdGenerator::starting_after(future);
        assert_eq!(ids.next_id(), future + 1);
        assert_eq!(ids.next_id(), future + 2);
    }
}
