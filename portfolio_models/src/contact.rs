use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use nutype::nutype;
use regex::Regex;

use crate::macros::id;

id!(ContactId);

/// A contact form submission which has been validated and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: ContactId,
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessage,
    pub created_at: DateTime<Utc>,
}

#[nutype(
    sanitize(trim),
    validate(predicate = |name: &str| is_valid_name(name)),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim, lowercase),
    validate(predicate = |email: &str| is_valid_email(email)),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(trim),
    validate(predicate = |phone: &str| is_valid_phone(phone)),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    sanitize(trim),
    validate(predicate = |message: &str| is_valid_message(message)),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

impl ContactName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 50;
}

impl ContactPhone {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 15;
}

impl ContactMessage {
    pub const MAX_LENGTH: usize = 1000;
}

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// 2 to 50 characters, ASCII letters and spaces only.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (ContactName::MIN_LENGTH..=ContactName::MAX_LENGTH).contains(&len)
        && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// Basic `local@domain.tld` shape without whitespace.
pub fn is_valid_email(email: &str) -> bool {
    CONTACT_EMAIL_REGEX.is_match(email)
}

/// 8 to 15 decimal digits.
pub fn is_valid_phone(phone: &str) -> bool {
    (ContactPhone::MIN_LENGTH..=ContactPhone::MAX_LENGTH).contains(&phone.len())
        && phone.bytes().all(|b| b.is_ascii_digit())
}

/// 1 to 1000 characters after trimming surrounding whitespace.
pub fn is_valid_message(message: &str) -> bool {
    let len = message.trim().chars().count();
    (1..=ContactMessage::MAX_LENGTH).contains(&len)
}

/// Raw contact form input, exactly as much as could be learned from the
/// request body. Nothing about the contents is trusted yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmission {
    pub name: SubmissionField,
    pub email: SubmissionField,
    pub phone: SubmissionField,
    pub message: SubmissionField,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionField {
    /// The field was absent, `null` or otherwise empty.
    #[default]
    Missing,
    /// The field was set to something other than a string.
    NotAString,
    Text(String),
}

impl SubmissionField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Missing | Self::NotAString => None,
        }
    }
}

impl From<&str> for SubmissionField {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for SubmissionField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
