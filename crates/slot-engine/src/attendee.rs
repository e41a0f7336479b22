//! Meeting attendees.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A person whose calendar takes part in the search.
///
/// The email is the identity: two attendees with the same email are equal and
/// hash the same regardless of name or UI state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    /// Selection state in a picker UI. Ignored by the computation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    /// Photo reference (URI or contact id). Ignored by the computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Attendee {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            selected: false,
            photo: None,
        }
    }
}

impl PartialEq for Attendee {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Attendee {}

impl Hash for Attendee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}
