//! Speaker entity.

use crate::model::related::Keyed;
use serde::{Deserialize, Serialize};

/// Storage-assigned speaker identifier.
pub type SpeakerId = i64;

/// Person presenting one or more talks.
///
/// Speakers are shared across talks and camps; no talk owns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// `None` until the speaker has been committed.
    pub id: Option<SpeakerId>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub blog_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

impl Speaker {
    /// Creates an unsaved speaker with only name fields set.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Display name in `First Middle Last` order.
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.first_name.as_str()];
        if let Some(middle) = self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            parts.push(middle);
        }
        parts.push(self.last_name.as_str());
        parts.join(" ")
    }
}

impl Keyed for Speaker {
    type Key = SpeakerId;

    fn key(&self) -> Option<SpeakerId> {
        self.id
    }
}
