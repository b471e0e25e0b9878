//! Camp domain model.
//!
//! # Responsibility
//! - Define the camp record and its embedded location value.
//! - Validate camp fields before they reach storage.
//!
//! # Invariants
//! - `moniker` is globally unique and immutable once persisted.
//! - `moniker` only contains `[A-Za-z0-9_-]` so it can form a path segment.
//! - `end_date` is never earlier than `event_date` when set.
//! - `talks == None` means the collection was not hydrated.

use crate::model::talk::Talk;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static MONIKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid moniker regex"));

/// Storage-assigned camp row identifier. Never exposed on the wire.
pub type CampId = i64;

/// Postal location embedded in a camp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub venue_name: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city_town: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Location {
    /// Location that only knows its venue name.
    pub fn venue(venue_name: impl Into<String>) -> Self {
        Self {
            venue_name: venue_name.into(),
            ..Self::default()
        }
    }
}

/// A conference event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camp {
    /// `None` until the camp has been committed.
    pub id: Option<CampId>,
    /// Natural key used in resource paths.
    pub moniker: String,
    pub name: String,
    pub description: Option<String>,
    /// Start of the event. Date searches compare its date component only.
    pub event_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub location: Location,
    /// Hydrated only when explicitly requested.
    pub talks: Option<Vec<Talk>>,
}

/// Validation failures for camp records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampValidationError {
    BlankName,
    InvalidMoniker(String),
    EndBeforeStart {
        event_date: NaiveDateTime,
        end_date: NaiveDateTime,
    },
}

impl Display for CampValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "camp name must not be blank"),
            Self::InvalidMoniker(value) => write!(
                f,
                "invalid moniker `{value}`; expected letters, digits, `-` or `_`"
            ),
            Self::EndBeforeStart {
                event_date,
                end_date,
            } => write!(
                f,
                "camp end_date {end_date} is earlier than event_date {event_date}"
            ),
        }
    }
}

impl Error for CampValidationError {}

impl Camp {
    /// Creates an unsaved camp with an empty location and unhydrated talks.
    pub fn new(
        moniker: impl Into<String>,
        name: impl Into<String>,
        event_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            moniker: moniker.into(),
            name: name.into(),
            description: None,
            event_date,
            end_date: None,
            location: Location::default(),
            talks: None,
        }
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), CampValidationError> {
        if self.name.trim().is_empty() {
            return Err(CampValidationError::BlankName);
        }
        if !is_valid_moniker(&self.moniker) {
            return Err(CampValidationError::InvalidMoniker(self.moniker.clone()));
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.event_date {
                return Err(CampValidationError::EndBeforeStart {
                    event_date: self.event_date,
                    end_date,
                });
            }
        }
        Ok(())
    }

    /// Whether the talks collection was eagerly loaded.
    pub fn talks_loaded(&self) -> bool {
        self.talks.is_some()
    }
}

/// Returns whether `moniker` can be used as a camp natural key.
pub fn is_valid_moniker(moniker: &str) -> bool {
    MONIKER_RE.is_match(moniker)
}
