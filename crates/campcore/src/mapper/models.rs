//! Wire models exchanged at the request boundary.

use crate::model::speaker::SpeakerId;
use crate::model::talk::TalkId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Boundary view of a camp. Location is flattened into `venue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampModel {
    pub name: String,
    pub moniker: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    /// Venue name of the camp location.
    #[serde(default)]
    pub venue: String,
    /// Empty unless talks were eagerly loaded.
    #[serde(default)]
    pub talks: Vec<TalkModel>,
}

/// Boundary view of a talk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkModel {
    /// Output only; ignored when mapping back onto a talk.
    #[serde(default)]
    pub talk_id: Option<TalkId>,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub level: i32,
    /// On writes, only `speaker_id` is read, by the service layer.
    #[serde(default)]
    pub speaker: Option<SpeakerModel>,
}

/// Boundary view of a speaker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerModel {
    #[serde(default)]
    pub speaker_id: Option<SpeakerId>,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default)]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(rename = "gitHub", default)]
    pub github: Option<String>,
}
