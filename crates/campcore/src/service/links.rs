//! Resource path generation for created entities.

use crate::model::camp::is_valid_moniker;
use crate::model::talk::TalkId;

pub const CAMPS_ROUTE: &str = "/api/camps";

/// Path of one camp, or `None` when the moniker cannot form a path segment.
pub fn camp_path(moniker: &str) -> Option<String> {
    is_valid_moniker(moniker).then(|| format!("{CAMPS_ROUTE}/{moniker}"))
}

/// Path of one talk under its camp.
pub fn talk_path(moniker: &str, talk_id: TalkId) -> Option<String> {
    camp_path(moniker).map(|camp| format!("{camp}/talks/{talk_id}"))
}
