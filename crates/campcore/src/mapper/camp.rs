//! Camp <-> `CampModel`.

use crate::mapper::models::CampModel;
use crate::mapper::talk::talks_to_models;
use crate::model::camp::{Camp, Location};

/// Projects a camp. Talks are included only when hydrated.
pub fn camp_to_model(camp: &Camp) -> CampModel {
    CampModel {
        name: camp.name.clone(),
        moniker: camp.moniker.clone(),
        description: camp.description.clone(),
        event_date: camp.event_date,
        end_date: camp.end_date,
        venue: camp.location.venue_name.clone(),
        talks: camp
            .talks
            .as_deref()
            .map(talks_to_models)
            .unwrap_or_default(),
    }
}

pub fn camps_to_models(camps: &[Camp]) -> Vec<CampModel> {
    camps.iter().map(camp_to_model).collect()
}

/// Builds an unsaved camp from a wire model.
///
/// The location only carries the venue name; address lines cannot be
/// recovered from the flattened view. Nested talks are ignored.
pub fn camp_from_model(model: &CampModel) -> Camp {
    Camp {
        id: None,
        moniker: model.moniker.clone(),
        name: model.name.clone(),
        description: model.description.clone(),
        event_date: model.event_date,
        end_date: model.end_date,
        location: Location::venue(model.venue.clone()),
        talks: None,
    }
}

/// Overwrites scalar fields of an existing camp.
///
/// Leaves `id`, `moniker`, `talks` and every location field except the venue
/// name untouched.
pub fn apply_camp_model(model: &CampModel, camp: &mut Camp) {
    camp.name = model.name.clone();
    camp.description = model.description.clone();
    camp.event_date = model.event_date;
    camp.end_date = model.end_date;
    camp.location.venue_name = model.venue.clone();
}
