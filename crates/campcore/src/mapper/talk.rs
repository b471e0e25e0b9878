//! Talk <-> `TalkModel`.

use crate::mapper::models::TalkModel;
use crate::mapper::speaker::speaker_to_model;
use crate::model::talk::Talk;

/// Projects a talk. The speaker is included only when loaded.
pub fn talk_to_model(talk: &Talk) -> TalkModel {
    TalkModel {
        talk_id: talk.id,
        title: talk.title.clone(),
        abstract_text: talk.abstract_text.clone(),
        level: talk.level,
        speaker: talk.speaker.loaded().map(speaker_to_model),
    }
}

pub fn talks_to_models(talks: &[Talk]) -> Vec<TalkModel> {
    talks.iter().map(talk_to_model).collect()
}

/// Builds an unsaved talk with no camp and no speaker.
pub fn talk_from_model(model: &TalkModel) -> Talk {
    Talk::new(model.title.clone(), model.abstract_text.clone(), model.level)
}

/// Overwrites title, abstract and level. Never touches id or associations.
pub fn apply_talk_model(model: &TalkModel, talk: &mut Talk) {
    talk.title = model.title.clone();
    talk.abstract_text = model.abstract_text.clone();
    talk.level = model.level;
}
