//! Speaker <-> `SpeakerModel`.

use crate::mapper::models::SpeakerModel;
use crate::model::speaker::Speaker;

pub fn speaker_to_model(speaker: &Speaker) -> SpeakerModel {
    SpeakerModel {
        speaker_id: speaker.id,
        first_name: speaker.first_name.clone(),
        middle_name: speaker.middle_name.clone(),
        last_name: speaker.last_name.clone(),
        bio: speaker.bio.clone(),
        company: speaker.company.clone(),
        company_url: speaker.company_url.clone(),
        blog_url: speaker.blog_url.clone(),
        twitter: speaker.twitter.clone(),
        github: speaker.github.clone(),
    }
}

pub fn speakers_to_models(speakers: &[Speaker]) -> Vec<SpeakerModel> {
    speakers.iter().map(speaker_to_model).collect()
}

/// Builds an unsaved speaker. The id is assigned by storage.
pub fn speaker_from_model(model: &SpeakerModel) -> Speaker {
    let mut speaker = Speaker::default();
    apply_speaker_model(model, &mut speaker);
    speaker
}

/// Overwrites every attribute except the id.
pub fn apply_speaker_model(model: &SpeakerModel, speaker: &mut Speaker) {
    speaker.first_name = model.first_name.clone();
    speaker.middle_name = model.middle_name.clone();
    speaker.last_name = model.last_name.clone();
    speaker.bio = model.bio.clone();
    speaker.company = model.company.clone();
    speaker.company_url = model.company_url.clone();
    speaker.blog_url = model.blog_url.clone();
    speaker.twitter = model.twitter.clone();
    speaker.github = model.github.clone();
}
