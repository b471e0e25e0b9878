use campcore::repo::seed::SAMPLE_MONIKER;
use campcore::{
    CampRepository, ResponseStatus, ServiceError, SpeakerModel, SqliteCampStore, TalkModel,
    TalkService,
};

fn talk_request(speaker_id: Option<i64>) -> TalkModel {
    TalkModel {
        title: "Async Rust".to_string(),
        abstract_text: "Futures without tears".to_string(),
        level: 300,
        speaker: speaker_id.map(|id| SpeakerModel {
            speaker_id: Some(id),
            ..SpeakerModel::default()
        }),
        ..TalkModel::default()
    }
}

async fn seeded() -> (SqliteCampStore, Vec<i64>) {
    let store = SqliteCampStore::open_in_memory().unwrap();
    store.seed_sample_data().await.unwrap();
    let speaker_ids = store
        .repository()
        .get_all_speakers()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|speaker| speaker.id)
        .collect();
    (store, speaker_ids)
}

#[tokio::test]
async fn list_talks_respects_speaker_flag() {
    let (store, _) = seeded().await;
    let talks = TalkService::new(store.repository());

    let bare = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap();
    assert_eq!(bare.len(), 2);
    assert!(bare.iter().all(|talk| talk.speaker.is_none()));

    let full = talks.list_talks(SAMPLE_MONIKER, true).await.unwrap();
    assert!(full.iter().all(|talk| talk.speaker.is_some()));

    let err = talks.list_talks("NOPE", true).await.unwrap_err();
    assert_eq!(err.status(), ResponseStatus::NotFound);
}

#[tokio::test]
async fn get_talk_outside_its_camp_is_not_found() {
    let (store, _) = seeded().await;
    let talks = TalkService::new(store.repository());
    let talk_id = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap()[0]
        .talk_id
        .unwrap();

    assert!(talks.get_talk(SAMPLE_MONIKER, talk_id, false).await.is_ok());
    let err = talks.get_talk("OTHER", talk_id, false).await.unwrap_err();
    assert_eq!(err.status(), ResponseStatus::NotFound);
    let err = talks
        .get_talk(SAMPLE_MONIKER, talk_id + 1000, false)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn create_talk_requires_camp_and_existing_speaker() {
    let (store, speaker_ids) = seeded().await;
    let mut talks = TalkService::new(store.repository());

    let err = talks
        .create_talk("NOPE", &talk_request(Some(speaker_ids[0])))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = talks
        .create_talk(SAMPLE_MONIKER, &talk_request(None))
        .await
        .unwrap_err();
    assert_eq!(err.status(), ResponseStatus::BadRequest);

    let err = talks
        .create_talk(SAMPLE_MONIKER, &talk_request(Some(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let created = talks
        .create_talk(SAMPLE_MONIKER, &talk_request(Some(speaker_ids[1])))
        .await
        .unwrap();
    assert_eq!(created.status(), ResponseStatus::Created);
    assert_eq!(
        created.body.speaker.and_then(|speaker| speaker.speaker_id),
        Some(speaker_ids[1])
    );
    assert_eq!(talks.list_talks(SAMPLE_MONIKER, false).await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_talk_applies_fields_and_reassigns_speaker() {
    let (store, speaker_ids) = seeded().await;
    let mut talks = TalkService::new(store.repository());
    let original = talks.list_talks(SAMPLE_MONIKER, true).await.unwrap().remove(0);
    let talk_id = original.talk_id.unwrap();
    assert_eq!(
        original.speaker.as_ref().and_then(|speaker| speaker.speaker_id),
        Some(speaker_ids[0])
    );

    let updated = talks
        .update_talk(SAMPLE_MONIKER, talk_id, &talk_request(Some(speaker_ids[1])))
        .await
        .unwrap();
    assert_eq!(updated.title, "Async Rust");
    assert_eq!(updated.level, 300);

    let stored = talks.get_talk(SAMPLE_MONIKER, talk_id, true).await.unwrap();
    assert_eq!(stored.abstract_text, "Futures without tears");
    assert_eq!(
        stored.speaker.and_then(|speaker| speaker.speaker_id),
        Some(speaker_ids[1])
    );
}

#[tokio::test]
async fn update_without_speaker_keeps_current_speaker() {
    let (store, speaker_ids) = seeded().await;
    let mut talks = TalkService::new(store.repository());
    let talk_id = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap()[0]
        .talk_id
        .unwrap();

    talks
        .update_talk(SAMPLE_MONIKER, talk_id, &talk_request(None))
        .await
        .unwrap();

    let stored = talks.get_talk(SAMPLE_MONIKER, talk_id, true).await.unwrap();
    assert_eq!(
        stored.speaker.and_then(|speaker| speaker.speaker_id),
        Some(speaker_ids[0])
    );
}

#[tokio::test]
async fn missing_talks_on_write_are_client_errors() {
    let (store, _) = seeded().await;
    let mut talks = TalkService::new(store.repository());

    let err = talks
        .update_talk(SAMPLE_MONIKER, 9999, &talk_request(None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.status(), ResponseStatus::BadRequest);

    let err = talks.delete_talk(SAMPLE_MONIKER, 9999).await.unwrap_err();
    assert_eq!(err.status(), ResponseStatus::BadRequest);

    let talk_id = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap()[0]
        .talk_id
        .unwrap();
    let err = talks.delete_talk("OTHER", talk_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(talks.list_talks(SAMPLE_MONIKER, false).await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_talk_removes_only_that_talk() {
    let (store, _) = seeded().await;
    let mut talks = TalkService::new(store.repository());
    let talk_id = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap()[0]
        .talk_id
        .unwrap();

    talks.delete_talk(SAMPLE_MONIKER, talk_id).await.unwrap();

    let remaining = talks.list_talks(SAMPLE_MONIKER, false).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].talk_id, Some(talk_id));
    assert_eq!(store.repository().get_all_speakers().await.unwrap().len(), 2);
}
