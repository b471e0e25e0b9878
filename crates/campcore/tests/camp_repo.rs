use campcore::db::open_db_in_memory;
use campcore::repo::seed::SAMPLE_MONIKER;
use campcore::{
    Camp, CampRepository, CommitOutcome, EntityKind, Location, Related, RepoError, Speaker,
    SqliteCampRepository, SqliteCampStore, Talk,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::params;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

async fn seeded_store() -> SqliteCampStore {
    let store = SqliteCampStore::open_in_memory().unwrap();
    assert!(store.seed_sample_data().await.unwrap());
    store
}

async fn insert_camp(repo: &mut SqliteCampRepository, camp: Camp) -> i64 {
    let ticket = repo.add(camp.into());
    let outcome = repo.save_changes().await.unwrap();
    outcome.report().unwrap().camp_id(ticket).unwrap()
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let store = seeded_store().await;
    assert!(!store.seed_sample_data().await.unwrap());

    let camps = store.repository().get_all_camps(false).await.unwrap();
    assert_eq!(camps.len(), 1);
}

#[tokio::test]
async fn camps_load_talks_only_when_requested() {
    let store = seeded_store().await;
    let repo = store.repository();

    let shallow = repo.get_all_camps(false).await.unwrap();
    assert!(shallow.iter().all(|camp| camp.talks.is_none()));

    let deep = repo.get_all_camps(true).await.unwrap();
    let talks = deep[0].talks.as_ref().expect("talks hydrated");
    assert_eq!(talks.len(), 2);
    assert!(talks.iter().all(|talk| talk.speaker.is_loaded()));
    assert_eq!(
        talks[0].speaker.loaded().map(Speaker::full_name).as_deref(),
        Some("Shawn Wildermuth")
    );
}

#[tokio::test]
async fn get_camp_never_hydrates_talks_and_ignores_case() {
    let store = seeded_store().await;
    let repo = store.repository();

    let camp = repo
        .get_camp(&SAMPLE_MONIKER.to_lowercase())
        .await
        .unwrap()
        .expect("camp should exist");
    assert_eq!(camp.moniker, SAMPLE_MONIKER);
    assert!(camp.talks.is_none());
    assert_eq!(camp.location.venue_name, "Atlanta Convention Center");

    assert!(repo.get_camp("NOPE").await.unwrap().is_none());
}

#[tokio::test]
async fn event_date_search_ignores_time_of_day() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();
    insert_camp(&mut repo, Camp::new("MORNING", "Morning Camp", at(2024, 3, 1, 9, 30))).await;
    insert_camp(&mut repo, Camp::new("LATE", "Late Camp", at(2024, 3, 1, 23, 59))).await;
    insert_camp(&mut repo, Camp::new("NEXT", "Next Day", at(2024, 3, 2, 0, 0))).await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let found = repo.get_camps_by_event_date(day, false).await.unwrap();
    let monikers: Vec<_> = found.iter().map(|camp| camp.moniker.as_str()).collect();
    assert_eq!(monikers, vec!["MORNING", "LATE"]);

    let empty_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert!(repo
        .get_camps_by_event_date(empty_day, true)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn talks_by_moniker_distinguishes_missing_camp_from_empty_camp() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();
    insert_camp(&mut repo, Camp::new("EMPTY", "Empty Camp", at(2024, 5, 1, 0, 0))).await;

    assert_eq!(
        repo.get_talks_by_moniker("EMPTY", true).await.unwrap(),
        Some(Vec::new())
    );
    assert_eq!(repo.get_talks_by_moniker("MISSING", true).await.unwrap(), None);
    assert_eq!(repo.get_speakers_by_moniker("MISSING").await.unwrap(), None);
}

#[tokio::test]
async fn talk_lookup_is_scoped_to_camp() {
    let store = seeded_store().await;
    let mut repo = store.repository();
    insert_camp(&mut repo, Camp::new("OTHER", "Other Camp", at(2024, 6, 1, 0, 0))).await;

    let talks = repo
        .get_talks_by_moniker(SAMPLE_MONIKER, false)
        .await
        .unwrap()
        .unwrap();
    let talk_id = talks[0].id.unwrap();
    assert!(matches!(talks[0].speaker, Related::Key(_)));

    let scoped = repo
        .get_talk_by_moniker(SAMPLE_MONIKER, talk_id, true)
        .await
        .unwrap()
        .expect("talk belongs to the sample camp");
    assert!(scoped.speaker.is_loaded());

    assert!(repo
        .get_talk_by_moniker("OTHER", talk_id, true)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn speakers_by_moniker_are_distinct() {
    let store = seeded_store().await;
    let mut repo = store.repository();
    let camp = repo.get_camp(SAMPLE_MONIKER).await.unwrap().unwrap();
    let speaker = repo.get_all_speakers().await.unwrap().remove(0);

    let mut extra = Talk::new("Second Talk", "Same speaker again", 300);
    extra.camp_id = camp.id;
    extra.speaker = Related::Loaded(speaker);
    repo.add(extra.into());
    assert!(repo.save_changes().await.unwrap().is_applied());

    let speakers = repo
        .get_speakers_by_moniker(SAMPLE_MONIKER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(speakers.len(), 2);
}

#[tokio::test]
async fn save_changes_without_staged_work_reports_no_changes() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();

    assert_eq!(repo.save_changes().await.unwrap(), CommitOutcome::NoChanges);
}

#[tokio::test]
async fn update_of_vanished_row_reports_no_changes() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();
    let mut ghost = Camp::new("GHOST", "Ghost Camp", at(2024, 1, 1, 0, 0));
    ghost.id = Some(4242);

    repo.update(ghost.into());
    assert_eq!(repo.save_changes().await.unwrap(), CommitOutcome::NoChanges);
    assert!(repo.staged().is_empty());
}

#[tokio::test]
async fn generated_keys_are_reported_per_ticket() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();

    let camp_ticket = repo.add(Camp::new("KEYS", "Keys Camp", at(2024, 4, 1, 0, 0)).into());
    let speaker_ticket = repo.add(Speaker::new("Ada", "Lovelace").into());
    let outcome = repo.save_changes().await.unwrap();
    let report = outcome.report().expect("applied");

    assert_eq!(report.rows_affected(), 2);
    let camp_id = report.camp_id(camp_ticket).unwrap();
    let speaker_id = report.speaker_id(speaker_ticket).unwrap();
    assert!(report.talk_id(camp_ticket).is_none());

    let mut talk = Talk::new("Engines", "Analytical", 200);
    talk.camp_id = Some(camp_id);
    talk.speaker = Related::Key(speaker_id);
    let talk_ticket = repo.add(talk.into());
    let outcome = repo.save_changes().await.unwrap();
    let talk_id = outcome.report().unwrap().talk_id(talk_ticket).unwrap();

    let stored = repo
        .get_talk_by_moniker("KEYS", talk_id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.speaker_id(), Some(speaker_id));
}

#[tokio::test]
async fn duplicate_moniker_is_rejected_by_storage_and_keeps_staged_changes() {
    let store = seeded_store().await;
    let mut repo = store.repository();

    repo.add(Camp::new("FRESH", "Fresh Camp", at(2024, 7, 1, 0, 0)).into());
    repo.add(Camp::new("atl2018", "Imposter", at(2024, 7, 2, 0, 0)).into());

    let err = repo.save_changes().await.unwrap_err();
    assert!(matches!(err, RepoError::DuplicateMoniker(ref moniker) if moniker == "atl2018"));
    assert_eq!(repo.staged().len(), 2);

    // The whole commit rolled back, including the valid camp.
    let reader = store.repository();
    assert!(reader.get_camp("FRESH").await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_changes_are_rejected_before_storage() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();

    repo.add(Camp::new("bad moniker!", "Bad", at(2024, 1, 1, 0, 0)).into());
    assert!(matches!(
        repo.save_changes().await.unwrap_err(),
        RepoError::Validation(_)
    ));
    repo.discard_changes();

    repo.add(Talk::new("Orphan", "No camp", 100).into());
    assert!(matches!(
        repo.save_changes().await.unwrap_err(),
        RepoError::MissingAssociation {
            entity: EntityKind::Talk,
            association: "camp"
        }
    ));
    repo.discard_changes();

    repo.delete(Speaker::new("No", "Id").into());
    assert!(matches!(
        repo.save_changes().await.unwrap_err(),
        RepoError::NotPersisted(EntityKind::Speaker)
    ));
}

#[tokio::test]
async fn staged_changes_are_private_to_their_unit_of_work() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut writer = store.repository();
    let reader = store.repository();

    writer.add(Camp::new("PENDING", "Pending", at(2024, 8, 1, 0, 0)).into());
    assert!(reader.get_camp("PENDING").await.unwrap().is_none());
    assert!(reader.staged().is_empty());

    writer.save_changes().await.unwrap();
    assert!(reader.get_camp("PENDING").await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_camp_cascades_to_talks_but_keeps_speakers() {
    let store = seeded_store().await;
    let mut repo = store.repository();
    let camp = repo.get_camp(SAMPLE_MONIKER).await.unwrap().unwrap();

    repo.delete(camp.into());
    let outcome = repo.save_changes().await.unwrap();
    assert!(outcome.is_applied());

    assert!(repo.get_camp(SAMPLE_MONIKER).await.unwrap().is_none());
    assert_eq!(repo.get_talks_by_moniker(SAMPLE_MONIKER, false).await.unwrap(), None);
    assert_eq!(repo.get_all_speakers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_speaker_with_talks_is_restricted() {
    let store = seeded_store().await;
    let mut repo = store.repository();
    let speaker = repo.get_all_speakers().await.unwrap().remove(0);

    repo.delete(speaker.into());
    assert!(matches!(
        repo.save_changes().await.unwrap_err(),
        RepoError::Constraint(_)
    ));
    assert_eq!(repo.get_all_speakers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn camp_update_keeps_moniker() {
    let store = seeded_store().await;
    let mut repo = store.repository();
    let mut camp = repo.get_camp(SAMPLE_MONIKER).await.unwrap().unwrap();

    camp.name = "Renamed Camp".to_string();
    camp.moniker = "CHANGED".to_string();
    repo.update(camp.into());
    assert!(repo.save_changes().await.unwrap().is_applied());

    let stored = repo.get_camp(SAMPLE_MONIKER).await.unwrap().unwrap();
    assert_eq!(stored.name, "Renamed Camp");
    assert!(repo.get_camp("CHANGED").await.unwrap().is_none());
}

#[tokio::test]
async fn committed_camp_reads_back_with_every_scalar_field() {
    let store = SqliteCampStore::open_in_memory().unwrap();
    let mut repo = store.repository();
    let event_date = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_milli_opt(9, 15, 30, 250)
        .unwrap();
    let mut camp = Camp::new("ATL2024", "Atlanta Code Camp", event_date);
    camp.description = Some("Two days of community talks.".to_string());
    camp.end_date = Some(at(2024, 3, 2, 17, 0));
    camp.location = Location {
        venue_name: "Atlanta Convention Center".to_string(),
        address1: Some("123 Main Street".to_string()),
        address2: Some("Hall B".to_string()),
        address3: Some("Second floor".to_string()),
        city_town: Some("Atlanta".to_string()),
        state_province: Some("GA".to_string()),
        postal_code: Some("30303".to_string()),
        country: Some("USA".to_string()),
    };

    let ticket = repo.add(camp.clone().into());
    let outcome = repo.save_changes().await.unwrap();
    camp.id = outcome.report().unwrap().camp_id(ticket);

    let stored = repo.get_camp("ATL2024").await.unwrap().unwrap();
    assert_eq!(stored, camp);
}

#[tokio::test]
async fn eager_loading_works_past_sqlite_variable_limit() {
    const CAMP_COUNT: usize = 33_000;
    let mut conn = open_db_in_memory().unwrap();
    let tx = conn.transaction().unwrap();
    {
        let mut insert = tx
            .prepare("INSERT INTO camps (moniker, name, event_date) VALUES (?1, ?2, ?3);")
            .unwrap();
        for index in 0..CAMP_COUNT {
            insert
                .execute(params![format!("BULK{index}"), "Bulk Camp", at(2024, 3, 1, 9, 0)])
                .unwrap();
        }
    }
    tx.execute(
        "INSERT INTO speakers (first_name, last_name) VALUES ('Ada', 'Lovelace');",
        [],
    )
    .unwrap();
    tx.execute(
        "INSERT INTO talks (camp_id, speaker_id, title)
         SELECT c.id, s.id, 'Engines' FROM camps c, speakers s WHERE c.moniker = 'BULK42';",
        [],
    )
    .unwrap();
    tx.commit().unwrap();

    let store = SqliteCampStore::try_new(conn).unwrap();
    let repo = store.repository();

    let camps = repo.get_all_camps(true).await.unwrap();
    assert_eq!(camps.len(), CAMP_COUNT);
    assert!(camps.iter().all(Camp::talks_loaded));
    let with_talks: Vec<_> = camps
        .iter()
        .filter(|camp| camp.talks.as_ref().is_some_and(|talks| !talks.is_empty()))
        .collect();
    assert_eq!(with_talks.len(), 1);
    assert_eq!(with_talks[0].moniker, "BULK42");

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let same_day = repo.get_camps_by_event_date(day, true).await.unwrap();
    assert_eq!(same_day.len(), CAMP_COUNT);
}
