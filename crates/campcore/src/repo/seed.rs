//! Sample schedule used by the CLI and local development databases.

use crate::model::camp::{Camp, Location};
use crate::model::related::Related;
use crate::model::speaker::Speaker;
use crate::model::talk::Talk;
use crate::repo::camp_repo::{insert_camp, insert_speaker, insert_talk, RepoResult};
use chrono::NaiveDate;
use log::info;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

pub const SAMPLE_MONIKER: &str = "ATL2018";

pub(crate) fn seed_sample_data(conn: &mut Connection) -> RepoResult<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM camps WHERE moniker = ?1;",
            [SAMPLE_MONIKER],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(false);
    }

    let camp_id = insert_camp(&tx, &sample_camp())?;
    let mut speaker_ids = Vec::new();
    for speaker in sample_speakers() {
        speaker_ids.push(insert_speaker(&tx, &speaker)?);
    }

    let talks = [
        (
            "Entity Framework From Scratch",
            "Working with Entity Framework is fun",
            100,
        ),
        (
            "Writing Sample Data Made Easy",
            "Thinking of good sample data examples is tiring.",
            200,
        ),
    ];
    for ((title, abstract_text, level), speaker_id) in talks.into_iter().zip(speaker_ids) {
        let mut talk = Talk::new(title, abstract_text, level);
        talk.camp_id = Some(camp_id);
        talk.speaker = Related::Key(speaker_id);
        insert_talk(&tx, &talk)?;
    }

    tx.commit()?;
    info!("event=seed module=repo status=ok moniker={SAMPLE_MONIKER}");
    Ok(true)
}

fn sample_camp() -> Camp {
    let event_date = NaiveDate::from_ymd_opt(2018, 10, 18)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let mut camp = Camp::new(SAMPLE_MONIKER, "Atlanta Code Camp", event_date);
    camp.description = Some("A one-day community code camp.".to_string());
    camp.location = Location {
        venue_name: "Atlanta Convention Center".to_string(),
        address1: Some("123 Main Street".to_string()),
        city_town: Some("Atlanta".to_string()),
        state_province: Some("GA".to_string()),
        postal_code: Some("12345".to_string()),
        country: Some("USA".to_string()),
        ..Location::default()
    };
    camp
}

fn sample_speakers() -> [Speaker; 2] {
    let mut shawn = Speaker::new("Shawn", "Wildermuth");
    shawn.company = Some("Wilder Minds LLC".to_string());
    shawn.company_url = Some("http://wilderminds.com".to_string());
    shawn.blog_url = Some("http://wildermuth.com".to_string());
    shawn.twitter = Some("shawnwildermuth".to_string());
    shawn.github = Some("shawnwildermuth".to_string());

    let mut resa = Speaker::new("Resa", "Wildermuth");
    resa.company = Some("Wilder Minds LLC".to_string());
    resa.company_url = Some("http://wilderminds.com".to_string());
    resa.blog_url = Some("http://shawnandresa.com".to_string());
    resa.twitter = Some("resawildermuth".to_string());
    resa.github = Some("resawildermuth".to_string());

    [shawn, resa]
}
