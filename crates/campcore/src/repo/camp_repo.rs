//! Camp repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the async read API over camps, talks and speakers with explicit
//!   eager-loading flags.
//! - Stage inserts, updates and deletes per unit of work and commit them in
//!   one SQLite transaction.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Reads never hydrate related rows unless the caller asks for them.
//! - "Not found" is `Ok(None)`; only storage faults are `Err`.
//! - `save_changes` is the only operation that mutates persisted state and is
//!   all-or-nothing.
//! - Staged changes belong to one repository instance and are invisible to
//!   other instances until committed.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::camp::{Camp, CampId, CampValidationError, Location};
use crate::model::related::Related;
use crate::model::speaker::{Speaker, SpeakerId};
use crate::model::talk::{Talk, TalkId};
use crate::repo::seed;
use crate::repo::unit_of_work::{
    ChangeKind, ChangeSet, CommitOutcome, CommitReport, Entity, EntityKind, GeneratedKey,
    StageTicket, StagedChange,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior,
};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

const CAMP_SELECT_SQL: &str = "SELECT
    id,
    moniker,
    name,
    description,
    event_date,
    end_date,
    venue_name,
    address1,
    address2,
    address3,
    city_town,
    state_province,
    postal_code,
    country
FROM camps";

const CAMP_ORDER_SQL: &str = " ORDER BY event_date ASC, id ASC";

const TALK_COLUMNS: &str = "t.id AS talk_id,
    t.camp_id AS talk_camp_id,
    t.speaker_id AS talk_speaker_id,
    t.title AS talk_title,
    t.abstract AS talk_abstract,
    t.level AS talk_level";

const SPEAKER_COLUMNS: &str = "s.id AS speaker_id,
    s.first_name AS speaker_first_name,
    s.middle_name AS speaker_middle_name,
    s.last_name AS speaker_last_name,
    s.bio AS speaker_bio,
    s.company AS speaker_company,
    s.company_url AS speaker_company_url,
    s.blog_url AS speaker_blog_url,
    s.twitter AS speaker_twitter,
    s.github AS speaker_github";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for camp persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// A staged camp failed field validation.
    Validation(CampValidationError),
    /// Storage rejected a camp whose moniker is already taken.
    DuplicateMoniker(String),
    /// A staged talk lacks a required association.
    MissingAssociation {
        entity: EntityKind,
        association: &'static str,
    },
    /// An update or delete was staged for an entity without an id.
    NotPersisted(EntityKind),
    /// Storage rejected the commit on a constraint other than moniker uniqueness.
    Constraint(String),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted into a valid entity.
    InvalidData(String),
    /// The blocking storage task did not complete.
    Worker(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateMoniker(moniker) => write!(f, "moniker already in use: {moniker}"),
            Self::MissingAssociation {
                entity,
                association,
            } => write!(f, "{entity} requires an associated {association}"),
            Self::NotPersisted(entity) => {
                write!(f, "{entity} has no id; only persisted entities can be changed")
            }
            Self::Constraint(message) => write!(f, "storage constraint violated: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "camp repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted camp data: {message}"),
            Self::Worker(message) => write!(f, "storage task failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<CampValidationError> for RepoError {
    fn from(value: CampValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the camp schedule.
///
/// Each instance is one unit of work: `add`, `update` and `delete` only stage
/// changes, and `save_changes` commits everything staged on this instance.
#[async_trait]
pub trait CampRepository: Send + Sync {
    /// Lists every camp. `include_talks` hydrates talks and their speakers.
    async fn get_all_camps(&self, include_talks: bool) -> RepoResult<Vec<Camp>>;
    /// Lists camps whose event date falls on `date`, ignoring time of day.
    async fn get_camps_by_event_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> RepoResult<Vec<Camp>>;
    /// Loads one camp by moniker without its talks.
    async fn get_camp(&self, moniker: &str) -> RepoResult<Option<Camp>>;
    /// Lists talks of one camp; `None` when the camp does not exist.
    async fn get_talks_by_moniker(
        &self,
        moniker: &str,
        include_speaker: bool,
    ) -> RepoResult<Option<Vec<Talk>>>;
    /// Loads one talk scoped to a camp.
    async fn get_talk_by_moniker(
        &self,
        moniker: &str,
        talk_id: TalkId,
        include_speaker: bool,
    ) -> RepoResult<Option<Talk>>;
    async fn get_speaker(&self, speaker_id: SpeakerId) -> RepoResult<Option<Speaker>>;
    /// Lists distinct speakers presenting at one camp; `None` when the camp does not exist.
    async fn get_speakers_by_moniker(&self, moniker: &str) -> RepoResult<Option<Vec<Speaker>>>;
    async fn get_all_speakers(&self) -> RepoResult<Vec<Speaker>>;
    /// Stages an insert. Any id on the entity is ignored.
    fn add(&mut self, entity: Entity) -> StageTicket;
    /// Stages an update of a persisted entity.
    fn update(&mut self, entity: Entity) -> StageTicket;
    /// Stages removal of a persisted entity.
    fn delete(&mut self, entity: Entity) -> StageTicket;
    /// Changes staged since the last successful commit.
    fn staged(&self) -> &[StagedChange];
    fn discard_changes(&mut self);
    /// Commits all staged changes atomically.
    ///
    /// On `Err` nothing is persisted and the staged changes are kept.
    async fn save_changes(&mut self) -> RepoResult<CommitOutcome>;
}

/// Shared handle on one migrated SQLite connection.
///
/// Cloning is cheap; every clone talks to the same database.
///
/// Storage calls from all units of work run one at a time on this connection.
/// SQLite admits a single writer per database, and a single connection is what
/// lets units of work share an in-memory database. The mutex guards only the
/// connection handle: no rows are cached here, and staged changes live on each
/// `SqliteCampRepository` until its own commit.
#[derive(Clone)]
pub struct SqliteCampStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCampStore {
    /// Wraps a migrated connection.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_camp_connection_ready(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Starts a new unit of work.
    pub fn repository(&self) -> SqliteCampRepository {
        SqliteCampRepository {
            store: self.clone(),
            changes: ChangeSet::default(),
        }
    }

    /// Inserts the sample camp, speakers and talks in one transaction.
    ///
    /// Returns `false` without writing when the sample camp already exists.
    pub async fn seed_sample_data(&self) -> RepoResult<bool> {
        self.run(seed::seed_sample_data).await
    }

    async fn run<T, F>(&self, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| RepoError::Db(DbError::ConnectionPoisoned))?;
            op(&mut guard)
        })
        .await
        .map_err(|err| RepoError::Worker(err.to_string()))?
    }
}

/// SQLite-backed unit of work over a `SqliteCampStore`.
pub struct SqliteCampRepository {
    store: SqliteCampStore,
    changes: ChangeSet,
}

#[async_trait]
impl CampRepository for SqliteCampRepository {
    async fn get_all_camps(&self, include_talks: bool) -> RepoResult<Vec<Camp>> {
        self.store
            .run(move |conn| load_camps(conn, &CampFilter::All, include_talks))
            .await
    }

    async fn get_camps_by_event_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> RepoResult<Vec<Camp>> {
        self.store
            .run(move |conn| load_camps(conn, &CampFilter::EventDay(date), include_talks))
            .await
    }

    async fn get_camp(&self, moniker: &str) -> RepoResult<Option<Camp>> {
        let filter = CampFilter::Moniker(moniker.to_string());
        let camps = self
            .store
            .run(move |conn| load_camps(conn, &filter, false))
            .await?;
        Ok(camps.into_iter().next())
    }

    async fn get_talks_by_moniker(
        &self,
        moniker: &str,
        include_speaker: bool,
    ) -> RepoResult<Option<Vec<Talk>>> {
        let moniker = moniker.to_string();
        self.store
            .run(move |conn| {
                let Some(camp_id) = camp_id_for_moniker(conn, &moniker)? else {
                    return Ok(None);
                };
                let sql = format!(
                    "{} WHERE t.camp_id = ?1 ORDER BY t.id ASC",
                    talk_select_sql(include_speaker)
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([camp_id])?;
                let mut talks = Vec::new();
                while let Some(row) = rows.next()? {
                    talks.push(parse_talk_row(row, include_speaker)?);
                }
                Ok(Some(talks))
            })
            .await
    }

    async fn get_talk_by_moniker(
        &self,
        moniker: &str,
        talk_id: TalkId,
        include_speaker: bool,
    ) -> RepoResult<Option<Talk>> {
        let moniker = moniker.to_string();
        self.store
            .run(move |conn| {
                let sql = format!(
                    "{}
                     INNER JOIN camps c ON c.id = t.camp_id
                     WHERE c.moniker = ?1
                       AND t.id = ?2;",
                    talk_select_sql(include_speaker)
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query(params![moniker, talk_id])?;
                if let Some(row) = rows.next()? {
                    return Ok(Some(parse_talk_row(row, include_speaker)?));
                }
                Ok(None)
            })
            .await
    }

    async fn get_speaker(&self, speaker_id: SpeakerId) -> RepoResult<Option<Speaker>> {
        self.store
            .run(move |conn| {
                let speaker = conn
                    .query_row(
                        &format!("SELECT {SPEAKER_COLUMNS} FROM speakers s WHERE s.id = ?1;"),
                        [speaker_id],
                        parse_speaker_row,
                    )
                    .optional()?;
                Ok(speaker)
            })
            .await
    }

    async fn get_speakers_by_moniker(&self, moniker: &str) -> RepoResult<Option<Vec<Speaker>>> {
        let moniker = moniker.to_string();
        self.store
            .run(move |conn| {
                let Some(camp_id) = camp_id_for_moniker(conn, &moniker)? else {
                    return Ok(None);
                };
                let sql = format!(
                    "SELECT DISTINCT {SPEAKER_COLUMNS}
                     FROM speakers s
                     INNER JOIN talks t ON t.speaker_id = s.id
                     WHERE t.camp_id = ?1
                     ORDER BY s.id ASC;"
                );
                let speakers = collect_speakers(conn, &sql, [camp_id])?;
                Ok(Some(speakers))
            })
            .await
    }

    async fn get_all_speakers(&self) -> RepoResult<Vec<Speaker>> {
        self.store
            .run(|conn| {
                let sql = format!("SELECT {SPEAKER_COLUMNS} FROM speakers s ORDER BY s.id ASC;");
                collect_speakers(conn, &sql, [])
            })
            .await
    }

    fn add(&mut self, entity: Entity) -> StageTicket {
        self.changes.stage(ChangeKind::Insert, entity)
    }

    fn update(&mut self, entity: Entity) -> StageTicket {
        self.changes.stage(ChangeKind::Update, entity)
    }

    fn delete(&mut self, entity: Entity) -> StageTicket {
        self.changes.stage(ChangeKind::Delete, entity)
    }

    fn staged(&self) -> &[StagedChange] {
        self.changes.as_slice()
    }

    fn discard_changes(&mut self) {
        self.changes.clear();
    }

    async fn save_changes(&mut self) -> RepoResult<CommitOutcome> {
        if self.changes.is_empty() {
            return Ok(CommitOutcome::NoChanges);
        }

        let started_at = Instant::now();
        let staged_count = self.changes.len();
        if let Err(err) = validate_changes(self.changes.as_slice()) {
            warn!(
                "event=uow_commit module=repo status=error changes={staged_count} error_code=invalid_change error={err}"
            );
            return Err(err);
        }

        let changes = self.changes.as_slice().to_vec();
        let report = match self
            .store
            .run(move |conn| commit_changes(conn, &changes))
            .await
        {
            Ok(report) => report,
            Err(err) => {
                warn!(
                    "event=uow_commit module=repo status=error changes={staged_count} duration_ms={} error_code=commit_rejected error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        };

        self.changes.clear();
        info!(
            "event=uow_commit module=repo status=ok changes={staged_count} rows_affected={} duration_ms={}",
            report.rows_affected(),
            started_at.elapsed().as_millis()
        );

        if report.rows_affected() == 0 {
            return Ok(CommitOutcome::NoChanges);
        }
        Ok(CommitOutcome::Applied(report))
    }
}

enum CampFilter {
    All,
    EventDay(NaiveDate),
    Moniker(String),
}

impl CampFilter {
    /// Condition over `camps` columns and its bind values.
    fn condition(&self) -> (&'static str, Vec<Value>) {
        match self {
            Self::All => ("1 = 1", Vec::new()),
            Self::EventDay(date) => (
                "date(event_date) = ?",
                vec![Value::Text(date.format("%Y-%m-%d").to_string())],
            ),
            Self::Moniker(moniker) => ("moniker = ?", vec![Value::Text(moniker.clone())]),
        }
    }
}

fn load_camps(conn: &Connection, filter: &CampFilter, include_talks: bool) -> RepoResult<Vec<Camp>> {
    let (condition, bind_values) = filter.condition();
    let sql = format!("{CAMP_SELECT_SQL} WHERE {condition}{CAMP_ORDER_SQL}");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut camps = Vec::new();
    while let Some(row) = rows.next()? {
        camps.push(parse_camp_row(row)?);
    }

    if include_talks && !camps.is_empty() {
        attach_talks(conn, filter, &mut camps)?;
    }
    Ok(camps)
}

/// Hydrates every camp's talks (with speakers) using one query.
///
/// Talks are selected through the same camp filter, so the bound parameter
/// count does not grow with the number of camps.
fn attach_talks(conn: &Connection, filter: &CampFilter, camps: &mut [Camp]) -> RepoResult<()> {
    let (condition, bind_values) = filter.condition();
    let sql = format!(
        "{} WHERE t.camp_id IN (SELECT id FROM camps WHERE {condition}) ORDER BY t.id ASC",
        talk_select_sql(true)
    );

    let mut grouped: HashMap<CampId, Vec<Talk>> = HashMap::new();
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    while let Some(row) = rows.next()? {
        let talk = parse_talk_row(row, true)?;
        if let Some(camp_id) = talk.camp_id {
            grouped.entry(camp_id).or_default().push(talk);
        }
    }

    for camp in camps.iter_mut() {
        let talks = camp
            .id
            .and_then(|id| grouped.remove(&id))
            .unwrap_or_default();
        camp.talks = Some(talks);
    }
    Ok(())
}

fn talk_select_sql(include_speaker: bool) -> String {
    if include_speaker {
        format!(
            "SELECT {TALK_COLUMNS}, {SPEAKER_COLUMNS}
             FROM talks t
             INNER JOIN speakers s ON s.id = t.speaker_id"
        )
    } else {
        format!("SELECT {TALK_COLUMNS} FROM talks t")
    }
}

fn camp_id_for_moniker(conn: &Connection, moniker: &str) -> RepoResult<Option<CampId>> {
    let id = conn
        .query_row(
            "SELECT id FROM camps WHERE moniker = ?1;",
            [moniker],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn collect_speakers<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<Speaker>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut speakers = Vec::new();
    while let Some(row) = rows.next()? {
        speakers.push(parse_speaker_row(row)?);
    }
    Ok(speakers)
}

fn parse_camp_row(row: &Row<'_>) -> RepoResult<Camp> {
    let camp = Camp {
        id: Some(row.get("id")?),
        moniker: row.get("moniker")?,
        name: row.get("name")?,
        description: row.get("description")?,
        event_date: row.get("event_date")?,
        end_date: row.get("end_date")?,
        location: Location {
            venue_name: row.get("venue_name")?,
            address1: row.get("address1")?,
            address2: row.get("address2")?,
            address3: row.get("address3")?,
            city_town: row.get("city_town")?,
            state_province: row.get("state_province")?,
            postal_code: row.get("postal_code")?,
            country: row.get("country")?,
        },
        talks: None,
    };
    camp.validate().map_err(|err| {
        RepoError::InvalidData(format!("camp `{}` failed validation: {err}", camp.moniker))
    })?;
    Ok(camp)
}

fn parse_talk_row(row: &Row<'_>, include_speaker: bool) -> RepoResult<Talk> {
    let speaker = if include_speaker {
        Related::Loaded(parse_speaker_row(row)?)
    } else {
        Related::Key(row.get("talk_speaker_id")?)
    };

    Ok(Talk {
        id: Some(row.get("talk_id")?),
        camp_id: Some(row.get("talk_camp_id")?),
        speaker,
        title: row.get("talk_title")?,
        abstract_text: row.get("talk_abstract")?,
        level: row.get("talk_level")?,
    })
}

fn parse_speaker_row(row: &Row<'_>) -> rusqlite::Result<Speaker> {
    Ok(Speaker {
        id: Some(row.get("speaker_id")?),
        first_name: row.get("speaker_first_name")?,
        middle_name: row.get("speaker_middle_name")?,
        last_name: row.get("speaker_last_name")?,
        bio: row.get("speaker_bio")?,
        company: row.get("speaker_company")?,
        company_url: row.get("speaker_company_url")?,
        blog_url: row.get("speaker_blog_url")?,
        twitter: row.get("speaker_twitter")?,
        github: row.get("speaker_github")?,
    })
}

/// Rejects a change set before any SQL runs.
fn validate_changes(changes: &[StagedChange]) -> RepoResult<()> {
    for change in changes {
        if change.kind != ChangeKind::Insert && change.entity.id().is_none() {
            return Err(RepoError::NotPersisted(change.entity.kind()));
        }
        if change.kind == ChangeKind::Delete {
            continue;
        }

        match &change.entity {
            Entity::Camp(camp) => camp.validate()?,
            Entity::Talk(talk) => {
                if talk.camp_id.is_none() {
                    return Err(RepoError::MissingAssociation {
                        entity: EntityKind::Talk,
                        association: "camp",
                    });
                }
                if talk.speaker_id().is_none() {
                    return Err(RepoError::MissingAssociation {
                        entity: EntityKind::Talk,
                        association: "speaker",
                    });
                }
            }
            Entity::Speaker(_) => {}
        }
    }
    Ok(())
}

fn commit_changes(conn: &mut Connection, changes: &[StagedChange]) -> RepoResult<CommitReport> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut report = CommitReport::default();

    for change in changes {
        let (rows, generated) =
            apply_change(&tx, change).map_err(|err| classify_write_error(err, &change.entity))?;
        report.record(rows, generated);
    }

    tx.commit()?;
    Ok(report)
}

fn apply_change(
    conn: &Connection,
    change: &StagedChange,
) -> rusqlite::Result<(usize, Option<GeneratedKey>)> {
    match (change.kind, &change.entity) {
        (ChangeKind::Insert, Entity::Camp(camp)) => {
            Ok((1, Some(GeneratedKey::Camp(insert_camp(conn, camp)?))))
        }
        (ChangeKind::Insert, Entity::Talk(talk)) => {
            Ok((1, Some(GeneratedKey::Talk(insert_talk(conn, talk)?))))
        }
        (ChangeKind::Insert, Entity::Speaker(speaker)) => Ok((
            1,
            Some(GeneratedKey::Speaker(insert_speaker(conn, speaker)?)),
        )),
        (ChangeKind::Update, Entity::Camp(camp)) => Ok((update_camp(conn, camp)?, None)),
        (ChangeKind::Update, Entity::Talk(talk)) => Ok((update_talk(conn, talk)?, None)),
        (ChangeKind::Update, Entity::Speaker(speaker)) => {
            Ok((update_speaker(conn, speaker)?, None))
        }
        (ChangeKind::Delete, entity) => Ok((delete_row(conn, entity)?, None)),
    }
}

fn classify_write_error(err: rusqlite::Error, entity: &Entity) -> RepoError {
    if err.sqlite_error_code() != Some(ErrorCode::ConstraintViolation) {
        return err.into();
    }

    let message = err.to_string();
    match entity {
        Entity::Camp(camp) if message.contains("camps.moniker") => {
            RepoError::DuplicateMoniker(camp.moniker.clone())
        }
        _ => RepoError::Constraint(message),
    }
}

pub(crate) fn insert_camp(conn: &Connection, camp: &Camp) -> rusqlite::Result<CampId> {
    let location = &camp.location;
    conn.execute(
        "INSERT INTO camps (
            moniker,
            name,
            description,
            event_date,
            end_date,
            venue_name,
            address1,
            address2,
            address3,
            city_town,
            state_province,
            postal_code,
            country
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
        params![
            camp.moniker,
            camp.name,
            camp.description,
            camp.event_date,
            camp.end_date,
            location.venue_name,
            location.address1,
            location.address2,
            location.address3,
            location.city_town,
            location.state_province,
            location.postal_code,
            location.country,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Moniker is immutable and absent from the SET list.
fn update_camp(conn: &Connection, camp: &Camp) -> rusqlite::Result<usize> {
    let location = &camp.location;
    conn.execute(
        "UPDATE camps
         SET
            name = ?1,
            description = ?2,
            event_date = ?3,
            end_date = ?4,
            venue_name = ?5,
            address1 = ?6,
            address2 = ?7,
            address3 = ?8,
            city_town = ?9,
            state_province = ?10,
            postal_code = ?11,
            country = ?12
         WHERE id = ?13;",
        params![
            camp.name,
            camp.description,
            camp.event_date,
            camp.end_date,
            location.venue_name,
            location.address1,
            location.address2,
            location.address3,
            location.city_town,
            location.state_province,
            location.postal_code,
            location.country,
            camp.id,
        ],
    )
}

pub(crate) fn insert_talk(conn: &Connection, talk: &Talk) -> rusqlite::Result<TalkId> {
    conn.execute(
        "INSERT INTO talks (camp_id, speaker_id, title, abstract, level)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            talk.camp_id,
            talk.speaker_id(),
            talk.title,
            talk.abstract_text,
            talk.level,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn update_talk(conn: &Connection, talk: &Talk) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE talks
         SET
            camp_id = ?1,
            speaker_id = ?2,
            title = ?3,
            abstract = ?4,
            level = ?5
         WHERE id = ?6;",
        params![
            talk.camp_id,
            talk.speaker_id(),
            talk.title,
            talk.abstract_text,
            talk.level,
            talk.id,
        ],
    )
}

pub(crate) fn insert_speaker(conn: &Connection, speaker: &Speaker) -> rusqlite::Result<SpeakerId> {
    conn.execute(
        "INSERT INTO speakers (
            first_name,
            middle_name,
            last_name,
            bio,
            company,
            company_url,
            blog_url,
            twitter,
            github
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            speaker.first_name,
            speaker.middle_name,
            speaker.last_name,
            speaker.bio,
            speaker.company,
            speaker.company_url,
            speaker.blog_url,
            speaker.twitter,
            speaker.github,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn update_speaker(conn: &Connection, speaker: &Speaker) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE speakers
         SET
            first_name = ?1,
            middle_name = ?2,
            last_name = ?3,
            bio = ?4,
            company = ?5,
            company_url = ?6,
            blog_url = ?7,
            twitter = ?8,
            github = ?9
         WHERE id = ?10;",
        params![
            speaker.first_name,
            speaker.middle_name,
            speaker.last_name,
            speaker.bio,
            speaker.company,
            speaker.company_url,
            speaker.blog_url,
            speaker.twitter,
            speaker.github,
            speaker.id,
        ],
    )
}

fn delete_row(conn: &Connection, entity: &Entity) -> rusqlite::Result<usize> {
    let table = match entity.kind() {
        EntityKind::Camp => "camps",
        EntityKind::Talk => "talks",
        EntityKind::Speaker => "speakers",
    };
    conn.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [entity.id()])
}

fn ensure_camp_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let foreign_keys: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if foreign_keys != 1 {
        return Err(RepoError::InvalidData(
            "camp repository requires PRAGMA foreign_keys = ON".to_string(),
        ));
    }
    Ok(())
}
