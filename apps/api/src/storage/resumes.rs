//! Résumé persistence on top of a `KeyValueStore`.
//!
//! Payloads are the JSON serialization of a `Resume`; every load goes back
//! through the normalizer, so payloads written by older builds still load.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::model::Resume;
use crate::resume::normalize::normalize;
use crate::storage::KeyValueStore;

const DRAFT_PREFIX: &str = "cvembed:draft:";
const RESUME_PREFIX: &str = "cvembed:resume:";
pub const ACTIVE_EMBED_KEY: &str = "cvembed:activeEmbedId";

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RESUME_ID_LEN: usize = 12;
const MAX_KEY_SEGMENT_LEN: usize = 64;

/// Path segments already taken by static routes under `/api/v1/resumes` and
/// by the inline embed path.
pub const RESERVED_RESUME_IDS: &[&str] = &[
    "new",
    "active",
    "normalize",
    "validate",
    "preview",
    "encode",
    "decode",
    "export",
    "portable",
];

/// A fresh 12-character base-36 identifier.
pub fn create_resume_id() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(RESUME_ID_LEN);
    // A v4 UUID always has bits above 2^64 set, so there are enough digits.
    while id.len() < RESUME_ID_LEN && n > 0 {
        id.push(ID_ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    id
}

/// Ids and session names become part of a store key.
pub fn check_key_segment(kind: &str, segment: &str) -> Result<(), AppError> {
    let well_formed = !segment.is_empty()
        && segment.len() <= MAX_KEY_SEGMENT_LEN
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if well_formed {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{kind} must be 1-{MAX_KEY_SEGMENT_LEN} characters of [A-Za-z0-9_-]"
        )))
    }
}

/// A well-formed key segment that does not shadow a static route.
pub fn check_resume_id(resume_id: &str) -> Result<(), AppError> {
    check_key_segment("resume id", resume_id)?;
    if RESERVED_RESUME_IDS.contains(&resume_id) {
        return Err(AppError::Validation(format!(
            "resume id '{resume_id}' is reserved"
        )));
    }
    Ok(())
}

/// Copy of `resume` with `meta.updatedAt` set to the current time.
fn stamped(resume: &Resume) -> Resume {
    let mut resume = resume.clone();
    resume.meta.updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    resume
}

fn parse_stored(key: &str, raw: &str) -> Option<Resume> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(normalize(&value)),
        Err(e) => {
            debug!("Stored payload at {key} is not valid JSON: {e}");
            None
        }
    }
}

async fn save(store: &dyn KeyValueStore, key: &str, resume: &Resume) -> Result<(), AppError> {
    let payload = serde_json::to_string(resume).map_err(anyhow::Error::from)?;
    store.set(key, &payload).await
}

async fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<Resume>, AppError> {
    Ok(store
        .get(key)
        .await?
        .and_then(|raw| parse_stored(key, &raw)))
}

/// Stores a draft and returns it as stored, with a fresh `updatedAt`.
pub async fn save_draft(
    store: &dyn KeyValueStore,
    session: &str,
    resume: &Resume,
) -> Result<Resume, AppError> {
    check_key_segment("session", session)?;
    let resume = stamped(resume);
    save(store, &format!("{DRAFT_PREFIX}{session}"), &resume).await?;
    Ok(resume)
}

pub async fn load_draft(
    store: &dyn KeyValueStore,
    session: &str,
) -> Result<Option<Resume>, AppError> {
    check_key_segment("session", session)?;
    load(store, &format!("{DRAFT_PREFIX}{session}")).await
}

/// Stores the résumé under its embed id and marks it as the active embed.
/// Returns the stored document, with a fresh `updatedAt`.
pub async fn save_embed_resume(
    store: &dyn KeyValueStore,
    resume_id: &str,
    resume: &Resume,
) -> Result<Resume, AppError> {
    check_resume_id(resume_id)?;
    let resume = stamped(resume);
    save(store, &format!("{RESUME_PREFIX}{resume_id}"), &resume).await?;
    store.set(ACTIVE_EMBED_KEY, resume_id).await?;
    info!("Stored embed resume {resume_id}");
    Ok(resume)
}

pub async fn load_embed_resume(
    store: &dyn KeyValueStore,
    resume_id: &str,
) -> Result<Option<Resume>, AppError> {
    check_resume_id(resume_id)?;
    load(store, &format!("{RESUME_PREFIX}{resume_id}")).await
}

pub async fn load_active_embed_id(store: &dyn KeyValueStore) -> Result<Option<String>, AppError> {
    store.get(ACTIVE_EMBED_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::model::{create_empty_resume, SectionKey};
    use crate::storage::MemoryStore;

    #[test]
    fn test_resume_id_shape() {
        let a = create_resume_id();
        let b = create_resume_id();
        assert_eq!(a.len(), RESUME_ID_LEN);
        assert!(a.bytes().all(|c| ID_ALPHABET.contains(&c)));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_segment_rules() {
        assert!(check_key_segment("resume id", "abc123_-X").is_ok());
        assert!(check_key_segment("resume id", "").is_err());
        assert!(check_key_segment("resume id", "a:b").is_err());
        assert!(check_key_segment("resume id", &"a".repeat(65)).is_err());
    }

    #[tokio::test]
    async fn test_draft_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(load_draft(&store, "tab1").await.unwrap(), None);

        let mut resume = create_empty_resume();
        resume.basics.name = "Jane".to_string();
        let stored = save_draft(&store, "tab1", &resume).await.unwrap();
        assert_eq!(stored.basics, resume.basics);
        assert_eq!(load_draft(&store, "tab1").await.unwrap(), Some(stored));
        assert_eq!(load_draft(&store, "tab2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_embed_resume_sets_active_id() {
        let store = MemoryStore::new();
        assert_eq!(load_active_embed_id(&store).await.unwrap(), None);

        let resume = create_empty_resume();
        let stored = save_embed_resume(&store, "abc", &resume).await.unwrap();
        assert_eq!(load_active_embed_id(&store).await.unwrap(), Some("abc".to_string()));
        assert_eq!(load_embed_resume(&store, "abc").await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_saves_refresh_updated_at() {
        let store = MemoryStore::new();
        let mut resume = create_empty_resume();
        resume.meta.created_at = "2020-01-01T00:00:00.000Z".to_string();
        resume.meta.updated_at = "2020-01-01T00:00:00.000Z".to_string();

        save_draft(&store, "tab1", &resume).await.unwrap();
        let draft = load_draft(&store, "tab1").await.unwrap().unwrap();
        assert_ne!(draft.meta.updated_at, "2020-01-01T00:00:00.000Z");
        assert!(draft.meta.updated_at.ends_with('Z'));
        assert!(draft.meta.updated_at > resume.meta.updated_at);
        assert_eq!(draft.meta.created_at, "2020-01-01T00:00:00.000Z");

        save_embed_resume(&store, "abc", &resume).await.unwrap();
        let embed = load_embed_resume(&store, "abc").await.unwrap().unwrap();
        assert!(embed.meta.updated_at > resume.meta.updated_at);
        assert_eq!(embed.meta.created_at, "2020-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_reserved_resume_ids() {
        let store = MemoryStore::new();
        let resume = create_empty_resume();
        for reserved in RESERVED_RESUME_IDS {
            assert!(check_resume_id(reserved).is_err(), "{reserved}");
            assert!(matches!(
                save_embed_resume(&store, reserved, &resume).await,
                Err(AppError::Validation(_))
            ));
        }
        assert!(check_resume_id("activeuser").is_ok());
        assert_eq!(load_active_embed_id(&store).await.unwrap(), None);
        // Drafts live under their own route, so the names stay usable there.
        assert!(save_draft(&store, "active", &resume).await.is_ok());
    }

    #[tokio::test]
    async fn test_legacy_and_corrupt_payloads() {
        let store = MemoryStore::new();
        store
            .set(
                "cvembed:resume:old",
                r#"{"basics":{"name":"Old"},"meta":{"documentOptions":{"sectionOrder":["skills"]}}}"#,
            )
            .await
            .unwrap();
        store.set("cvembed:resume:bad", "{not json").await.unwrap();

        let old = load_embed_resume(&store, "old").await.unwrap().unwrap();
        assert_eq!(old.basics.name, "Old");
        assert_eq!(old.meta.document_options.section_order[0], SectionKey::Skills);
        assert_eq!(old.meta.document_options.section_order.len(), 10);

        assert_eq!(load_embed_resume(&store, "bad").await.unwrap(), None);
    }
}
