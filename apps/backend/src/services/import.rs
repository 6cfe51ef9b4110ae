//! Bulk vocabulary import.
//!
//! # Format
//! Line-oriented notes export. A pair entry is an original line followed by
//! its translation, entries separated by `-` lines; everything after the
//! first `-----` divider is ignored. A trailing `#n` on the original line
//! sets the priority (default 3).
//!
//! ```text
//! Wie geht es dir?#2
//! How are you?
//! -
//! Bis später
//! See you later
//! -----
//! notes the importer does not touch
//! ```
//!
//! Raw files are one untranslated phrase per line, `#n` optional; the
//! pipeline translates them with the user's configured language pair.

use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::UserSettings;
use crate::services::translate::TranslateClient;

const DEFAULT_PRIORITY: i32 = 3;

/// A parsed original/translation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEntry {
    pub original: String,
    pub translated: String,
    pub priority: i32,
}

/// A parsed untranslated phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub phrase: String,
    pub priority: i32,
}

/// Split a trailing `#priority` marker off a phrase line.
fn split_priority(line: &str) -> (String, i32) {
    match line.split_once('#') {
        Some((phrase, priority)) => (
            phrase.trim().to_string(),
            priority.trim().parse().unwrap_or(DEFAULT_PRIORITY),
        ),
        None => (line.trim().to_string(), DEFAULT_PRIORITY),
    }
}

/// Parse a translated-pairs file.
pub fn parse_translated(content: &str) -> Result<Vec<PairEntry>> {
    let block = content.split("-----").next().unwrap_or("");
    if block.trim().is_empty() {
        return Err(ApiError::BadRequest("import file is empty".to_string()));
    }

    let mut entries = Vec::new();
    for chunk in block.split("\n-") {
        let lines: Vec<&str> = chunk
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != "-")
            .collect();
        if lines.len() < 2 {
            continue;
        }

        let (original, priority) = split_priority(lines[0]);
        entries.push(PairEntry {
            original,
            translated: lines[1].to_string(),
            priority,
        });
    }

    Ok(entries)
}

/// Parse a raw-phrases file.
pub fn parse_raw(content: &str) -> Result<Vec<RawEntry>> {
    if content.trim().is_empty() {
        return Err(ApiError::BadRequest("import file is empty".to_string()));
    }

    let entries = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let (phrase, priority) = split_priority(line);
            RawEntry { phrase, priority }
        })
        .filter(|e| !e.phrase.is_empty())
        .collect();

    Ok(entries)
}

/// Import pre-translated pairs as unstarted vocabulary items.
///
/// Items already processed stay committed when a later insert fails; the
/// caller sees the error and can re-run with the remaining lines.
pub async fn import_translated(
    db: &Database,
    user_id: Uuid,
    settings: &UserSettings,
    content: &str,
) -> Result<usize> {
    let entries = parse_translated(content)?;

    let mut imported = 0;
    for entry in &entries {
        tracing::debug!("Importing pair: {}", entry.original);
        let phrase_id = db
            .insert_phrase(user_id, &entry.original, settings.origin_language_id)
            .await?;
        let translated_phrase_id = db
            .insert_phrase(user_id, &entry.translated, settings.target_language_id)
            .await?;
        db.insert_vocabulary(user_id, phrase_id, translated_phrase_id, entry.priority)
            .await?;
        imported += 1;
    }

    Ok(imported)
}

/// Import raw phrases, translating each with the user's language pair.
pub async fn import_raw(
    db: &Database,
    translator: &TranslateClient,
    user_id: Uuid,
    settings: &UserSettings,
    content: &str,
) -> Result<usize> {
    let entries = parse_raw(content)?;

    let mut imported = 0;
    for entry in &entries {
        let translated = translator
            .translate(
                &entry.phrase,
                &settings.origin_language,
                &settings.target_language,
            )
            .await?;

        let phrase_id = db
            .insert_phrase(user_id, &entry.phrase, settings.origin_language_id)
            .await?;
        let translated_phrase_id = db
            .insert_phrase(user_id, &translated, settings.target_language_id)
            .await?;
        db.insert_vocabulary(user_id, phrase_id, translated_phrase_id, entry.priority)
            .await?;
        imported += 1;
    }

    Ok(imported)
}
