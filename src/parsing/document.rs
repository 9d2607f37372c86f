use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::types::phrase_data::{Phrase, PracticeRow, RawGroup, RawPhrase, RawRow, Section, SectionBody};

pub const BARE_LIST_TITLE: &str = "Common phrases";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read phrase document {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse phrase document {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The closed set of document shapes the loader accepts. Anything that
/// does not classify cleanly lands in `Empty` and renders as "no data"
/// instead of falling through half-parsed.
#[derive(Debug)]
pub enum DocumentShape {
    /// An array where every element is a group object.
    Groups(Vec<Value>),
    /// Any other array: its object elements are phrase candidates.
    PhraseList(Vec<Value>),
    /// A lone group object.
    Single(Value),
    Empty,
}

fn is_group_object(value: &Value) -> bool {
    value.as_object().map_or(false, |obj| {
        obj.get("phrases").map_or(false, Value::is_array)
            || obj.get("rows").map_or(false, Value::is_array)
    })
}

pub fn classify(value: &Value) -> DocumentShape {
    match value {
        Value::Array(items) => {
            if !items.is_empty() && items.iter().all(is_group_object) {
                DocumentShape::Groups(items.clone())
            } else {
                let candidates: Vec<Value> =
                    items.iter().filter(|item| item.is_object()).cloned().collect();
                DocumentShape::PhraseList(candidates)
            }
        }
        Value::Object(_) if is_group_object(value) => DocumentShape::Single(value.clone()),
        _ => DocumentShape::Empty,
    }
}

fn lang_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").unwrap())
}

fn clean_optional(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Decode one phrase candidate. Returns `None` for anything that is not
/// an object with non-empty `greek` and `english` after trimming. Junk
/// `lang` and `rate` values are discarded rather than rejecting the
/// phrase.
pub fn decode_phrase(value: &Value) -> Option<Phrase> {
    let raw: RawPhrase = serde_json::from_value(value.clone()).ok()?;

    let greek = raw.greek.trim().to_string();
    let english = raw.english.trim().to_string();
    if greek.is_empty() || english.is_empty() {
        return None;
    }

    let lang = clean_optional(raw.lang).filter(|tag| lang_tag_regex().is_match(tag));
    let rate = raw
        .rate
        .filter(|r| r.is_finite() && (0.25..=4.0).contains(r));

    Some(Phrase {
        greek,
        english,
        pronunciation: clean_optional(raw.pronunciation),
        speech: clean_optional(raw.speech),
        lang,
        rate,
    })
}

/// Decode one practice row. A row survives only if it keeps at least one
/// valid variant; invalid examples are dropped without taking the row
/// down with them.
pub fn decode_row(value: &Value) -> Option<PracticeRow> {
    let raw: RawRow = serde_json::from_value(value.clone()).ok()?;

    let variants: Vec<Phrase> = raw.variants.iter().filter_map(decode_phrase).collect();
    if variants.is_empty() {
        return None;
    }
    let examples: Vec<Phrase> = raw.examples.iter().filter_map(decode_phrase).collect();

    Some(PracticeRow {
        title: clean_optional(raw.title),
        summary: clean_optional(raw.summary),
        variants,
        examples,
        examples_heading: clean_optional(raw.examples_heading),
    })
}

/// Derive a stable section id from its title. Duplicate titles get a
/// numeric suffix so every id stays unique within the document.
fn section_id(title: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let slug = slug.trim_matches('-').to_string();
    let slug = if slug.is_empty() { "section".to_string() } else { slug };

    let count = seen.entry(slug.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        slug
    } else {
        format!("{}-{}", slug, count)
    }
}

fn group_body(group: &RawGroup) -> Option<SectionBody> {
    let rows: Vec<PracticeRow> = group.rows.iter().filter_map(decode_row).collect();
    if !rows.is_empty() {
        return Some(SectionBody::Rows(rows));
    }
    let phrases: Vec<Phrase> = group.phrases.iter().filter_map(decode_phrase).collect();
    if !phrases.is_empty() {
        return Some(SectionBody::Phrases(phrases));
    }
    None
}

/// Normalize an arbitrary parsed JSON value into the uniform section
/// sequence. Never fails: malformed input yields an empty sequence.
pub fn normalize_document(value: &Value) -> Vec<Section> {
    let groups: Vec<RawGroup> = match classify(value) {
        DocumentShape::Groups(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        DocumentShape::Single(item) => serde_json::from_value(item)
            .ok()
            .map(|group| vec![group])
            .unwrap_or_default(),
        DocumentShape::PhraseList(candidates) => {
            let phrases: Vec<Phrase> = candidates.iter().filter_map(decode_phrase).collect();
            let dropped = candidates.len() - phrases.len();
            if dropped > 0 {
                tracing::debug!(dropped, "dropped invalid phrase entries");
            }
            if phrases.is_empty() {
                return Vec::new();
            }
            let mut seen = HashMap::new();
            return vec![Section {
                id: section_id(BARE_LIST_TITLE, &mut seen),
                title: BARE_LIST_TITLE.to_string(),
                description: None,
                body: SectionBody::Phrases(phrases),
            }];
        }
        DocumentShape::Empty => return Vec::new(),
    };

    let mut seen = HashMap::new();
    let mut sections = Vec::new();
    for group in groups {
        let body = match group_body(&group) {
            Some(body) => body,
            None => continue,
        };
        let title = clean_optional(group.category.clone())
            .or_else(|| clean_optional(group.title.clone()))
            .unwrap_or_else(|| format!("Phrase group {}", sections.len() + 1));
        sections.push(Section {
            id: section_id(&title, &mut seen),
            title,
            description: clean_optional(group.description),
            body,
        });
    }
    sections
}

/// Read and normalize the phrase document at `path`. The two real
/// failure modes (unreadable file, invalid JSON) are reported; everything
/// past the parse is drop-and-continue.
pub fn load_document(path: &Path) -> Result<Vec<Section>, DocumentError> {
    let display_path = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: display_path.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| DocumentError::Parse {
        path: display_path.clone(),
        source,
    })?;

    let sections = normalize_document(&value);
    tracing::info!(
        path = %display_path,
        sections = sections.len(),
        "loaded phrase document"
    );
    Ok(sections)
}
