use serde::Deserialize;

/// Raw wire shapes, straight out of the JSON document. Every field is
/// defaulted so that one malformed entry never fails the whole document;
/// validation happens later, in `parsing::document`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawPhrase {
    #[serde(default)]
    pub greek: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub speech: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub rate: Option<f32>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawRow {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub variants: Vec<serde_json::Value>,
    #[serde(default)]
    pub examples: Vec<serde_json::Value>,
    #[serde(default, alias = "examplesHeading")]
    pub examples_heading: Option<String>,
}

/// A group object as found in the document. `category` is the historical
/// field name; `title` is accepted as an alias seen in row-based variants.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawGroup {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phrases: Vec<serde_json::Value>,
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
}

/// A validated phrase: `greek` and `english` are guaranteed non-empty,
/// `lang` looks like a BCP-47 tag, `rate` is finite and within bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub greek: String,
    pub english: String,
    pub pronunciation: Option<String>,
    pub speech: Option<String>,
    pub lang: Option<String>,
    pub rate: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PracticeRow {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub variants: Vec<Phrase>,
    pub examples: Vec<Phrase>,
    pub examples_heading: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Phrases(Vec<Phrase>),
    Rows(Vec<PracticeRow>),
}

impl SectionBody {
    /// Number of phrase-bearing items in the section: phrases for a flat
    /// section, rows for a row section.
    pub fn item_count(&self) -> usize {
        match self {
            SectionBody::Phrases(phrases) => phrases.len(),
            SectionBody::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Stable identifier derived from the title. Collapse state is keyed
    /// by this, not by render index.
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub body: SectionBody,
}
