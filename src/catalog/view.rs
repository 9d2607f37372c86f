use crate::catalog::search::FilterOutcome;
use crate::types::phrase_data::{Phrase, PracticeRow};

pub const EMPTY_CATALOG_MESSAGE: &str = "No phrases are available right now.";
pub const LOAD_FAILURE_MESSAGE: &str = "Unable to load the phrases list. Please try again later.";
pub const SPEECH_UNAVAILABLE_MESSAGE: &str =
    "Pronunciation playback is not available on this system.";
pub const NO_MATCH_MESSAGE: &str = "No phrases match your search.";
pub const DEFAULT_EXAMPLES_HEADING: &str = "Examples";

/// The text shown on a phrase button: Greek on the first line, the
/// pronunciation guide when there is one, then the English gloss.
pub fn phrase_button_label(phrase: &Phrase) -> String {
    match &phrase.pronunciation {
        Some(pronunciation) => {
            format!("{}\n{}\n{}", phrase.greek, pronunciation, phrase.english)
        }
        None => format!("{}\n{}", phrase.greek, phrase.english),
    }
}

pub fn examples_heading(row: &PracticeRow) -> &str {
    row.examples_heading
        .as_deref()
        .unwrap_or(DEFAULT_EXAMPLES_HEADING)
}

/// Result count line for an active filter; `None` when no filter is
/// applied.
pub fn result_message(outcome: &FilterOutcome) -> Option<String> {
    if !outcome.active {
        return None;
    }
    if outcome.matched_items == 0 {
        Some(NO_MATCH_MESSAGE.to_string())
    } else {
        Some(format!(
            "Showing {} of {} phrases.",
            outcome.matched_items, outcome.total_items
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::search::filter_sections;
    use crate::types::phrase_data::{Section, SectionBody};

    fn phrase(greek: &str, english: &str, pronunciation: Option<&str>) -> Phrase {
        Phrase {
            greek: greek.to_string(),
            english: english.to_string(),
            pronunciation: pronunciation.map(str::to_string),
            speech: None,
            lang: None,
            rate: None,
        }
    }

    #[test]
    fn labels_carry_phrase_text_verbatim() {
        let with_guide = phrase("Γεια σας", "Hello", Some("YAH-sas"));
        assert_eq!(phrase_button_label(&with_guide), "Γεια σας\nYAH-sas\nHello");

        let without_guide = phrase("Ναι", "Yes", None);
        assert_eq!(phrase_button_label(&without_guide), "Ναι\nYes");
    }

    #[test]
    fn examples_heading_falls_back() {
        let mut row = PracticeRow {
            title: None,
            summary: None,
            variants: vec![phrase("Γεια", "Hello", None)],
            examples: vec![],
            examples_heading: None,
        };
        assert_eq!(examples_heading(&row), DEFAULT_EXAMPLES_HEADING);
        row.examples_heading = Some("Try these".to_string());
        assert_eq!(examples_heading(&row), "Try these");
    }

    #[test]
    fn result_messages_follow_the_filter() {
        let sections = vec![Section {
            id: "greetings".to_string(),
            title: "Greetings".to_string(),
            description: None,
            body: SectionBody::Phrases(vec![
                phrase("Γεια", "Hello", None),
                phrase("Καλημέρα", "Good morning", None),
            ]),
        }];

        assert_eq!(result_message(&filter_sections(&sections, "")), None);
        assert_eq!(
            result_message(&filter_sections(&sections, "hello")),
            Some("Showing 1 of 2 phrases.".to_string())
        );
        assert_eq!(
            result_message(&filter_sections(&sections, "zzz")),
            Some(NO_MATCH_MESSAGE.to_string())
        );
    }
}
