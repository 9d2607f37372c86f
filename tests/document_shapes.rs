use serde_json::json;

use phrasebook_gui::catalog::search::filter_sections;
use phrasebook_gui::catalog::view::phrase_button_label;
use phrasebook_gui::parsing::document::{load_document, normalize_document, DocumentError};
use phrasebook_gui::types::phrase_data::SectionBody;

#[test]
fn valid_phrases_round_trip_to_exactly_one_button_each() {
    let doc = json!([
        {"greek": "Γεια σας", "english": "Hello", "pronunciation": "YAH-sas"},
        {"greek": "Ευχαριστώ", "english": "Thank you"},
        {"greek": "Παρακαλώ", "english": "Please / You're welcome"}
    ]);
    let sections = normalize_document(&doc);
    assert_eq!(sections.len(), 1);

    // Every valid phrase becomes one clickable item, in original order,
    // carrying its text verbatim.
    let outcome = filter_sections(&sections, "");
    assert_eq!(outcome.matched_items, 3);

    match &sections[0].body {
        SectionBody::Phrases(phrases) => {
            let labels: Vec<String> = phrases.iter().map(phrase_button_label).collect();
            assert_eq!(labels[0], "Γεια σας\nYAH-sas\nHello");
            assert_eq!(labels[1], "Ευχαριστώ\nThank you");
            assert_eq!(labels[2], "Παρακαλώ\nPlease / You're welcome");
        }
        SectionBody::Rows(_) => panic!("expected a flat phrase section"),
    }
}

#[test]
fn empty_greek_entry_is_dropped_from_the_rendered_list() {
    let doc = json!([
        {"greek": "Γεια", "english": "Hello"},
        {"greek": "", "english": "Bad"}
    ]);
    let sections = normalize_document(&doc);
    assert_eq!(sections.len(), 1);
    match &sections[0].body {
        SectionBody::Phrases(phrases) => {
            assert_eq!(phrases.len(), 1);
            assert_eq!(phrase_button_label(&phrases[0]), "Γεια\nHello");
        }
        SectionBody::Rows(_) => panic!("expected a flat phrase section"),
    }
}

#[test]
fn empty_document_leaves_nothing_to_render() {
    assert!(normalize_document(&json!([])).is_empty());
    assert!(normalize_document(&json!({})).is_empty());
}

#[test]
fn mixed_grouped_and_row_documents_normalize_together() {
    let doc = json!([
        {
            "category": "Greetings",
            "phrases": [
                {"greek": "Καλημέρα", "english": "Good morning"},
                {"greek": "Καληνύχτα", "english": "Good night"}
            ]
        },
        {
            "title": "At the taverna",
            "rows": [{
                "title": "Ask for the bill",
                "variants": [{"greek": "Τον λογαριασμό, παρακαλώ", "english": "The bill, please"}],
                "examples": []
            }]
        }
    ]);
    let sections = normalize_document(&doc);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Greetings");
    assert_eq!(sections[1].title, "At the taverna");
    assert!(matches!(sections[0].body, SectionBody::Phrases(_)));
    assert!(matches!(sections[1].body, SectionBody::Rows(_)));
}

#[test]
fn load_document_reads_a_file_end_to_end() {
    let path = std::env::temp_dir().join(format!(
        "phrasebook_load_test_{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"[{"greek": "Ναι", "english": "Yes"}, {"greek": "Όχι", "english": "No"}]"#,
    )
    .expect("write fixture");

    let sections = load_document(&path).expect("load fixture");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].body.item_count(), 2);

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_document_reports_missing_and_malformed_files() {
    let missing = std::env::temp_dir().join(format!(
        "phrasebook_missing_{}.json",
        std::process::id()
    ));
    match load_document(&missing) {
        Err(DocumentError::Read { .. }) => {}
        other => panic!("expected a read error, got {:?}", other.map(|s| s.len())),
    }

    let garbled = std::env::temp_dir().join(format!(
        "phrasebook_garbled_{}.json",
        std::process::id()
    ));
    std::fs::write(&garbled, "{not json").expect("write fixture");
    match load_document(&garbled) {
        Err(DocumentError::Parse { .. }) => {}
        other => panic!("expected a parse error, got {:?}", other.map(|s| s.len())),
    }
    std::fs::remove_file(&garbled).ok();
}
