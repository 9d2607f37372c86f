use crate::types::phrase_data::{Phrase, PracticeRow, Section, SectionBody};

/// Fold text for matching: lowercase, strip the accents that show up in
/// Greek (tonos, dialytika) and in the Latin glosses, fold final sigma,
/// and collapse whitespace runs.
pub fn fold_for_search(text: &str) -> String {
    let accented = [
        "ά", "έ", "ή", "ί", "ό", "ύ", "ώ", "ϊ", "ϋ", "ΐ", "ΰ", "ς",
        "á", "à", "â", "ä", "ã", "é", "è", "ê", "ë", "í", "ì", "î", "ï",
        "ó", "ò", "ô", "ö", "õ", "ú", "ù", "û", "ü", "ñ", "ç",
    ];
    let plain = [
        "α", "ε", "η", "ι", "ο", "υ", "ω", "ι", "υ", "ι", "υ", "σ",
        "a", "a", "a", "a", "a", "e", "e", "e", "e", "i", "i", "i", "i",
        "o", "o", "o", "o", "o", "u", "u", "u", "u", "n", "c",
    ];

    let mut s = text.to_lowercase();
    for (from, to) in accented.iter().zip(plain.iter()) {
        s = s.replace(from, to);
    }
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn phrase_matches(phrase: &Phrase, folded_query: &str) -> bool {
    fold_for_search(&phrase.greek).contains(folded_query)
        || fold_for_search(&phrase.english).contains(folded_query)
        || phrase
            .pronunciation
            .as_deref()
            .map_or(false, |p| fold_for_search(p).contains(folded_query))
}

fn row_matches(row: &PracticeRow, folded_query: &str) -> bool {
    row.title
        .as_deref()
        .map_or(false, |t| fold_for_search(t).contains(folded_query))
        || row
            .summary
            .as_deref()
            .map_or(false, |s| fold_for_search(s).contains(folded_query))
        || row.variants.iter().any(|v| phrase_matches(v, folded_query))
        || row.examples.iter().any(|e| phrase_matches(e, folded_query))
}

/// Per-section match result: indices into the section body (phrases for a
/// flat section, rows otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMatches {
    pub section: usize,
    pub items: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub matches: Vec<SectionMatches>,
    pub matched_items: usize,
    pub total_items: usize,
    /// False when the query was empty: everything is shown and no result
    /// count should be rendered.
    pub active: bool,
}

/// Retain the items whose folded text contains the folded query. Sections
/// left without matches are omitted from the outcome entirely.
pub fn filter_sections(sections: &[Section], query: &str) -> FilterOutcome {
    let folded_query = fold_for_search(query);
    let total_items: usize = sections.iter().map(|s| s.body.item_count()).sum();

    if folded_query.is_empty() {
        let matches = sections
            .iter()
            .enumerate()
            .map(|(section, s)| SectionMatches {
                section,
                items: (0..s.body.item_count()).collect(),
            })
            .collect();
        return FilterOutcome {
            matches,
            matched_items: total_items,
            total_items,
            active: false,
        };
    }

    let mut matches = Vec::new();
    let mut matched_items = 0;
    for (index, section) in sections.iter().enumerate() {
        let items: Vec<usize> = match &section.body {
            SectionBody::Phrases(phrases) => phrases
                .iter()
                .enumerate()
                .filter(|(_, p)| phrase_matches(p, &folded_query))
                .map(|(i, _)| i)
                .collect(),
            SectionBody::Rows(rows) => rows
                .iter()
                .enumerate()
                .filter(|(_, r)| row_matches(r, &folded_query))
                .map(|(i, _)| i)
                .collect(),
        };
        if !items.is_empty() {
            matched_items += items.len();
            matches.push(SectionMatches {
                section: index,
                items,
            });
        }
    }

    FilterOutcome {
        matches,
        matched_items,
        total_items,
        active: true,
    }
}
