use std::collections::HashMap;

use crate::types::phrase_data::Section;

/// Window width (logical points) below which all sections but the first
/// default to collapsed, mirroring the narrow-screen behavior of the
/// original phrase list.
pub const NARROW_WIDTH: f32 = 640.0;

/// Expanded/collapsed flags, keyed by section id rather than render
/// index so the state survives filtering and reloads within a session.
#[derive(Debug, Default)]
pub struct SectionStates {
    states: HashMap<String, bool>,
}

impl SectionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed defaults for sections seen for the first time: expanded,
    /// unless the window is narrow, in which case only the first section
    /// starts open. Already-known sections keep their current flag.
    pub fn seed_defaults(&mut self, sections: &[Section], narrow: bool) {
        for (index, section) in sections.iter().enumerate() {
            self.states
                .entry(section.id.clone())
                .or_insert(!narrow || index == 0);
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.states.get(id).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, id: &str) {
        let expanded = self.states.entry(id.to_string()).or_insert(true);
        *expanded = !*expanded;
    }
}
