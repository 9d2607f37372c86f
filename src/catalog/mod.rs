pub mod search;
pub mod section_state;
pub mod view;

pub use search::{filter_sections, fold_for_search, FilterOutcome};
pub use section_state::{SectionStates, NARROW_WIDTH};
