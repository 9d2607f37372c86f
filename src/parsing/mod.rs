pub mod document;

// Re-export the main entry points for convenience
pub use document::{load_document, normalize_document, DocumentError};
