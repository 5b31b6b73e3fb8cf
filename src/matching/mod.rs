//! Question matching primitives
//!
//! This module provides the text routines that power the matcher chain:
//! - Question normalization and keyword extraction
//! - Jaccard set-overlap similarity
//! - Pattern matching passes (exact, keyword overlap, similarity)
//! - Back-reference detection against recent conversation turns

pub mod normalize;
pub mod patterns;
pub mod reference;
pub mod similarity;

pub use normalize::extract_keywords;
pub use normalize::normalize_question;
pub use patterns::exact_match;
pub use patterns::keyword_match;
pub use patterns::match_question;
pub use patterns::similarity_match;
pub use reference::detect_reference;
pub use reference::ContextReference;
pub use reference::ReferencedEntityType;
pub use similarity::similarity;
