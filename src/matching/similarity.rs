//! Set-overlap similarity between normalized questions

use std::collections::HashSet;

use crate::matching::normalize::extract_keywords;

/// Jaccard index of the keyword sets of two questions, in `[0, 1]`.
///
/// Returns 0.0 when the union is empty, so a question with no qualifying
/// tokens has similarity 0 even with itself. Symmetric by construction.
pub fn similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = extract_keywords(a).into_iter().collect();
    let set_b: HashSet<String> = extract_keywords(b).into_iter().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();

    intersection as f64 / union as f64
}
