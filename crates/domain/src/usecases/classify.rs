//! Ingredient classification use case

use crate::{
    model::{ClassificationResult, HalalStatus},
    policy::TermPolicy,
};

pub const NO_FLAGGED_REASON: &str = "No flagged ingredients found";

/// Classify ingredient text with the standard term policy
///
/// Never fails: missing or empty text is HALAL.
pub fn classify(ingredients_text: Option<&str>) -> ClassificationResult {
    classify_with(&TermPolicy::STANDARD, ingredients_text)
}

/// Classify ingredient text against the given policy
///
/// Haram terms take precedence over doubtful ones; within each list the first
/// listed term that occurs anywhere in the normalized text is reported.
pub fn classify_with(policy: &TermPolicy, ingredients_text: Option<&str>) -> ClassificationResult {
    let normalized = policy.normalize(ingredients_text.unwrap_or_default());

    if let Some(term) = policy.find_haram(&normalized) {
        return flagged(HalalStatus::Haram, term);
    }

    if let Some(term) = policy.find_doubtful(&normalized) {
        return flagged(HalalStatus::Doubtful, term);
    }

    ClassificationResult {
        status: HalalStatus::Halal,
        reason: NO_FLAGGED_REASON.to_string(),
    }
}

fn flagged(status: HalalStatus, term: &str) -> ClassificationResult {
    tracing::debug!(status = %status, term = term, "Flagged ingredient");
    ClassificationResult {
        status,
        reason: format!("Contains {}", term),
    }
}
