// Strict validation of the model's recommendation output
use crate::model::{ActivityRecord, ModelParseError, Recommendation, RecommendationResponse};
use std::collections::{HashMap, HashSet};

pub const MIN_RECOMMENDATIONS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Default)]
pub struct RecommendationParser;

impl RecommendationParser {
    pub fn new() -> Self {
        Self
    }

    /// Accepts only `{"recommendations": [...]}` with exactly the expected
    /// keys per item, a 3..=5 count (capped by the candidate count) and
    /// titles taken from `candidates`.
    pub fn parse(
        &self,
        text: &str,
        candidates: &[&ActivityRecord],
    ) -> Result<Vec<Recommendation>, ModelParseError> {
        let payload = strip_code_fence(text);
        let response: RecommendationResponse = serde_json::from_str(payload)
            .map_err(|e| ModelParseError::Malformed(e.to_string()))?;
        let items = response.recommendations;

        let min = MIN_RECOMMENDATIONS.min(candidates.len());
        let max = MAX_RECOMMENDATIONS.min(candidates.len());
        if items.len() < min || items.len() > max {
            return Err(ModelParseError::Count {
                min,
                max,
                got: items.len(),
            });
        }

        let by_title: HashMap<&str, &ActivityRecord> = candidates
            .iter()
            .map(|c| (c.title.as_str(), *c))
            .collect();
        let mut seen = HashSet::new();
        for item in &items {
            let Some(candidate) = by_title.get(item.title.as_str()) else {
                return Err(ModelParseError::UnknownTitle(item.title.clone()));
            };
            if !seen.insert(item.title.as_str()) {
                return Err(ModelParseError::DuplicateTitle(item.title.clone()));
            }
            check_copied_fields(item, candidate)?;
        }

        Ok(items)
    }
}

/// Everything except `reason` must be the candidate's own value. Missing
/// level or format compare as empty; deadline and organizer may be omitted.
fn check_copied_fields(item: &Recommendation, candidate: &ActivityRecord) -> Result<(), ModelParseError> {
    let mismatch = |field: &'static str| ModelParseError::FieldMismatch {
        title: item.title.clone(),
        field,
    };

    if item.description != candidate.description {
        return Err(mismatch("description"));
    }
    if item.category != candidate.category.display_name() {
        return Err(mismatch("category"));
    }
    if item.level != candidate.level.as_deref().unwrap_or_default() {
        return Err(mismatch("level"));
    }
    if item.format != candidate.format.as_deref().unwrap_or_default() {
        return Err(mismatch("format"));
    }
    if item.deadline.is_some() && item.deadline != candidate.deadline {
        return Err(mismatch("deadline"));
    }
    if item.organizer.is_some() && item.organizer != candidate.organizer {
        return Err(mismatch("organizer"));
    }
    Ok(())
}

/// Models often wrap JSON in a markdown fence; only the outer fence is removed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
