use crate::eligibility::AgeRange;
use crate::model::{ActivityRecord, ApplicantProfile};

/// Language markers of activities held in English.
const ENGLISH_TOKENS: [&str; 2] = ["английский", "english"];

/// Keeps the records the applicant is eligible for, in catalog order.
/// Subject and interest matching is left to the ranking step.
pub fn filter_eligible<'a>(
    records: &'a [ActivityRecord],
    profile: &ApplicantProfile,
) -> Vec<&'a ActivityRecord> {
    records
        .iter()
        .filter(|record| age_allows(record, profile) && language_allows(record, profile))
        .collect()
}

fn age_allows(record: &ActivityRecord, profile: &ApplicantProfile) -> bool {
    match record.age_limit.as_deref().and_then(AgeRange::parse) {
        Some(range) => range.contains(profile.age),
        None => true,
    }
}

fn language_allows(record: &ActivityRecord, profile: &ApplicantProfile) -> bool {
    if !profile.english_level.is_lowest_tier() {
        return true;
    }
    !record.language.as_deref().is_some_and(is_english)
}

fn is_english(language: &str) -> bool {
    let language = language.to_lowercase();
    ENGLISH_TOKENS.iter().any(|token| language.contains(token))
}
