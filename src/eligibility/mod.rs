// Eligibility module: narrows the catalog by applicant age and English tier.

pub mod age_range;
pub mod filter;

pub use age_range::AgeRange;
pub use filter::filter_eligible;
