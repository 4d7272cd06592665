use regex::Regex;
use std::sync::LazyLock;

static AGE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)-(\d+)").expect("age range pattern is valid")
});

/// Inclusive age interval parsed from free text such as `"15-18 лет"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Returns `None` when the text carries no `<min>-<max>` pair;
    /// callers treat that as "no constraint".
    pub fn parse(text: &str) -> Option<Self> {
        let caps = AGE_RANGE.captures(text)?;
        let min = caps.get(1)?.as_str().parse().ok()?;
        let max = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { min, max })
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_russian_range() {
        assert_eq!(AgeRange::parse("15-18 лет"), Some(AgeRange { min: 15, max: 18 }));
        assert_eq!(AgeRange::parse("от 16-25"), Some(AgeRange { min: 16, max: 25 }));
    }

    #[test]
    fn first_pair_wins() {
        assert_eq!(
            AgeRange::parse("14-16 лет (или 17-18 с разрешения)"),
            Some(AgeRange { min: 14, max: 16 })
        );
    }

    #[test]
    fn unparseable_text_is_no_constraint() {
        assert_eq!(AgeRange::parse("Без ограничений"), None);
        assert_eq!(AgeRange::parse("от 14 лет"), None);
        assert_eq!(AgeRange::parse(""), None);
        assert_eq!(AgeRange::parse("99999999999-1 лет"), None);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = AgeRange { min: 15, max: 18 };
        assert!(!range.contains(14));
        assert!(range.contains(15));
        assert!(range.contains(18));
        assert!(!range.contains(19));
    }
}
