// Utility functions

/// Преобразует строку в kebab-case.
pub fn to_kebab_case(text: &str) -> String {
    text.to_lowercase().replace(" ", "-")
}

/// Возвращает `None` для пустых и пробельных строк.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_keeps_cyrillic() {
        assert_eq!(to_kebab_case("Летние программы"), "летние-программы");
        assert_eq!(to_kebab_case("Эссе-конкурсы"), "эссе-конкурсы");
    }

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" B2 ".into())), Some("B2".into()));
        assert_eq!(non_blank(None), None);
    }
}
