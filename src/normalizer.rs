// Collection adapters: raw source records -> ActivityRecord
use crate::model::{ActivityRecord, CatalogError, Category};
use crate::utils::non_blank;
use serde::{Deserialize, Deserializer};

/// Identifiers are numbers in some collections and strings in others.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Display attributes such as `teamSize` or `prizes` are sometimes numbers.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        List(Vec<String>),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Number(n)) => Some(n.to_string()),
        Some(Loose::List(items)) => Some(items.join(", ")),
        None => None,
    })
}

/// Union of every field spelling seen across the source collections.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, alias = "age_limit", rename = "ageLimit")]
    pub age_limit: Option<String>,
    #[serde(default, alias = "team_size", rename = "teamSize", deserialize_with = "loose_text")]
    pub team_size: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub prizes: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub prize_fund: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub awards: Option<String>,
    #[serde(default, alias = "full_description", rename = "fullDescription")]
    pub full_description: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub requirements: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub participant_requirements: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, rename = "eventDate")]
    pub event_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub free: Option<bool>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Normalizes every raw record of one collection, keeping source order.
pub fn normalize_all(
    raw: Vec<RawRecord>,
    category: Category,
) -> Result<Vec<ActivityRecord>, CatalogError> {
    raw.into_iter()
        .map(|record| normalize_record(record, category))
        .collect()
}

fn normalize_record(raw: RawRecord, category: Category) -> Result<ActivityRecord, CatalogError> {
    let collection = category.file_name();
    let title = non_blank(raw.title).ok_or_else(|| CatalogError::InvalidRecord {
        collection,
        reason: format!("record {} has no title", raw.id),
    })?;
    let description = non_blank(raw.description).ok_or_else(|| CatalogError::InvalidRecord {
        collection,
        reason: format!("record {} has no description", raw.id),
    })?;

    // Сводим разные написания одного поля; порядок задаёт приоритет.
    let (prizes, image) = match category {
        Category::SummerPrograms => (
            non_blank(raw.prizes).or(non_blank(raw.awards)),
            non_blank(raw.image_url).or(non_blank(raw.image)),
        ),
        Category::Startups => (
            non_blank(raw.prize_fund).or(non_blank(raw.prizes)).or(non_blank(raw.awards)),
            non_blank(raw.image).or(non_blank(raw.image_url)),
        ),
        Category::Hackathons | Category::Essays => (
            non_blank(raw.prizes).or(non_blank(raw.prize_fund)).or(non_blank(raw.awards)),
            non_blank(raw.image).or(non_blank(raw.image_url)),
        ),
    };

    Ok(ActivityRecord {
        id: raw.id,
        title,
        description,
        category,
        subject: non_blank(raw.subject),
        level: non_blank(raw.level),
        format: non_blank(raw.format),
        language: non_blank(raw.language).or(non_blank(raw.lang)),
        organizer: non_blank(raw.organizer).or(non_blank(raw.organization)),
        deadline: non_blank(raw.deadline),
        age_limit: non_blank(raw.age_limit),
        team_size: non_blank(raw.team_size),
        location: non_blank(raw.location),
        prizes,
        full_description: non_blank(raw.full_description),
        requirements: non_blank(raw.requirements).or(non_blank(raw.participant_requirements)),
        website: non_blank(raw.website),
        event_date: non_blank(raw.event_date).or(non_blank(raw.date)),
        image,
        is_free: raw.is_free.or(raw.free).unwrap_or(true),
        featured: raw.featured.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn camel_and_snake_spellings_are_folded() {
        let camel = parse(r#"{"id": 1, "title": "A", "description": "d", "ageLimit": "15-18 лет", "teamSize": "2-4"}"#);
        let snake = parse(r#"{"id": "1", "title": "A", "description": "d", "age_limit": "15-18 лет", "team_size": 4}"#);

        let camel = normalize_record(camel, Category::Hackathons).unwrap();
        let snake = normalize_record(snake, Category::Hackathons).unwrap();

        assert_eq!(camel.id, "1");
        assert_eq!(snake.id, "1");
        assert_eq!(camel.age_limit.as_deref(), Some("15-18 лет"));
        assert_eq!(snake.age_limit.as_deref(), Some("15-18 лет"));
        assert_eq!(camel.team_size.as_deref(), Some("2-4"));
        assert_eq!(snake.team_size.as_deref(), Some("4"));
    }

    #[test]
    fn category_is_assigned_by_adapter() {
        let raw = parse(r#"{"id": 7, "title": "Summer", "description": "d"}"#);
        let record = normalize_record(raw, Category::SummerPrograms).unwrap();
        assert_eq!(record.category, Category::SummerPrograms);
        assert!(record.is_free);
        assert!(!record.featured);
    }

    #[test]
    fn alternative_field_names_fill_gaps() {
        let raw = parse(
            r#"{"id": 3, "title": "Pitch", "description": "d", "organization": "Astana Hub",
                "lang": "Английский", "prize_fund": "1 000 000 ₸", "is_free": false,
                "participant_requirements": "Команда 2-5 человек", "date": "1 мая"}"#,
        );
        let record = normalize_record(raw, Category::Startups).unwrap();

        assert_eq!(record.organizer.as_deref(), Some("Astana Hub"));
        assert_eq!(record.language.as_deref(), Some("Английский"));
        assert_eq!(record.prizes.as_deref(), Some("1 000 000 ₸"));
        assert_eq!(record.requirements.as_deref(), Some("Команда 2-5 человек"));
        assert_eq!(record.event_date.as_deref(), Some("1 мая"));
        assert!(!record.is_free);
    }

    #[test]
    fn summer_programs_prefer_image_url() {
        let raw = parse(r#"{"id": 1, "title": "T", "description": "d", "image": "/a.png", "image_url": "/b.png"}"#);
        let record = normalize_record(raw, Category::SummerPrograms).unwrap();
        assert_eq!(record.image.as_deref(), Some("/b.png"));
    }

    #[test]
    fn record_without_title_is_rejected() {
        let raw = parse(r#"{"id": 9, "title": "  ", "description": "d"}"#);
        let err = normalize_record(raw, Category::Essays).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { collection: "essays.json", .. }));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let raw = parse(r#"{"id": 2, "title": "T", "description": "d", "subject": "", "language": " "}"#);
        let record = normalize_record(raw, Category::Essays).unwrap();
        assert_eq!(record.subject, None);
        assert_eq!(record.language, None);
    }
}
