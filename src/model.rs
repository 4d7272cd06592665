// Core structs: ActivityRecord, ApplicantProfile, Recommendation
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Категория каталога. Назначается адаптером коллекции при загрузке.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Хакатоны")]
    Hackathons,
    #[serde(rename = "Конкурсы эссе")]
    Essays,
    #[serde(rename = "Стартап конкурсы")]
    Startups,
    #[serde(rename = "Летние программы")]
    SummerPrograms,
}

impl Category {
    /// Merge order of the collections in the catalog.
    pub const ALL: [Category; 4] = [
        Category::Hackathons,
        Category::Essays,
        Category::Startups,
        Category::SummerPrograms,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Hackathons => "Хакатоны",
            Category::Essays => "Конкурсы эссе",
            Category::Startups => "Стартап конкурсы",
            Category::SummerPrograms => "Летние программы",
        }
    }

    /// Заголовок страницы категории.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Hackathons => "Хакатоны",
            Category::Essays => "Эссе-конкурсы",
            Category::Startups => "Стартап-конкурсы",
            Category::SummerPrograms => "Летние программы",
        }
    }

    pub fn slug(&self) -> String {
        crate::utils::to_kebab_case(self.title())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Hackathons => {
                "Интенсивные соревнования по программированию и разработке, где участники создают проекты за ограниченное время."
            }
            Category::Essays => {
                "Литературные соревнования, где участники демонстрируют навыки письма, критического мышления и способность выражать идеи."
            }
            Category::Startups => {
                "Соревнования для молодых предпринимателей: бизнес-идеи, обратная связь от экспертов, инвестиции и менторская поддержка."
            }
            Category::SummerPrograms => {
                "Образовательные программы и курсы для школьников в летний период."
            }
        }
    }

    /// Имя файла коллекции в каталоге данных.
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::Hackathons => "hackathons.json",
            Category::Essays => "essays.json",
            Category::Startups => "startups.json",
            Category::SummerPrograms => "summer_programs.json",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Normalized catalog record, identical in shape for every collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub format: Option<String>,
    pub language: Option<String>,
    pub organizer: Option<String>,
    pub deadline: Option<String>,
    pub age_limit: Option<String>,
    pub team_size: Option<String>,
    pub location: Option<String>,
    pub prizes: Option<String>,
    pub full_description: Option<String>,
    pub requirements: Option<String>,
    pub website: Option<String>,
    pub event_date: Option<String>,
    pub image: Option<String>,
    pub is_free: bool,
    pub featured: bool,
}

/// CEFR tier. A1 and A2 form the lowest tier for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnglishLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl EnglishLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "A1" | "A1-A2" => Some(EnglishLevel::A1),
            "A2" => Some(EnglishLevel::A2),
            "B1" => Some(EnglishLevel::B1),
            "B2" => Some(EnglishLevel::B2),
            "C1" => Some(EnglishLevel::C1),
            "C2" => Some(EnglishLevel::C2),
            _ => None,
        }
    }

    pub fn is_lowest_tier(&self) -> bool {
        matches!(self, EnglishLevel::A1 | EnglishLevel::A2)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnglishLevel::A1 => "A1",
            EnglishLevel::A2 => "A2",
            EnglishLevel::B1 => "B1",
            EnglishLevel::B2 => "B2",
            EnglishLevel::C1 => "C1",
            EnglishLevel::C2 => "C2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    School(u8),
    University,
}

impl Grade {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("university") {
            return Some(Grade::University);
        }
        match raw.parse::<u8>() {
            Ok(n) if (1..=11).contains(&n) => Some(Grade::School(n)),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Grade::School(n) => format!("{} класс", n),
            Grade::University => "Университет".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EssaySkills {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl EssaySkills {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => Some(EssaySkills::Beginner),
            "intermediate" => Some(EssaySkills::Intermediate),
            "advanced" => Some(EssaySkills::Advanced),
            "expert" => Some(EssaySkills::Expert),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EssaySkills::Beginner => "Начинающий",
            EssaySkills::Intermediate => "Средний",
            EssaySkills::Advanced => "Продвинутый",
            EssaySkills::Expert => "Эксперт",
        }
    }
}

/// Validated questionnaire answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantProfile {
    pub age: u32,
    pub grade: Grade,
    pub interests: String,
    pub english_level: EnglishLevel,
    pub essay_skills: EssaySkills,
}

/// Age and grade arrive from the form either as numbers or as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(i64),
    Text(String),
}

/// Raw request body of `POST /api/recommendations`. Every field is optional
/// here so that absence is reported as a validation error, not a decode error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub age: Option<FormValue>,
    pub grade: Option<FormValue>,
    pub interests: Option<String>,
    pub english_level: Option<String>,
    pub essay_skills: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
    pub category: String,
    pub level: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid age: {0}")]
    InvalidAge(String),
    #[error("invalid grade: {0}")]
    InvalidGrade(String),
    #[error("invalid English level: {0}")]
    InvalidEnglishLevel(String),
    #[error("invalid essay skills: {0}")]
    InvalidEssaySkills(String),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model call timed out")]
    Timeout,
    #[error("provider returned no completion")]
    EmptyResponse,
    #[error("API key is not configured")]
    MissingApiKey,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelParseError {
    #[error("malformed model output: {0}")]
    Malformed(String),
    #[error("expected {min}..={max} recommendations, got {got}")]
    Count { min: usize, max: usize, got: usize },
    #[error("title is not in the candidate list: {0}")]
    UnknownTitle(String),
    #[error("title recommended twice: {0}")]
    DuplicateTitle(String),
    #[error("{field} of '{title}' differs from the catalog")]
    FieldMismatch { title: String, field: &'static str },
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid record in {collection}: {reason}")]
    InvalidRecord { collection: &'static str, reason: String },
}
