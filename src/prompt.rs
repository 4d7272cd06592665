// Prompt construction for the recommendation model
use crate::model::{ActivityRecord, ApplicantProfile, Category};
use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "Ты эксперт по образовательным программам и внеклассным активностям для школьников. \
Выбирай только из предоставленного списка активностей. Отвечай только на русском языке.";

/// Reduced projection of a candidate embedded in the prompt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateView<'a> {
    title: &'a str,
    description: &'a str,
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prizes: Option<&'a str>,
}

impl<'a> From<&'a ActivityRecord> for CandidateView<'a> {
    fn from(r: &'a ActivityRecord) -> Self {
        Self {
            title: &r.title,
            description: &r.description,
            category: r.category,
            subject: r.subject.as_deref(),
            level: r.level.as_deref(),
            format: r.format.as_deref(),
            language: r.language.as_deref(),
            organizer: r.organizer.as_deref(),
            deadline: r.deadline.as_deref(),
            team_size: r.team_size.as_deref(),
            location: r.location.as_deref(),
            prizes: r.prizes.as_deref(),
        }
    }
}

/// Returns the candidates that fit into the prompt, in filter order.
pub fn prompt_candidates<'a, 'r>(
    candidates: &'a [&'r ActivityRecord],
    limit: usize,
) -> &'a [&'r ActivityRecord] {
    &candidates[..candidates.len().min(limit)]
}

/// Builds the user instruction. `candidates` must already be truncated
/// with [`prompt_candidates`].
pub fn build_prompt(profile: &ApplicantProfile, candidates: &[&ActivityRecord]) -> String {
    let views: Vec<CandidateView> = candidates.iter().map(|r| CandidateView::from(*r)).collect();
    // Serializing borrowed strings and unit enums cannot fail.
    let activities = serde_json::to_string_pretty(&views).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Пользователь предоставил следующую информацию:
- Возраст: {age}
- Класс: {grade}
- Сфера интересов: {interests}
- Уровень английского: {english}
- Навыки написания эссе: {essay}

Вот список доступных активностей из нашей базы данных:
{activities}

На основе информации о пользователе и списка доступных активностей, выбери 3-5 наиболее подходящих активностей.
Для каждой выбранной активности объясни, почему она подходит пользователю.
Поле "title" должно в точности совпадать с названием одной из активностей списка. Не придумывай новые активности и значения полей.
Поля "description", "category", "level", "format", "deadline" и "organizer" копируй из списка без изменений; если у активности нет уровня или формата, укажи пустую строку, а отсутствующие "deadline" и "organizer" не включай.

Ответ должен быть только JSON-объектом без пояснений в формате:
{{
  "recommendations": [
    {{
      "title": "Точное название активности из списка",
      "description": "Описание из базы данных",
      "reason": "Почему эта конкретная активность подходит пользователю",
      "category": "Категория из базы данных",
      "level": "Уровень из базы данных",
      "format": "Формат из базы данных",
      "deadline": "Дедлайн из базы данных",
      "organizer": "Организатор из базы данных"
    }}
  ]
}}"#,
        age = profile.age,
        grade = profile.grade.label(),
        interests = profile.interests,
        english = profile.english_level.as_str(),
        essay = profile.essay_skills.label(),
        activities = activities,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::record;
    use crate::model::{EnglishLevel, EssaySkills, Grade};

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            age: 16,
            grade: Grade::School(10),
            interests: "программирование".into(),
            english_level: EnglishLevel::B2,
            essay_skills: EssaySkills::Intermediate,
        }
    }

    #[test]
    fn prompt_embeds_profile_and_candidates() {
        let mut hack = record("1", Category::Hackathons, "Astana Code");
        hack.team_size = Some("2-4".into());
        let records = [hack];
        let refs: Vec<_> = records.iter().collect();

        let prompt = build_prompt(&profile(), &refs);

        assert!(prompt.contains("- Возраст: 16"));
        assert!(prompt.contains("- Класс: 10 класс"));
        assert!(prompt.contains("- Сфера интересов: программирование"));
        assert!(prompt.contains("- Уровень английского: B2"));
        assert!(prompt.contains("\"title\": \"Astana Code\""));
        assert!(prompt.contains("\"category\": \"Хакатоны\""));
        assert!(prompt.contains("\"teamSize\": \"2-4\""));
        assert!(prompt.contains("\"recommendations\""));
    }

    #[test]
    fn projection_drops_detail_fields() {
        let mut r = record("1", Category::Essays, "Essay");
        r.website = Some("https://example.org".into());
        r.age_limit = Some("14-18 лет".into());
        r.prizes = None;
        let records = [r];
        let refs: Vec<_> = records.iter().collect();

        let prompt = build_prompt(&profile(), &refs);

        assert!(!prompt.contains("example.org"));
        assert!(!prompt.contains("ageLimit"));
        assert!(!prompt.contains("\"prizes\""));
    }

    #[test]
    fn candidates_are_capped() {
        let records: Vec<_> = (0..25)
            .map(|i| record(&i.to_string(), Category::Hackathons, &format!("Хакатон №{i}")))
            .collect();
        let refs: Vec<_> = records.iter().collect();

        let capped = prompt_candidates(&refs, 20);
        assert_eq!(capped.len(), 20);
        assert_eq!(capped[19].id, "19");

        let prompt = build_prompt(&profile(), capped);
        assert!(prompt.contains("Хакатон №19\""));
        assert!(!prompt.contains("Хакатон №20\""));
        assert_eq!(prompt_candidates(&refs[..3], 20).len(), 3);
    }

    #[test]
    fn empty_candidate_list_still_renders() {
        let prompt = build_prompt(&profile(), &[]);
        assert!(prompt.contains("[]"));
    }
}
