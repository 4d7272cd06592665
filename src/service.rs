// Recommendation orchestration: validate -> filter -> prompt -> model -> parse/fallback
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::eligibility::filter_eligible;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::model::{
    ActivityRecord, FormValue, ApplicantProfile, EnglishLevel, EssaySkills, Grade,
    ProviderError, Recommendation, RecommendError, RecommendationRequest, ValidationError,
};
use crate::parser::RecommendationParser;
use crate::prompt::{SYSTEM_PROMPT, build_prompt, prompt_candidates};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub temperature: f32,
    pub prompt_candidate_limit: usize,
    pub fallback_count: usize,
    pub timeout: Option<Duration>,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            temperature: config.llm.temperature,
            prompt_candidate_limit: config.recommendations.prompt_candidate_limit,
            fallback_count: config.recommendations.fallback_count,
            timeout: config.llm.timeout_seconds.map(Duration::from_secs),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub struct RecommendationService {
    catalog: Arc<Catalog>,
    client: Arc<dyn CompletionClient>,
    parser: RecommendationParser,
    settings: ServiceSettings,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        client: Arc<dyn CompletionClient>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            catalog,
            client,
            parser: RecommendationParser::new(),
            settings,
        }
    }

    /// Produces 3-5 recommendations for the applicant, or an empty list when
    /// nothing in the catalog fits. Unusable model output is replaced by the
    /// deterministic fallback selection.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let profile = validate(request)?;
        info!(
            "[recommend] Profile accepted: age={}, english={}",
            profile.age,
            profile.english_level.as_str()
        );

        let candidates = filter_eligible(self.catalog.records(), &profile);
        info!(
            "[recommend] {} of {} activities are eligible",
            candidates.len(),
            self.catalog.len()
        );
        if candidates.is_empty() {
            info!("[recommend] No eligible activities, skipping model call");
            return Ok(Vec::new());
        }

        let in_prompt = prompt_candidates(&candidates, self.settings.prompt_candidate_limit);
        let prompt = build_prompt(&profile, in_prompt);
        debug!(
            "[recommend] Prompt built with {} candidates ({} chars)",
            in_prompt.len(),
            prompt.chars().count()
        );

        let completion = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: prompt,
            temperature: self.settings.temperature,
        };
        let text = self.call_model(&completion).await?;

        match self.parser.parse(&text, in_prompt) {
            Ok(recommendations) => {
                info!("[recommend] ✅ Model returned {} recommendations", recommendations.len());
                Ok(recommendations)
            }
            Err(e) => {
                warn!("[recommend] Model output rejected ({}), using fallback", e);
                Ok(fallback(&candidates, self.settings.fallback_count))
            }
        }
    }

    async fn call_model(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        info!("[recommend] Awaiting model response...");
        let result = match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, self.client.complete(request))
                .await
                .map_err(|_| ProviderError::Timeout)
                .and_then(|inner| inner),
            None => self.client.complete(request).await,
        };

        if let Err(e) = &result {
            warn!("[recommend] ❌ Model call failed: {}", e);
        }
        result
    }
}

/// Checks that all five fields are present and within their domains.
pub fn validate(request: &RecommendationRequest) -> Result<ApplicantProfile, ValidationError> {
    let age = request.age.as_ref().ok_or(ValidationError::MissingField("age"))?;
    let grade = match &request.grade {
        Some(FormValue::Number(n)) => n.to_string(),
        Some(FormValue::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
        _ => return Err(ValidationError::MissingField("grade")),
    };
    let interests = present(&request.interests, "interests")?;
    let english_level = present(&request.english_level, "englishLevel")?;
    let essay_skills = present(&request.essay_skills, "essaySkills")?;

    let age = match age {
        FormValue::Number(0) => return Err(ValidationError::MissingField("age")),
        FormValue::Number(n) => u32::try_from(*n).map_err(|_| ValidationError::InvalidAge(n.to_string()))?,
        FormValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::MissingField("age"));
            }
            text.parse::<u32>()
                .map_err(|_| ValidationError::InvalidAge(text.to_string()))?
        }
    };

    Ok(ApplicantProfile {
        age,
        grade: Grade::parse(&grade).ok_or_else(|| ValidationError::InvalidGrade(grade.clone()))?,
        interests: interests.to_string(),
        english_level: EnglishLevel::parse(english_level)
            .ok_or_else(|| ValidationError::InvalidEnglishLevel(english_level.to_string()))?,
        essay_skills: EssaySkills::parse(essay_skills)
            .ok_or_else(|| ValidationError::InvalidEssaySkills(essay_skills.to_string()))?,
    })
}

fn present<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// Model-free selection: the first `count` eligible activities, before the
/// prompt cap is applied.
pub fn fallback(candidates: &[&ActivityRecord], count: usize) -> Vec<Recommendation> {
    candidates
        .iter()
        .take(count)
        .map(|record| Recommendation {
            title: record.title.clone(),
            description: record.description.clone(),
            reason: format!(
                "Подходит для вашего возраста и интересов в области {}",
                record.subject.as_deref().unwrap_or(record.category.display_name())
            ),
            category: record.category.display_name().to_string(),
            level: record.level.clone().unwrap_or_default(),
            format: record.format.clone().unwrap_or_default(),
            deadline: record.deadline.clone(),
            organizer: record.organizer.clone(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::llm::{CompletionClient, CompletionRequest};
    use crate::model::ProviderError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub enum Reply {
        Text(String),
        Fail,
        Slow(Duration),
    }

    /// Scripted completion client that records every request it receives.
    pub struct MockClient {
        reply: Reply,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockClient {
        pub fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn text(text: impl Into<String>) -> Self {
            Self::new(Reply::Text(text.into()))
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.requests.lock().unwrap().last().map(|r| r.user.clone())
        }
    }

    #[async_trait::async_trait]
    impl CompletionClient for MockClient {
        async fn complete(&self, req: &CompletionRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(req.clone());
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Fail => Err(ProviderError::Status {
                    status: 502,
                    body: "bad gateway".into(),
                }),
                Reply::Slow(delay) => {
                    tokio::time::sleep(*delay).await;
                    Ok("{}".into())
                }
            }
        }
    }
}
