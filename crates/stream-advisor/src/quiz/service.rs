use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{Answer, QuizDefinition, QuizId, QuizResult, ResultId, Stream, UserId};
use super::engine::{EngineError, RecommendationEngine, SubmissionReceipt};
use super::repository::{
    ProfileStore, ProfileUpdate, QuizRepository, RepositoryError, ResultRepository,
};

const MISSING_FIELDS: &str = "Quiz ID and answers array are required";

/// Service composing quiz storage, result storage, profile updates and the engine.
pub struct StreamAdvisorService<Q, R, P> {
    quizzes: Arc<Q>,
    results: Arc<R>,
    profiles: Arc<P>,
    engine: Arc<RecommendationEngine>,
}

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

/// Body of a quiz submission, kept loose so structural problems surface as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub answers: Option<Value>,
}

impl SubmissionRequest {
    pub fn new(quiz_id: &QuizId, answers: Vec<Answer>) -> Self {
        Self {
            quiz_id: Some(quiz_id.0.clone()),
            answers: Some(Value::Array(
                answers
                    .into_iter()
                    .map(|answer| {
                        let mut entry = serde_json::Map::new();
                        entry.insert("questionId".to_string(), answer.question_id);
                        entry.insert("answer".to_string(), answer.answer);
                        Value::Object(entry)
                    })
                    .collect(),
            )),
        }
    }

    fn into_parts(self) -> Result<(QuizId, Vec<Answer>), QuizServiceError> {
        let quiz_id = self
            .quiz_id
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| QuizServiceError::Validation(MISSING_FIELDS.to_string()))?;

        let entries = match self.answers {
            Some(Value::Array(entries)) => entries,
            _ => return Err(QuizServiceError::Validation(MISSING_FIELDS.to_string())),
        };

        let answers = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                if !entry.is_object() {
                    return Err(QuizServiceError::Validation(format!(
                        "answer at position {position} must be an object"
                    )));
                }
                serde_json::from_value(entry).map_err(|err| {
                    QuizServiceError::Validation(format!(
                        "answer at position {position} is malformed: {err}"
                    ))
                })
            })
            .collect::<Result<Vec<Answer>, _>>()?;

        Ok((QuizId(quiz_id), answers))
    }
}

/// Most recent recommendation for a student, with the explanation re-derived from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRecommendation {
    pub primary_stream: Stream,
    pub confidence: f64,
    pub recommended_courses: Vec<String>,
    pub completed_at: DateTime<Utc>,
    pub explanation: String,
}

/// Title block of the quiz a stored result belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHeading {
    pub id: QuizId,
    pub title: String,
    pub description: Option<String>,
}

impl From<&QuizDefinition> for QuizHeading {
    fn from(quiz: &QuizDefinition) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
        }
    }
}

/// History row: the stored result plus the heading of its quiz, `None` once the quiz is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    #[serde(flatten)]
    pub result: QuizResult,
    pub quiz: Option<QuizHeading>,
}

impl<Q, R, P> StreamAdvisorService<Q, R, P>
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    pub fn new(quizzes: Arc<Q>, results: Arc<R>, profiles: Arc<P>) -> Self {
        Self::with_engine(quizzes, results, profiles, RecommendationEngine::default())
    }

    pub fn with_engine(
        quizzes: Arc<Q>,
        results: Arc<R>,
        profiles: Arc<P>,
        engine: RecommendationEngine,
    ) -> Self {
        Self {
            quizzes,
            results,
            profiles,
            engine: Arc::new(engine),
        }
    }

    pub fn active_quiz(&self) -> Result<QuizDefinition, QuizServiceError> {
        self.quizzes.active()?.ok_or(QuizServiceError::NoActiveQuiz)
    }

    /// Scores a submission, stores the result and updates the student profile.
    pub fn submit(
        &self,
        user_id: Option<UserId>,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, QuizServiceError> {
        let user_id = user_id.ok_or(QuizServiceError::Unauthenticated)?;
        let (quiz_id, answers) = request.into_parts()?;

        if self.results.fetch(&user_id, &quiz_id)?.is_some() {
            warn!(%user_id, %quiz_id, "rejecting repeat quiz submission");
            return Err(QuizServiceError::AlreadySubmitted { user_id, quiz_id });
        }

        let quiz = self
            .quizzes
            .fetch(&quiz_id)?
            .ok_or_else(|| QuizServiceError::QuizNotFound(quiz_id.clone()))?;

        let outcome = self.engine.evaluate(&answers, &quiz)?;
        let record = outcome.to_result(
            next_result_id(),
            user_id.clone(),
            quiz_id.clone(),
            answers,
            Utc::now(),
        );

        // The store is the arbiter for submissions racing past the check above.
        let stored = self.results.insert(record).map_err(|err| match err {
            RepositoryError::Conflict => {
                warn!(%user_id, %quiz_id, "concurrent quiz submission lost the insert race");
                QuizServiceError::AlreadySubmitted {
                    user_id: user_id.clone(),
                    quiz_id: quiz_id.clone(),
                }
            }
            other => QuizServiceError::Repository(other),
        })?;

        let update = ProfileUpdate::completed_with(outcome.recommendation.recommended_streams());
        if let Err(err) = self.profiles.record_recommendation(&user_id, update) {
            warn!(%user_id, error = %err, "stored quiz result but failed to update profile");
        }

        info!(
            result_id = %stored.id,
            %user_id,
            %quiz_id,
            primary = %outcome.recommendation.primary_stream,
            confidence = outcome.recommendation.confidence,
            "quiz submission scored"
        );

        Ok(outcome.receipt(stored.id))
    }

    pub fn history(&self, user_id: &UserId) -> Result<Vec<QuizResult>, QuizServiceError> {
        Ok(self.results.history(user_id)?)
    }

    /// History joined with quiz headings, newest first.
    pub fn results_overview(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ResultEntry>, QuizServiceError> {
        let mut headings: HashMap<QuizId, Option<QuizHeading>> = HashMap::new();
        let mut entries = Vec::new();

        for result in self.results.history(user_id)? {
            let quiz = match headings.get(&result.quiz_id) {
                Some(heading) => heading.clone(),
                None => {
                    let heading = self
                        .quizzes
                        .fetch(&result.quiz_id)?
                        .map(|quiz| QuizHeading::from(&quiz));
                    headings.insert(result.quiz_id.clone(), heading.clone());
                    heading
                }
            };
            entries.push(ResultEntry { result, quiz });
        }

        Ok(entries)
    }

    pub fn latest_recommendation(
        &self,
        user_id: &UserId,
    ) -> Result<LatestRecommendation, QuizServiceError> {
        let latest = self
            .results
            .latest(user_id)?
            .ok_or(QuizServiceError::NoResults)?;

        let explanation = self
            .engine
            .catalog()
            .explanation(latest.suggestions.primary_stream.label());

        Ok(LatestRecommendation {
            primary_stream: latest.suggestions.primary_stream,
            confidence: latest.suggestions.confidence,
            recommended_courses: latest.suggestions.recommended_courses,
            completed_at: latest.completed_at,
            explanation,
        })
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("{0}")]
    Validation(String),
    #[error("no active quiz found")]
    NoActiveQuiz,
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error("quiz {quiz_id} already completed by {user_id}")]
    AlreadySubmitted { user_id: UserId, quiz_id: QuizId },
    #[error("no quiz results found for this user")]
    NoResults,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
