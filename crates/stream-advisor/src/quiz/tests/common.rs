use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::quiz::domain::{
    Answer, Question, QuestionKind, QuizDefinition, QuizId, QuizResult, StreamWeights, UserId,
};
use crate::quiz::memory::{InMemoryProfileStore, InMemoryQuizStore, InMemoryResultStore};
use crate::quiz::repository::{
    ProfileStore, ProfileUpdate, QuizRepository, RepositoryError, ResultRepository,
};
use crate::quiz::service::StreamAdvisorService;

pub(super) type MemoryService =
    StreamAdvisorService<InMemoryQuizStore, InMemoryResultStore, InMemoryProfileStore>;

pub(super) fn likert_scale() -> Vec<String> {
    ["Never", "Rarely", "Sometimes", "Often", "Always"]
        .iter()
        .map(|label| label.to_string())
        .collect()
}

pub(super) fn multiple_choice_question(id: i64, options: usize, scoring: StreamWeights) -> Question {
    Question {
        id,
        text: format!("Multiple choice question {id}"),
        kind: QuestionKind::MultipleChoice,
        options: (0..options).map(|index| format!("Option {index}")).collect(),
        scoring: Some(scoring),
    }
}

pub(super) fn likert_question(id: i64, scoring: StreamWeights) -> Question {
    Question {
        id,
        text: format!("Likert question {id}"),
        kind: QuestionKind::Likert,
        options: likert_scale(),
        scoring: Some(scoring),
    }
}

pub(super) fn quiz_with(questions: Vec<Question>) -> QuizDefinition {
    QuizDefinition {
        id: QuizId("quiz-test".to_string()),
        title: "Stream aptitude".to_string(),
        description: None,
        is_active: true,
        questions,
    }
}

/// Scenario A: one multiple-choice question weighted 3/1/0/2.
pub(super) fn scenario_a_quiz() -> QuizDefinition {
    quiz_with(vec![multiple_choice_question(
        1,
        2,
        StreamWeights::new(3.0, 1.0, 0.0, 2.0),
    )])
}

pub(super) fn seed_answers() -> Vec<Answer> {
    vec![
        Answer::new(1, 0),
        Answer::new(2, 4),
        Answer::new(3, 0),
        Answer::new(4, 0),
        Answer::new(5, 1),
    ]
}

pub(super) fn student() -> UserId {
    UserId("student-42".to_string())
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryResultStore>,
    Arc<InMemoryProfileStore>,
) {
    let quizzes = Arc::new(InMemoryQuizStore::with_active(
        QuizDefinition::career_aptitude(),
    ));
    let results = Arc::new(InMemoryResultStore::default());
    let profiles = Arc::new(InMemoryProfileStore::default());
    let service = StreamAdvisorService::new(quizzes, results.clone(), profiles.clone());
    (service, results, profiles)
}

/// Result store whose pre-check misses but whose insert reports a duplicate, as when a
/// concurrent submission wins the race.
pub(super) struct RacingResultStore;

impl ResultRepository for RacingResultStore {
    fn insert(&self, _result: QuizResult) -> Result<QuizResult, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(
        &self,
        _user_id: &UserId,
        _quiz_id: &QuizId,
    ) -> Result<Option<QuizResult>, RepositoryError> {
        Ok(None)
    }

    fn latest(&self, _user_id: &UserId) -> Result<Option<QuizResult>, RepositoryError> {
        Ok(None)
    }

    fn history(&self, _user_id: &UserId) -> Result<Vec<QuizResult>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableResultStore;

impl ResultRepository for UnavailableResultStore {
    fn insert(&self, _result: QuizResult) -> Result<QuizResult, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _user_id: &UserId,
        _quiz_id: &QuizId,
    ) -> Result<Option<QuizResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _user_id: &UserId) -> Result<Option<QuizResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _user_id: &UserId) -> Result<Vec<QuizResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingProfileStore;

impl ProfileStore for FailingProfileStore {
    fn record_recommendation(
        &self,
        _user_id: &UserId,
        _update: ProfileUpdate,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("profile service down".to_string()))
    }
}

/// Quiz store holding a definition with no questions, which the engine refuses to score.
pub(super) struct HollowQuizStore;

impl QuizRepository for HollowQuizStore {
    fn active(&self) -> Result<Option<QuizDefinition>, RepositoryError> {
        Ok(Some(quiz_with(Vec::new())))
    }

    fn fetch(&self, _id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError> {
        Ok(Some(quiz_with(Vec::new())))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_conflict_response(response: &Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
