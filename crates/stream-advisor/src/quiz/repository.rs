use serde::{Deserialize, Serialize};

use super::domain::{QuizDefinition, QuizId, QuizResult, Stream, UserId};

/// Read access to authored quizzes. Exactly one definition is active at a time.
pub trait QuizRepository: Send + Sync {
    fn active(&self) -> Result<Option<QuizDefinition>, RepositoryError>;
    fn fetch(&self, id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError>;
}

/// Storage for submitted results.
pub trait ResultRepository: Send + Sync {
    /// Atomic insert-if-absent keyed by (user, quiz); duplicates yield `Conflict`.
    fn insert(&self, result: QuizResult) -> Result<QuizResult, RepositoryError>;
    fn fetch(
        &self,
        user_id: &UserId,
        quiz_id: &QuizId,
    ) -> Result<Option<QuizResult>, RepositoryError>;
    fn latest(&self, user_id: &UserId) -> Result<Option<QuizResult>, RepositoryError>;
    /// All results for a user, newest first.
    fn history(&self, user_id: &UserId) -> Result<Vec<QuizResult>, RepositoryError>;
}

/// Outbound hook updating the student profile after a successful submission.
pub trait ProfileStore: Send + Sync {
    fn record_recommendation(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), RepositoryError>;
}

/// Profile flags written once a quiz result is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub quiz_completed: bool,
    pub recommended_streams: Vec<Stream>,
    pub profile_completed: bool,
}

impl ProfileUpdate {
    pub fn completed_with(recommended_streams: Vec<Stream>) -> Self {
        Self {
            quiz_completed: true,
            recommended_streams,
            profile_completed: true,
        }
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
