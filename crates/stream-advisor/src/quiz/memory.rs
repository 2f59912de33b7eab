//! Mutex-backed stores used by the service binary, demos and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{QuizDefinition, QuizId, QuizResult, UserId};
use super::repository::{
    ProfileStore, ProfileUpdate, QuizRepository, RepositoryError, ResultRepository,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub struct InMemoryQuizStore {
    quizzes: Arc<Mutex<Vec<QuizDefinition>>>,
}

impl InMemoryQuizStore {
    pub fn with_active(mut quiz: QuizDefinition) -> Self {
        quiz.is_active = true;
        Self {
            quizzes: Arc::new(Mutex::new(vec![quiz])),
        }
    }

    /// Stores `quiz` as the single active definition, deactivating any other.
    pub fn publish(&self, mut quiz: QuizDefinition) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.quizzes)?;
        for existing in guard.iter_mut() {
            existing.is_active = false;
        }
        quiz.is_active = true;
        guard.retain(|existing| existing.id != quiz.id);
        guard.push(quiz);
        Ok(())
    }
}

impl QuizRepository for InMemoryQuizStore {
    fn active(&self) -> Result<Option<QuizDefinition>, RepositoryError> {
        let guard = lock(&self.quizzes)?;
        Ok(guard.iter().find(|quiz| quiz.is_active).cloned())
    }

    fn fetch(&self, id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError> {
        let guard = lock(&self.quizzes)?;
        Ok(guard.iter().find(|quiz| &quiz.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryResultStore {
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl InMemoryResultStore {
    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(lock(&self.results)?.len())
    }
}

impl ResultRepository for InMemoryResultStore {
    fn insert(&self, result: QuizResult) -> Result<QuizResult, RepositoryError> {
        let mut guard = lock(&self.results)?;
        // Check and write happen under one lock so concurrent duplicates cannot both land.
        if guard
            .iter()
            .any(|existing| existing.user_id == result.user_id && existing.quiz_id == result.quiz_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(result.clone());
        Ok(result)
    }

    fn fetch(
        &self,
        user_id: &UserId,
        quiz_id: &QuizId,
    ) -> Result<Option<QuizResult>, RepositoryError> {
        let guard = lock(&self.results)?;
        Ok(guard
            .iter()
            .find(|result| &result.user_id == user_id && &result.quiz_id == quiz_id)
            .cloned())
    }

    fn latest(&self, user_id: &UserId) -> Result<Option<QuizResult>, RepositoryError> {
        Ok(self.history(user_id)?.into_iter().next())
    }

    fn history(&self, user_id: &UserId) -> Result<Vec<QuizResult>, RepositoryError> {
        let guard = lock(&self.results)?;
        // Reverse insertion order first so equal timestamps still list the newest write first.
        let mut results: Vec<QuizResult> = guard
            .iter()
            .rev()
            .filter(|result| &result.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|left, right| right.completed_at.cmp(&left.completed_at));
        Ok(results)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<Mutex<HashMap<UserId, ProfileUpdate>>>,
}

impl InMemoryProfileStore {
    pub fn profile(&self, user_id: &UserId) -> Option<ProfileUpdate> {
        self.profiles
            .lock()
            .ok()
            .and_then(|guard| guard.get(user_id).cloned())
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn record_recommendation(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.profiles)?;
        guard.insert(user_id.clone(), update);
        Ok(())
    }
}
