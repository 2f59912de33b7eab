mod advisor;
mod assembler;
mod ranker;
mod scorer;

pub use advisor::GuidanceCatalog;
pub use assembler::{RecommendationView, SubmissionReceipt};
pub use ranker::{rank, CONFIDENCE_CEILING, FALLBACK_STREAM, NEUTRAL_CONFIDENCE};
pub use scorer::score;

use super::domain::{Answer, Guidance, QuizDefinition, QuizId, Recommendation, ScoreVector};
use serde::{Deserialize, Serialize};

/// Stateless pipeline turning raw answers into scores, a ranked recommendation and guidance.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    catalog: GuidanceCatalog,
}

impl RecommendationEngine {
    pub fn new(catalog: GuidanceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &GuidanceCatalog {
        &self.catalog
    }

    pub fn evaluate(
        &self,
        answers: &[Answer],
        quiz: &QuizDefinition,
    ) -> Result<EngineOutcome, EngineError> {
        let scores = scorer::score(answers, quiz)?;
        let recommendation = ranker::rank(&scores);
        let guidance = self.catalog.advise(recommendation.primary_stream.label());

        Ok(EngineOutcome {
            scores,
            recommendation,
            guidance,
        })
    }
}

/// Everything the engine derives from one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOutcome {
    pub scores: ScoreVector,
    pub recommendation: Recommendation,
    pub guidance: Guidance,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("quiz {quiz_id} has no questions to score against")]
    EmptyQuiz { quiz_id: QuizId },
}
