use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{
    Answer, QuizId, QuizResult, ResultId, ResultSuggestions, ScoreVector, Stream, UserId,
};
use super::EngineOutcome;

/// Response payload returned once a submission has been stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub result_id: ResultId,
    pub scores: ScoreVector,
    pub recommendations: RecommendationView,
    pub suggested_courses: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub primary_stream: Stream,
    pub secondary_stream: Option<Stream>,
    /// Whole-number percentage; the stored record keeps full precision.
    pub confidence: u8,
    pub explanation: String,
}

impl EngineOutcome {
    /// Builds the record to persist. Storage enforces (user, quiz) uniqueness, not this step.
    pub fn to_result(
        &self,
        id: ResultId,
        user_id: UserId,
        quiz_id: QuizId,
        answers: Vec<Answer>,
        completed_at: DateTime<Utc>,
    ) -> QuizResult {
        QuizResult {
            id,
            user_id,
            quiz_id,
            answers,
            scores: self.scores,
            suggestions: ResultSuggestions {
                primary_stream: self.recommendation.primary_stream,
                secondary_stream: self.recommendation.secondary_stream,
                confidence: self.recommendation.confidence,
                recommended_courses: self.guidance.courses.clone(),
            },
            completed_at,
        }
    }

    pub fn receipt(&self, result_id: ResultId) -> SubmissionReceipt {
        SubmissionReceipt {
            result_id,
            scores: self.scores,
            recommendations: RecommendationView {
                primary_stream: self.recommendation.primary_stream,
                secondary_stream: self.recommendation.secondary_stream,
                confidence: self.recommendation.confidence_percent(),
                explanation: self.guidance.explanation.clone(),
            },
            suggested_courses: self.guidance.courses.clone(),
            next_steps: self.guidance.next_steps.clone(),
        }
    }
}
