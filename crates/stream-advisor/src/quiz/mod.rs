//! Aptitude quiz intake and academic stream recommendation.
//!
//! Answers flow one way through the engine: the scorer accumulates per-stream weights, the
//! ranker picks primary and secondary streams with a bounded confidence, the advisor attaches
//! static guidance and the assembler shapes the stored record and response. Storage sits
//! behind traits so the service can be exercised with the in-memory stores.

pub mod domain;
pub mod engine;
pub mod memory;
pub mod repository;
pub mod router;
mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, Guidance, Question, QuestionKind, QuizDefinition, QuizDefinitionError, QuizId,
    QuizResult, Recommendation, ResultId, ResultSuggestions, ScoreVector, Stream,
    StreamWeights, UserId,
};
pub use engine::{
    EngineError, EngineOutcome, GuidanceCatalog, RecommendationEngine, RecommendationView,
    SubmissionReceipt,
};
pub use memory::{InMemoryProfileStore, InMemoryQuizStore, InMemoryResultStore};
pub use repository::{
    ProfileStore, ProfileUpdate, QuizRepository, RepositoryError, ResultRepository,
};
pub use router::{quiz_router, USER_HEADER};
pub use service::{
    LatestRecommendation, QuizHeading, QuizServiceError, ResultEntry, StreamAdvisorService,
    SubmissionRequest,
};
