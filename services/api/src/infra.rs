use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use stream_advisor::config::QuizSourceConfig;
use stream_advisor::error::AppError;
use stream_advisor::quiz::{
    InMemoryProfileStore, InMemoryQuizStore, InMemoryResultStore, QuizDefinition,
    StreamAdvisorService,
};

pub(crate) type MemoryAdvisorService =
    StreamAdvisorService<InMemoryQuizStore, InMemoryResultStore, InMemoryProfileStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured definition, falling back to the built-in seed quiz.
pub(crate) fn load_quiz_definition(config: &QuizSourceConfig) -> Result<QuizDefinition, AppError> {
    match &config.definition_path {
        Some(path) => Ok(QuizDefinition::from_path(path)?),
        None => Ok(QuizDefinition::career_aptitude()),
    }
}

pub(crate) fn build_service(quiz: QuizDefinition) -> Arc<MemoryAdvisorService> {
    Arc::new(StreamAdvisorService::new(
        Arc::new(InMemoryQuizStore::with_active(quiz)),
        Arc::new(InMemoryResultStore::default()),
        Arc::new(InMemoryProfileStore::default()),
    ))
}
