use super::common::*;
use crate::quiz::domain::{Answer, QuizId, ResultId, Stream, UserId};
use crate::quiz::engine::{GuidanceCatalog, RecommendationEngine};
use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn standard_catalog_covers_every_stream() {
    let catalog = GuidanceCatalog::standard();

    for stream in Stream::ALL {
        let guidance = catalog.advise(stream.label());
        assert_eq!(guidance.courses.len(), 5, "{stream} courses");
        assert_ne!(guidance.explanation, catalog.fallback_explanation);
        assert_eq!(guidance.next_steps.len(), 5);
    }
}

#[test]
fn unknown_stream_gets_generic_guidance() {
    let catalog = GuidanceCatalog::standard();

    let guidance = catalog.advise("Astronomy");

    assert!(guidance.courses.is_empty());
    assert_eq!(
        guidance.explanation,
        "Based on your responses, this stream aligns well with your interests and abilities."
    );
    assert_eq!(
        guidance.next_steps[0],
        "Research Astronomy courses and admission requirements"
    );
}

#[test]
fn only_the_first_next_step_mentions_the_stream() {
    let catalog = GuidanceCatalog::standard();

    let commerce = catalog.next_steps("Commerce");
    let arts = catalog.next_steps("Arts");

    assert_eq!(
        commerce[0],
        "Research Commerce courses and admission requirements"
    );
    assert_eq!(commerce[1..], arts[1..]);
}

#[test]
fn injected_catalog_drives_engine_guidance() {
    let mut catalog = GuidanceCatalog::standard();
    catalog
        .courses
        .insert(Stream::Science, vec!["B.Sc Data Science".to_string()]);
    let engine = RecommendationEngine::new(catalog);

    let outcome = engine
        .evaluate(&[Answer::new(1, 0)], &scenario_a_quiz())
        .expect("engine evaluates");

    assert_eq!(outcome.guidance.courses, vec!["B.Sc Data Science".to_string()]);
}

#[test]
fn receipt_renders_confidence_as_whole_percentage() {
    let engine = RecommendationEngine::default();
    let quiz = crate::quiz::QuizDefinition::career_aptitude();
    let outcome = engine.evaluate(&seed_answers(), &quiz).expect("evaluates");

    let receipt = outcome.receipt(ResultId("res-test".to_string()));

    assert_eq!(receipt.recommendations.primary_stream, Stream::Science);
    assert_eq!(receipt.recommendations.secondary_stream, Some(Stream::Commerce));
    assert_eq!(receipt.recommendations.confidence, 32);
    assert_eq!(receipt.suggested_courses[0], "B.Tech Computer Science");

    let encoded = serde_json::to_value(&receipt).expect("serialize");
    assert_eq!(encoded["resultId"], json!("res-test"));
    assert_eq!(encoded["recommendations"]["primaryStream"], json!("Science"));
    assert_eq!(encoded["scores"]["science"], json!(9.25));
    assert_eq!(encoded["nextSteps"].as_array().map(Vec::len), Some(5));
}

#[test]
fn stored_result_keeps_full_precision_confidence() {
    let engine = RecommendationEngine::default();
    let quiz = crate::quiz::QuizDefinition::career_aptitude();
    let answers = seed_answers();
    let outcome = engine.evaluate(&answers, &quiz).expect("evaluates");
    let completed_at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();

    let result = outcome.to_result(
        ResultId("res-1".to_string()),
        UserId("student-1".to_string()),
        QuizId("career-aptitude-v1".to_string()),
        answers.clone(),
        completed_at,
    );

    assert_eq!(result.answers, answers);
    assert_eq!(result.suggestions.confidence, 9.25 / 28.75);
    assert_eq!(result.suggestions.secondary_stream, Some(Stream::Commerce));
    assert_eq!(result.suggestions.recommended_courses.len(), 5);
    assert_eq!(result.completed_at, completed_at);
}
