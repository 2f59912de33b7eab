use crate::infra::{build_service, load_quiz_definition};
use clap::Args;
use std::path::{Path, PathBuf};
use stream_advisor::config::QuizSourceConfig;
use stream_advisor::error::AppError;
use stream_advisor::quiz::{
    Answer, EngineOutcome, QuizDefinition, QuizServiceError, RecommendationEngine,
    SubmissionRequest, UserId,
};

#[derive(Args, Debug)]
pub(crate) struct QuizScoreArgs {
    /// JSON file holding an array of `{ "questionId", "answer" }` objects
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Quiz definition JSON (defaults to the built-in aptitude quiz)
    #[arg(long)]
    pub(crate) quiz: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Identity used for the demo submission
    #[arg(long, default_value = "demo-student")]
    pub(crate) user: String,
    /// Answers file to submit instead of the sample answers
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Skip the repeat-submission attempt
    #[arg(long)]
    pub(crate) skip_duplicate: bool,
}

pub(crate) fn run_quiz_score(args: QuizScoreArgs) -> Result<(), AppError> {
    let QuizScoreArgs { answers, quiz } = args;

    let quiz = load_quiz_definition(&QuizSourceConfig {
        definition_path: quiz,
    })?;
    let answers = read_answers(&answers)?;

    let engine = RecommendationEngine::default();
    let outcome = engine.evaluate(&answers, &quiz)?;
    render_outcome(&quiz, answers.len(), &outcome);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user,
        answers,
        skip_duplicate,
    } = args;

    let quiz = QuizDefinition::career_aptitude();
    let answers = match answers {
        Some(path) => read_answers(&path)?,
        None => sample_answers(),
    };
    let service = build_service(quiz.clone());
    let user_id = UserId(user);

    println!("Stream advisor demo");
    println!("Quiz: {} ({} questions)", quiz.title, quiz.questions.len());

    let request = SubmissionRequest::new(&quiz.id, answers);
    let receipt = match service.submit(Some(user_id.clone()), request.clone()) {
        Ok(receipt) => receipt,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };

    println!("- Stored result {} for {}", receipt.result_id, user_id);
    println!(
        "  Recommended stream: {} ({}% confidence)",
        receipt.recommendations.primary_stream, receipt.recommendations.confidence
    );
    if let Some(secondary) = receipt.recommendations.secondary_stream {
        println!("  Runner-up stream: {}", secondary);
    }
    match serde_json::to_string_pretty(&receipt) {
        Ok(json) => println!("  Response payload:\n{}", json),
        Err(err) => println!("  Response payload unavailable: {}", err),
    }

    if !skip_duplicate {
        match service.submit(Some(user_id.clone()), request) {
            Err(QuizServiceError::AlreadySubmitted { .. }) => {
                println!("- Repeat submission rejected as a duplicate")
            }
            Ok(_) => println!("- Repeat submission unexpectedly accepted"),
            Err(err) => println!("- Repeat submission failed: {}", err),
        }
    }

    match service.latest_recommendation(&user_id) {
        Ok(latest) => println!(
            "- Latest recommendation on file: {} (completed {})",
            latest.primary_stream,
            latest.completed_at.format("%Y-%m-%d %H:%M UTC")
        ),
        Err(err) => println!("- Latest recommendation unavailable: {}", err),
    }

    Ok(())
}

fn read_answers(path: &Path) -> Result<Vec<Answer>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn sample_answers() -> Vec<Answer> {
    vec![
        Answer::new(1, 0),
        Answer::new(2, 3),
        Answer::new(3, 0),
        Answer::new(4, 1),
        Answer::new(5, 4),
    ]
}

fn render_outcome(quiz: &QuizDefinition, answered: usize, outcome: &EngineOutcome) {
    println!("Quiz: {} ({} answers)", quiz.title, answered);

    println!("\nStream scores");
    for (stream, score) in outcome.scores.entries() {
        println!("- {}: {:.2}", stream, score);
    }

    let recommendation = &outcome.recommendation;
    println!(
        "\nPrimary stream: {} ({}% confidence)",
        recommendation.primary_stream,
        recommendation.confidence_percent()
    );
    match recommendation.secondary_stream {
        Some(stream) => println!("Secondary stream: {}", stream),
        None => println!("Secondary stream: none"),
    }

    println!("\n{}", outcome.guidance.explanation);

    if outcome.guidance.courses.is_empty() {
        println!("\nSuggested courses: none");
    } else {
        println!("\nSuggested courses");
        for course in &outcome.guidance.courses {
            println!("- {}", course);
        }
    }

    println!("\nNext steps");
    for (position, step) in outcome.guidance.next_steps.iter().enumerate() {
        println!("{}. {}", position + 1, step);
    }
}
