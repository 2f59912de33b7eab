use tracing::debug;

use super::super::domain::{
    Answer, QuestionKind, QuizDefinition, ScoreVector, Stream, StreamWeights,
};
use super::EngineError;

const LIKERT_MAX_RATING: i64 = 4;

/// How much of a question's weight an answer earns.
enum Contribution<'a> {
    Full(&'a StreamWeights),
    Rated(&'a StreamWeights, i64),
}

/// Walks the answers against the quiz, accumulating per-stream totals.
///
/// Answers that reference unknown questions, unscored questions, or out-of-range
/// selections contribute nothing. Only an empty quiz is an error.
pub fn score(answers: &[Answer], quiz: &QuizDefinition) -> Result<ScoreVector, EngineError> {
    if quiz.questions.is_empty() {
        return Err(EngineError::EmptyQuiz {
            quiz_id: quiz.id.clone(),
        });
    }

    let mut scores = ScoreVector::default();

    for (position, answer) in answers.iter().enumerate() {
        match contribution(answer, quiz) {
            Some(Contribution::Full(weights)) => {
                for stream in Stream::ALL {
                    scores.add(stream, weights.weight(stream));
                }
            }
            Some(Contribution::Rated(weights, rating)) => {
                for stream in Stream::ALL {
                    scores.add(
                        stream,
                        (weights.weight(stream) * rating as f64) / LIKERT_MAX_RATING as f64,
                    );
                }
            }
            None => {
                debug!(
                    quiz_id = %quiz.id,
                    position,
                    question_id = %answer.question_id,
                    "skipping answer that does not map to a scored selection"
                );
            }
        }
    }

    Ok(scores)
}

fn contribution<'q>(answer: &Answer, quiz: &'q QuizDefinition) -> Option<Contribution<'q>> {
    let question = quiz.question(answer.question_ref()?)?;
    let weights = question.scoring.as_ref()?;
    let selection = answer.selection()?;

    match question.kind {
        QuestionKind::MultipleChoice => {
            // Every valid option earns the question's full weight vector.
            let index = usize::try_from(selection).ok()?;
            (index < question.options.len()).then_some(Contribution::Full(weights))
        }
        QuestionKind::Likert => (0..=LIKERT_MAX_RATING)
            .contains(&selection)
            .then_some(Contribution::Rated(weights, selection)),
    }
}
