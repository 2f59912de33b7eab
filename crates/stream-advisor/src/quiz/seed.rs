use super::domain::{Question, QuestionKind, QuizDefinition, QuizId, StreamWeights};

impl QuizDefinition {
    /// Built-in aptitude and interest assessment served when no definition file is configured.
    pub fn career_aptitude() -> Self {
        Self {
            id: QuizId("career-aptitude-v1".to_string()),
            title: "Career Aptitude & Interest Assessment".to_string(),
            description: Some(
                "Discover your ideal academic stream based on your interests and aptitudes"
                    .to_string(),
            ),
            is_active: true,
            questions: vec![
                multiple_choice(
                    1,
                    "Which subject do you find most interesting?",
                    &[
                        "Mathematics and Physics",
                        "Business and Economics",
                        "Literature and History",
                        "Practical Skills and Technology",
                    ],
                    StreamWeights::new(3.0, 1.0, 0.0, 2.0),
                ),
                likert(
                    2,
                    "How much do you enjoy solving complex mathematical problems?",
                    ["Not at all", "Slightly", "Moderately", "Very much", "Extremely"],
                    StreamWeights::new(3.0, 2.0, 0.0, 1.0),
                ),
                multiple_choice(
                    3,
                    "Are you interested in starting your own business someday?",
                    &["Yes", "No"],
                    StreamWeights::new(0.0, 3.0, 1.0, 2.0),
                ),
                multiple_choice(
                    4,
                    "Which activity appeals to you most?",
                    &[
                        "Conducting scientific experiments",
                        "Analyzing market trends",
                        "Writing creative stories",
                        "Building or repairing things",
                    ],
                    StreamWeights::new(3.0, 2.0, 1.0, 3.0),
                ),
                likert(
                    5,
                    "How comfortable are you with public speaking?",
                    [
                        "Very uncomfortable",
                        "Uncomfortable",
                        "Neutral",
                        "Comfortable",
                        "Very comfortable",
                    ],
                    StreamWeights::new(1.0, 3.0, 2.0, 1.0),
                ),
            ],
        }
    }
}

fn multiple_choice(id: i64, text: &str, options: &[&str], scoring: StreamWeights) -> Question {
    Question {
        id,
        text: text.to_string(),
        kind: QuestionKind::MultipleChoice,
        options: options.iter().map(|option| option.to_string()).collect(),
        scoring: Some(scoring),
    }
}

fn likert(id: i64, text: &str, scale: [&str; 5], scoring: StreamWeights) -> Question {
    Question {
        id,
        text: text.to_string(),
        kind: QuestionKind::Likert,
        options: scale.iter().map(|label| label.to_string()).collect(),
        scoring: Some(scoring),
    }
}
