use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for quiz definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizId(pub String);

/// Opaque identity handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier assigned to a persisted quiz result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Academic tracks the engine can recommend.
///
/// Declaration order is the canonical priority used to break exact score ties.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Stream {
    #[serde(alias = "science")]
    Science,
    #[serde(alias = "commerce")]
    Commerce,
    #[serde(alias = "arts")]
    Arts,
    #[serde(alias = "vocational")]
    Vocational,
}

impl Stream {
    pub const ALL: [Stream; 4] = [
        Stream::Science,
        Stream::Commerce,
        Stream::Arts,
        Stream::Vocational,
    ];

    /// Lower-case key used in scoring maps and score vectors.
    pub fn key(self) -> &'static str {
        match self {
            Stream::Science => "science",
            Stream::Commerce => "commerce",
            Stream::Arts => "arts",
            Stream::Vocational => "vocational",
        }
    }

    /// Capitalised name shown to students.
    pub fn label(self) -> &'static str {
        match self {
            Stream::Science => "Science",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts",
            Stream::Vocational => "Vocational",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|stream| stream.key().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-stream weights attached to a question. Keys missing from authored data default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamWeights {
    pub science: f64,
    pub commerce: f64,
    pub arts: f64,
    pub vocational: f64,
}

impl StreamWeights {
    pub fn new(science: f64, commerce: f64, arts: f64, vocational: f64) -> Self {
        Self {
            science,
            commerce,
            arts,
            vocational,
        }
    }

    pub fn weight(&self, stream: Stream) -> f64 {
        match stream {
            Stream::Science => self.science,
            Stream::Commerce => self.commerce,
            Stream::Arts => self.arts,
            Stream::Vocational => self.vocational,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    #[default]
    Likert,
}

/// Number of points on every likert rating scale (ratings 0 through 4).
pub const LIKERT_SCALE_POINTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<StreamWeights>,
}

/// Authored quiz: questions plus the scoring weights applied to their answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDefinition {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub questions: Vec<Question>,
}

fn active_by_default() -> bool {
    true
}

impl QuizDefinition {
    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, QuizDefinitionError> {
        let definition: Self = serde_json::from_str(raw)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, QuizDefinitionError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks the authoring invariants the scorer relies on.
    pub fn validate(&self) -> Result<(), QuizDefinitionError> {
        if self.questions.is_empty() {
            return Err(QuizDefinitionError::NoQuestions {
                quiz_id: self.id.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(QuizDefinitionError::DuplicateQuestion {
                    question_id: question.id,
                });
            }

            if question.kind == QuestionKind::Likert
                && question.options.len() != LIKERT_SCALE_POINTS
            {
                return Err(QuizDefinitionError::LikertScale {
                    question_id: question.id,
                    options: question.options.len(),
                });
            }

            if let Some(scoring) = &question.scoring {
                for stream in Stream::ALL {
                    let weight = scoring.weight(stream);
                    if !weight.is_finite() || weight < 0.0 {
                        return Err(QuizDefinitionError::InvalidWeight {
                            question_id: question.id,
                            stream,
                            weight,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Failure to load or accept an authored quiz definition.
#[derive(Debug, thiserror::Error)]
pub enum QuizDefinitionError {
    #[error("unable to read quiz definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed quiz definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("quiz {quiz_id} has no questions")]
    NoQuestions { quiz_id: QuizId },
    #[error("question id {question_id} appears more than once")]
    DuplicateQuestion { question_id: i64 },
    #[error("likert question {question_id} must offer 5 ratings, found {options}")]
    LikertScale { question_id: i64, options: usize },
    #[error("question {question_id} has invalid {stream} weight {weight}")]
    InvalidWeight {
        question_id: i64,
        stream: Stream,
        weight: f64,
    },
}

/// Raw answer as submitted. Both fields are kept verbatim so the stored record mirrors the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub question_id: Value,
    #[serde(default)]
    pub answer: Value,
}

impl Answer {
    pub fn new(question_id: impl Into<Value>, answer: impl Into<Value>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }

    pub fn question_ref(&self) -> Option<i64> {
        leading_integer(&self.question_id)
    }

    pub fn selection(&self) -> Option<i64> {
        leading_integer(&self.answer)
    }
}

/// Reads an integer the way form-encoded clients send them: numbers truncate toward zero,
/// strings contribute their leading (optionally signed) digits, anything else is rejected.
pub(crate) fn leading_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(raw) => leading_digits(raw),
        _ => None,
    }
}

fn leading_digits(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Accumulated per-stream totals produced by the scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub science: f64,
    pub commerce: f64,
    pub arts: f64,
    pub vocational: f64,
}

impl ScoreVector {
    pub fn get(&self, stream: Stream) -> f64 {
        match stream {
            Stream::Science => self.science,
            Stream::Commerce => self.commerce,
            Stream::Arts => self.arts,
            Stream::Vocational => self.vocational,
        }
    }

    pub(crate) fn add(&mut self, stream: Stream, amount: f64) {
        let slot = match stream {
            Stream::Science => &mut self.science,
            Stream::Commerce => &mut self.commerce,
            Stream::Arts => &mut self.arts,
            Stream::Vocational => &mut self.vocational,
        };
        *slot += amount;
    }

    pub fn total(&self) -> f64 {
        Stream::ALL.iter().map(|stream| self.get(*stream)).sum()
    }

    /// Scores in canonical stream order.
    pub fn entries(&self) -> [(Stream, f64); 4] {
        Stream::ALL.map(|stream| (stream, self.get(stream)))
    }
}

/// Ranked outcome. Confidence is the primary stream's share of all accumulated weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub primary_stream: Stream,
    pub secondary_stream: Option<Stream>,
    pub confidence: f64,
}

impl Recommendation {
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Streams recorded on the student profile, primary first.
    pub fn recommended_streams(&self) -> Vec<Stream> {
        std::iter::once(self.primary_stream)
            .chain(self.secondary_stream)
            .collect()
    }
}

/// Static guidance attached to a recommended stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub courses: Vec<String>,
    pub explanation: String,
    pub next_steps: Vec<String>,
}

/// Persisted suggestion block of a quiz result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSuggestions {
    pub primary_stream: Stream,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_stream: Option<Stream>,
    pub confidence: f64,
    pub recommended_courses: Vec<String>,
}

/// One stored submission. At most one exists per (user, quiz) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: ResultId,
    pub user_id: UserId,
    pub quiz_id: QuizId,
    pub answers: Vec<Answer>,
    pub scores: ScoreVector,
    pub suggestions: ResultSuggestions,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_integer_follows_lenient_parsing() {
        assert_eq!(leading_integer(&json!(3)), Some(3));
        assert_eq!(leading_integer(&json!(2.9)), Some(2));
        assert_eq!(leading_integer(&json!("  4")), Some(4));
        assert_eq!(leading_integer(&json!("1st")), Some(1));
        assert_eq!(leading_integer(&json!("-2")), Some(-2));
        assert_eq!(leading_integer(&json!("abc")), None);
        assert_eq!(leading_integer(&json!("")), None);
        assert_eq!(leading_integer(&json!(true)), None);
        assert_eq!(leading_integer(&Value::Null), None);
    }

    #[test]
    fn stream_parse_is_case_insensitive() {
        assert_eq!(Stream::parse("SCIENCE"), Some(Stream::Science));
        assert_eq!(Stream::parse(" vocational "), Some(Stream::Vocational));
        assert_eq!(Stream::parse("law"), None);
    }

    #[test]
    fn streams_serialize_with_display_labels() {
        let encoded = serde_json::to_value(Stream::Commerce).expect("serialize");
        assert_eq!(encoded, json!("Commerce"));
        let decoded: Stream = serde_json::from_value(json!("arts")).expect("alias accepted");
        assert_eq!(decoded, Stream::Arts);
    }

    #[test]
    fn missing_scoring_keys_default_to_zero() {
        let question: Question = serde_json::from_value(json!({
            "id": 9,
            "text": "Do you like drawing?",
            "type": "multiple-choice",
            "options": ["Yes", "No"],
            "scoring": { "arts": 2 }
        }))
        .expect("question parses");

        let scoring = question.scoring.expect("scoring present");
        assert_eq!(scoring, StreamWeights::new(0.0, 0.0, 2.0, 0.0));
    }

    #[test]
    fn question_type_defaults_to_likert() {
        let question: Question = serde_json::from_value(json!({
            "id": 1,
            "text": "Rate your interest in biology",
            "options": ["0", "1", "2", "3", "4"]
        }))
        .expect("question parses");

        assert_eq!(question.kind, QuestionKind::Likert);
        assert!(question.scoring.is_none());
    }

    #[test]
    fn validate_rejects_negative_weights() {
        let quiz = QuizDefinition {
            id: QuizId("quiz-neg".to_string()),
            title: "Broken".to_string(),
            description: None,
            is_active: true,
            questions: vec![Question {
                id: 1,
                text: "Pick one".to_string(),
                kind: QuestionKind::MultipleChoice,
                options: vec!["A".to_string(), "B".to_string()],
                scoring: Some(StreamWeights::new(1.0, -1.0, 0.0, 0.0)),
            }],
        };

        match quiz.validate() {
            Err(QuizDefinitionError::InvalidWeight {
                question_id: 1,
                stream: Stream::Commerce,
                ..
            }) => {}
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_short_likert_scales() {
        let quiz = QuizDefinition {
            id: QuizId("quiz-likert".to_string()),
            title: "Broken".to_string(),
            description: None,
            is_active: true,
            questions: vec![Question {
                id: 4,
                text: "How much?".to_string(),
                kind: QuestionKind::Likert,
                options: vec!["Low".to_string(), "High".to_string()],
                scoring: None,
            }],
        };

        assert!(matches!(
            quiz.validate(),
            Err(QuizDefinitionError::LikertScale {
                question_id: 4,
                options: 2
            })
        ));
    }

    #[test]
    fn recommended_streams_skip_missing_secondary() {
        let recommendation = Recommendation {
            primary_stream: Stream::Arts,
            secondary_stream: None,
            confidence: 0.5,
        };
        assert_eq!(recommendation.recommended_streams(), vec![Stream::Arts]);
        assert_eq!(recommendation.confidence_percent(), 50);
    }
}
