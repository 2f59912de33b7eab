use super::super::domain::{Recommendation, ScoreVector, Stream};

/// Upper bound on reported confidence; the engine never claims certainty.
pub const CONFIDENCE_CEILING: f64 = 0.95;
/// Confidence reported when no answer contributed any weight.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;
/// Primary stream used when every score is zero.
pub const FALLBACK_STREAM: Stream = Stream::Arts;

/// Orders the positive scores and derives the primary/secondary streams and confidence.
pub fn rank(scores: &ScoreVector) -> Recommendation {
    let mut ranked: Vec<(Stream, f64)> = scores
        .entries()
        .into_iter()
        .filter(|(_, score)| *score > 0.0)
        .collect();
    // Stable sort over canonical order keeps the earlier stream ahead on exact ties.
    ranked.sort_by(|(_, left), (_, right)| right.total_cmp(left));

    let total = scores.total();
    let confidence = match ranked.first() {
        Some((_, top)) if total > 0.0 => top / total,
        _ => NEUTRAL_CONFIDENCE,
    };

    Recommendation {
        primary_stream: ranked
            .first()
            .map(|(stream, _)| *stream)
            .unwrap_or(FALLBACK_STREAM),
        secondary_stream: ranked.get(1).map(|(stream, _)| *stream),
        confidence: confidence.clamp(0.0, CONFIDENCE_CEILING),
    }
}
