use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Guidance, Stream};

const STREAM_PLACEHOLDER: &str = "{stream}";

/// Lookup tables mapping a recommended stream to courses, explanation and next steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceCatalog {
    pub courses: BTreeMap<Stream, Vec<String>>,
    pub explanations: BTreeMap<Stream, String>,
    pub fallback_explanation: String,
    /// First step; `{stream}` is replaced with the stream name.
    pub lead_step: String,
    pub common_steps: Vec<String>,
}

impl GuidanceCatalog {
    pub fn standard() -> Self {
        let courses = BTreeMap::from([
            (
                Stream::Science,
                owned(&[
                    "B.Tech Computer Science",
                    "MBBS (Medical)",
                    "B.Sc Physics/Chemistry/Biology",
                    "Engineering (Various Branches)",
                    "B.Pharmacy",
                ]),
            ),
            (
                Stream::Commerce,
                owned(&[
                    "B.Com (Bachelor of Commerce)",
                    "BBA (Business Administration)",
                    "CA (Chartered Accountancy)",
                    "CS (Company Secretary)",
                    "Economics Honours",
                ]),
            ),
            (
                Stream::Arts,
                owned(&[
                    "BA English Literature",
                    "BA Psychology",
                    "BA History",
                    "Mass Communication",
                    "Fine Arts",
                ]),
            ),
            (
                Stream::Vocational,
                owned(&[
                    "Diploma in Computer Applications",
                    "ITI (Industrial Training)",
                    "Polytechnic Diploma",
                    "Hotel Management",
                    "Fashion Design",
                ]),
            ),
        ]);

        let explanations = BTreeMap::from([
            (
                Stream::Science,
                "You show strong aptitude for analytical thinking, problem-solving, and scientific reasoning. Science stream offers diverse opportunities in technology, healthcare, research, and engineering fields.".to_string(),
            ),
            (
                Stream::Commerce,
                "Your interests align well with business, finance, and analytical skills. Commerce stream provides pathways to careers in business management, finance, economics, and entrepreneurship.".to_string(),
            ),
            (
                Stream::Arts,
                "You demonstrate creativity, communication skills, and interest in humanities. Arts stream offers opportunities in literature, social sciences, psychology, media, and creative fields.".to_string(),
            ),
            (
                Stream::Vocational,
                "Your practical approach and hands-on skills suggest vocational training would be ideal. This path offers specialized technical skills for immediate employment opportunities.".to_string(),
            ),
        ]);

        Self {
            courses,
            explanations,
            fallback_explanation:
                "Based on your responses, this stream aligns well with your interests and abilities."
                    .to_string(),
            lead_step: "Research {stream} courses and admission requirements".to_string(),
            common_steps: owned(&[
                "Explore colleges offering your recommended stream",
                "Connect with career counselors for detailed guidance",
                "Take subject-specific aptitude tests if required",
                "Plan your academic timeline and application process",
            ]),
        }
    }

    /// Guidance for a stream given by name. Unknown names get no courses and the generic explanation.
    pub fn advise(&self, stream_name: &str) -> Guidance {
        let stream = Stream::parse(stream_name);

        let courses = stream
            .and_then(|stream| self.courses.get(&stream))
            .cloned()
            .unwrap_or_default();
        let explanation = self.explanation(stream_name);

        Guidance {
            courses,
            explanation,
            next_steps: self.next_steps(stream_name),
        }
    }

    pub fn explanation(&self, stream_name: &str) -> String {
        Stream::parse(stream_name)
            .and_then(|stream| self.explanations.get(&stream))
            .unwrap_or(&self.fallback_explanation)
            .clone()
    }

    pub fn next_steps(&self, stream_name: &str) -> Vec<String> {
        std::iter::once(self.lead_step.replace(STREAM_PLACEHOLDER, stream_name))
            .chain(self.common_steps.iter().cloned())
            .collect()
    }
}

impl Default for GuidanceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
