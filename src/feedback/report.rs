use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Structured evaluation of a finished interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub summary: String,
    pub technical: CategoryAssessment,
    pub communication: CategoryAssessment,
    pub overall: OverallAssessment,
}

/// Rating plus strengths and improvement notes for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssessment {
    /// 0 to 10
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// 0 to 10
    #[serde(deserialize_with = "deserialize_rating")]
    pub score: u8,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

pub const FALLBACK_SUMMARY: &str = "Unable to generate detailed feedback";

impl FeedbackReport {
    /// Report used whenever model output cannot be trusted
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            technical: CategoryAssessment {
                rating: 1,
                strengths: Vec::new(),
                improvements: vec!["Failed to generate technical analysis".to_string()],
            },
            communication: CategoryAssessment {
                rating: 1,
                strengths: Vec::new(),
                improvements: vec!["Failed to generate communication analysis".to_string()],
            },
            overall: OverallAssessment {
                score: 1,
                recommendations: vec!["Please review the interview details manually".to_string()],
            },
        }
    }

    /// Parse raw model output, substituting [`FeedbackReport::fallback`] on any failure
    pub fn from_model_output(raw: &str) -> Self {
        match super::parse::parse_model_output(raw) {
            Ok(report) => report,
            Err(e) => {
                warn!("Failed to parse feedback, using fallback: {}", e);
                Self::fallback()
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Accept integer or fractional ratings, rounded and clamped to 0..=10
fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(de::Error::custom("rating must be a finite number"));
    }
    Ok(value.round().clamp(0.0, 10.0) as u8)
}
