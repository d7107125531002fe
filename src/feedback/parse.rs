use super::report::FeedbackReport;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Top-level keys every report must carry
pub const REQUIRED_KEYS: [&str; 4] = ["summary", "technical", "communication", "overall"];

/// Why model output was rejected. Always recovered with the fallback report.
#[derive(Debug, Error)]
pub enum ModelOutputError {
    #[error("model output is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("model output is missing `{0}`")]
    MissingField(&'static str),

    #[error("model output does not match the report schema: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Remove every Markdown code fence marker and surrounding whitespace
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strictly parse model output into a [`FeedbackReport`]
pub fn parse_model_output(raw: &str) -> Result<FeedbackReport, ModelOutputError> {
    let cleaned = strip_code_fences(raw);
    debug!("Raw feedback: {}", raw);
    debug!("Clean feedback: {}", cleaned);

    let value: Value = serde_json::from_str(&cleaned).map_err(ModelOutputError::NotJson)?;

    for key in REQUIRED_KEYS {
        if !is_populated(value.get(key)) {
            return Err(ModelOutputError::MissingField(key));
        }
    }

    serde_json::from_value(value).map_err(ModelOutputError::InvalidShape)
}

/// Early filter only: `null`, `false` and `""` count as absent, while values
/// such as `0`, `[]` or `{}` pass here and are rejected by the typed
/// deserialization that follows.
fn is_populated(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "summary": "Solid answers",
        "technical": {"rating": 7, "strengths": ["Rust"], "improvements": ["Testing"]},
        "communication": {"rating": 8, "strengths": ["Clear"], "improvements": []},
        "overall": {"score": 7, "recommendations": ["Practice system design"]}
    }"#;

    #[test]
    fn test_strip_fences_everywhere() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  ```{}```  "), "{}");
        assert_eq!(strip_code_fences("{\"a\": \"```\"}"), "{\"a\": \"\"}");
    }

    #[test]
    fn test_parse_valid_report() {
        let report = parse_model_output(VALID).unwrap();
        assert_eq!(report.summary, "Solid answers");
        assert_eq!(report.technical.rating, 7);
        assert_eq!(report.communication.strengths, vec!["Clear"]);
        assert_eq!(report.overall.recommendations.len(), 1);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let raw = r#"{"summary": "x", "technical": {"rating": 1}, "overall": {"score": 1}}"#;
        assert!(matches!(
            parse_model_output(raw),
            Err(ModelOutputError::MissingField("communication"))
        ));
    }

    #[test]
    fn test_empty_summary_counts_as_missing() {
        let raw = VALID.replace("Solid answers", "");
        assert!(matches!(
            parse_model_output(&raw),
            Err(ModelOutputError::MissingField("summary"))
        ));
    }

    #[test]
    fn test_non_json_is_rejected() {
        assert!(matches!(
            parse_model_output("The candidate did well."),
            Err(ModelOutputError::NotJson(_))
        ));
    }

    #[test]
    fn test_non_object_is_missing_fields() {
        assert!(matches!(
            parse_model_output("[1, 2, 3]"),
            Err(ModelOutputError::MissingField("summary"))
        ));
    }

    #[test]
    fn test_wrong_rating_type_is_invalid_shape() {
        let raw = VALID.replace("\"rating\": 7", "\"rating\": \"seven\"");
        assert!(matches!(
            parse_model_output(&raw),
            Err(ModelOutputError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_key_check_defers_shape_to_deserialization() {
        for replacement in ["0", "[]", "{}"] {
            let raw = VALID.replacen(
                r#"{"rating": 8, "strengths": ["Clear"], "improvements": []}"#,
                replacement,
                1,
            );
            assert!(
                matches!(parse_model_output(&raw), Err(ModelOutputError::InvalidShape(_))),
                "communication = {}",
                replacement
            );
        }

        let raw = VALID.replacen("\"Solid answers\"", "false", 1);
        assert!(matches!(
            parse_model_output(&raw),
            Err(ModelOutputError::MissingField("summary"))
        ));
    }

    #[test]
    fn test_ratings_are_rounded_and_clamped() {
        let raw = VALID
            .replace("\"rating\": 7", "\"rating\": 6.6")
            .replace("\"score\": 7", "\"score\": 42");
        let report = parse_model_output(&raw).unwrap();
        assert_eq!(report.technical.rating, 7);
        assert_eq!(report.overall.score, 10);
    }
}
