use crate::transcript::ChatMessage;

const SCHEMA_EXAMPLE: &str = r#"{
  "summary": "Brief overview of the interview",
  "technical": {
    "rating": 5,
    "strengths": ["Strength 1", "Strength 2"],
    "improvements": ["Improvement 1", "Improvement 2"]
  },
  "communication": {
    "rating": 5,
    "strengths": ["Communication Strength 1"],
    "improvements": ["Communication Improvement 1"]
  },
  "overall": {
    "score": 5,
    "recommendations": ["Overall recommendation 1"]
  }
}"#;

/// Build the evaluator prompt for a transcript
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    let conversation = messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str().to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an experienced interviewer evaluating a mock interview.\n\
         Analyze this interview conversation and provide feedback:\n\
         {conversation}\n\
         \n\
         Important: Respond with only a valid JSON object, with no other text, \
         using the following structure (ratings and score from 0 to 10):\n\
         {SCHEMA_EXAMPLE}\n\
         \n\
         If the conversation is too short or lacks substantial content, use lower ratings and generic feedback."
    )
}
