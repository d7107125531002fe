use loqa_interviews::{Config, DocumentStore, InMemoryStore};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
[service]
name = "loqa-interviews"

[service.http]
bind = "0.0.0.0"
port = 3040

[voice]
nats_url = "nats://localhost:4222"
workflow_id = "workflow-generate"
interviewer_ref = "interviewer-persona"

[llm]
api_key = "test-key"

[feedback]
endpoint = "http://127.0.0.1:3040/api/generate-feedback"
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_with_defaults() {
    let file = write_config(SAMPLE);
    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.name, "loqa-interviews");
    assert_eq!(cfg.service.http.port, 3040);
    assert_eq!(cfg.voice.subject_prefix, "voice");
    assert_eq!(cfg.voice.workflow_id, "workflow-generate");
    assert_eq!(cfg.llm.api_key.as_deref(), Some("test-key"));
    assert_eq!(cfg.llm.model, "gemini-2.0-flash-001");
    assert!(cfg.llm.base_url.starts_with("https://"));
    assert!(cfg.store.seed_path.is_none());
}

#[test]
fn test_load_config_missing_section() {
    let file = write_config("[service]\nname = \"x\"\n");
    assert!(Config::load(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_load_config_missing_file() {
    assert!(Config::load("/nonexistent/loqa-interviews.toml").is_err());
}

#[test]
fn test_bundled_config_parses() {
    let cfg = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/loqa-interviews")).unwrap();
    assert_eq!(cfg.service.http.port, 3040);
    assert_eq!(cfg.voice.interviewer_ref, "scripted-interviewer");
}

#[tokio::test]
async fn test_seed_file_loads_interviews() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(
        br#"[
            {"id": "iv-1", "userId": "user-1", "questions": ["Why Rust?"]},
            {"id": "iv-2", "userId": "user-2", "hasFeedback": true, "feedbackId": "fb-9"}
        ]"#,
    )
    .unwrap();

    let store = InMemoryStore::from_seed_file(file.path()).await.unwrap();
    assert_eq!(store.interview_count().await, 2);

    let first = store.get_interview("iv-1").await.unwrap().unwrap();
    assert_eq!(first.questions, vec!["Why Rust?".to_string()]);
    assert!(!first.has_feedback);

    let second = store.get_interview("iv-2").await.unwrap().unwrap();
    assert_eq!(second.feedback_id.as_deref(), Some("fb-9"));
}

#[tokio::test]
async fn test_seed_file_rejects_malformed_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(b"{not json").unwrap();

    assert!(InMemoryStore::from_seed_file(file.path()).await.is_err());
}
