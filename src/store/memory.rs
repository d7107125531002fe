use super::document::{DocumentStore, StoreTransaction};
use super::records::{FeedbackRecord, InterviewRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::info;

#[derive(Debug, Default)]
struct Collections {
    interviews: HashMap<String, InterviewRecord>,
    feedback: Vec<FeedbackRecord>,
}

/// Process-local document store.
///
/// A transaction holds the write lock from `begin` to commit or drop, so
/// readers never observe a half-applied transaction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load interview records from a JSON array file
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let records: Vec<InterviewRecord> = serde_json::from_slice(&bytes)?;

        let store = Self::new();
        for record in records {
            store.insert_interview(record).await;
        }

        info!(
            "Loaded {} interviews from {}",
            store.interview_count().await,
            path.display()
        );
        Ok(store)
    }

    pub async fn insert_interview(&self, record: InterviewRecord) {
        let mut collections = self.inner.write().await;
        collections.interviews.insert(record.id.clone(), record);
    }

    pub async fn interview_count(&self) -> usize {
        self.inner.read().await.interviews.len()
    }

    pub async fn feedback_count(&self) -> usize {
        self.inner.read().await.feedback.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let guard = Arc::clone(&self.inner).write_owned().await;
        Ok(Box::new(MemoryTransaction {
            guard,
            pending: Vec::new(),
        }))
    }

    async fn get_interview(&self, id: &str) -> Result<Option<InterviewRecord>, StoreError> {
        Ok(self.inner.read().await.interviews.get(id).cloned())
    }

    async fn feedback_for_interview(
        &self,
        interview_id: &str,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let collections = self.inner.read().await;
        Ok(collections
            .feedback
            .iter()
            .filter(|f| f.interview_id == interview_id)
            .cloned()
            .collect())
    }
}

enum PendingWrite {
    CreateFeedback(FeedbackRecord),
    LinkFeedback {
        interview_id: String,
        feedback_id: String,
        updated_at: DateTime<Utc>,
    },
}

struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<Collections>,
    pending: Vec<PendingWrite>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn get_interview(&mut self, id: &str) -> Result<Option<InterviewRecord>, StoreError> {
        Ok(self.guard.interviews.get(id).cloned())
    }

    fn create_feedback(&mut self, record: FeedbackRecord) {
        self.pending.push(PendingWrite::CreateFeedback(record));
    }

    fn link_feedback(&mut self, interview_id: &str, feedback_id: &str, updated_at: DateTime<Utc>) {
        self.pending.push(PendingWrite::LinkFeedback {
            interview_id: interview_id.to_string(),
            feedback_id: feedback_id.to_string(),
            updated_at,
        });
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction { mut guard, pending } = *self;

        // Validate everything before applying anything
        for write in &pending {
            if let PendingWrite::LinkFeedback { interview_id, .. } = write {
                if !guard.interviews.contains_key(interview_id) {
                    return Err(StoreError::Backend(format!(
                        "interview {} does not exist",
                        interview_id
                    )));
                }
            }
        }

        for write in pending {
            match write {
                PendingWrite::CreateFeedback(record) => guard.feedback.push(record),
                PendingWrite::LinkFeedback {
                    interview_id,
                    feedback_id,
                    updated_at,
                } => {
                    if let Some(interview) = guard.interviews.get_mut(&interview_id) {
                        interview.has_feedback = true;
                        interview.feedback_id = Some(feedback_id);
                        interview.updated_at = Some(updated_at);
                    }
                }
            }
        }

        Ok(())
    }
}
