//! Persistence of interviews and feedback
//!
//! The backing store is an opaque document store with transactional
//! read-modify-write; `InMemoryStore` is the bundled implementation.

mod document;
mod memory;
mod records;
mod transaction;

pub use document::{DocumentStore, StoreTransaction};
pub use memory::InMemoryStore;
pub use records::{FeedbackRecord, InterviewRecord};
pub use transaction::PersistenceTransactionManager;
