// Entity Store Port (Interface)

use crate::domain::Entity;
use crate::port::CollaboratorError;
use async_trait::async_trait;

/// Persistence capability for one entity type
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Persist an entity
    ///
    /// Returns the persisted form, which may be an enriched copy of the input.
    async fn persist(&self, entity: E) -> Result<E, CollaboratorError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::CallLog;
    use std::sync::Mutex;

    /// Mock store that keeps persisted entities in memory
    pub struct MockEntityStore<E> {
        failure: Option<CollaboratorError>,
        persisted: Mutex<Vec<E>>,
        log: CallLog,
    }

    impl<E: Entity> MockEntityStore<E> {
        pub fn new_success() -> Self {
            Self {
                failure: None,
                persisted: Mutex::new(Vec::new()),
                log: CallLog::new(),
            }
        }
        pub fn new_fail(err: CollaboratorError) -> Self {
            Self {
                failure: Some(err),
                ..Self::new_success()
            }
        }
        pub fn with_log(mut self, log: CallLog) -> Self {
            self.log = log;
            self
        }
        /// Number of persist calls (failed calls included)
        pub fn call_count(&self) -> usize {
            self.log
                .entries()
                .iter()
                .filter(|e| e.starts_with("persist:"))
                .count()
        }
        pub fn persisted(&self) -> Vec<E> {
            self.persisted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<E: Entity> EntityStore<E> for MockEntityStore<E> {
        async fn persist(&self, entity: E) -> Result<E, CollaboratorError> {
            self.log.record(format!("persist:{}", entity.id()));
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.persisted.lock().unwrap().push(entity.clone());
            Ok(entity)
        }
    }
}
