// Event Publisher Port (fire-and-forget notification)

use crate::domain::Entity;
use crate::port::CollaboratorError;
use async_trait::async_trait;

/// Notification capability for one entity type
#[async_trait]
pub trait EventPublisher<E: Entity>: Send + Sync {
    /// Announce that `entity` was persisted
    async fn publish(&self, entity: &E) -> Result<(), CollaboratorError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::CallLog;
    use std::sync::Mutex;

    /// Mock publisher that records published entities
    pub struct MockEventPublisher<E> {
        failure: Option<CollaboratorError>,
        published: Mutex<Vec<E>>,
        log: CallLog,
    }

    impl<E: Entity> MockEventPublisher<E> {
        pub fn new_success() -> Self {
            Self {
                failure: None,
                published: Mutex::new(Vec::new()),
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
        /// Number of publish calls (failed calls included)
        pub fn call_count(&self) -> usize {
            self.log
                .entries()
                .iter()
                .filter(|e| e.starts_with("publish:"))
                .count()
        }
        pub fn published(&self) -> Vec<E> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<E: Entity> EventPublisher<E> for MockEventPublisher<E> {
        async fn publish(&self, entity: &E) -> Result<(), CollaboratorError> {
            self.log.record(format!("publish:{}", entity.id()));
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.published.lock().unwrap().push(entity.clone());
            Ok(())
        }
    }
}
