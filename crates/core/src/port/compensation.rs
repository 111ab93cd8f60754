// Compensation Port (optional undo after a failed publish)

use crate::domain::Entity;
use crate::port::CollaboratorError;
use async_trait::async_trait;

/// Undo the effect of a persisted entity whose publish failed
#[async_trait]
pub trait Compensation<E: Entity>: Send + Sync {
    async fn compensate(&self, entity: &E) -> Result<(), CollaboratorError>;
}

pub mod mocks {
    use super::*;
    use crate::port::CallLog;

    /// Mock compensation with a fixed outcome
    pub struct MockCompensation {
        failure: Option<CollaboratorError>,
        log: CallLog,
    }

    impl MockCompensation {
        pub fn new_success() -> Self {
            Self {
                failure: None,
                log: CallLog::new(),
            }
        }
        pub fn new_fail(err: CollaboratorError) -> Self {
            Self {
                failure: Some(err),
                log: CallLog::new(),
            }
        }
        pub fn with_log(mut self, log: CallLog) -> Self {
            self.log = log;
            self
        }
    }

    #[async_trait]
    impl<E: Entity> Compensation<E> for MockCompensation {
        async fn compensate(&self, entity: &E) -> Result<(), CollaboratorError> {
            self.log.record(format!("compensate:{}", entity.id()));
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }
}
