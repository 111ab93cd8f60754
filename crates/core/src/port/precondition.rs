// Precondition Port
// e.g. "does the referenced post exist"

use crate::port::CollaboratorError;
use async_trait::async_trait;

/// Boolean check that must hold before a use case may take effect
#[async_trait]
pub trait Precondition: Send + Sync {
    /// Check the precondition for `subject_id`
    ///
    /// `Ok(false)` means the precondition does not hold; `Err` means the
    /// check itself could not be answered.
    async fn check(&self, subject_id: &str) -> Result<bool, CollaboratorError>;

    /// Human-readable reason reported when `check` returns false
    fn describe(&self) -> &str {
        "precondition does not hold"
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::CallLog;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock precondition with a fixed answer
    pub struct MockPrecondition {
        answer: Result<bool, CollaboratorError>,
        call_count: AtomicUsize,
        log: CallLog,
    }

    impl MockPrecondition {
        pub fn new(answer: Result<bool, CollaboratorError>) -> Self {
            Self {
                answer,
                call_count: AtomicUsize::new(0),
                log: CallLog::new(),
            }
        }
        pub fn holds() -> Self {
            Self::new(Ok(true))
        }
        pub fn fails() -> Self {
            Self::new(Ok(false))
        }
        pub fn errors(err: CollaboratorError) -> Self {
            Self::new(Err(err))
        }
        pub fn with_log(mut self, log: CallLog) -> Self {
            self.log = log;
            self
        }
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Precondition for MockPrecondition {
        async fn check(&self, subject_id: &str) -> Result<bool, CollaboratorError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.log.record(format!("check:{}", subject_id));
            self.answer.clone()
        }

        fn describe(&self) -> &str {
            "mock precondition"
        }
    }
}
