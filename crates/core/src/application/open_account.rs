// Open Account Use Case

use crate::application::executor::{Collaborators, SharedCollaborators, UseCaseExecutor};
use crate::domain::Account;
use crate::error::Result;
use crate::port::{IdProvider, TimeProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Account opening request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountRequest {
    pub customer_id: String,
    pub product_code: String,
}

/// Execute open-account use case (precondition on `customer_id`)
pub async fn execute(
    executor: &UseCaseExecutor,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    collaborators: &Collaborators<'_, Account>,
    req: OpenAccountRequest,
) -> Result<Account> {
    let OpenAccountRequest {
        customer_id,
        product_code,
    } = req;
    let subject_id = customer_id.clone();

    executor
        .run(
            &subject_id,
            move || {
                Account::open(
                    id_provider.generate_id(),
                    time_provider.now_millis(),
                    customer_id,
                    product_code,
                )
            },
            collaborators,
        )
        .await
}

/// Account service (constructor-injected form)
pub struct AccountService {
    executor: UseCaseExecutor,
    collaborators: SharedCollaborators<Account>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl AccountService {
    pub fn new(
        executor: UseCaseExecutor,
        collaborators: SharedCollaborators<Account>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            executor,
            collaborators,
            id_provider,
            time_provider,
        }
    }

    pub async fn open_account(&self, req: OpenAccountRequest) -> Result<Account> {
        execute(
            &self.executor,
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            &self.collaborators.borrow(),
            req,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountStatus;
    use crate::port::entity_store::mocks::MockEntityStore;
    use crate::port::event_publisher::mocks::MockEventPublisher;
    use crate::port::id_provider::mocks::SequenceIdProvider;
    use crate::port::precondition::mocks::MockPrecondition;
    use crate::port::time_provider::mocks::SteppingTimeProvider;
    use crate::{Step, UseCaseError};

    fn service(
        precondition: MockPrecondition,
        store: Arc<MockEntityStore<Account>>,
        publisher: Arc<MockEventPublisher<Account>>,
    ) -> AccountService {
        AccountService::new(
            UseCaseExecutor::default(),
            SharedCollaborators::new(Arc::new(precondition), store, publisher),
            Arc::new(SequenceIdProvider::new("acc")),
            Arc::new(SteppingTimeProvider::fixed(7000)),
        )
    }

    #[tokio::test]
    async fn test_open_account() {
        let store = Arc::new(MockEntityStore::new_success());
        let publisher = Arc::new(MockEventPublisher::new_success());
        let service = service(MockPrecondition::holds(), store.clone(), publisher.clone());

        let account = service
            .open_account(OpenAccountRequest {
                customer_id: "cust-1".to_string(),
                product_code: "SAVINGS".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(account.id, "acc-1");
        assert_eq!(account.status, AccountStatus::Open);
        assert_eq!(account.opened_at, 7000);
        assert_eq!(publisher.published(), vec![account]);
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let store = Arc::new(MockEntityStore::new_success());
        let publisher = Arc::new(MockEventPublisher::new_success());
        let service = service(MockPrecondition::fails(), store.clone(), publisher.clone());

        let err = service
            .open_account(OpenAccountRequest {
                customer_id: "ghost".to_string(),
                product_code: "SAVINGS".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::PreconditionFailed { .. }));
        assert_eq!(store.call_count(), 0);
        assert_eq!(publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_product_code_rejected_before_persist() {
        let store = Arc::new(MockEntityStore::new_success());
        let publisher = Arc::new(MockEventPublisher::new_success());
        let service = service(MockPrecondition::holds(), store.clone(), publisher);

        let err = service
            .open_account(OpenAccountRequest {
                customer_id: "cust-1".to_string(),
                product_code: "  ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.step(), Step::Build);
        assert_eq!(store.call_count(), 0);
    }
}
