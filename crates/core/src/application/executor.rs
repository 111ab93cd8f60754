// Use-Case Executor
// precondition -> build -> persist -> publish, strictly in that order

use crate::application::constants::MAX_DEADLINE;
use crate::domain::{DomainError, Entity};
use crate::error::{Result, Step, UseCaseError};
use crate::port::{Compensation, EntityStore, EventPublisher, Precondition};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Collaborators borrowed for the duration of one invocation
pub struct Collaborators<'a, E: Entity> {
    pub precondition: &'a dyn Precondition,
    pub store: &'a dyn EntityStore<E>,
    pub publisher: &'a dyn EventPublisher<E>,
    pub compensation: Option<&'a dyn Compensation<E>>,
}

impl<'a, E: Entity> Collaborators<'a, E> {
    pub fn new(
        precondition: &'a dyn Precondition,
        store: &'a dyn EntityStore<E>,
        publisher: &'a dyn EventPublisher<E>,
    ) -> Self {
        Self {
            precondition,
            store,
            publisher,
            compensation: None,
        }
    }

    /// Undo a committed entity when its publish fails
    pub fn with_compensation(mut self, compensation: &'a dyn Compensation<E>) -> Self {
        self.compensation = Some(compensation);
        self
    }
}

/// Collaborators owned by a composition root and shared between invocations
pub struct SharedCollaborators<E: Entity> {
    precondition: Arc<dyn Precondition>,
    store: Arc<dyn EntityStore<E>>,
    publisher: Arc<dyn EventPublisher<E>>,
    compensation: Option<Arc<dyn Compensation<E>>>,
}

impl<E: Entity> SharedCollaborators<E> {
    pub fn new(
        precondition: Arc<dyn Precondition>,
        store: Arc<dyn EntityStore<E>>,
        publisher: Arc<dyn EventPublisher<E>>,
    ) -> Self {
        Self {
            precondition,
            store,
            publisher,
            compensation: None,
        }
    }

    pub fn with_compensation(mut self, compensation: Arc<dyn Compensation<E>>) -> Self {
        self.compensation = Some(compensation);
        self
    }

    /// Borrow for one invocation
    pub fn borrow(&self) -> Collaborators<'_, E> {
        Collaborators {
            precondition: self.precondition.as_ref(),
            store: self.store.as_ref(),
            publisher: self.publisher.as_ref(),
            compensation: self.compensation.as_deref(),
        }
    }
}

impl<E: Entity> Clone for SharedCollaborators<E> {
    fn clone(&self) -> Self {
        Self {
            precondition: Arc::clone(&self.precondition),
            store: Arc::clone(&self.store),
            publisher: Arc::clone(&self.publisher),
            compensation: self.compensation.clone(),
        }
    }
}

/// Executor configuration
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// Deadline around the whole sequence (None = wait forever)
    pub deadline: Option<Duration>,
}

impl ExecutorConfig {
    /// Set a deadline, capped at [`MAX_DEADLINE`]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        if deadline > MAX_DEADLINE {
            warn!(
                requested_ms = %deadline.as_millis(),
                max_ms = %MAX_DEADLINE.as_millis(),
                "Deadline capped"
            );
        }
        self.deadline = Some(deadline.min(MAX_DEADLINE));
        self
    }
}

/// Runs one business operation against injected collaborators
///
/// Holds no state between calls, so concurrent invocations are independent.
#[derive(Debug, Clone, Default)]
pub struct UseCaseExecutor {
    config: ExecutorConfig,
}

impl UseCaseExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute one use case
    ///
    /// # Arguments
    /// * `subject_id` - Identifier handed to the precondition
    /// * `build` - Pure construction step, only called once the precondition holds
    /// * `collaborators` - Injected check / persist / publish capabilities
    ///
    /// # Errors
    /// - `PreconditionFailed` / `PreconditionCheck`: nothing persisted or published
    /// - `Domain`: construction rejected the inputs; nothing persisted or published
    /// - `PersistenceFailed`: publish skipped
    /// - `PublishFailed`: persisted entity stays committed unless compensated
    /// - `DeadlineExceeded`: a collaborator was still pending when the deadline
    ///   elapsed; carries that step and whether the entity is committed
    ///
    /// The deadline bounds precondition, persist and publish. Compensation
    /// always runs to completion outside it.
    pub async fn run<E, B>(
        &self,
        subject_id: &str,
        build: B,
        collaborators: &Collaborators<'_, E>,
    ) -> Result<E>
    where
        E: Entity,
        B: FnOnce() -> std::result::Result<E, DomainError> + Send,
    {
        let started = Instant::now();

        // 1. Precondition
        let holds = self
            .bounded::<E, _, _>(
                started,
                Step::Precondition,
                false,
                collaborators.precondition.check(subject_id),
            )
            .await?
            .map_err(|source| {
                error!(kind = E::KIND, subject_id = %subject_id, error = %source, "Precondition check errored");
                UseCaseError::PreconditionCheck {
                    subject_id: subject_id.to_string(),
                    source,
                }
            })?;

        if !holds {
            warn!(kind = E::KIND, subject_id = %subject_id, "Precondition failed");
            return Err(UseCaseError::PreconditionFailed {
                subject_id: subject_id.to_string(),
                reason: collaborators.precondition.describe().to_string(),
            });
        }

        // 2. Build (fresh entity per invocation)
        let entity = build()?;
        debug!(kind = E::KIND, entity_id = %entity.id(), "Entity constructed");

        // 3. Persist (a store cut off mid-call may or may not have committed)
        let persisted = self
            .bounded::<E, _, _>(
                started,
                Step::Persist,
                false,
                collaborators.store.persist(entity),
            )
            .await?
            .map_err(|source| {
                error!(kind = E::KIND, subject_id = %subject_id, error = %source, "Persist failed");
                UseCaseError::PersistenceFailed(source)
            })?;

        // 4. Publish
        let published = self
            .bounded::<E, _, _>(
                started,
                Step::Publish,
                true,
                collaborators.publisher.publish(&persisted),
            )
            .await;

        match published {
            Ok(Ok(())) => {
                info!(kind = E::KIND, entity_id = %persisted.id(), subject_id = %subject_id, "Use case completed");
                Ok(persisted)
            }
            Ok(Err(source)) => {
                error!(
                    kind = E::KIND,
                    entity_id = %persisted.id(),
                    error = %source,
                    "Publish failed after commit"
                );
                let compensated = Self::compensate(&persisted, collaborators).await;
                Err(UseCaseError::PublishFailed {
                    entity_id: persisted.id().to_string(),
                    compensated,
                    source,
                })
            }
            Err(UseCaseError::DeadlineExceeded {
                deadline_ms, step, ..
            }) => {
                let compensated = Self::compensate(&persisted, collaborators).await;
                Err(UseCaseError::DeadlineExceeded {
                    deadline_ms,
                    step,
                    committed: !compensated,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Await one collaborator call within what is left of the deadline
    async fn bounded<E, T, F>(
        &self,
        started: Instant,
        step: Step,
        committed: bool,
        call: F,
    ) -> Result<T>
    where
        E: Entity,
        F: Future<Output = T>,
    {
        let Some(deadline) = self.config.deadline else {
            return Ok(call.await);
        };

        let remaining = deadline.saturating_sub(started.elapsed());
        tokio::time::timeout(remaining, call).await.map_err(|_| {
            warn!(
                kind = E::KIND,
                step = %step,
                deadline_ms = %deadline.as_millis(),
                "Use case deadline exceeded"
            );
            UseCaseError::DeadlineExceeded {
                deadline_ms: deadline.as_millis() as u64,
                step,
                committed,
            }
        })
    }

    /// Run the optional compensation; true only when it succeeded
    async fn compensate<E: Entity>(persisted: &E, collaborators: &Collaborators<'_, E>) -> bool {
        let Some(compensation) = collaborators.compensation else {
            return false;
        };
        match compensation.compensate(persisted).await {
            Ok(()) => {
                info!(kind = E::KIND, entity_id = %persisted.id(), "Compensated");
                true
            }
            Err(e) => {
                error!(kind = E::KIND, entity_id = %persisted.id(), error = %e, "Compensation failed");
                false
            }
        }
    }
}
