// Closure adapters
// Lets a composition root pass plain async closures where a port is expected.

use crate::domain::Entity;
use crate::port::{CollaboratorError, EntityStore, EventPublisher, Precondition};
use async_trait::async_trait;
use std::future::Future;

/// Precondition backed by an async closure
pub struct FnPrecondition<F> {
    f: F,
    reason: String,
}

/// Wrap `f` as a [`Precondition`]; `reason` is reported when it yields false
pub fn precondition_fn<F, Fut>(reason: impl Into<String>, f: F) -> FnPrecondition<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, CollaboratorError>> + Send + 'static,
{
    FnPrecondition {
        f,
        reason: reason.into(),
    }
}

#[async_trait]
impl<F, Fut> Precondition for FnPrecondition<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, CollaboratorError>> + Send + 'static,
{
    async fn check(&self, subject_id: &str) -> Result<bool, CollaboratorError> {
        (self.f)(subject_id.to_string()).await
    }

    fn describe(&self) -> &str {
        &self.reason
    }
}

/// Entity store backed by an async closure
pub struct FnStore<F> {
    f: F,
}

pub fn store_fn<E, F, Fut>(f: F) -> FnStore<F>
where
    E: Entity,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<E, CollaboratorError>> + Send + 'static,
{
    FnStore { f }
}

#[async_trait]
impl<E, F, Fut> EntityStore<E> for FnStore<F>
where
    E: Entity,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<E, CollaboratorError>> + Send + 'static,
{
    async fn persist(&self, entity: E) -> Result<E, CollaboratorError> {
        (self.f)(entity).await
    }
}

/// Event publisher backed by an async closure
///
/// The closure receives an owned copy so the returned future can be `'static`.
pub struct FnPublisher<F> {
    f: F,
}

pub fn publisher_fn<E, F, Fut>(f: F) -> FnPublisher<F>
where
    E: Entity,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CollaboratorError>> + Send + 'static,
{
    FnPublisher { f }
}

#[async_trait]
impl<E, F, Fut> EventPublisher<E> for FnPublisher<F>
where
    E: Entity,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CollaboratorError>> + Send + 'static,
{
    async fn publish(&self, entity: &E) -> Result<(), CollaboratorError> {
        (self.f)(entity.clone()).await
    }
}
