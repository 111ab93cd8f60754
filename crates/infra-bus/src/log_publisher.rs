// Structured-log publisher

use crate::event::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use usecase_core::domain::Entity;
use usecase_core::port::{CollaboratorError, EventPublisher, TimeProvider};

/// Emits each event as an `info` tracing event (target `usecase::events`)
pub struct LogPublisher {
    time_provider: Arc<dyn TimeProvider>,
}

impl LogPublisher {
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { time_provider }
    }
}

#[async_trait]
impl<E: Entity> EventPublisher<E> for LogPublisher {
    async fn publish(&self, entity: &E) -> Result<(), CollaboratorError> {
        let event = DomainEvent::created(entity, self.time_provider.now_millis())?;
        info!(
            target: "usecase::events",
            event_type = %event.event_type,
            entity_id = %event.entity_id,
            payload = %event.payload,
            "Domain event"
        );
        Ok(())
    }
}
