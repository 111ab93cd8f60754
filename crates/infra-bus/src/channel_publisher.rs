// In-process channel publisher
// Consumers own the receiving end; a dropped receiver makes publish fail.

use crate::event::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use usecase_core::domain::Entity;
use usecase_core::port::{CollaboratorError, EventPublisher, TimeProvider};

/// Default channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Receiving half handed to event consumers
pub type EventReceiver = mpsc::Receiver<DomainEvent>;

/// Publishes `DomainEvent`s over a bounded mpsc channel
#[derive(Clone)]
pub struct ChannelPublisher {
    tx: mpsc::Sender<DomainEvent>,
    time_provider: Arc<dyn TimeProvider>,
}

/// Create a publisher and its receiver
pub fn event_channel(
    capacity: usize,
    time_provider: Arc<dyn TimeProvider>,
) -> (ChannelPublisher, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelPublisher { tx, time_provider }, rx)
}

#[async_trait]
impl<E: Entity> EventPublisher<E> for ChannelPublisher {
    async fn publish(&self, entity: &E) -> Result<(), CollaboratorError> {
        let event = DomainEvent::created(entity, self.time_provider.now_millis())?;
        let event_type = event.event_type.clone();

        self.tx
            .send(event)
            .await
            .map_err(|_| CollaboratorError::ChannelClosed(format!("no consumer for {}", event_type)))?;

        debug!(event_type = %event_type, entity_id = %entity.id(), "Event published");
        Ok(())
    }
}
