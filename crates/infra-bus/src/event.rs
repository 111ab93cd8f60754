// Domain event envelope

use serde::{Deserialize, Serialize};
use usecase_core::application::constants::CREATED_EVENT_SUFFIX;
use usecase_core::domain::Entity;
use usecase_core::port::CollaboratorError;

/// Notification emitted after an entity was persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// `<kind>.created`, e.g. `post_like.created`
    pub event_type: String,
    pub entity_id: String,
    pub payload: serde_json::Value,
    pub published_at: i64, // epoch ms
}

impl DomainEvent {
    /// Wrap an entity into a `created` event
    pub fn created<E: Entity>(entity: &E, published_at: i64) -> Result<Self, CollaboratorError> {
        Ok(Self {
            event_type: format!("{}.{}", E::KIND, CREATED_EVENT_SUFFIX),
            entity_id: entity.id().to_string(),
            payload: serde_json::to_value(entity)?,
            published_at,
        })
    }

    /// Decode the payload back into an entity
    pub fn decode<E>(&self) -> Result<E, CollaboratorError>
    where
        E: Entity + serde::de::DeserializeOwned,
    {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usecase_core::domain::{Account, PostLike};

    #[test]
    fn test_created_event_for_like() {
        let like = PostLike::new("like-1", 1000, "user-1", "post-1").unwrap();
        let event = DomainEvent::created(&like, 1500).unwrap();

        assert_eq!(event.event_type, "post_like.created");
        assert_eq!(event.entity_id, "like-1");
        assert_eq!(event.published_at, 1500);
        assert_eq!(event.decode::<PostLike>().unwrap(), like);
    }

    #[test]
    fn test_decode_wrong_kind_fails() {
        let like = PostLike::new("like-1", 1000, "user-1", "post-1").unwrap();
        let event = DomainEvent::created(&like, 1500).unwrap();

        assert!(matches!(
            event.decode::<Account>(),
            Err(CollaboratorError::Serialization(_))
        ));
    }
}
