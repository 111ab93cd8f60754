// Usecase Infrastructure - Event Publishers
// Implements: EventPublisher for any Entity

pub mod channel_publisher;
pub mod event;
pub mod log_publisher;

pub use channel_publisher::{event_channel, ChannelPublisher, EventReceiver};
pub use event::DomainEvent;
pub use log_publisher::LogPublisher;
