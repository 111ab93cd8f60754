// Port Layer - Collaborator interfaces injected into use cases

pub mod call_log; // Ordering assertions in mocks
pub mod closure;
pub mod compensation;
pub mod entity_store;
pub mod error;
pub mod event_publisher;
pub mod id_provider; // For deterministic testing
pub mod precondition;
pub mod time_provider;

// Re-exports
pub use call_log::CallLog;
pub use closure::{precondition_fn, publisher_fn, store_fn, FnPrecondition, FnPublisher, FnStore};
pub use compensation::Compensation;
pub use entity_store::EntityStore;
pub use error::CollaboratorError;
pub use event_publisher::EventPublisher;
pub use id_provider::IdProvider;
pub use precondition::Precondition;
pub use time_provider::TimeProvider;
