// Domain Layer - Pure entities and construction rules

pub mod account;
pub mod entity;
pub mod error;
pub mod post_like;

// Re-exports
pub use account::{Account, AccountId, AccountStatus};
pub use entity::{require_identifier, Entity};
pub use error::DomainError;
pub use post_like::{PostLike, PostLikeId};
