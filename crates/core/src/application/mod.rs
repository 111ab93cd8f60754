// Application Layer - Use Cases and the executor that runs them

pub mod constants;
pub mod executor;
pub mod like_post;
pub mod open_account;

// Re-exports
pub use executor::{Collaborators, ExecutorConfig, SharedCollaborators, UseCaseExecutor};
pub use like_post::{LikePostRequest, PostLikeService};
pub use open_account::{AccountService, OpenAccountRequest};
