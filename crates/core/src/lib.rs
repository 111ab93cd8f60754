// Usecase Core - Domain, Ports & Executor
// NO infrastructure dependencies (hexagonal boundary)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Result, Step, UseCaseError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
