pub mod repository;

pub use repository::{AgentRepository, RepositoryError, UpdateOutcome};
