pub mod click_bridge;
pub mod config;
pub mod date_format;
pub mod destination;
pub mod markers;
pub mod persistence;
pub mod planner;
pub mod sort;
pub mod store;

use thiserror::Error;

pub use persistence::PersistenceError;

/// Key under which the destination collection is stored.
pub const STORAGE_KEY: &str = "vacationDestinations";

#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    #[error("destination name must not be empty")]
    EmptyName,
    #[error("destination date must not be empty")]
    EmptyDate,
    #[error("no coordinate selected on the map")]
    NoPendingCoordinate,
    #[error("failed to generate destination id: {0}")]
    IdGeneration(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
