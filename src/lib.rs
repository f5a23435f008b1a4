pub mod commands;
pub mod error;
pub mod git;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod propagation;
pub mod registry;
pub mod validation;

pub use error::{Result, TutError};
pub use lifecycle::{CheckpointOutcome, Tut};
