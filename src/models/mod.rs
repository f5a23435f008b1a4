//! Shared data types and constants

pub mod constants;
pub mod state;

pub use state::{EditSession, LifecycleState};
