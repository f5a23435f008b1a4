//! Integration tests for tut checkpoint workflows
//!
//! These tests drive the public `Tut` API against real git repositories and
//! check ordering, precondition gates, navigation and edit propagation.

pub mod conflicts;
pub mod editing;
pub mod helpers;
pub mod navigation;
pub mod registry;
