//! Step definitions for task command BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
