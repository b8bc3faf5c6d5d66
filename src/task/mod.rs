//! Task management for the tracker.
//!
//! Users create, update, and complete tasks through validated commands;
//! the policy defines the status state machine and due-date-driven priority
//! escalation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Business rules in [`policy`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
