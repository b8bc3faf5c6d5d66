//! Taskboard: task policy and analytics engine for a multi-user task
//! tracker.
//!
//! Users create, update, and complete tasks with status and priority
//! lifecycles, owners, assignees, and due dates; administrators see
//! cross-user views and aggregate analytics.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, webhook, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task policy, commands, queries, events, and maintenance
//! - [`analytics`]: Aggregate reports and their cache
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Log subscriber setup

pub mod analytics;
pub mod config;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
