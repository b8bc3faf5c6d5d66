//! Application services for task commands, queries, and maintenance.

mod command;
mod maintenance;
mod query;

pub use command::{TaskCommandError, TaskCommandResult, TaskCommandService};
pub use maintenance::{EscalationSweep, SweepOutcome};
pub use query::{TaskQueryError, TaskQueryResult, TaskQueryService};
