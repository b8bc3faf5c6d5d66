//! Adapter implementations of the task ports.

pub mod audit;
pub mod dispatch;
pub mod memory;
pub mod webhook;
