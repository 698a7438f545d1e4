//! Conduit Agents - Task/Agent Orchestration
//!
//! Provides the stateful half of Conduit:
//! - Agent registry with capability and availability tracking
//! - Insertion-ordered task queue
//! - Scheduler with policy-checked assignment and atomic execution
//! - Thread-safe orchestrator facade
//! - Status snapshots

pub mod orchestrator;
pub mod queue;
pub mod registry;
pub mod scheduler;
pub mod status;
pub mod task;

pub use orchestrator::Orchestrator;
pub use queue::TaskQueue;
pub use registry::{Agent, AgentRegistry};
pub use scheduler::{missing_for_policy, Assignment, Scheduler};
pub use status::StatusReport;
pub use task::{ExecutionResult, Task, PROGRESS_COMPLETE};
