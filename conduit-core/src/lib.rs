//! Conduit Core - Entity Types
//!
//! Pure data structures shared by every other crate in the workspace:
//! identifiers, lifecycle enums, execution contexts, errors and configuration.
//! This crate contains no scheduling logic.

pub mod config;
pub mod context;
pub mod enums;
pub mod error;
pub mod identity;

pub use config::{AssignmentPolicy, OrchestratorConfig, ValueBenchmark};
pub use context::{
    ExecutionContext, ExpectedOutput, SchedulingHints, DEFAULT_LAYER, DEFAULT_PRIORITY,
};
pub use enums::{
    AgentState, AgentStateParseError, Category, TaskStatus, TaskStatusParseError, Tier,
    TierParseError,
};
pub use error::{
    AgentError, ConduitError, ConduitResult, ConfigError, ErrorKind, StateError, TaskError,
};
pub use identity::{new_entity_id, AgentId, EntityId, TaskId, Timestamp};
