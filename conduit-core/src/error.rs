//! Error types for Conduit operations

use crate::{AgentId, TaskId, TaskStatus};
use thiserror::Error;

/// Agent registry and assignment errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent not registered: {agent_id}")]
    NotRegistered { agent_id: AgentId },

    #[error("Agent {agent_id} is unavailable (holding {current_task:?})")]
    Unavailable {
        agent_id: AgentId,
        current_task: Option<TaskId>,
    },

    #[error("Capability mismatch: agent {agent_id} lacks {missing:?} required by task {task_id}")]
    CapabilityMismatch {
        agent_id: AgentId,
        task_id: TaskId,
        missing: Vec<String>,
    },
}

/// Task lifecycle errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task not found: {task_id}")]
    NotFound { task_id: TaskId },

    #[error("No agent assigned to task {task_id}")]
    NoAgentAssigned { task_id: TaskId },

    #[error("Invalid transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("Assignment lost for task {task_id}: agent {agent_id} no longer holds it")]
    AssignmentLost { task_id: TaskId, agent_id: AgentId },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Shared-state errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Orchestrator lock poisoned")]
    LockPoisoned,
}

/// Coarse classification of every error the engine can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced task or agent does not exist
    NotFound,
    /// The entity is not in a state that allows the operation
    InvalidStateTransition,
    /// The agent does not hold the capabilities the task requires
    CapabilityMismatch,
    /// Configuration or shared-state failure
    Internal,
}

/// Master error type for all Conduit errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConduitError {
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ConduitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConduitError::Agent(AgentError::NotRegistered { .. })
            | ConduitError::Task(TaskError::NotFound { .. }) => ErrorKind::NotFound,
            ConduitError::Agent(AgentError::Unavailable { .. })
            | ConduitError::Task(TaskError::NoAgentAssigned { .. })
            | ConduitError::Task(TaskError::InvalidTransition { .. })
            | ConduitError::Task(TaskError::AssignmentLost { .. }) => {
                ErrorKind::InvalidStateTransition
            }
            ConduitError::Agent(AgentError::CapabilityMismatch { .. }) => {
                ErrorKind::CapabilityMismatch
            }
            ConduitError::Config(_) | ConduitError::State(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type alias for Conduit operations.
pub type ConduitResult<T> = Result<T, ConduitError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_display_not_registered() {
        let err = AgentError::NotRegistered {
            agent_id: AgentId::from("TechnicalAgent"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("not registered"));
        assert!(msg.contains("TechnicalAgent"));
    }

    #[test]
    fn test_agent_error_display_capability_mismatch() {
        let err = AgentError::CapabilityMismatch {
            agent_id: AgentId::from("A1"),
            task_id: TaskId::from_raw("task_1"),
            missing: vec!["deploy".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Capability mismatch"));
        assert!(msg.contains("deploy"));
        assert!(msg.contains("task_1"));
    }

    #[test]
    fn test_task_error_display_invalid_transition() {
        let err = TaskError::InvalidTransition {
            task_id: TaskId::from_raw("task_7"),
            from: TaskStatus::Completed,
            to: TaskStatus::InProgress,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("task_7"));
        assert!(msg.contains("Completed -> InProgress"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "benchmarks[0].value".to_string(),
            value: "-1".to_string(),
            reason: "must be >= 0".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("benchmarks[0].value"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("must be >= 0"));
    }

    #[test]
    fn test_state_error_display_lock_poisoned() {
        let msg = format!("{}", StateError::LockPoisoned);
        assert!(msg.contains("lock poisoned"));
    }

    #[test]
    fn test_conduit_error_from_variants() {
        let agent = ConduitError::from(AgentError::NotRegistered {
            agent_id: AgentId::from("x"),
        });
        assert!(matches!(agent, ConduitError::Agent(_)));

        let task = ConduitError::from(TaskError::NotFound {
            task_id: TaskId::from_raw("t"),
        });
        assert!(matches!(task, ConduitError::Task(_)));

        let config = ConduitError::from(ConfigError::MissingRequired {
            field: "value_unit".to_string(),
        });
        assert!(matches!(config, ConduitError::Config(_)));

        let state = ConduitError::from(StateError::LockPoisoned);
        assert!(matches!(state, ConduitError::State(_)));
    }

    #[test]
    fn test_error_kind_classification() {
        let not_found = ConduitError::from(TaskError::NotFound {
            task_id: TaskId::from_raw("missing-task"),
        });
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(not_found.is_not_found());

        let busy = ConduitError::from(AgentError::Unavailable {
            agent_id: AgentId::from("A1"),
            current_task: Some(TaskId::from_raw("t1")),
        });
        assert_eq!(busy.kind(), ErrorKind::InvalidStateTransition);

        let mismatch = ConduitError::from(AgentError::CapabilityMismatch {
            agent_id: AgentId::from("A1"),
            task_id: TaskId::from_raw("t1"),
            missing: vec![],
        });
        assert_eq!(mismatch.kind(), ErrorKind::CapabilityMismatch);

        let poisoned = ConduitError::from(StateError::LockPoisoned);
        assert_eq!(poisoned.kind(), ErrorKind::Internal);
    }
}
