//! Tasks and execution results

use chrono::Utc;
use conduit_core::{
    AgentId, ExecutionContext, ExpectedOutput, TaskError, TaskId, TaskStatus, Timestamp,
};
use conduit_plans::{ExecutionPlan, ImpactScores};
use serde::{Deserialize, Serialize};

/// Progress reported once a task completes.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Output recorded on a completed task.
///
/// Plan fields and the four assessments are flattened when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExecutionResult {
    pub task_id: TaskId,
    pub agent_id: AgentId,
    #[serde(flatten)]
    pub plan: ExecutionPlan,
    #[serde(flatten)]
    pub scores: ImpactScores,
    pub status: TaskStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub completed_at: Timestamp,
}

/// A unit of work moving through `Queued -> InProgress -> Completed | Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    pub task_id: TaskId,
    pub context: ExecutionContext,
    pub expected_output: ExpectedOutput,
    pub status: TaskStatus,
    pub assigned_agent: Option<AgentId>,
    /// 0 until completion, then 100
    pub progress: u8,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub completed_at: Option<Timestamp>,
    pub result: Option<ExecutionResult>,
    /// Set only when `Failed`
    pub failure_reason: Option<String>,
}

impl Task {
    /// Create a queued task with a freshly generated id.
    pub fn new(context: ExecutionContext, expected_output: ExpectedOutput) -> Self {
        let now = Utc::now();
        Self {
            task_id: TaskId::generate(now),
            context,
            expected_output,
            status: TaskStatus::Queued,
            assigned_agent: None,
            progress: 0,
            created_at: now,
            completed_at: None,
            result: None,
            failure_reason: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn transition(&self, to: TaskStatus) -> TaskError {
        TaskError::InvalidTransition {
            task_id: self.task_id.clone(),
            from: self.status,
            to,
        }
    }

    /// Never earlier than `created_at`, even if the wall clock stepped back.
    fn finish_time(&self) -> Timestamp {
        Utc::now().max(self.created_at)
    }

    /// `Queued -> InProgress`.
    pub(crate) fn start(&mut self, agent_id: AgentId) -> Result<(), TaskError> {
        if self.status != TaskStatus::Queued {
            return Err(self.transition(TaskStatus::InProgress));
        }
        self.assigned_agent = Some(agent_id);
        self.status = TaskStatus::InProgress;
        Ok(())
    }

    /// `InProgress -> Completed`. `build` receives the completion timestamp.
    pub(crate) fn complete_with(
        &mut self,
        build: impl FnOnce(Timestamp) -> ExecutionResult,
    ) -> Result<&ExecutionResult, TaskError> {
        if self.status != TaskStatus::InProgress {
            return Err(self.transition(TaskStatus::Completed));
        }
        let completed_at = self.finish_time();
        self.status = TaskStatus::Completed;
        self.progress = PROGRESS_COMPLETE;
        self.completed_at = Some(completed_at);
        Ok(self.result.insert(build(completed_at)))
    }

    /// `InProgress -> Failed`.
    pub(crate) fn fail(&mut self, reason: impl Into<String>) -> Result<(), TaskError> {
        if self.status != TaskStatus::InProgress {
            return Err(self.transition(TaskStatus::Failed));
        }
        self.status = TaskStatus::Failed;
        self.completed_at = Some(self.finish_time());
        self.failure_reason = Some(reason.into());
        self.result = None;
        Ok(())
    }
}
