//! Status snapshots

use crate::{AgentRegistry, TaskQueue};
use chrono::Utc;
use conduit_core::{AgentState, OrchestratorConfig, TaskStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Point-in-time counts of agents and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusReport {
    pub total_agents: usize,
    pub available_agents: usize,
    pub busy_agents: usize,
    pub queued_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    /// Sum of configured benchmark figures. Not derived from tasks.
    pub total_value: f64,
    pub value_unit: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub generated_at: Timestamp,
}

impl StatusReport {
    pub(crate) fn collect(
        registry: &AgentRegistry,
        queue: &TaskQueue,
        config: &OrchestratorConfig,
    ) -> Self {
        Self {
            total_agents: registry.len(),
            available_agents: registry.count_by_state(AgentState::Available),
            busy_agents: registry.count_by_state(AgentState::Busy),
            queued_tasks: queue.count_by_status(TaskStatus::Queued),
            in_progress_tasks: queue.count_by_status(TaskStatus::InProgress),
            completed_tasks: queue.count_by_status(TaskStatus::Completed),
            failed_tasks: queue.count_by_status(TaskStatus::Failed),
            total_value: config.total_value(),
            value_unit: config.value_unit.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn total_tasks(&self) -> usize {
        self.queued_tasks + self.in_progress_tasks + self.completed_tasks + self.failed_tasks
    }
}
