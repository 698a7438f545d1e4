//! Task lifecycle, capability-aware assignment and execution.
//!
//! [`Scheduler`] is a single-owner value: every mutating operation takes
//! `&mut self` and either completes fully or returns an error without side
//! effects. The one exception is a lost assignment, which moves the task to
//! `Failed` before reporting it. Share across threads through
//! [`crate::Orchestrator`].

use crate::{Agent, AgentRegistry, ExecutionResult, StatusReport, Task, TaskQueue};
use conduit_core::{
    AgentError, AgentId, AssignmentPolicy, ConduitResult, ExecutionContext, ExpectedOutput,
    OrchestratorConfig, TaskError, TaskId, TaskStatus,
};
use conduit_plans::{resolve_plan, ImpactEstimator};
use serde::{Deserialize, Serialize};

/// A task bound to an agent by [`Scheduler::dispatch_pending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Assignment {
    pub task_id: TaskId,
    pub agent_id: AgentId,
}

/// Capabilities `agent` lacks for `context` under `policy`. Empty means admitted.
pub fn missing_for_policy(
    policy: AssignmentPolicy,
    agent: &Agent,
    context: &ExecutionContext,
) -> Vec<String> {
    match policy {
        AssignmentPolicy::AnyAvailable => Vec::new(),
        AssignmentPolicy::CapabilityChecked => {
            agent.missing_capabilities(&context.required_capabilities)
        }
        AssignmentPolicy::CategoryMatch => {
            let mut missing = agent.missing_capabilities(&context.required_capabilities);
            let label = context.category.label();
            if !agent.has_capability(label) && !missing.iter().any(|m| m == label) {
                missing.push(label.to_string());
            }
            missing
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    registry: AgentRegistry,
    queue: TaskQueue,
    estimator: ImpactEstimator,
    config: OrchestratorConfig,
}

impl Scheduler {
    /// Build a scheduler after validating `config`.
    pub fn new(config: OrchestratorConfig, estimator: ImpactEstimator) -> ConduitResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: AgentRegistry::new(),
            queue: TaskQueue::new(),
            estimator,
            config,
        })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn estimator(&self) -> &ImpactEstimator {
        &self.estimator
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    // ========================================================================
    // REGISTRATION & SUBMISSION
    // ========================================================================

    /// Register or overwrite an agent. Returns the replaced record, if any.
    pub fn register_agent<C, S, T, U>(
        &mut self,
        agent_id: impl Into<AgentId>,
        capabilities: C,
        tags: T,
    ) -> Option<Agent>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        T: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.registry.register(agent_id, capabilities, tags)
    }

    /// Submit work. The task starts `Queued`; priority is informational.
    pub fn enqueue(&mut self, context: ExecutionContext, expected_output: ExpectedOutput) -> TaskId {
        let task_id = self.queue.push(Task::new(context, expected_output));
        tracing::info!(task_id = %task_id, "Task enqueued");
        task_id
    }

    // ========================================================================
    // ASSIGNMENT
    // ========================================================================

    /// Assign using the configured policy.
    pub fn assign(&mut self, task_id: &str, agent_id: &str) -> ConduitResult<()> {
        self.assign_with_policy(task_id, agent_id, self.config.assignment_policy)
    }

    /// Assign using an explicit policy.
    ///
    /// Checks, in order: task exists, agent exists, task is `Queued`, agent is
    /// `Available`, agent satisfies `policy`. Nothing changes on failure.
    pub fn assign_with_policy(
        &mut self,
        task_id: &str,
        agent_id: &str,
        policy: AssignmentPolicy,
    ) -> ConduitResult<()> {
        let task = self.queue.get(task_id).ok_or_else(|| TaskError::NotFound {
            task_id: TaskId::from_raw(task_id),
        })?;
        let agent = self
            .registry
            .get(agent_id)
            .ok_or_else(|| AgentError::NotRegistered {
                agent_id: AgentId::from(agent_id),
            })?;

        if task.status != TaskStatus::Queued {
            return Err(TaskError::InvalidTransition {
                task_id: task.task_id.clone(),
                from: task.status,
                to: TaskStatus::InProgress,
            }
            .into());
        }
        if !agent.is_available() {
            return Err(AgentError::Unavailable {
                agent_id: agent.agent_id.clone(),
                current_task: agent.current_task.clone(),
            }
            .into());
        }
        let missing = missing_for_policy(policy, agent, &task.context);
        if !missing.is_empty() {
            return Err(AgentError::CapabilityMismatch {
                agent_id: agent.agent_id.clone(),
                task_id: task.task_id.clone(),
                missing,
            }
            .into());
        }

        let task_id = task.task_id.clone();
        let agent_id = agent.agent_id.clone();
        self.bind(&task_id, &agent_id)?;
        tracing::info!(
            task_id = %task_id,
            agent_id = %agent_id,
            policy = %policy,
            "Task assigned"
        );
        Ok(())
    }

    /// Mark the agent busy and start the task, or change neither.
    fn bind(&mut self, task_id: &TaskId, agent_id: &AgentId) -> ConduitResult<()> {
        let task = self
            .queue
            .get_mut(task_id.as_str())
            .ok_or_else(|| TaskError::NotFound {
                task_id: task_id.clone(),
            })?;
        if !self.registry.mark_busy(agent_id.as_str(), task_id) {
            return Err(AgentError::Unavailable {
                agent_id: agent_id.clone(),
                current_task: self
                    .registry
                    .get(agent_id.as_str())
                    .and_then(|a| a.current_task.clone()),
            }
            .into());
        }
        if let Err(err) = task.start(agent_id.clone()) {
            self.registry.mark_available(agent_id.as_str());
            return Err(err.into());
        }
        Ok(())
    }

    /// Match every `Queued` task, oldest first, to the first `Available`
    /// agent in identifier order that the configured policy admits.
    pub fn dispatch_pending(&mut self) -> Vec<Assignment> {
        let policy = self.config.assignment_policy;
        let mut assignments = Vec::new();

        for task_id in self.queue.queued_ids() {
            let candidate = self.queue.get(task_id.as_str()).and_then(|task| {
                self.registry
                    .iter()
                    .find(|agent| {
                        agent.is_available()
                            && missing_for_policy(policy, agent, &task.context).is_empty()
                    })
                    .map(|agent| agent.agent_id.clone())
            });

            let Some(agent_id) = candidate else {
                tracing::debug!(task_id = %task_id, "No eligible agent for queued task");
                continue;
            };

            match self.bind(&task_id, &agent_id) {
                Ok(()) => {
                    tracing::info!(
                        task_id = %task_id,
                        agent_id = %agent_id,
                        policy = %policy,
                        "Task assigned"
                    );
                    assignments.push(Assignment { task_id, agent_id });
                }
                Err(err) => {
                    tracing::debug!(task_id = %task_id, error = %err, "Dispatch skipped task");
                }
            }
        }

        tracing::debug!(assigned = assignments.len(), "Dispatch pass finished");
        assignments
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Execute an assigned task: resolve its plan, score it, record the result
    /// and release the agent.
    pub fn execute(&mut self, task_id: &str) -> ConduitResult<ExecutionResult> {
        let task = self
            .queue
            .get_mut(task_id)
            .ok_or_else(|| TaskError::NotFound {
                task_id: TaskId::from_raw(task_id),
            })?;

        let agent_id = task
            .assigned_agent
            .clone()
            .ok_or_else(|| TaskError::NoAgentAssigned {
                task_id: task.task_id.clone(),
            })?;
        if task.is_terminal() {
            return Err(TaskError::InvalidTransition {
                task_id: task.task_id.clone(),
                from: task.status,
                to: TaskStatus::Completed,
            }
            .into());
        }

        let holds = self
            .registry
            .get(agent_id.as_str())
            .is_some_and(|agent| agent.holds(&task.task_id));
        if !holds {
            tracing::warn!(
                task_id = %task.task_id,
                agent_id = %agent_id,
                "Assignment lost; failing task"
            );
            task.fail(format!("agent {} no longer holds this task", agent_id))?;
            return Err(TaskError::AssignmentLost {
                task_id: task.task_id.clone(),
                agent_id,
            }
            .into());
        }

        let plan = resolve_plan(&task.context.category, &task.context.subcategory);
        tracing::debug!(
            task_id = %task.task_id,
            category = %task.context.category,
            subcategory = %task.context.subcategory,
            focus = %plan.focus,
            "Plan resolved"
        );
        let scores = self.estimator.estimate(&task.context);

        let result_task_id = task.task_id.clone();
        let result_agent_id = agent_id.clone();
        let result = task
            .complete_with(|completed_at| ExecutionResult {
                task_id: result_task_id,
                agent_id: result_agent_id,
                plan,
                scores,
                status: TaskStatus::Completed,
                completed_at,
            })?
            .clone();
        self.registry.mark_available(agent_id.as_str());

        tracing::info!(
            task_id = %result.task_id,
            agent_id = %agent_id,
            value_tier = %result.scores.value_estimate.tier,
            "Task completed"
        );
        Ok(result)
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn status_snapshot(&self) -> StatusReport {
        StatusReport::collect(&self.registry, &self.queue, &self.config)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.queue.get(task_id)
    }

    /// All tasks in submission order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.queue.iter()
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.registry.get(agent_id)
    }

    /// All agents in identifier order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.registry.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
