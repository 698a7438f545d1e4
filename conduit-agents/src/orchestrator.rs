//! Thread-safe orchestrator facade.
//!
//! Wraps a [`Scheduler`] in one orchestrator-wide `RwLock`. Mutations take the
//! write lock, so `assign`, `dispatch_pending` and `execute` are atomic with
//! respect to each other. A poisoned lock is reported as
//! [`StateError::LockPoisoned`].

use crate::{Agent, Assignment, ExecutionResult, Scheduler, StatusReport, Task};
use conduit_core::{
    AgentId, AssignmentPolicy, ConduitResult, ExecutionContext, ExpectedOutput,
    OrchestratorConfig, StateError, TaskId,
};
use conduit_plans::{EstimatorPolicy, ImpactEstimator};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct Orchestrator {
    state: RwLock<Scheduler>,
}

impl Orchestrator {
    /// Orchestrator with the default configuration and estimator policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orchestrator with validated configuration and estimator policy.
    pub fn with_config(
        config: OrchestratorConfig,
        policy: EstimatorPolicy,
    ) -> ConduitResult<Self> {
        let estimator = ImpactEstimator::new(policy)?;
        Ok(Self::from_scheduler(Scheduler::new(config, estimator)?))
    }

    pub fn from_scheduler(scheduler: Scheduler) -> Self {
        Self {
            state: RwLock::new(scheduler),
        }
    }

    pub fn into_inner(self) -> ConduitResult<Scheduler> {
        Ok(self
            .state
            .into_inner()
            .map_err(|_| StateError::LockPoisoned)?)
    }

    fn read(&self) -> ConduitResult<RwLockReadGuard<'_, Scheduler>> {
        Ok(self.state.read().map_err(|_| StateError::LockPoisoned)?)
    }

    fn write(&self) -> ConduitResult<RwLockWriteGuard<'_, Scheduler>> {
        Ok(self.state.write().map_err(|_| StateError::LockPoisoned)?)
    }

    pub fn register_agent<C, S, T, U>(
        &self,
        agent_id: impl Into<AgentId>,
        capabilities: C,
        tags: T,
    ) -> ConduitResult<Option<Agent>>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        T: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Ok(self.write()?.register_agent(agent_id, capabilities, tags))
    }

    pub fn enqueue(
        &self,
        context: ExecutionContext,
        expected_output: ExpectedOutput,
    ) -> ConduitResult<TaskId> {
        Ok(self.write()?.enqueue(context, expected_output))
    }

    pub fn assign(&self, task_id: &str, agent_id: &str) -> ConduitResult<()> {
        self.write()?.assign(task_id, agent_id)
    }

    pub fn assign_with_policy(
        &self,
        task_id: &str,
        agent_id: &str,
        policy: AssignmentPolicy,
    ) -> ConduitResult<()> {
        self.write()?.assign_with_policy(task_id, agent_id, policy)
    }

    pub fn dispatch_pending(&self) -> ConduitResult<Vec<Assignment>> {
        Ok(self.write()?.dispatch_pending())
    }

    pub fn execute(&self, task_id: &str) -> ConduitResult<ExecutionResult> {
        self.write()?.execute(task_id)
    }

    pub fn status_snapshot(&self) -> ConduitResult<StatusReport> {
        Ok(self.read()?.status_snapshot())
    }

    pub fn task(&self, task_id: &str) -> ConduitResult<Option<Task>> {
        Ok(self.read()?.task(task_id).cloned())
    }

    pub fn tasks(&self) -> ConduitResult<Vec<Task>> {
        Ok(self.read()?.tasks().cloned().collect())
    }

    pub fn agent(&self, agent_id: &str) -> ConduitResult<Option<Agent>> {
        Ok(self.read()?.agent(agent_id).cloned())
    }

    pub fn agents(&self) -> ConduitResult<Vec<Agent>> {
        Ok(self.read()?.agents().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::{ConduitError, ConfigError, TaskStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_orchestrator_is_send_sync() {
        assert_send_sync::<Orchestrator>();
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = OrchestratorConfig::default();
        config.value_unit.clear();
        let err = Orchestrator::with_config(config, EstimatorPolicy::default()).err();
        assert!(matches!(
            err,
            Some(ConduitError::Config(ConfigError::MissingRequired { .. }))
        ));

        let mut policy = EstimatorPolicy::default();
        policy.impact.medium_threshold = policy.impact.high_threshold + 1;
        let err = Orchestrator::with_config(OrchestratorConfig::default(), policy).err();
        assert!(matches!(err, Some(ConduitError::Config(_))));
    }

    #[test]
    fn test_end_to_end_through_facade() -> ConduitResult<()> {
        let orchestrator = Orchestrator::new();
        orchestrator.register_agent("A1", ["build"], ["layer_1"])?;
        let task_id = orchestrator.enqueue(
            ExecutionContext::new("infra", "deploy", "Payments API"),
            ExpectedOutput::default(),
        )?;
        orchestrator.assign(task_id.as_str(), "A1")?;
        let result = orchestrator.execute(task_id.as_str())?;

        let task = orchestrator.task(task_id.as_str())?;
        assert_eq!(task.and_then(|t| t.result), Some(result));
        assert_eq!(orchestrator.tasks()?.len(), 1);
        assert_eq!(orchestrator.agents()?.len(), 1);
        assert!(orchestrator.agent("A1")?.is_some_and(|a| a.is_available()));
        Ok(())
    }

    #[test]
    fn test_concurrent_assign_is_exclusive() -> ConduitResult<()> {
        let orchestrator = Orchestrator::new();
        orchestrator.register_agent("A1", ["build"], Vec::<String>::new())?;
        let task_ids: Vec<TaskId> = (0..16)
            .map(|_| {
                orchestrator.enqueue(
                    ExecutionContext::new("infra", "deploy", "x"),
                    ExpectedOutput::default(),
                )
            })
            .collect::<ConduitResult<_>>()?;

        let winners = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for task_id in &task_ids {
                let orchestrator = &orchestrator;
                let winners = &winners;
                s.spawn(move || {
                    if orchestrator.assign(task_id.as_str(), "A1").is_ok() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        let in_progress = orchestrator
            .tasks()?
            .into_iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count();
        assert_eq!(in_progress, 1);
        Ok(())
    }

    #[test]
    fn test_concurrent_execute_completes_once() -> ConduitResult<()> {
        let orchestrator = Orchestrator::new();
        orchestrator.register_agent("A1", ["build"], Vec::<String>::new())?;
        let task_id = orchestrator.enqueue(
            ExecutionContext::new("infra", "deploy", "x"),
            ExpectedOutput::default(),
        )?;
        orchestrator.assign(task_id.as_str(), "A1")?;

        let successes = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    if orchestrator.execute(task_id.as_str()).is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        let report = orchestrator.status_snapshot()?;
        assert_eq!(report.completed_tasks, 1);
        assert_eq!(report.available_agents, 1);
        Ok(())
    }

    #[test]
    fn test_into_inner_returns_state() -> ConduitResult<()> {
        let orchestrator = Orchestrator::new();
        orchestrator.register_agent("A1", Vec::<String>::new(), Vec::<String>::new())?;
        let scheduler = orchestrator.into_inner()?;
        assert_eq!(scheduler.registry().len(), 1);
        Ok(())
    }
}
