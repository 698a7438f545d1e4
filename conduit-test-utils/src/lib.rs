//! Conduit Test Utilities
//!
//! Centralized test infrastructure for the Conduit workspace:
//! - Proptest generators for contexts, identifiers and capability sets
//! - Fixtures for the reference agents and scenario
//! - Custom assertions, including whole-orchestrator invariant checks

// Re-export core types for convenience
pub use conduit_agents::{Agent, Orchestrator, Scheduler, Task};
pub use conduit_core::{
    AgentError, AgentId, AgentState, AssignmentPolicy, Category, ConduitError, ConduitResult,
    ErrorKind, ExecutionContext, ExpectedOutput, OrchestratorConfig, TaskError, TaskId,
    TaskStatus, Tier,
};

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Conduit inputs.

    use super::*;
    use proptest::collection::btree_set;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Capability vocabulary shared by generated agents and contexts, so
    /// generated requirements are sometimes satisfiable.
    pub const CAPABILITY_POOL: &[&str] = &["api", "build", "deploy", "infra", "technical", "timing"];

    pub fn arb_agent_id() -> impl Strategy<Value = AgentId> {
        "[A-Za-z][A-Za-z0-9_-]{0,11}".prop_map(AgentId::from)
    }

    pub fn arb_capability() -> impl Strategy<Value = String> {
        proptest::sample::select(CAPABILITY_POOL).prop_map(str::to_string)
    }

    pub fn arb_capabilities() -> impl Strategy<Value = BTreeSet<String>> {
        btree_set(arb_capability(), 0..4)
    }

    /// Known families and arbitrary labels, in roughly equal measure.
    pub fn arb_category() -> impl Strategy<Value = Category> {
        prop_oneof![
            proptest::sample::select(Category::KNOWN.to_vec()),
            "[a-z]{1,10}".prop_map(|label| Category::from_label(&label)),
        ]
    }

    pub fn arb_subcategory() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(vec!["1.0", "2.0", "3.0", "4.0", "5.0", "6.0"])
                .prop_map(str::to_string),
            "[a-z0-9.]{0,8}",
        ]
    }

    pub fn arb_timing() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("30-day implementation".to_string()),
            Just("90-day rollout".to_string()),
            ".{0,24}",
        ]
    }

    pub fn arb_resources() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("High technical resources available".to_string()),
            Just("medium".to_string()),
            ".{0,24}",
        ]
    }

    pub fn arb_execution_context() -> impl Strategy<Value = ExecutionContext> {
        (
            arb_category(),
            arb_subcategory(),
            ".{0,40}",
            any::<u8>(),
            arb_timing(),
            arb_resources(),
            btree_set(arb_capability(), 0..2),
        )
            .prop_map(
                |(category, subcategory, focus, layer, timing, resources, required)| {
                    ExecutionContext::new(category, subcategory, focus)
                        .with_layer(layer)
                        .with_timing(timing)
                        .with_resources(resources)
                        .with_required_capabilities(required)
                },
            )
    }

    pub fn arb_assignment_policy() -> impl Strategy<Value = AssignmentPolicy> {
        prop_oneof![
            Just(AssignmentPolicy::CapabilityChecked),
            Just(AssignmentPolicy::CategoryMatch),
            Just(AssignmentPolicy::AnyAvailable),
        ]
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common scenarios.

    use super::*;

    /// Reference agents: identifier, capabilities, domain tags.
    pub const REFERENCE_AGENTS: &[(&str, &[&str], &[&str])] = &[
        (
            "StrategyAgent",
            &["Business Analysis", "Strategic Planning", "Market Research"],
            &["layer:mental", "layer:astral", "machine:money", "machine:data", "machine:narrative"],
        ),
        (
            "TechnicalAgent",
            &["Technical Implementation", "API Development", "System Architecture"],
            &["layer:physical", "layer:mental", "machine:technology", "machine:data", "machine:network"],
        ),
        (
            "TemporalAgent",
            &["Timing Optimization", "Scheduling", "Temporal Analysis"],
            &["layer:celestial", "layer:etheric", "machine:temporal", "machine:energy", "machine:consciousness"],
        ),
    ];

    /// Register the reference agents on a scheduler.
    pub fn register_reference_agents(scheduler: &mut Scheduler) {
        for (agent_id, capabilities, tags) in REFERENCE_AGENTS {
            scheduler.register_agent(*agent_id, capabilities.iter().copied(), tags.iter().copied());
        }
    }

    /// Register the reference agents on an orchestrator.
    pub fn register_reference_agents_shared(orchestrator: &Orchestrator) -> ConduitResult<()> {
        for (agent_id, capabilities, tags) in REFERENCE_AGENTS {
            orchestrator.register_agent(*agent_id, capabilities.iter().copied(), tags.iter().copied())?;
        }
        Ok(())
    }

    /// Context of the minimal scenario: "infra/deploy", focus "Payments API".
    pub fn infra_context() -> ExecutionContext {
        ExecutionContext::new("infra", "deploy", "Payments API")
            .with_timing("30-day")
            .with_resources("high")
    }

    /// Context of the reference walkthrough (legacy `Volume_2` / `4.3`).
    pub fn credit_repair_context() -> ExecutionContext {
        ExecutionContext::new("Volume_2", "4.3", "Credit Repair Service")
            .with_layer(3)
            .with_timing("30-day implementation")
            .with_resources("High technical resources available")
    }

    pub fn api_expected_output() -> ExpectedOutput {
        ExpectedOutput::new("Complete API specification with monitoring endpoints")
            .with_steps([
                "Design API endpoints",
                "Implement authentication",
                "Create monitoring",
                "Deploy and test",
            ])
            .with_metric("api_performance", "<200ms")
            .with_metric("uptime", ">99.9%")
            .with_metric("security_score", ">95%")
            .with_impact_narrative("High - Significant cross-domain optimization achieved")
    }

    /// Scheduler with a single agent "A1" holding {"build"}.
    pub fn single_builder_scheduler() -> Scheduler {
        let mut scheduler = Scheduler::default();
        scheduler.register_agent("A1", ["build"], Vec::<String>::new());
        scheduler
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for Conduit-specific validation.

    use super::*;
    use std::collections::HashMap;

    /// Assert that a ConduitResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &ConduitResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a ConduitResult failed with the given kind.
    #[track_caller]
    pub fn assert_error_kind<T: std::fmt::Debug>(result: &ConduitResult<T>, kind: ErrorKind) {
        match result {
            Err(err) => assert_eq!(err.kind(), kind, "Wrong error kind for {:?}", err),
            Ok(value) => panic!("Expected {:?} error, got Ok({:?})", kind, value),
        }
    }

    #[track_caller]
    pub fn assert_task_not_found<T: std::fmt::Debug>(result: &ConduitResult<T>) {
        match result {
            Err(ConduitError::Task(TaskError::NotFound { .. })) => {}
            other => panic!("Expected task NotFound, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_capability_mismatch<T: std::fmt::Debug>(result: &ConduitResult<T>) {
        match result {
            Err(ConduitError::Agent(AgentError::CapabilityMismatch { .. })) => {}
            other => panic!("Expected CapabilityMismatch, got: {:?}", other),
        }
    }

    /// Assert the agent/task invariants over a full state snapshot.
    #[track_caller]
    pub fn assert_state_invariants(agents: &[Agent], tasks: &[Task]) {
        let by_id: HashMap<&TaskId, &Task> = tasks.iter().map(|t| (&t.task_id, t)).collect();
        assert_eq!(by_id.len(), tasks.len(), "Duplicate task ids");

        for agent in agents {
            match (agent.state, agent.current_task.as_ref()) {
                (AgentState::Busy, Some(task_id)) => {
                    let task = by_id.get(task_id);
                    assert!(
                        task.is_some_and(|t| t.assigned_agent.as_ref() == Some(&agent.agent_id)
                            && t.status == TaskStatus::InProgress),
                        "Agent {} holds {} but the task does not point back",
                        agent.agent_id,
                        task_id
                    );
                }
                (AgentState::Available, None) => {}
                (state, current) => panic!(
                    "Agent {} has state {} with current task {:?}",
                    agent.agent_id, state, current
                ),
            }
        }

        for task in tasks {
            match task.status {
                TaskStatus::Queued => {
                    assert!(task.assigned_agent.is_none(), "Queued task {} has an agent", task.task_id);
                    assert!(task.result.is_none() && task.completed_at.is_none());
                }
                TaskStatus::InProgress => {
                    assert!(task.assigned_agent.is_some(), "Running task {} has no agent", task.task_id);
                    assert!(task.result.is_none());
                }
                TaskStatus::Completed => {
                    assert!(task.result.is_some(), "Completed task {} has no result", task.task_id);
                    assert!(
                        task.completed_at.is_some_and(|at| at >= task.created_at),
                        "Completed task {} has a bad completion time",
                        task.task_id
                    );
                    assert_eq!(task.progress, 100);
                    assert!(task.failure_reason.is_none());
                }
                TaskStatus::Failed => {
                    assert!(task.result.is_none(), "Failed task {} has a result", task.task_id);
                    assert!(task.failure_reason.is_some() && task.completed_at.is_some());
                }
            }
        }

        let holders = agents.iter().filter(|a| a.current_task.is_some()).count();
        let running = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .filter(|t| {
                t.assigned_agent.as_ref().is_some_and(|id| {
                    agents
                        .iter()
                        .any(|a| &a.agent_id == id && a.current_task.as_ref() == Some(&t.task_id))
                })
            })
            .count();
        assert_eq!(holders, running, "Busy agents and held tasks disagree");
    }

    /// Snapshot an orchestrator and check its invariants.
    #[track_caller]
    pub fn assert_orchestrator_invariants(orchestrator: &Orchestrator) {
        let agents = orchestrator.agents();
        let tasks = orchestrator.tasks();
        assert_ok(&agents);
        assert_ok(&tasks);
        if let (Ok(agents), Ok(tasks)) = (agents, tasks) {
            assert_state_invariants(&agents, &tasks);
        }
    }

    /// Check a scheduler's invariants.
    #[track_caller]
    pub fn assert_scheduler_invariants(scheduler: &Scheduler) {
        let agents: Vec<Agent> = scheduler.agents().cloned().collect();
        let tasks: Vec<Task> = scheduler.tasks().cloned().collect();
        assert_state_invariants(&agents, &tasks);
    }
}

// ============================================================================
// TESTS
// ============================================================================
