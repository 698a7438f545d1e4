//! Property tests: random operation sequences never break scheduler invariants.

use conduit_agents::Scheduler;
use conduit_core::{AgentId, AssignmentPolicy, ExecutionContext, ExpectedOutput, TaskId, TaskStatus};
use conduit_test_utils::assertions::assert_scheduler_invariants;
use conduit_test_utils::generators::{
    arb_assignment_policy, arb_capabilities, arb_execution_context,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

const AGENT_SLOTS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Register(usize, BTreeSet<String>),
    Enqueue(ExecutionContext),
    Assign(usize, usize, AssignmentPolicy),
    Dispatch,
    Execute(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..AGENT_SLOTS, arb_capabilities()).prop_map(|(slot, caps)| Op::Register(slot, caps)),
        arb_execution_context().prop_map(Op::Enqueue),
        (any::<usize>(), 0..AGENT_SLOTS, arb_assignment_policy())
            .prop_map(|(task, slot, policy)| Op::Assign(task, slot, policy)),
        Just(Op::Dispatch),
        any::<usize>().prop_map(Op::Execute),
    ]
}

fn agent_id(slot: usize) -> AgentId {
    AgentId::from(format!("agent-{}", slot))
}

fn pick(ids: &[TaskId], index: usize) -> Option<&TaskId> {
    if ids.is_empty() {
        None
    } else {
        ids.get(index % ids.len())
    }
}

fn apply(scheduler: &mut Scheduler, ids: &mut Vec<TaskId>, op: Op) {
    match op {
        Op::Register(slot, caps) => {
            scheduler.register_agent(agent_id(slot), caps, Vec::<String>::new());
        }
        Op::Enqueue(ctx) => ids.push(scheduler.enqueue(ctx, ExpectedOutput::default())),
        Op::Assign(index, slot, policy) => {
            if let Some(task_id) = pick(ids, index) {
                let _ = scheduler.assign_with_policy(task_id.as_str(), agent_id(slot).as_str(), policy);
            }
        }
        Op::Dispatch => {
            scheduler.dispatch_pending();
        }
        Op::Execute(index) => {
            if let Some(task_id) = pick(ids, index) {
                let _ = scheduler.execute(task_id.as_str());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Agent/task cross-references stay consistent after every operation.
    #[test]
    fn prop_invariants_hold_after_every_op(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let mut scheduler = Scheduler::default();
        let mut ids = Vec::new();
        for op in ops {
            apply(&mut scheduler, &mut ids, op);
            assert_scheduler_invariants(&scheduler);
        }
    }

    /// A failed assignment leaves the scheduler unchanged.
    #[test]
    fn prop_failed_assign_has_no_side_effects(
        ops in proptest::collection::vec(arb_op(), 0..20),
        index in any::<usize>(),
        slot in 0..AGENT_SLOTS,
        policy in arb_assignment_policy(),
    ) {
        let mut scheduler = Scheduler::default();
        let mut ids = Vec::new();
        for op in ops {
            apply(&mut scheduler, &mut ids, op);
        }
        let Some(task_id) = pick(&ids, index).cloned() else {
            return Ok(());
        };

        let before_tasks: Vec<_> = scheduler.tasks().cloned().collect();
        let before_agents: Vec<_> = scheduler.agents().cloned().collect();
        if scheduler.assign_with_policy(task_id.as_str(), agent_id(slot).as_str(), policy).is_err() {
            let after_tasks: Vec<_> = scheduler.tasks().cloned().collect();
            let after_agents: Vec<_> = scheduler.agents().cloned().collect();
            prop_assert_eq!(before_tasks, after_tasks);
            prop_assert_eq!(before_agents, after_agents);
        }
    }

    /// Completed tasks carry a result and are never picked up again.
    #[test]
    fn prop_completed_tasks_are_final(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let mut scheduler = Scheduler::default();
        let mut ids = Vec::new();
        for op in ops {
            apply(&mut scheduler, &mut ids, op);
        }
        let completed: HashSet<TaskId> = scheduler
            .tasks()
            .filter(|t| t.status == TaskStatus::Completed)
            .map(|t| t.task_id.clone())
            .collect();

        let assignments = scheduler.dispatch_pending();
        for assignment in &assignments {
            prop_assert!(!completed.contains(&assignment.task_id));
        }
        for task_id in &completed {
            prop_assert!(scheduler.execute(task_id.as_str()).is_err());
            let task = scheduler.task(task_id.as_str());
            prop_assert!(task.is_some_and(|t| t.result.is_some() && t.status == TaskStatus::Completed));
        }
    }
}
