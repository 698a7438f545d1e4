//! Agent registry

use chrono::Utc;
use conduit_core::{new_entity_id, AgentId, AgentState, EntityId, TaskId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A registered worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Agent {
    /// Caller-assigned identifier
    pub agent_id: AgentId,
    /// Work this agent may accept
    pub capabilities: BTreeSet<String>,
    /// Domain labels (layers, power domains, ...). Informational.
    pub tags: BTreeSet<String>,
    pub state: AgentState,
    /// Set iff `state` is `Busy`
    pub current_task: Option<TaskId>,
    /// Fresh per registration, so an overwrite is observable
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub registration_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub registered_at: Timestamp,
}

impl Agent {
    pub fn new<C, S, T, U>(agent_id: impl Into<AgentId>, capabilities: C, tags: T) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        T: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self {
            agent_id: agent_id.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
            state: AgentState::Available,
            current_task: None,
            registration_id: new_entity_id(),
            registered_at: Utc::now(),
        }
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Required tags this agent does not hold, in order.
    pub fn missing_capabilities(&self, required: &BTreeSet<String>) -> Vec<String> {
        required.difference(&self.capabilities).cloned().collect()
    }

    pub fn is_available(&self) -> bool {
        self.state == AgentState::Available
    }

    /// Whether this agent is currently working on `task_id`.
    pub fn holds(&self, task_id: &TaskId) -> bool {
        self.state == AgentState::Busy && self.current_task.as_ref() == Some(task_id)
    }
}

/// Agents keyed by identifier. Iteration is in identifier order.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an agent. Returns the replaced record, if any.
    pub fn register<C, S, T, U>(
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
        let agent = Agent::new(agent_id, capabilities, tags);
        tracing::info!(
            agent_id = %agent.agent_id,
            capabilities = agent.capabilities.len(),
            registration_id = %agent.registration_id,
            "Agent registered"
        );

        let replaced = self.agents.insert(agent.agent_id.clone(), agent);
        if let Some(previous) = replaced.as_ref() {
            if let Some(task_id) = previous.current_task.as_ref() {
                tracing::warn!(
                    agent_id = %previous.agent_id,
                    task_id = %task_id,
                    "Busy agent re-registered; assignment dropped"
                );
            }
        }
        replaced
    }

    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.get(agent_id)
    }

    /// Claim an available agent for `task_id`. Returns false, without mutation,
    /// when the agent is unknown or busy.
    pub fn mark_busy(&mut self, agent_id: &str, task_id: &TaskId) -> bool {
        match self.agents.get_mut(agent_id) {
            Some(agent) if agent.is_available() => {
                agent.state = AgentState::Busy;
                agent.current_task = Some(task_id.clone());
                true
            }
            _ => false,
        }
    }

    /// Release an agent. Idempotent; unknown identifiers are ignored.
    pub fn mark_available(&mut self, agent_id: &str) {
        if let Some(agent) = self.agents.get_mut(agent_id) {
            agent.state = AgentState::Available;
            agent.current_task = None;
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn count_by_state(&self, state: AgentState) -> usize {
        self.agents.values().filter(|a| a.state == state).count()
    }
}
