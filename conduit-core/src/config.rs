//! Configuration types

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How strictly `assign` matches an agent's capabilities against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Agent must hold every capability listed in the task's requirements
    #[default]
    CapabilityChecked,
    /// As `CapabilityChecked`, and the task category must also be a capability
    CategoryMatch,
    /// Any available agent is accepted
    AnyAvailable,
}

impl AssignmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentPolicy::CapabilityChecked => "capability_checked",
            AssignmentPolicy::CategoryMatch => "category_match",
            AssignmentPolicy::AnyAvailable => "any_available",
        }
    }
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named external value figure. Opaque to the engine; only summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValueBenchmark {
    pub name: String,
    pub value: f64,
}

impl ValueBenchmark {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Reference benchmark table, in billions.
const DEFAULT_BENCHMARKS: &[(&str, f64)] = &[
    ("enterprise_platform", 200.0),
    ("billionaire_consciousness", 350.0),
    ("worldwidebro_integration", 80.0),
    ("genix_bank_financial", 40.0),
    ("ai_agent_ecosystem", 20.0),
    ("mcp_integration_hub", 15.0),
    ("autonomous_systems", 50.0),
    ("security_system", 20.0),
    ("devops_system", 15.0),
    ("integration_system", 30.0),
    ("frontend_system", 20.0),
    ("backend_services", 25.0),
    ("api_management", 18.0),
    ("database_systems", 12.0),
    ("business_intelligence", 25.0),
    ("monitoring_system", 8.0),
    ("reporting_system", 7.0),
];

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub assignment_policy: AssignmentPolicy,
    /// Figures summed into `StatusReport::total_value`
    #[serde(default = "default_benchmarks")]
    pub benchmarks: Vec<ValueBenchmark>,
    /// Unit label reported next to the total (e.g. "B" for billions)
    #[serde(default = "default_value_unit")]
    pub value_unit: String,
}

fn default_benchmarks() -> Vec<ValueBenchmark> {
    DEFAULT_BENCHMARKS
        .iter()
        .map(|(name, value)| ValueBenchmark::new(*name, *value))
        .collect()
}

fn default_value_unit() -> String {
    "B".to_string()
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            assignment_policy: AssignmentPolicy::default(),
            benchmarks: default_benchmarks(),
            value_unit: default_value_unit(),
        }
    }
}

impl OrchestratorConfig {
    pub fn with_assignment_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.assignment_policy = policy;
        self
    }

    pub fn with_benchmarks(mut self, benchmarks: Vec<ValueBenchmark>) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Sum of all configured benchmark figures.
    pub fn total_value(&self) -> f64 {
        self.benchmarks.iter().map(|b| b.value).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value_unit.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "value_unit".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (index, benchmark) in self.benchmarks.iter().enumerate() {
            if benchmark.name.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: format!("benchmarks[{}].name", index),
                });
            }
            if !seen.insert(benchmark.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("benchmarks[{}].name", index),
                    value: benchmark.name.clone(),
                    reason: "duplicate benchmark name".to_string(),
                });
            }
            if !benchmark.value.is_finite() || benchmark.value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("benchmarks[{}].value", index),
                    value: benchmark.value.to_string(),
                    reason: "must be a finite number >= 0".to_string(),
                });
            }
        }
        Ok(())
    }
}
