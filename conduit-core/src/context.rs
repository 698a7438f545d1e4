//! Execution context and acceptance criteria supplied with every task.

use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Layer ordinal used when the caller does not supply one.
pub const DEFAULT_LAYER: u8 = 1;

/// Priority tag used when the caller does not supply one.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Scheduling and resource hints attached to a context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SchedulingHints {
    /// Free-text timing constraint (e.g. "30-day implementation")
    pub timing: String,
    /// Free-text resource level (e.g. "High technical resources available")
    pub resources: String,
}

/// Immutable description of a unit of work to plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExecutionContext {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub category: Category,
    pub subcategory: String,
    /// Free-text focus label (business domain, product name, ...)
    pub focus: String,
    /// Layer ordinal, weighted into the cross-domain impact score
    pub layer: u8,
    pub hints: SchedulingHints,
    /// Opaque priority tag. Informational only.
    pub priority: String,
    /// Capability tags an agent must hold to be assigned this work
    pub required_capabilities: BTreeSet<String>,
}

impl ExecutionContext {
    /// Create a context with default layer, priority and empty hints.
    pub fn new(
        category: impl Into<Category>,
        subcategory: impl Into<String>,
        focus: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            focus: focus.into(),
            layer: DEFAULT_LAYER,
            hints: SchedulingHints::default(),
            priority: DEFAULT_PRIORITY.to_string(),
            required_capabilities: BTreeSet::new(),
        }
    }

    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_timing(mut self, timing: impl Into<String>) -> Self {
        self.hints.timing = timing.into();
        self
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.hints.resources = resources.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_required_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }
}

/// Caller's acceptance criteria for a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExpectedOutput {
    pub technical_specifications: String,
    /// Steps the caller expects; the executed plan supplies its own
    pub implementation_steps: Vec<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub success_metrics: BTreeMap<String, serde_json::Value>,
    /// Narrative description of the hoped-for impact
    pub impact_narrative: String,
}

impl ExpectedOutput {
    pub fn new(technical_specifications: impl Into<String>) -> Self {
        Self {
            technical_specifications: technical_specifications.into(),
            ..Self::default()
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implementation_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, target: impl Into<serde_json::Value>) -> Self {
        self.success_metrics.insert(name.into(), target.into());
        self
    }

    pub fn with_impact_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.impact_narrative = narrative.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = ExecutionContext::new("infra", "deploy", "Payments API");
        assert_eq!(ctx.category, Category::Other("infra".to_string()));
        assert_eq!(ctx.layer, DEFAULT_LAYER);
        assert_eq!(ctx.priority, DEFAULT_PRIORITY);
        assert!(ctx.hints.timing.is_empty());
        assert!(ctx.required_capabilities.is_empty());
    }

    #[test]
    fn test_context_builders() {
        let ctx = ExecutionContext::new(Category::Technical, "4.0", "Credit Repair Service")
            .with_layer(3)
            .with_timing("30-day implementation")
            .with_resources("High technical resources available")
            .with_priority("High")
            .with_required_capabilities(["api", "build"]);

        assert_eq!(ctx.layer, 3);
        assert_eq!(ctx.hints.timing, "30-day implementation");
        assert_eq!(ctx.priority, "High");
        assert!(ctx.required_capabilities.contains("api"));
        assert_eq!(ctx.required_capabilities.len(), 2);
    }

    #[test]
    fn test_expected_output_serializes_metrics() -> Result<(), serde_json::Error> {
        let expected = ExpectedOutput::new("API spec")
            .with_steps(["Design", "Deploy"])
            .with_metric("uptime", ">99.9%")
            .with_metric("retries", 3);

        let json = serde_json::to_value(&expected)?;
        assert_eq!(json["success_metrics"]["uptime"], ">99.9%");
        assert_eq!(json["success_metrics"]["retries"], 3);
        assert_eq!(json["implementation_steps"][1], "Deploy");
        Ok(())
    }
}
