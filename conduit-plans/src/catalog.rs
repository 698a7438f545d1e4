//! Plan catalog: `(category, subcategory) -> ExecutionPlan`.
//!
//! Each [`Category`] selects a plan generator. Families with per-section tables
//! fall back to the generic plan for sections they do not list; `Other` labels
//! always resolve to the generic plan. All plan content is static.

use conduit_core::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plan produced fresh for every executed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExecutionPlan {
    pub focus: String,
    /// Ordered implementation steps
    pub steps: Vec<String>,
    /// Metric name -> threshold text (e.g. "uptime" -> ">99.9%")
    pub target_metrics: BTreeMap<String, String>,
    pub integration_scope: String,
}

/// Function producing a plan for a subcategory label.
pub type PlanGenerator = fn(&str) -> ExecutionPlan;

struct PlanTemplate {
    focus: &'static str,
    steps: &'static [&'static str],
    metrics: &'static [(&'static str, &'static str)],
    integration_scope: &'static str,
}

impl PlanTemplate {
    fn instantiate(&self) -> ExecutionPlan {
        ExecutionPlan {
            focus: self.focus.to_string(),
            steps: self.steps.iter().map(|s| s.to_string()).collect(),
            target_metrics: self
                .metrics
                .iter()
                .map(|(name, target)| (name.to_string(), target.to_string()))
                .collect(),
            integration_scope: self.integration_scope.to_string(),
        }
    }
}

// ============================================================================
// SECTION TABLES
// ============================================================================

static FOUNDATION_SECTIONS: &[(&str, PlanTemplate)] = &[
    (
        "1.0",
        PlanTemplate {
            focus: "7-Layer Reality Architecture",
            steps: &[
                "Map business to reality layers",
                "Implement layer-specific systems",
                "Create cross-layer integration",
                "Validate layer functionality",
            ],
            metrics: &[
                ("layer_coverage", "100%"),
                ("integration_score", ">90%"),
                ("functionality_preservation", "100%"),
            ],
            integration_scope: "Enterprise core platforms",
        },
    ),
    (
        "2.0",
        PlanTemplate {
            focus: "14 Machines of Power",
            steps: &[
                "Identify primary machines for business",
                "Implement machine-specific systems",
                "Create machine coordination",
                "Optimize machine performance",
            ],
            metrics: &[
                ("machine_coverage", "100%"),
                ("coordination_score", ">90%"),
                ("performance_improvement", ">50%"),
            ],
            integration_scope: "All enterprise systems",
        },
    ),
    (
        "3.0",
        PlanTemplate {
            focus: "82-Business Neural Mapping",
            steps: &[
                "Map business to neural pathways",
                "Implement neural-specific systems",
                "Create pathway optimization",
                "Validate neural functionality",
            ],
            metrics: &[
                ("neural_coverage", "100%"),
                ("pathway_optimization", ">90%"),
                ("business_alignment", ">95%"),
            ],
            integration_scope: "Business intelligence systems",
        },
    ),
];

static TECHNICAL_SECTIONS: &[(&str, PlanTemplate)] = &[
    (
        "4.0",
        PlanTemplate {
            focus: "AI Agent Orchestration System",
            steps: &[
                "Implement multi-agent architecture",
                "Set up MCP integration",
                "Create URL-based API architecture",
                "Build iOS app ecosystem",
                "Implement real-time monitoring",
            ],
            metrics: &[
                ("agent_coordination", ">95%"),
                ("api_performance", "<200ms"),
                ("monitoring_coverage", "100%"),
            ],
            integration_scope: "AI agent ecosystem, MCP hub, API management",
        },
    ),
    (
        "5.0",
        PlanTemplate {
            focus: "Data & Knowledge Architecture",
            steps: &[
                "Set up unified data lakehouse",
                "Implement knowledge graph engine",
                "Create vector database integration",
                "Build ETL/ELT pipelines",
                "Implement real-time streaming",
            ],
            metrics: &[
                ("data_coverage", "100%"),
                ("query_performance", "<100ms"),
                ("real_time_latency", "<50ms"),
            ],
            integration_scope: "Database systems, intelligence systems",
        },
    ),
    (
        "6.0",
        PlanTemplate {
            focus: "Deployment & Infrastructure",
            steps: &[
                "Set up Kubernetes orchestration",
                "Implement Terraform IaC",
                "Create CI/CD pipelines",
                "Build multi-cloud strategy",
                "Implement security framework",
            ],
            metrics: &[
                ("deployment_speed", "<5min"),
                ("uptime", ">99.9%"),
                ("security_score", ">95%"),
            ],
            integration_scope: "DevOps systems, security systems",
        },
    ),
];

// ============================================================================
// SINGLE-PLAN FAMILIES
// ============================================================================

static TIMING_PLAN: PlanTemplate = PlanTemplate {
    focus: "Temporal Optimization",
    steps: &[
        "Analyze temporal constraints",
        "Optimize timing for business",
        "Implement temporal algorithms",
        "Create temporal monitoring",
    ],
    metrics: &[
        ("timing_accuracy", ">95%"),
        ("temporal_efficiency", ">90%"),
        ("success_probability", ">85%"),
    ],
    integration_scope: "Scheduling systems, temporal systems",
};

static RESOURCES_PLAN: PlanTemplate = PlanTemplate {
    focus: "Resource Flow Optimization",
    steps: &[
        "Map resource flows",
        "Optimize resource circulation",
        "Implement resource monitoring",
        "Create resource management",
    ],
    metrics: &[
        ("resource_efficiency", ">90%"),
        ("flow_optimization", ">95%"),
        ("resource_utilization", ">85%"),
    ],
    integration_scope: "Resource systems, flow systems",
};

static COORDINATION_PLAN: PlanTemplate = PlanTemplate {
    focus: "Collective Coordination",
    steps: &[
        "Implement agent coordination protocols",
        "Create multi-agent collective intelligence",
        "Build ethical governance frameworks",
        "Develop adaptive agent architectures",
    ],
    metrics: &[
        ("coordination_level", ">90%"),
        ("ethical_compliance", "100%"),
        ("adaptive_capability", ">85%"),
    ],
    integration_scope: "Agent ecosystem, governance systems",
};

static EXECUTION_PLAN: PlanTemplate = PlanTemplate {
    focus: "Execution Optimization",
    steps: &[
        "Implement daily protocols",
        "Launch quick-win businesses",
        "Set up core infrastructure",
        "Develop neural pathways",
    ],
    metrics: &[
        ("execution_speed", ">90%"),
        ("success_rate", ">85%"),
        ("infrastructure_coverage", "100%"),
    ],
    integration_scope: "All enterprise systems",
};

static MONITORING_PLAN: PlanTemplate = PlanTemplate {
    focus: "Monitoring & Optimization",
    steps: &[
        "Implement multi-dimensional metrics",
        "Create adaptive learning systems",
        "Build performance tracking",
        "Develop optimization algorithms",
    ],
    metrics: &[
        ("monitoring_coverage", "100%"),
        ("optimization_efficiency", ">90%"),
        ("learning_rate", ">85%"),
    ],
    integration_scope: "Monitoring systems, optimization systems",
};

static GENERIC_STEPS: &[&str] = &[
    "Analyze requirements",
    "Design implementation",
    "Execute implementation",
    "Validate results",
];

static GENERIC_METRICS: &[(&str, &str)] = &[
    ("completion_rate", "100%"),
    ("quality_score", ">90%"),
    ("integration_score", ">85%"),
];

// ============================================================================
// GENERATORS
// ============================================================================

/// Select the plan generator for a category.
pub fn generator_for(category: &Category) -> PlanGenerator {
    match category {
        Category::Foundation => foundation_plan,
        Category::Technical => technical_plan,
        Category::Timing => timing_plan,
        Category::Resources => resources_plan,
        Category::Coordination => coordination_plan,
        Category::Execution => execution_plan,
        Category::Monitoring => monitoring_plan,
        Category::Other(_) => generic_plan,
    }
}

/// Resolve the plan for a task. Total: unknown inputs get the generic plan.
pub fn resolve_plan(category: &Category, subcategory: &str) -> ExecutionPlan {
    generator_for(category)(subcategory)
}

/// Whether `(category, subcategory)` has dedicated plan content.
pub fn has_specific_plan(category: &Category, subcategory: &str) -> bool {
    match category {
        Category::Foundation => find_section(FOUNDATION_SECTIONS, subcategory).is_some(),
        Category::Technical => find_section(TECHNICAL_SECTIONS, subcategory).is_some(),
        Category::Other(_) => false,
        _ => true,
    }
}

/// Plan used when no dedicated content exists.
pub fn generic_plan(subcategory: &str) -> ExecutionPlan {
    ExecutionPlan {
        focus: format!("Generic Implementation for {}", subcategory),
        steps: GENERIC_STEPS.iter().map(|s| s.to_string()).collect(),
        target_metrics: GENERIC_METRICS
            .iter()
            .map(|(name, target)| (name.to_string(), target.to_string()))
            .collect(),
        integration_scope: "All systems".to_string(),
    }
}

fn foundation_plan(subcategory: &str) -> ExecutionPlan {
    section_or_generic(FOUNDATION_SECTIONS, subcategory)
}

fn technical_plan(subcategory: &str) -> ExecutionPlan {
    section_or_generic(TECHNICAL_SECTIONS, subcategory)
}

fn timing_plan(_subcategory: &str) -> ExecutionPlan {
    TIMING_PLAN.instantiate()
}

fn resources_plan(_subcategory: &str) -> ExecutionPlan {
    RESOURCES_PLAN.instantiate()
}

fn coordination_plan(_subcategory: &str) -> ExecutionPlan {
    COORDINATION_PLAN.instantiate()
}

fn execution_plan(_subcategory: &str) -> ExecutionPlan {
    EXECUTION_PLAN.instantiate()
}

fn monitoring_plan(_subcategory: &str) -> ExecutionPlan {
    MONITORING_PLAN.instantiate()
}

fn find_section(
    table: &'static [(&'static str, PlanTemplate)],
    subcategory: &str,
) -> Option<&'static PlanTemplate> {
    let key = subcategory.trim();
    table
        .iter()
        .find(|(section, _)| *section == key)
        .map(|(_, template)| template)
}

fn section_or_generic(
    table: &'static [(&'static str, PlanTemplate)],
    subcategory: &str,
) -> ExecutionPlan {
    find_section(table, subcategory)
        .map(PlanTemplate::instantiate)
        .unwrap_or_else(|| generic_plan(subcategory))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foundation_section_plan() {
        let plan = resolve_plan(&Category::Foundation, "2.0");
        assert_eq!(plan.focus, "14 Machines of Power");
        assert_eq!(plan.steps.len(), 4);
        assert_eq!(plan.target_metrics["performance_improvement"], ">50%");
        assert_eq!(plan.integration_scope, "All enterprise systems");
    }

    #[test]
    fn test_technical_section_plan_keeps_step_order() {
        let plan = resolve_plan(&Category::Technical, "6.0");
        assert_eq!(plan.focus, "Deployment & Infrastructure");
        assert_eq!(plan.steps.first().map(String::as_str), Some("Set up Kubernetes orchestration"));
        assert_eq!(plan.steps.last().map(String::as_str), Some("Implement security framework"));
        assert_eq!(plan.target_metrics["uptime"], ">99.9%");
    }

    #[test]
    fn test_unknown_section_in_known_family_is_generic() {
        let plan = resolve_plan(&Category::Technical, "4.3");
        assert_eq!(plan.focus, "Generic Implementation for 4.3");
        assert_eq!(plan.integration_scope, "All systems");
        assert!(!has_specific_plan(&Category::Technical, "4.3"));
    }

    #[test]
    fn test_unknown_category_is_generic() {
        let category = Category::from_label("infra");
        let plan = resolve_plan(&category, "deploy");
        assert_eq!(plan, generic_plan("deploy"));
        assert!(!plan.steps.is_empty());
        assert!(!has_specific_plan(&category, "deploy"));
    }

    #[test]
    fn test_single_plan_families_ignore_subcategory() {
        for category in [
            Category::Timing,
            Category::Resources,
            Category::Coordination,
            Category::Execution,
            Category::Monitoring,
        ] {
            let a = resolve_plan(&category, "1.0");
            let b = resolve_plan(&category, "anything");
            assert_eq!(a, b);
            assert!(has_specific_plan(&category, "anything"));
            assert!(!a.focus.starts_with("Generic"));
        }
    }

    #[test]
    fn test_section_lookup_trims_whitespace() {
        let plan = resolve_plan(&Category::Foundation, " 1.0 ");
        assert_eq!(plan.focus, "7-Layer Reality Architecture");
    }

    #[test]
    fn test_every_known_plan_has_three_metrics() {
        for category in Category::KNOWN.iter() {
            for section in ["1.0", "2.0", "3.0", "4.0", "5.0", "6.0", "x"] {
                let plan = resolve_plan(category, section);
                assert_eq!(plan.target_metrics.len(), 3, "{} {}", category, section);
                assert!(plan.steps.len() >= 4);
            }
        }
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Resolution is total and deterministic for arbitrary labels.
        #[test]
        fn prop_resolve_plan_total_and_deterministic(
            category in ".{0,16}",
            subcategory in ".{0,16}",
        ) {
            let category = Category::from_label(&category);
            let first = resolve_plan(&category, &subcategory);
            let second = resolve_plan(&category, &subcategory);
            prop_assert!(!first.steps.is_empty());
            prop_assert_eq!(first, second);
        }

        /// Unknown categories always get the generic plan for their subcategory.
        #[test]
        fn prop_other_category_is_generic(subcategory in "[a-z0-9.]{0,12}") {
            let category = Category::Other("zz-unmapped".to_string());
            prop_assert_eq!(resolve_plan(&category, &subcategory), generic_plan(&subcategory));
        }
    }
}
