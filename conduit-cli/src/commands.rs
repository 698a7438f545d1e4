//! Command implementations. Each returns a serializable report.

use crate::cli::Command;
use crate::config::HostConfig;
use crate::error::CliResult;
use conduit_agents::{ExecutionResult, Orchestrator, StatusReport};
use conduit_core::{Category, ExecutionContext, ExpectedOutput};
use conduit_plans::{learning_path, resolve_plan, ImpactEstimator, LearningPath};
use serde::Serialize;

/// Agents registered by `demo`: identifier, capabilities, domain tags.
const DEMO_AGENTS: &[(&str, &[&str], &[&str])] = &[
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

const DEMO_ASSIGNEE: &str = "TechnicalAgent";

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub result: ExecutionResult,
    pub status: StatusReport,
    pub learning_path: LearningPath,
}

pub fn run(command: &Command, config: &HostConfig) -> CliResult<serde_json::Value> {
    let value = match command {
        Command::Demo { days } => serde_json::to_value(run_demo(config, *days)?)?,
        Command::Plan {
            category,
            subcategory,
        } => serde_json::to_value(resolve_plan(&Category::from_label(category), subcategory))?,
        Command::Estimate {
            focus,
            layer,
            timing,
            resources,
        } => {
            let estimator = ImpactEstimator::new(config.estimator.clone())?;
            let context = ExecutionContext::new(Category::Execution, "", focus.as_str())
                .with_layer(*layer)
                .with_timing(timing.as_str())
                .with_resources(resources.as_str());
            serde_json::to_value(estimator.estimate(&context))?
        }
        Command::LearningPath { category, days } => {
            serde_json::to_value(learning_path(&Category::from_label(category), *days))?
        }
    };
    Ok(value)
}

/// Register the demo agents, then enqueue, assign and execute one task.
pub fn run_demo(config: &HostConfig, days: u32) -> CliResult<DemoReport> {
    let orchestrator =
        Orchestrator::with_config(config.orchestrator.clone(), config.estimator.clone())?;
    for (agent_id, capabilities, tags) in DEMO_AGENTS {
        orchestrator.register_agent(*agent_id, capabilities.iter().copied(), tags.iter().copied())?;
    }

    let context = ExecutionContext::new(Category::Technical, "4.3", "Credit Repair Service")
        .with_layer(3)
        .with_timing("30-day implementation")
        .with_resources("High technical resources available");
    let expected = ExpectedOutput::new("Complete API specification with monitoring endpoints")
        .with_steps([
            "Design API endpoints",
            "Implement authentication",
            "Create monitoring",
            "Deploy and test",
        ])
        .with_metric("api_performance", "<200ms")
        .with_metric("uptime", ">99.9%")
        .with_metric("security_score", ">95%")
        .with_impact_narrative("High - Significant cross-domain optimization achieved");
    let category = context.category.clone();

    let task_id = orchestrator.enqueue(context, expected)?;
    orchestrator.assign(task_id.as_str(), DEMO_ASSIGNEE)?;
    let result = orchestrator.execute(task_id.as_str())?;
    tracing::info!(task_id = %task_id, "Demo task executed");

    Ok(DemoReport {
        result,
        status: orchestrator.status_snapshot()?,
        learning_path: learning_path(&category, days),
    })
}
