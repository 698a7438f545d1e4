//! Conduit Plans
//!
//! Static planning knowledge used when a task executes: the plan catalog,
//! the impact estimator and learning-path generation. Everything here is pure
//! and holds no orchestrator state.

pub mod catalog;
pub mod estimator;
pub mod learning;

pub use catalog::{generator_for, generic_plan, has_specific_plan, resolve_plan, ExecutionPlan, PlanGenerator};
pub use estimator::{
    Assessment, EstimatorPolicy, ImpactEstimator, ImpactScores, ImpactWeights, KeywordRule,
    KeywordTable,
};
pub use learning::{learning_path, LearningPath, Milestone, MIN_PATH_DAYS};
