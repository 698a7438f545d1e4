//! Enum types for Conduit entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// AGENT STATE
// ============================================================================

/// Availability of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AgentState {
    /// Agent can take a new task
    #[default]
    Available,
    /// Agent is holding exactly one task
    Busy,
}

impl AgentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Available => "Available",
            AgentState::Busy => "Busy",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AgentStateParseError> {
        match s.to_lowercase().as_str() {
            "available" | "idle" => Ok(AgentState::Available),
            "busy" => Ok(AgentState::Busy),
            _ => Err(AgentStateParseError(s.to_string())),
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentState {
    type Err = AgentStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing an invalid agent state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStateParseError(pub String);

impl fmt::Display for AgentStateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid agent state: {}", self.0)
    }
}

impl std::error::Error for AgentStateParseError {}

// ============================================================================
// TASK STATUS
// ============================================================================

/// Lifecycle state of a queued task.
///
/// ```text
/// enqueue() → Queued ── assign() ──→ InProgress ──┬── execute() ──→ Completed
///                                                 └── execute() ──→ Failed (assignment lost)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TaskStatus {
    #[default]
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Queued => "Queued",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, TaskStatusParseError> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(TaskStatus::Queued),
            "inprogress" | "in_progress" | "in-progress" | "in progress" => {
                Ok(TaskStatus::InProgress)
            }
            "completed" | "complete" => Ok(TaskStatus::Completed),
            "failed" | "failure" => Ok(TaskStatus::Failed),
            _ => Err(TaskStatusParseError(s.to_string())),
        }
    }

    /// Check if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing an invalid task status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusParseError(pub String);

impl fmt::Display for TaskStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid task status: {}", self.0)
    }
}

impl std::error::Error for TaskStatusParseError {}

// ============================================================================
// TIER
// ============================================================================

/// Coarse qualitative bucket produced by the impact heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Medium => "Medium",
            Tier::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Result<Self, TierParseError> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Tier::High),
            "medium" => Ok(Tier::Medium),
            "low" => Ok(Tier::Low),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing an invalid tier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierParseError(pub String);

impl fmt::Display for TierParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}

// ============================================================================
// CATEGORY
// ============================================================================

/// Plan family a task targets.
///
/// Parsing is total: unknown labels are kept verbatim in [`Category::Other`]
/// and resolve to the generic plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Foundation,
    Technical,
    Timing,
    Resources,
    Coordination,
    Execution,
    Monitoring,
    /// Unmapped label. Build it with [`Category::from_label`] or
    /// [`Category::custom`]; a known label stored here would not survive
    /// a serde round-trip.
    Other(String),
}

impl Category {
    /// Known families in legacy volume order (`volume_1` .. `volume_7`).
    pub const KNOWN: [Category; 7] = [
        Category::Foundation,
        Category::Technical,
        Category::Timing,
        Category::Resources,
        Category::Coordination,
        Category::Execution,
        Category::Monitoring,
    ];

    /// Parse a category label. Never fails.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "foundation" | "foundational" | "volume_1" => Category::Foundation,
            "technical" | "volume_2" => Category::Technical,
            "timing" | "temporal" | "volume_3" => Category::Timing,
            "resources" | "energetic" | "volume_4" => Category::Resources,
            "coordination" | "volume_5" => Category::Coordination,
            "execution" | "volume_6" => Category::Execution,
            "monitoring" | "volume_7" => Category::Monitoring,
            _ => Category::Other(label.to_string()),
        }
    }

    /// Category for a caller-supplied label. Known labels map to their
    /// family, so the result always round-trips through its label.
    pub fn custom(label: impl Into<String>) -> Self {
        let label = label.into();
        match Self::from_label(&label) {
            Category::Other(_) => Category::Other(label),
            known => known,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Foundation => "foundation",
            Category::Technical => "technical",
            Category::Timing => "timing",
            Category::Resources => "resources",
            Category::Coordination => "coordination",
            Category::Execution => "execution",
            Category::Monitoring => "monitoring",
            Category::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
