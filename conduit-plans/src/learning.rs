//! Learning paths: a study schedule split into four consecutive windows.

use conduit_core::Category;
use serde::{Deserialize, Serialize};

/// Shortest path that still gives every milestone at least one day.
pub const MIN_PATH_DAYS: u32 = 4;

/// One contiguous window of a learning path. Days are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Milestone {
    pub start_day: u32,
    pub end_day: u32,
    pub topic: String,
}

impl Milestone {
    pub fn days(&self) -> u32 {
        self.end_day - self.start_day + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LearningPath {
    pub focus: String,
    pub days: u32,
    pub milestones: Vec<Milestone>,
}

struct Curriculum {
    focus: &'static str,
    topics: [&'static str; 4],
}

static FOUNDATION_CURRICULUM: Curriculum = Curriculum {
    focus: "Foundational Frameworks",
    topics: [
        "Chapters 1-3 (Strategy & Setup)",
        "Chapters 4-6 (Agent Fundamentals)",
        "Chapters 7-9 (Safety & MCP)",
        "Chapters 10-12 (URL Architecture)",
    ],
};

static TECHNICAL_CURRICULUM: Curriculum = Curriculum {
    focus: "Technical Implementation",
    topics: [
        "Chapters 4-6 (AI Agent Fundamentals)",
        "Chapters 7-9 (MCP & Tool Integration)",
        "Chapters 10-12 (URL Architecture & Monitoring)",
        "Chapters 13-15 (Deployment & Infrastructure)",
    ],
};

static GENERIC_CURRICULUM: Curriculum = Curriculum {
    focus: "Generic Learning Path",
    topics: [
        "Foundation concepts",
        "Intermediate concepts",
        "Advanced concepts",
        "Mastery concepts",
    ],
};

/// Build a learning path for a category.
///
/// `days` is clamped to [`MIN_PATH_DAYS`]. Window ends fall at `days/4`,
/// `days/2`, `days - days/4` and `days`.
pub fn learning_path(category: &Category, days: u32) -> LearningPath {
    let curriculum = match category {
        Category::Foundation => &FOUNDATION_CURRICULUM,
        Category::Technical => &TECHNICAL_CURRICULUM,
        _ => &GENERIC_CURRICULUM,
    };

    let days = days.max(MIN_PATH_DAYS);
    let ends = [days / 4, days / 2, days - days / 4, days];

    let mut start_day = 1;
    let milestones = curriculum
        .topics
        .iter()
        .zip(ends)
        .map(|(topic, end_day)| {
            let milestone = Milestone {
                start_day,
                end_day,
                topic: topic.to_string(),
            };
            start_day = end_day.saturating_add(1);
            milestone
        })
        .collect();

    LearningPath {
        focus: curriculum.focus.to_string(),
        days,
        milestones,
    }
}
