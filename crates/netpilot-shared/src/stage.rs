//! The five pipeline stages, in execution order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the fixed diagnosis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analyze,
    Plan,
    Execute,
    Validate,
    Report,
}

impl Stage {
    /// Every stage in the order the orchestrator runs them.
    pub const ALL: [Stage; 5] = [
        Stage::Analyze,
        Stage::Plan,
        Stage::Execute,
        Stage::Validate,
        Stage::Report,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Analyze => "analyze",
            Stage::Plan => "plan",
            Stage::Execute => "execute",
            Stage::Validate => "validate",
            Stage::Report => "report",
        }
    }

    /// Agent label stamped on the stage's output
    pub fn agent(&self) -> &'static str {
        match self {
            Stage::Analyze => "Analyzer",
            Stage::Plan => "Planner",
            Stage::Execute => "Executor",
            Stage::Validate => "Validator",
            Stage::Report => "Reporter",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Stage::Analyze => "Network Data Analysis",
            Stage::Plan => "Strategy Development",
            Stage::Execute => "Command Execution",
            Stage::Validate => "Solution Validation",
            Stage::Report => "Report Generation",
        }
    }

    /// 1-based position in the pipeline
    pub fn ordinal(&self) -> usize {
        match self {
            Stage::Analyze => 1,
            Stage::Plan => 2,
            Stage::Execute => 3,
            Stage::Validate => 4,
            Stage::Report => 5,
        }
    }

    /// Stage that runs after this one, `None` once the report is done
    pub fn next(&self) -> Option<Stage> {
        Stage::ALL.get(self.ordinal()).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
