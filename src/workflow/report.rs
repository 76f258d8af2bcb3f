//! Report rendering - pure functions
//!
//! No I/O happens here: the same outcomes always render to the same text.

use crate::types::StageOutcomes;

/// Heading of the creation section
pub const CREATE_HEADING: &str = "Create PRs";
/// Heading of the merge section
pub const MERGE_HEADING: &str = "Merge PRs";

/// Outcome of a full create-then-merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Creation stage outcomes
    pub creation: StageOutcomes,
    /// Merge stage outcomes
    pub merge: StageOutcomes,
}

impl WorkflowReport {
    /// Render the report as newline-delimited text
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        push_section(&mut lines, CREATE_HEADING, &self.creation);
        lines.push(String::new());
        push_section(&mut lines, MERGE_HEADING, &self.merge);
        lines.join("\n")
    }

    /// Whether any item in either stage failed
    pub fn has_failures(&self) -> bool {
        !self.creation.failed.is_empty() || !self.merge.failed.is_empty()
    }
}

impl std::fmt::Display for WorkflowReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

fn push_section(lines: &mut Vec<String>, heading: &str, outcomes: &StageOutcomes) {
    lines.push(format!("== {heading} =="));
    lines.push("-- Succeeded --".to_string());
    lines.extend(outcomes.succeeded.iter().cloned());
    lines.push("-- Failed --".to_string());
    lines.extend(outcomes.failed.iter().map(ToString::to_string));
}
