use serde::{Deserialize, Serialize};

pub const DEFAULT_OPERATION: &str = "mathematical_operation";
pub const RESULT_PLACEHOLDER: &str = "See explanation below";
pub const STEPS_PLACEHOLDER: &str = "Step-by-step solution provided in the explanation";

/// The four-field structured solution pulled out of a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSolution {
    pub operation: String,
    pub expression: String,
    pub result: String,
    pub steps: String,
}

impl ParsedSolution {
    /// All fields at their defaults for the given problem text.
    pub fn defaults_for(problem: &str) -> Self {
        Self {
            operation: DEFAULT_OPERATION.to_string(),
            expression: problem.trim().to_string(),
            result: RESULT_PLACEHOLDER.to_string(),
            steps: STEPS_PLACEHOLDER.to_string(),
        }
    }
}

/// Which labels were found in the reply; a `false` field carries its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchedFields {
    pub operation: bool,
    pub expression: bool,
    pub result: bool,
    pub steps: bool,
}

impl MatchedFields {
    pub fn all(&self) -> bool {
        self.operation && self.expression && self.result && self.steps
    }

    pub fn none(&self) -> bool {
        !(self.operation || self.expression || self.result || self.steps)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub solution: ParsedSolution,
    pub matched: MatchedFields,
}

/// Primary path result: structured fields plus the follow-up explanation.
#[derive(Debug, Clone)]
pub struct SolvedProblem {
    pub problem: String,
    pub extraction: Extraction,
    pub explanation: String,
    pub model: String,
}

/// Fallback path result: a free-form answer and the error that forced it.
#[derive(Debug, Clone)]
pub struct DegradedAnswer {
    pub problem: String,
    pub answer: String,
    pub primary_error: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct TerminalFailure {
    pub problem: String,
    pub primary_error: String,
    pub fallback_error: String,
}

/// Terminal states of one solve request.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Solved(SolvedProblem),
    Degraded(DegradedAnswer),
    Failed(TerminalFailure),
}

impl SolveOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SolveOutcome::Solved(_) => OutcomeKind::Success,
            SolveOutcome::Degraded(_) => OutcomeKind::DegradedSuccess,
            SolveOutcome::Failed(_) => OutcomeKind::TerminalFailure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    DegradedSuccess,
    TerminalFailure,
}
