//! Prompt templates sent to the language model.

use crate::domain::model::ParsedSolution;

/// Asks for the four-label reply format the extractor understands.
pub fn structured_prompt(problem: &str) -> String {
    format!(
        r#"You are a precise mathematics assistant. Solve the following problem.

Problem: {problem}

Respond using exactly this format, with each label at the start of its own line:

OPERATION: <the type of operation, e.g. addition, derivative, integral, limit, equation>
EXPRESSION: <the mathematical expression being evaluated, on one line>
RESULT: <the final answer only, on one line>
STEPS:
1. <first step>
2. <second step>
...

Rules:
- For derivatives and integrals give the symbolic result (for example 2x), not a number, unless the problem asks for a value at a point.
- Do not add text before OPERATION or blank lines inside STEPS."#
    )
}

/// Follow-up request for a plain-language explanation of a solved problem.
pub fn explanation_prompt(problem: &str, solution: &ParsedSolution) -> String {
    format!(
        "Explain in two or three short sentences, for a student, how to solve this problem.\n\n\
         Problem: {}\n\
         Operation: {}\n\
         Result: {}\n\n\
         Use plain language and avoid repeating the full working.",
        problem, solution.operation, solution.result
    )
}

/// Simplified request used once the structured attempt has failed.
pub fn fallback_prompt(problem: &str) -> String {
    format!(
        "Solve this math problem and give a short, clear answer with a brief explanation:\n\n{}",
        problem
    )
}
