//! Pulls the labelled `OPERATION` / `EXPRESSION` / `RESULT` / `STEPS` sections
//! out of a model reply.
//!
//! Each label is matched on its own and only at the start of a line, so a
//! missing or garbled section only costs that one field its value. Labels are case-insensitive; the values
//! are taken verbatim apart from trimming.

use crate::domain::model::{Extraction, MatchedFields, ParsedSolution};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // static pattern
static OPERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*OPERATION:[ \t]*([^\r\n]*)").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // static pattern
static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*EXPRESSION:[ \t]*([^\r\n]*)").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // static pattern
static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*RESULT:[ \t]*([^\r\n]*)").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // static pattern
static STEPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*STEPS:").expect("static regex should not panic")
});
// Case-sensitive on purpose: only an upper-case label ends the steps block.
#[allow(clippy::expect_used)] // static pattern
static NEXT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Z][A-Z_]+:").expect("static regex should not panic"));

/// Extracts the structured solution from `text`, falling back to defaults
/// (the trimmed `problem` for the expression) for any label not found.
pub fn extract_solution(text: &str, problem: &str) -> Extraction {
    let defaults = ParsedSolution::defaults_for(problem);

    let operation = single_line_field(&OPERATION_RE, text);
    let expression = single_line_field(&EXPRESSION_RE, text);
    let result = single_line_field(&RESULT_RE, text);
    let steps = steps_field(text);

    let matched = MatchedFields {
        operation: operation.is_some(),
        expression: expression.is_some(),
        result: result.is_some(),
        steps: steps.is_some(),
    };

    Extraction {
        solution: ParsedSolution {
            operation: operation.unwrap_or(defaults.operation),
            expression: expression.unwrap_or(defaults.expression),
            result: result.unwrap_or(defaults.result),
            steps: steps.unwrap_or(defaults.steps),
        },
        matched,
    }
}

fn single_line_field(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Everything after `STEPS:` up to the first blank line, the next upper-case
/// `LABEL:` line, or the end of the text.
fn steps_field(text: &str) -> Option<String> {
    let label = STEPS_RE.find(text)?;
    let after = &text[label.end()..];
    let body = after.trim_start();
    // Text on the label's own line is never mistaken for a new label.
    let starts_on_label_line = !after[..after.len() - body.len()].contains('\n');

    let mut captured = Vec::new();
    for (idx, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        if !(idx == 0 && starts_on_label_line) && NEXT_LABEL_RE.is_match(line) {
            break;
        }
        captured.push(line);
    }

    let steps = captured.join("\n");
    let steps = steps.trim();
    if steps.is_empty() {
        None
    } else {
        Some(steps.to_string())
    }
}

/// A derivative whose result is a bare integer usually means the model
/// evaluated at a point instead of differentiating symbolically.
pub fn looks_like_unevaluated_derivative(solution: &ParsedSolution) -> bool {
    solution.operation.to_lowercase().contains("deriv")
        && !solution.result.is_empty()
        && solution.result.chars().all(|c| c.is_ascii_digit())
}
