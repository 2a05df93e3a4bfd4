use crate::domain::model::{
    DegradedAnswer, MatchedFields, SolveOutcome, SolvedProblem, TerminalFailure,
    RESULT_PLACEHOLDER, STEPS_PLACEHOLDER,
};
use crate::utils::error::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Duration;

pub const METHOD_STRUCTURED: &str = "ai_structured";
pub const METHOD_FALLBACK: &str = "ai_fallback";
const FALLBACK_OPERATION: &str = "general_math";

pub const TROUBLESHOOTING: &[&str] = &[
    "Check that GEMINI_API_KEY is set and valid",
    "Verify the server can reach generativelanguage.googleapis.com",
    "Confirm the configured model name exists (GEMINI_MODEL)",
    "Try rephrasing the problem more simply",
    "Check GET /health for the service configuration",
];

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub operation: String,
    pub expression: String,
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct Calculation {
    pub method: &'static str,
    pub result: String,
    pub operation: String,
    pub steps: String,
    pub confidence: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub success: bool,
    pub original_problem: String,
    pub analysis: Analysis,
    pub calculation: Calculation,
    pub explanation: String,
    /// Present (and true) only when the answer came from the fallback prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    pub model: String,
    pub timestamp: String,
    pub processing_time: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_error: Option<String>,
    pub suggestion: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub troubleshooting: Option<&'static [&'static str]>,
    pub timestamp: String,
}

pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Whole milliseconds, saturating instead of truncating.
pub(super) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn structure_labels(matched: &MatchedFields) -> (&'static str, &'static str) {
    if matched.all() {
        ("structured", "high")
    } else if matched.none() {
        ("unstructured", "low")
    } else {
        ("partially_structured", "medium")
    }
}

impl SolveResponse {
    pub fn solved(solved: SolvedProblem, elapsed: Duration) -> Self {
        let (context, confidence) = structure_labels(&solved.extraction.matched);
        let solution = solved.extraction.solution;

        Self {
            success: true,
            original_problem: solved.problem,
            analysis: Analysis {
                operation: solution.operation.clone(),
                expression: solution.expression,
                context: context.to_string(),
            },
            calculation: Calculation {
                method: METHOD_STRUCTURED,
                result: solution.result,
                operation: solution.operation,
                steps: solution.steps,
                confidence,
            },
            explanation: solved.explanation,
            fallback: None,
            model: solved.model,
            timestamp: timestamp(),
            processing_time: millis(elapsed),
        }
    }

    pub fn degraded(answer: DegradedAnswer, elapsed: Duration) -> Self {
        Self {
            success: true,
            analysis: Analysis {
                operation: FALLBACK_OPERATION.to_string(),
                expression: answer.problem.clone(),
                context: "fallback".to_string(),
            },
            original_problem: answer.problem,
            calculation: Calculation {
                method: METHOD_FALLBACK,
                result: RESULT_PLACEHOLDER.to_string(),
                operation: FALLBACK_OPERATION.to_string(),
                steps: STEPS_PLACEHOLDER.to_string(),
                confidence: "low",
            },
            explanation: answer.answer,
            fallback: Some(true),
            model: answer.model,
            timestamp: timestamp(),
            processing_time: millis(elapsed),
        }
    }
}

impl ErrorResponse {
    pub fn from_error(err: &GatewayError) -> Self {
        let troubleshooting = match err {
            GatewayError::ValidationError { .. } => None,
            _ => Some(TROUBLESHOOTING),
        };

        Self {
            success: false,
            error: err.user_friendly_message(),
            details: match err {
                GatewayError::ValidationError { .. } => None,
                other => Some(other.to_string()),
            },
            fallback_error: None,
            suggestion: err.recovery_suggestion(),
            troubleshooting,
            timestamp: timestamp(),
        }
    }

    pub fn terminal(failure: TerminalFailure) -> Self {
        let err = GatewayError::TerminalFailure {
            original: failure.primary_error.clone(),
            fallback: failure.fallback_error.clone(),
        };

        Self {
            success: false,
            error: err.user_friendly_message(),
            details: Some(failure.primary_error),
            fallback_error: Some(failure.fallback_error),
            suggestion: err.recovery_suggestion(),
            troubleshooting: Some(TROUBLESHOOTING),
            timestamp: timestamp(),
        }
    }
}

pub fn error_response(err: &GatewayError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from_error(err))).into_response()
}

pub fn outcome_response(outcome: SolveOutcome, elapsed: Duration) -> Response {
    match outcome {
        SolveOutcome::Solved(solved) => {
            (StatusCode::OK, Json(SolveResponse::solved(solved, elapsed))).into_response()
        }
        SolveOutcome::Degraded(answer) => {
            (StatusCode::OK, Json(SolveResponse::degraded(answer, elapsed))).into_response()
        }
        SolveOutcome::Failed(failure) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::terminal(failure)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Extraction, ParsedSolution};

    fn solved(matched: MatchedFields) -> SolvedProblem {
        SolvedProblem {
            problem: "2 + 2".to_string(),
            extraction: Extraction {
                solution: ParsedSolution {
                    operation: "addition".to_string(),
                    expression: "2 + 2".to_string(),
                    result: "4".to_string(),
                    steps: "1. add".to_string(),
                },
                matched,
            },
            explanation: "Add the numbers.".to_string(),
            model: "gemini-test".to_string(),
        }
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_solved_response_shape() {
        let matched = MatchedFields {
            operation: true,
            expression: true,
            result: true,
            steps: true,
        };
        let response = SolveResponse::solved(solved(matched), Duration::from_millis(42));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["originalProblem"], "2 + 2");
        assert_eq!(json["analysis"]["operation"], "addition");
        assert_eq!(json["analysis"]["context"], "structured");
        assert_eq!(json["calculation"]["method"], METHOD_STRUCTURED);
        assert_eq!(json["calculation"]["result"], "4");
        assert_eq!(json["calculation"]["confidence"], "high");
        assert_eq!(json["processingTime"], 42);
        assert!(json.get("fallback").is_none());
    }

    #[test]
    fn test_partial_match_lowers_confidence() {
        let matched = MatchedFields {
            result: true,
            ..Default::default()
        };
        let response = SolveResponse::solved(solved(matched), Duration::ZERO);
        assert_eq!(response.calculation.confidence, "medium");
        assert_eq!(response.analysis.context, "partially_structured");
    }

    #[test]
    fn test_degraded_response_is_marked() {
        let response = SolveResponse::degraded(
            DegradedAnswer {
                problem: "2 + 2".to_string(),
                answer: "4".to_string(),
                primary_error: "boom".to_string(),
                model: "gemini-test".to_string(),
            },
            Duration::ZERO,
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["fallback"], true);
        assert_eq!(json["calculation"]["method"], METHOD_FALLBACK);
        assert_eq!(json["explanation"], "4");
    }

    #[test]
    fn test_validation_error_has_no_troubleshooting() {
        let response = ErrorResponse::from_error(&GatewayError::validation("Problem is required"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Problem is required");
        assert!(json.get("troubleshooting").is_none());
    }

    #[test]
    fn test_terminal_error_carries_both_messages() {
        let response = ErrorResponse::terminal(TerminalFailure {
            problem: "2 + 2".to_string(),
            primary_error: "primary down".to_string(),
            fallback_error: "fallback down".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["details"], "primary down");
        assert_eq!(json["fallbackError"], "fallback down");
        assert_eq!(
            json["troubleshooting"].as_array().unwrap().len(),
            TROUBLESHOOTING.len()
        );
    }
}
