use crate::core::extractor::{extract_solution, looks_like_unevaluated_derivative};
use crate::core::prompts::{explanation_prompt, fallback_prompt, structured_prompt};
use crate::domain::model::{DegradedAnswer, SolveOutcome, SolvedProblem, TerminalFailure};
use crate::domain::ports::LanguageModel;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;

/// Runs one problem through the structured path and, if anything in it
/// fails, a single free-form fallback request.
pub struct SolveEngine {
    model: Arc<dyn LanguageModel>,
}

impl SolveEngine {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn solve(&self, problem: &str) -> SolveOutcome {
        let primary_error = match self.solve_structured(problem).await {
            Ok(solved) => return SolveOutcome::Solved(solved),
            Err(e) => e,
        };

        tracing::warn!(
            "Structured solve failed ({}), retrying with fallback prompt",
            primary_error
        );

        match self.complete(&fallback_prompt(problem)).await {
            Ok(answer) => {
                tracing::info!("Fallback prompt answered the problem");
                SolveOutcome::Degraded(DegradedAnswer {
                    problem: problem.to_string(),
                    answer,
                    primary_error: primary_error.to_string(),
                    model: self.model_name().to_string(),
                })
            }
            Err(fallback_error) => {
                let terminal = GatewayError::TerminalFailure {
                    original: primary_error.to_string(),
                    fallback: fallback_error.to_string(),
                };
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    terminal,
                    terminal.category(),
                    terminal.severity()
                );
                SolveOutcome::Failed(TerminalFailure {
                    problem: problem.to_string(),
                    primary_error: primary_error.to_string(),
                    fallback_error: fallback_error.to_string(),
                })
            }
        }
    }

    async fn solve_structured(&self, problem: &str) -> Result<SolvedProblem> {
        tracing::debug!("Requesting structured solution from {}", self.model_name());
        let reply = self.complete(&structured_prompt(problem)).await?;

        let extraction = extract_solution(&reply, problem);
        if extraction.matched.none() {
            tracing::warn!("Model reply contained none of the expected labels");
        } else if !extraction.matched.all() {
            tracing::debug!("Partial extraction: {:?}", extraction.matched);
        }

        if looks_like_unevaluated_derivative(&extraction.solution) {
            tracing::warn!(
                operation = %extraction.solution.operation,
                result = %extraction.solution.result,
                "Derivative result is a bare integer; the model may have evaluated at a point"
            );
        }

        tracing::debug!("Requesting explanation from {}", self.model_name());
        let explanation = self
            .complete(&explanation_prompt(problem, &extraction.solution))
            .await?;

        Ok(SolvedProblem {
            problem: problem.to_string(),
            extraction,
            explanation,
            model: self.model_name().to_string(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let text = self.model.generate(prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::EmptyCompletionError);
        }
        Ok(text.to_string())
    }
}
