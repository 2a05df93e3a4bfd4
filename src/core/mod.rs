pub mod catalog;
pub mod extractor;
pub mod prompts;
pub mod solver;

pub use crate::domain::model::{Extraction, ParsedSolution, SolveOutcome};
pub use crate::domain::ports::{ConfigProvider, LanguageModel};
pub use crate::utils::error::Result;
