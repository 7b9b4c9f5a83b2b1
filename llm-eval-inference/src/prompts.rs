use llm_eval_core::{EvalError, Result};
use std::path::Path;

/// Default instructions: map a UI behaviour request onto a numbered list of nodes.
pub const INSTRUCTIONS: &str = include_str!("../prompts/instructions.txt");

/// Fixed instructions wrapped around every user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    instructions: String,
}

impl PromptTemplate {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let instructions = std::fs::read_to_string(path).map_err(|e| {
            EvalError::Configuration(format!("Failed to read instructions from {:?}: {}", path, e))
        })?;
        Ok(Self::new(instructions))
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Full model input for a user request.
    pub fn render(&self, user_request: &str) -> String {
        format!(
            "{}\nPrompt:\n {}\n Sequence of Nodes:\n",
            self.instructions, user_request
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(INSTRUCTIONS)
    }
}
