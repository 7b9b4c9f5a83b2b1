use llm_eval_core::{GenerationParams, Result, TextGenerator};

use crate::prompts::PromptTemplate;

/// Generate a response for `user_request`, with any echoed prompt removed.
pub async fn llm_inference<G>(
    user_request: &str,
    generator: &G,
    template: &PromptTemplate,
    params: &GenerationParams,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    let input_text = template.render(user_request);
    tracing::info!(
        request_chars = user_request.chars().count(),
        max_new_tokens = params.max_new_tokens,
        "running inference"
    );

    let mut generation = generator.generate(&input_text, params).await?;

    // Some backends return the prompt followed by the completion.
    if generation.contains(&input_text) {
        tracing::debug!("stripping echoed prompt from generation");
        generation = generation.replace(&input_text, "");
    }

    Ok(generation.trim().to_string())
}
