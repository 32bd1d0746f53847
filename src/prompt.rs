//! Prompt assembly for a downstream generator.
//!
//! The library stops at producing the prompt string; running a causal
//! model over it is the caller's concern.

use crate::document::SearchResult;

/// Template filled with retrieved context and the user question.
const ANSWER_TEMPLATE: &str = "Answer the question based only on the following context:
{context}

Question: {question}
";

/// Assemble a generation prompt from retrieved chunks and a question.
///
/// Chunk texts are joined in result order, separated by blank lines.
/// With no results the context section is left empty rather than
/// erroring.
pub fn build_prompt(results: &[SearchResult], question: &str) -> String {
    let context = results
        .iter()
        .map(|result| result.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    ANSWER_TEMPLATE
        .replace("{context}", &context)
        .replace("{question}", question)
}
