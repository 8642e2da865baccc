//! Routes a decoded `/bfhl` body to its operation.

use crate::services::error::DispatchError;
use crate::services::operation::{Computation, Operation, OperationOutput};
use crate::services::providers::{ProviderError, TextProvider};
use metrics::{counter, histogram};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Prompt sent to the AI provider for a question.
pub fn one_word_prompt(question: &str) -> String {
    format!(
        "Answer the following question in ONE WORD ONLY. No punctuation, no explanation.\nQuestion: {}",
        question
    )
}

/// First whitespace-delimited token of a reply, whatever the model added
/// after it.
pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

#[derive(Clone)]
pub struct Dispatcher {
    text_provider: Arc<dyn TextProvider>,
}

impl Dispatcher {
    pub fn new(text_provider: Arc<dyn TextProvider>) -> Self {
        Self { text_provider }
    }

    /// Decode `body`, run the one operation it names and return its result.
    pub async fn dispatch(&self, body: Value) -> Result<OperationOutput, DispatchError> {
        let operation = Operation::from_body(body)?;
        let name = operation.name();

        let result = match operation {
            Operation::Compute(computation) => compute(computation).await,
            Operation::Ai(question) => self.answer(&question).await.map(OperationOutput::Word),
        };

        let outcome = if result.is_ok() { "success" } else { "failure" };
        counter!("bfhl_operations_total", "operation" => name, "outcome" => outcome).increment(1);
        tracing::debug!(operation = name, outcome, "Operation dispatched");

        result
    }

    async fn answer(&self, question: &str) -> Result<String, DispatchError> {
        let provider = self.text_provider.name();
        let start = Instant::now();
        let response = self.text_provider.generate(&one_word_prompt(question)).await;
        histogram!("bfhl_ai_latency_seconds", "provider" => provider)
            .record(start.elapsed().as_secs_f64());

        let response = response.map_err(|e| {
            counter!("bfhl_ai_errors_total", "provider" => provider, "error_type" => e.kind())
                .increment(1);
            e
        })?;

        tracing::info!(
            provider,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "AI answer received"
        );

        first_word(&response.text)
            .map(str::to_string)
            .ok_or(DispatchError::Provider(ProviderError::EmptyResponse))
    }
}

/// Runs on the blocking pool: a prime check on a large value must not hold
/// up an async worker.
async fn compute(computation: Computation) -> Result<OperationOutput, DispatchError> {
    let output = tokio::task::spawn_blocking(move || computation.run())
        .await
        .map_err(|e| DispatchError::Worker(e.to_string()))??;
    Ok(output)
}
