//! Model boundary port.

use celara_ollama::client::OllamaClient;
use celara_ollama::error::GatewayError;

/// The seam to the language model. Scrubbed text is the only payload
/// that ever crosses it; a failure here propagates as a Failure outcome
/// with no retry masking.
#[allow(async_fn_in_trait)]
pub trait ModelGateway {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, GatewayError>;
}

impl ModelGateway for OllamaClient {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, GatewayError> {
        OllamaClient::generate(self, model_id, prompt, system).await
    }
}
