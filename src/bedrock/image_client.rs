use crate::{
    adapter,
    error::{classify_provider_error, BedrockError, Result},
    models::{ImageGenerationRequest, ImageGenerationResponse},
};
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
}

impl ImageClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Shape the canonical request for the model's provider family, invoke
    /// the model, and normalize whichever response shape comes back.
    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let model_id = adapter::resolve_model_id(&request.model);
        let payload = adapter::build_payload(&request)?;
        let family = payload.family();

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| BedrockError::Serialization(e.to_string()))?;

        log::info!("Generating image with model: {}", model_id);
        log::debug!("Image generation payload: {}", request_json);

        let response = self
            .client
            .invoke_model()
            .model_id(&model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_json.into_bytes()))
            .send()
            .await
            .map_err(|e| {
                if let Some(service_error) = e.as_service_error() {
                    let detail = format!(
                        "{}: {}",
                        service_error.code().unwrap_or("unknown"),
                        service_error.message().unwrap_or("no message")
                    );
                    log::error!("Bedrock service error: {}", detail);
                    classify_provider_error(&detail, family)
                } else {
                    log::error!("AWS SDK error: {}", e);
                    BedrockError::Aws(e.to_string())
                }
            })?;

        let body = response.body.into_inner();
        let image_data = adapter::extract_image(&body, family)?;

        Ok(ImageGenerationResponse {
            image_data,
            model: model_id,
        })
    }

    /// Known image models, as (model id, display name, provider).
    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("stability.sd3-large-v1:0", "SD3 Large", "Stability AI"),
            (
                "stability.stable-diffusion-xl-v1:0",
                "Stable Diffusion XL",
                "Stability AI",
            ),
            (
                "stability.stable-image-ultra-v1:0",
                "Stable Image Ultra",
                "Stability AI",
            ),
            (
                "stability.stable-image-core-v1:0",
                "Stable Image Core",
                "Stability AI",
            ),
            (
                "amazon.titan-image-generator-v1",
                "Titan Image Generator G1",
                "Amazon",
            ),
            ("amazon.nova-canvas-v1:0", "Nova Canvas", "Amazon"),
        ]
    }
}
