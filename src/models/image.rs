use serde::{Deserialize, Serialize};

/// Canonical generation request, independent of provider family. Field names
/// on the wire are the camelCase ones the browser form submits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationRequest {
    // Defaulted so a missing field surfaces as the handler's "required"
    // rejection instead of a deserialization error.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub positive_prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub cfg_scale: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Base64-encoded source image; presence switches to image-to-image mode.
    #[serde(default)]
    pub input_image: Option<String>,
    /// How much of the original image to preserve, in [0, 1]. Only read when
    /// `input_image` is set.
    #[serde(default)]
    pub image_strength: Option<f64>,
}

impl ImageGenerationRequest {
    pub fn new(model: impl Into<String>, positive_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            positive_prompt: positive_prompt.into(),
            negative_prompt: None,
            cfg_scale: None,
            steps: None,
            width: None,
            height: None,
            seed: None,
            input_image: None,
            image_strength: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationResponse {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// Concrete model id the request was served by.
    pub model: String,
}

/// Stability response shape: a list of artifacts, each carrying the encoded
/// image.
#[derive(Debug, Deserialize)]
pub struct StabilityImageResponse {
    #[serde(default)]
    pub artifacts: Vec<StabilityArtifact>,
}

#[derive(Debug, Deserialize)]
pub struct StabilityArtifact {
    #[serde(default)]
    pub base64: String,
}

/// Titan and Nova response shape: a bare list of encoded images.
#[derive(Debug, Deserialize)]
pub struct TitanImageResponse {
    #[serde(default)]
    pub images: Vec<String>,
}
