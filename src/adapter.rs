//! Pure request/response shaping for the three Bedrock image-model families.
//!
//! One canonical request goes in; the payload record that crosses the wire to
//! the selected provider comes out. Nothing here touches the network or the
//! AWS SDK, which keeps the tricky rules (strength inversion, seed omission,
//! per-family CFG ranges) unit-testable without mocks.

use crate::{
    error::{BedrockError, Result},
    models::{ImageGenerationRequest, StabilityImageResponse, TitanImageResponse},
};
use once_cell::sync::Lazy;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// The three upstream API shapes a model id can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFamily {
    Stability,
    Titan,
    Nova,
}

/// Short aliases kept for backward compatibility with older clients; anything
/// already fully qualified bypasses this table.
static MODEL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sd3-large", "stability.sd3-large-v1:0"),
        ("sd3.5-large", "stability.stable-diffusion-xl-v1:0"),
        ("stable-ultra-v1.0", "stability.stable-image-ultra-v1:0"),
        ("stable-ultra-v1.1", "stability.stable-image-ultra-v1:0"),
        ("stable-core-v1.0", "stability.stable-image-core-v1:0"),
        ("stable-core-v1.1", "stability.stable-image-core-v1:0"),
        ("titan-g1", "amazon.titan-image-generator-v1"),
        ("titan-g1-v2", "amazon.titan-image-generator-v1"),
        ("nova-canvas", "amazon.nova-canvas-v1:0"),
    ])
});

const DEFAULT_CFG_SCALE: f64 = 7.0;
const DEFAULT_STEPS: u32 = 30;
const DEFAULT_DIMENSION: u32 = 1024;
const DEFAULT_IMAGE_STRENGTH: f64 = 0.7;

/// Place a model id in one of the three families. Legacy short aliases are
/// accepted so the check works on raw form values as well as resolved ids.
pub fn classify(model_id: &str) -> Option<ProviderFamily> {
    if model_id.starts_with("stability.")
        || model_id.starts_with("stable")
        || model_id == "sd3-large"
        || model_id == "sd3.5-large"
    {
        Some(ProviderFamily::Stability)
    } else if model_id.starts_with("amazon.titan") {
        Some(ProviderFamily::Titan)
    } else if model_id.starts_with("amazon.nova") {
        Some(ProviderFamily::Nova)
    } else {
        None
    }
}

/// Resolve a form value to a concrete Bedrock model id. Fully qualified ids
/// (anything with a `.` or `:`) pass through verbatim; unknown aliases also
/// pass through and fail classification downstream.
pub fn resolve_model_id(model_value: &str) -> String {
    if model_value.contains('.') || model_value.contains(':') {
        return model_value.to_string();
    }
    MODEL_ALIASES
        .get(model_value)
        .map(|id| id.to_string())
        .unwrap_or_else(|| model_value.to_string())
}

/// Clamp the CFG scale into the range the family accepts. Stability models
/// take up to 20, Titan and Nova max out at 10.
pub fn clamp_cfg_scale(value: Option<f64>, family: ProviderFamily) -> f64 {
    let value = value.unwrap_or(DEFAULT_CFG_SCALE);
    match family {
        ProviderFamily::Stability => value.clamp(1.0, 20.0),
        ProviderFamily::Titan | ProviderFamily::Nova => value.clamp(1.0, 10.0),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextPrompt {
    pub text: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StabilityPayload {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: f64,
    pub steps: u32,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_strength: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    TextImage,
    ImageVariation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToImageParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVariationParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
    pub images: Vec<String>,
    pub similarity_strength: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    pub number_of_images: u32,
    pub height: u32,
    pub width: u32,
    pub cfg_scale: f64,
    // Absence, not null, tells Titan/Nova to pick a random seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Titan and Nova share one payload shape; only the target model id differs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanNovaPayload {
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_to_image_params: Option<TextToImageParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_variation_params: Option<ImageVariationParams>,
    pub image_generation_config: ImageGenerationConfig,
}

/// One variant per provider family, each matching that family's wire schema
/// exactly. Serializes transparently as whichever record it wraps.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    Stability(StabilityPayload),
    Titan(TitanNovaPayload),
    Nova(TitanNovaPayload),
}

impl ProviderPayload {
    pub fn family(&self) -> ProviderFamily {
        match self {
            ProviderPayload::Stability(_) => ProviderFamily::Stability,
            ProviderPayload::Titan(_) => ProviderFamily::Titan,
            ProviderPayload::Nova(_) => ProviderFamily::Nova,
        }
    }
}

/// Build the provider payload for a canonical request. Fails when the model
/// does not resolve into any family or the positive prompt is empty; every
/// other irregular input is defensively clamped or defaulted instead.
pub fn build_payload(request: &ImageGenerationRequest) -> Result<ProviderPayload> {
    if request.positive_prompt.trim().is_empty() {
        return Err(BedrockError::UnsupportedModel(
            "positive prompt is required".to_string(),
        ));
    }

    let model_id = resolve_model_id(&request.model);
    let family = classify(&model_id)
        .ok_or_else(|| BedrockError::UnsupportedModel(request.model.clone()))?;

    match family {
        ProviderFamily::Stability => Ok(ProviderPayload::Stability(build_stability(request))),
        ProviderFamily::Titan => Ok(ProviderPayload::Titan(build_titan_nova(request, family))),
        ProviderFamily::Nova => Ok(ProviderPayload::Nova(build_titan_nova(request, family))),
    }
}

fn non_blank(prompt: &Option<String>) -> Option<String> {
    prompt
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn build_stability(request: &ImageGenerationRequest) -> StabilityPayload {
    let mut text_prompts = vec![TextPrompt {
        text: request.positive_prompt.clone(),
        weight: 1.0,
    }];
    if let Some(negative) = non_blank(&request.negative_prompt) {
        text_prompts.push(TextPrompt {
            text: negative,
            weight: -1.0,
        });
    }

    // Stability requires a seed on the wire; pick one when the caller left it
    // to chance. A supplied seed is reused verbatim for determinism.
    let seed = request
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..1_000_000));

    let (init_image, image_strength) = match &request.input_image {
        // The upstream image_strength knob means "how much to change", the
        // canonical knob means "how much to preserve", so invert here.
        Some(image) => (
            Some(image.clone()),
            Some(1.0 - request.image_strength.unwrap_or(DEFAULT_IMAGE_STRENGTH)),
        ),
        None => (None, None),
    };

    StabilityPayload {
        text_prompts,
        cfg_scale: clamp_cfg_scale(request.cfg_scale, ProviderFamily::Stability),
        steps: request.steps.unwrap_or(DEFAULT_STEPS),
        seed,
        width: request.width.unwrap_or(DEFAULT_DIMENSION),
        height: request.height.unwrap_or(DEFAULT_DIMENSION),
        init_image,
        image_strength,
    }
}

fn build_titan_nova(request: &ImageGenerationRequest, family: ProviderFamily) -> TitanNovaPayload {
    let config = ImageGenerationConfig {
        number_of_images: 1,
        height: request.height.unwrap_or(DEFAULT_DIMENSION),
        width: request.width.unwrap_or(DEFAULT_DIMENSION),
        cfg_scale: clamp_cfg_scale(request.cfg_scale, family),
        seed: request.seed,
    };
    let negative_text = non_blank(&request.negative_prompt);

    match &request.input_image {
        Some(image) => TitanNovaPayload {
            task_type: TaskType::ImageVariation,
            text_to_image_params: None,
            image_variation_params: Some(ImageVariationParams {
                text: request.positive_prompt.clone(),
                negative_text,
                images: vec![image.clone()],
                // Direct, no inversion: similarityStrength already means
                // "keep close to the original".
                similarity_strength: request.image_strength.unwrap_or(DEFAULT_IMAGE_STRENGTH),
            }),
            image_generation_config: config,
        },
        None => TitanNovaPayload {
            task_type: TaskType::TextImage,
            text_to_image_params: Some(TextToImageParams {
                text: request.positive_prompt.clone(),
                negative_text,
            }),
            image_variation_params: None,
            image_generation_config: config,
        },
    }
}

/// Pull the first encoded image out of a raw provider response body. An
/// empty or missing image list is a hard failure so callers never render an
/// empty result.
pub fn extract_image(body: &[u8], family: ProviderFamily) -> Result<String> {
    let image = match family {
        ProviderFamily::Stability => {
            let parsed: StabilityImageResponse = serde_json::from_slice(body)
                .map_err(|e| BedrockError::Response(e.to_string()))?;
            parsed.artifacts.into_iter().next().map(|a| a.base64)
        }
        ProviderFamily::Titan | ProviderFamily::Nova => {
            let parsed: TitanImageResponse = serde_json::from_slice(body)
                .map_err(|e| BedrockError::Response(e.to_string()))?;
            parsed.images.into_iter().next()
        }
    };
    match image {
        Some(data) if !data.is_empty() => Ok(data),
        _ => Err(BedrockError::NoImageData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str) -> ImageGenerationRequest {
        ImageGenerationRequest::new(model, "a cat")
    }

    #[test]
    fn every_supported_id_lands_in_exactly_one_family() {
        let cases = [
            ("stability.sd3-large-v1:0", ProviderFamily::Stability),
            ("stability.stable-image-core-v1:0", ProviderFamily::Stability),
            ("stable-ultra-v1.0", ProviderFamily::Stability),
            ("sd3-large", ProviderFamily::Stability),
            ("sd3.5-large", ProviderFamily::Stability),
            ("amazon.titan-image-generator-v1", ProviderFamily::Titan),
            ("amazon.nova-canvas-v1:0", ProviderFamily::Nova),
        ];
        for (id, expected) in cases {
            assert_eq!(classify(id), Some(expected), "for `{}`", id);
        }
        assert_eq!(classify("anthropic.claude-3-haiku"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn unknown_model_is_rejected() {
        let err = build_payload(&request("dall-e-3")).unwrap_err();
        assert!(matches!(err, BedrockError::UnsupportedModel(_)));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let mut req = request("amazon.nova-canvas-v1:0");
        req.positive_prompt = "   ".to_string();
        let err = build_payload(&req).unwrap_err();
        assert!(matches!(err, BedrockError::UnsupportedModel(_)));
    }

    #[test]
    fn aliases_resolve_and_qualified_ids_pass_through() {
        assert_eq!(resolve_model_id("titan-g1"), "amazon.titan-image-generator-v1");
        assert_eq!(resolve_model_id("nova-canvas"), "amazon.nova-canvas-v1:0");
        assert_eq!(
            resolve_model_id("stability.sd3-large-v1:0"),
            "stability.sd3-large-v1:0"
        );
        // Unknown aliases pass through untouched and fail classification.
        assert_eq!(resolve_model_id("dall-e-3"), "dall-e-3");
    }

    #[test]
    fn aliased_titan_models_still_build() {
        let payload = build_payload(&request("titan-g1")).unwrap();
        assert_eq!(payload.family(), ProviderFamily::Titan);
    }

    #[test]
    fn cfg_scale_never_leaves_the_family_range() {
        for value in [-50.0, 0.0, 0.5, 7.0, 15.0, 20.0, 999.0, f64::MAX] {
            let stability = clamp_cfg_scale(Some(value), ProviderFamily::Stability);
            assert!((1.0..=20.0).contains(&stability), "stability from {}", value);

            let titan = clamp_cfg_scale(Some(value), ProviderFamily::Titan);
            assert!((1.0..=10.0).contains(&titan), "titan from {}", value);
        }
        assert_eq!(clamp_cfg_scale(None, ProviderFamily::Stability), 7.0);
        assert_eq!(clamp_cfg_scale(None, ProviderFamily::Nova), 7.0);
    }

    #[test]
    fn stability_inverts_the_default_image_strength() {
        let mut req = request("stability.sd3-large-v1:0");
        req.input_image = Some("aW1hZ2U=".to_string());
        req.image_strength = Some(0.7);

        match build_payload(&req).unwrap() {
            ProviderPayload::Stability(payload) => {
                assert_eq!(payload.init_image.as_deref(), Some("aW1hZ2U="));
                let strength = payload.image_strength.unwrap();
                assert!((strength - 0.3).abs() < 1e-9, "got {}", strength);
            }
            other => panic!("expected stability payload, got {:?}", other),
        }
    }

    #[test]
    fn titan_and_nova_pass_image_strength_through_unchanged() {
        for model in ["amazon.titan-image-generator-v1", "amazon.nova-canvas-v1:0"] {
            let mut req = request(model);
            req.input_image = Some("aW1hZ2U=".to_string());
            req.image_strength = Some(0.7);

            let payload = build_payload(&req).unwrap();
            let inner = match &payload {
                ProviderPayload::Titan(p) | ProviderPayload::Nova(p) => p,
                other => panic!("unexpected payload {:?}", other),
            };
            assert_eq!(inner.task_type, TaskType::ImageVariation);
            let params = inner.image_variation_params.as_ref().unwrap();
            assert_eq!(params.similarity_strength, 0.7);
            assert_eq!(params.images, vec!["aW1hZ2U=".to_string()]);
        }
    }

    #[test]
    fn seedless_titan_payload_has_no_seed_key_at_all() {
        let payload = build_payload(&request("amazon.titan-image-generator-v1")).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let config = json
            .get("imageGenerationConfig")
            .and_then(|c| c.as_object())
            .unwrap();
        assert!(!config.contains_key("seed"), "seed must be absent, not null");

        let mut seeded = request("amazon.titan-image-generator-v1");
        seeded.seed = Some(42);
        let json = serde_json::to_value(&build_payload(&seeded).unwrap()).unwrap();
        assert_eq!(json["imageGenerationConfig"]["seed"], 42);
    }

    #[test]
    fn stability_always_carries_a_seed() {
        match build_payload(&request("stability.sd3-large-v1:0")).unwrap() {
            ProviderPayload::Stability(payload) => assert!(payload.seed < 1_000_000),
            other => panic!("expected stability payload, got {:?}", other),
        }

        let mut seeded = request("stability.sd3-large-v1:0");
        seeded.seed = Some(123_456);
        match build_payload(&seeded).unwrap() {
            ProviderPayload::Stability(payload) => assert_eq!(payload.seed, 123_456),
            other => panic!("expected stability payload, got {:?}", other),
        }
    }

    #[test]
    fn nova_request_clamps_cfg_and_targets_text_image() {
        let mut req = request("amazon.nova-canvas-v1:0");
        req.cfg_scale = Some(15.0);

        let payload = build_payload(&req).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["taskType"], "TEXT_IMAGE");
        assert_eq!(json["imageGenerationConfig"]["cfgScale"], 10.0);
        assert_eq!(json["imageGenerationConfig"]["numberOfImages"], 1);
        assert_eq!(json["textToImageParams"]["text"], "a cat");
        assert!(json.get("imageVariationParams").is_none());
    }

    #[test]
    fn blank_negative_prompt_is_not_appended() {
        let mut req = request("stability.sd3-large-v1:0");
        req.negative_prompt = Some("".to_string());
        req.cfg_scale = Some(5.0);

        match build_payload(&req).unwrap() {
            ProviderPayload::Stability(payload) => {
                assert_eq!(payload.text_prompts.len(), 1);
                assert_eq!(payload.text_prompts[0].weight, 1.0);
                assert_eq!(payload.cfg_scale, 5.0);
            }
            other => panic!("expected stability payload, got {:?}", other),
        }
    }

    #[test]
    fn real_negative_prompt_gets_negative_weight() {
        let mut req = request("stability.sd3-large-v1:0");
        req.negative_prompt = Some("blurry".to_string());

        match build_payload(&req).unwrap() {
            ProviderPayload::Stability(payload) => {
                assert_eq!(payload.text_prompts.len(), 2);
                assert_eq!(
                    payload.text_prompts[1],
                    TextPrompt {
                        text: "blurry".to_string(),
                        weight: -1.0
                    }
                );
            }
            other => panic!("expected stability payload, got {:?}", other),
        }
    }

    #[test]
    fn titan_text_image_omits_blank_negative_text() {
        let mut req = request("amazon.titan-image-generator-v1");
        req.negative_prompt = Some("  ".to_string());
        let json = serde_json::to_value(&build_payload(&req).unwrap()).unwrap();
        assert!(json["textToImageParams"].get("negativeText").is_none());

        req.negative_prompt = Some("low quality".to_string());
        let json = serde_json::to_value(&build_payload(&req).unwrap()).unwrap();
        assert_eq!(json["textToImageParams"]["negativeText"], "low quality");
    }

    #[test]
    fn extract_image_reads_each_family_shape() {
        let stability = br#"{"artifacts":[{"base64":"c3RhYg=="}]}"#;
        assert_eq!(
            extract_image(stability, ProviderFamily::Stability).unwrap(),
            "c3RhYg=="
        );

        let titan = br#"{"images":["dGl0YW4="]}"#;
        assert_eq!(extract_image(titan, ProviderFamily::Titan).unwrap(), "dGl0YW4=");
        assert_eq!(extract_image(titan, ProviderFamily::Nova).unwrap(), "dGl0YW4=");
    }

    #[test]
    fn missing_image_data_is_a_hard_failure() {
        let empty_artifacts = br#"{"artifacts":[]}"#;
        assert!(matches!(
            extract_image(empty_artifacts, ProviderFamily::Stability),
            Err(BedrockError::NoImageData)
        ));

        let no_images_key = br#"{"something":"else"}"#;
        assert!(matches!(
            extract_image(no_images_key, ProviderFamily::Titan),
            Err(BedrockError::NoImageData)
        ));

        let empty_base64 = br#"{"artifacts":[{"base64":""}]}"#;
        assert!(matches!(
            extract_image(empty_base64, ProviderFamily::Stability),
            Err(BedrockError::NoImageData)
        ));
    }
}
