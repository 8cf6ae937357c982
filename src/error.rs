use crate::adapter::ProviderFamily;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationField {
    CfgScale,
    Dimensions,
    Steps,
    Other,
}

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("No image data received from model")]
    NoImageData,

    #[error("Validation error: {detail}")]
    Validation {
        field: ValidationField,
        family: ProviderFamily,
        detail: String,
    },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Throttled: {0}")]
    Throttling(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Provisioned throughput required: {0}")]
    ProvisionedThroughputRequired(String),

    #[error("AWS authentication failed: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Response error: {0}")]
    Response(String),

    #[error("AWS error: {0}")]
    Aws(String),
}

pub type Result<T> = std::result::Result<T, BedrockError>;

/// Sorts a raw provider error message into the taxonomy above via substring
/// matching. `family` is carried so validation failures can name the CFG
/// range that applies to the model that was invoked.
pub fn classify_provider_error(detail: &str, family: ProviderFamily) -> BedrockError {
    let lower = detail.to_lowercase();
    let detail = detail.to_string();

    if lower.contains("validation") {
        let field = if lower.contains("cfgscale") || lower.contains("cfg_scale") {
            ValidationField::CfgScale
        } else if lower.contains("width") || lower.contains("height") {
            ValidationField::Dimensions
        } else if lower.contains("steps") {
            ValidationField::Steps
        } else {
            ValidationField::Other
        };
        BedrockError::Validation {
            field,
            family,
            detail,
        }
    } else if lower.contains("access denied") || lower.contains("unauthorized") {
        BedrockError::AccessDenied(detail)
    } else if lower.contains("throttling") || lower.contains("rate limit") {
        BedrockError::Throttling(detail)
    } else if lower.contains("quota") || lower.contains("limit exceeded") {
        BedrockError::QuotaExceeded(detail)
    } else if lower.contains("model") && lower.contains("not found") {
        BedrockError::ModelUnavailable(detail)
    } else if lower.contains("on-demand throughput") {
        BedrockError::ProvisionedThroughputRequired(detail)
    } else if lower.contains("credentials") || lower.contains("signature") {
        BedrockError::Credentials(detail)
    } else {
        BedrockError::Aws(detail)
    }
}

impl BedrockError {
    /// True for requests the caller got wrong, mapped to a 400-class status
    /// by the HTTP layer. Everything else is a 500.
    pub fn is_input_error(&self) -> bool {
        matches!(self, BedrockError::UnsupportedModel(_))
    }

    /// Short user-facing headline shown in place of the raw provider text.
    pub fn user_message(&self) -> &'static str {
        match self {
            BedrockError::UnsupportedModel(_) => "Unsupported model type",
            BedrockError::Validation { field, .. } => match field {
                ValidationField::CfgScale => "CFG Scale value is invalid",
                ValidationField::Dimensions => "Image dimensions are invalid",
                ValidationField::Steps => "Steps value is invalid",
                ValidationField::Other => "Invalid parameters provided",
            },
            BedrockError::AccessDenied(_) => "Access denied to AI model",
            BedrockError::Throttling(_) => "Request rate limit exceeded",
            BedrockError::QuotaExceeded(_) => "Service quota exceeded",
            BedrockError::ModelUnavailable(_) => "AI model not available",
            BedrockError::ProvisionedThroughputRequired(_) => {
                "Model requires provisioned throughput"
            }
            BedrockError::Credentials(_) => "AWS authentication failed",
            _ => "Image generation failed",
        }
    }

    /// Actionable next step matching the headline from `user_message`.
    pub fn suggestion(&self) -> String {
        match self {
            BedrockError::UnsupportedModel(_) => {
                "Please select a Stability, Titan, or Nova image model".to_string()
            }
            BedrockError::Validation { field, family, .. } => match field {
                ValidationField::CfgScale => {
                    let max = if *family == ProviderFamily::Stability { 20 } else { 10 };
                    format!(
                        "CFG Scale must be between 1-{} for this model. Current value may be too high",
                        max
                    )
                }
                ValidationField::Dimensions => {
                    "Please check that width and height are supported values (typically 512, 768, 1024, or 1536)"
                        .to_string()
                }
                ValidationField::Steps => {
                    "Steps must be between 10-50 for Stability models".to_string()
                }
                ValidationField::Other => {
                    "Please check your parameter values (CFG scale, dimensions, etc.) and try again"
                        .to_string()
                }
            },
            BedrockError::AccessDenied(_) => {
                "Please check your AWS Bedrock model access permissions in the AWS console"
                    .to_string()
            }
            BedrockError::Throttling(_) => "Please wait a moment and try again".to_string(),
            BedrockError::QuotaExceeded(_) => {
                "You may have reached your AWS Bedrock usage limits. Check your AWS console for quota information"
                    .to_string()
            }
            BedrockError::ModelUnavailable(_) => {
                "The selected model may not be available in your region. Try selecting a different model"
                    .to_string()
            }
            BedrockError::ProvisionedThroughputRequired(_) => {
                "This model is not available for on-demand use. Please select a different model or configure provisioned throughput in AWS Bedrock"
                    .to_string()
            }
            BedrockError::Credentials(_) => {
                "Please check your AWS credentials configuration".to_string()
            }
            _ => {
                "Please try again with different parameters or contact support if the issue persists"
                    .to_string()
            }
        }
    }
}
