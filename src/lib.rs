pub mod adapter;
pub mod bedrock;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;

pub use adapter::{ProviderFamily, ProviderPayload};
pub use bedrock::{BedrockClient, ImageClient};
pub use config::{BedrockConfig, ServerConfig};
pub use error::{BedrockError, Result};
pub use models::{ImageGenerationRequest, ImageGenerationResponse};
