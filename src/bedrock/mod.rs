pub mod image_client;

use crate::{config::BedrockConfig, error::Result};
use aws_sdk_bedrockruntime::Client;

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct BedrockClient {
    image_client: ImageClient,
}

impl BedrockClient {
    pub async fn new(bedrock_config: BedrockConfig) -> Result<Self> {
        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&bedrock_config.access_key, &bedrock_config.secret_key)
        {
            aws_config::from_env()
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "rimagen",
                ))
                .region(aws_sdk_bedrockruntime::config::Region::new(
                    bedrock_config
                        .region
                        .unwrap_or_else(|| "us-east-1".to_string()),
                ))
                .load()
                .await
        } else if let Some(region) = bedrock_config.region {
            aws_config::from_env()
                .region(aws_sdk_bedrockruntime::config::Region::new(region))
                .load()
                .await
        } else {
            aws_config::load_from_env().await
        };

        let client = Client::new(&aws_config);

        Ok(Self {
            image_client: ImageClient::new(client),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
