use rimagen::{logger, BedrockClient, BedrockConfig, ImageClient, ImageGenerationRequest};
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        rimagen::logger::LoggerConfig::development(),
    )?;

    log::info!("🖼️  Available image generation models:");
    for (id, name, provider) in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }

    let config = BedrockConfig::from_env();
    let client = BedrockClient::new(config).await?;

    let test_models = vec![
        "amazon.titan-image-generator-v1",
        "amazon.nova-canvas-v1:0",
        "stability.sd3-large-v1:0",
    ];

    for model_id in test_models {
        log::info!("🧪 Testing image generation with model: {}", model_id);

        let mut request = ImageGenerationRequest::new(
            model_id,
            "A serene landscape with mountains and a lake at sunset, digital art style",
        );
        request.negative_prompt = Some("blurry, low quality".to_string());
        request.cfg_scale = Some(8.0);
        request.width = Some(1024);
        request.height = Some(1024);

        match client.image().generate(request).await {
            Ok(response) => {
                log::info!("✅ Image generation successful with {}!", response.model);

                let filename = format!(
                    "generated_image_{}_{}.png",
                    model_id.replace('.', "_").replace(':', "_"),
                    chrono::Utc::now().timestamp()
                );

                match base64::decode(&response.image_data) {
                    Ok(image_bytes) => match fs::write(&filename, image_bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    },
                    Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
                }
            }
            Err(e) => {
                log::error!("❌ Image generation failed with {}: {}", model_id, e);
                log::warn!("💡 {}", e.suggestion());
            }
        }

        log::info!("---");
    }

    Ok(())
}
