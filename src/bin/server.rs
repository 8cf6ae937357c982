use rimagen::{logger, BedrockClient, BedrockConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(_) => eprintln!("No .env file found, using system environment variables"),
    }

    logger::init().expect("logger init failed");

    let bedrock_config = BedrockConfig::from_env();
    if bedrock_config.access_key.is_none() {
        log::warn!("No explicit AWS credentials configured, using default credential chain");
    }

    let client = BedrockClient::new(bedrock_config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    rimagen::server::run(ServerConfig::from_env(), client).await
}
