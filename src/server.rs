//! JSON proxy route wrapping [`ImageClient`]. Owns everything the adapter
//! deliberately does not: credentials live in the injected client, and error
//! kinds are translated here into HTTP statuses and user-facing messages.

use crate::{bedrock::BedrockClient, config::ServerConfig, models::ImageGenerationRequest};
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl GenerateResponse {
    fn ok(image_data: &str) -> Self {
        GenerateResponse {
            success: true,
            image: Some(format!("data:image/png;base64,{}", image_data)),
            error: None,
            details: None,
            suggestion: None,
        }
    }

    fn failed(error: impl Into<String>, details: Option<String>, suggestion: Option<String>) -> Self {
        GenerateResponse {
            success: false,
            image: None,
            error: Some(error.into()),
            details,
            suggestion,
        }
    }
}

#[post("/api/generate-image")]
async fn generate_image(
    client: web::Data<BedrockClient>,
    request: web::Json<ImageGenerationRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let request_id = Uuid::new_v4();

    log::info!(
        "[{}] generate-image: model={} img2img={}",
        request_id,
        request.model,
        request.input_image.is_some()
    );

    if request.model.trim().is_empty() || request.positive_prompt.trim().is_empty() {
        return HttpResponse::BadRequest().json(GenerateResponse::failed(
            "Model and positive prompt are required",
            None,
            None,
        ));
    }

    match client.image().generate(request).await {
        Ok(result) => {
            log::info!("[{}] image generated by {}", request_id, result.model);
            HttpResponse::Ok().json(GenerateResponse::ok(&result.image_data))
        }
        Err(err) => {
            log::error!("[{}] image generation failed: {}", request_id, err);
            let body = GenerateResponse::failed(
                err.user_message(),
                Some(err.to_string()),
                Some(err.suggestion()),
            );
            if err.is_input_error() {
                HttpResponse::BadRequest().json(body)
            } else {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn run(config: ServerConfig, client: BedrockClient) -> std::io::Result<()> {
    let data = web::Data::new(client);
    log::info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(generate_image)
            .service(health)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
