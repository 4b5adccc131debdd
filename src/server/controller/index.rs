use crate::server::state::AppState;
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse};
use log::{error, warn};
use std::io;
use std::path::Path;
use tokio::fs;

const INDEX_NOT_FOUND_MSG: &str = "Error: index.html not found.";

#[get("/")]
/// serve the static front page
pub(crate) async fn get_index(data: web::Data<AppState>) -> HttpResponse {
    let path = data.get_index_path();
    match fs::read(path).await {
        Ok(content) => HttpResponse::Ok()
            .content_type(content_type(path))
            .body(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found", path.display());
            HttpResponse::NotFound()
                .insert_header(ContentType::plaintext())
                .body(INDEX_NOT_FOUND_MSG)
        }
        Err(e) => {
            error!("get_index failed, {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
