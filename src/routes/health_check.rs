use actix_web::{HttpResponse, get};

/// Liveness probe; the contact service has no dependencies to check.
#[get("/health_check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
