pub mod complaints;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpResponse,
};

/// Cross-site guard for the complaint API's mutating endpoints.
///
/// Unlike the admin forms, the JSON surface carries no session CSRF token, so
/// mutations must declare Content-Type: application/json — a cross-origin form
/// POST cannot, which is enough to keep cookie-bearing writes same-origin.
/// Reads (GET) pass through untouched.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    use actix_web::http::Method;

    if [Method::POST, Method::PUT, Method::DELETE].contains(req.method()) {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/complaints")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(complaints::list))
            .route("", web::post().to(complaints::create))
            .route("/{id}", web::get().to(complaints::read))
            .route("/{id}/status", web::put().to(complaints::update_status))
            .route("/{id}/assign", web::put().to(complaints::assign))
            .route("/{id}/resolve", web::put().to(complaints::resolve)),
    );
}
