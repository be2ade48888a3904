use actix_web::{HttpResponse, Responder, get};

use crate::model::status::{StatusDefinition, legend};

/// Status legend, in cycle order
#[utoipa::path(
    get,
    path = "/api/statuses",
    responses(
        (status = 200, description = "Every assignable status", body = [StatusDefinition])
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
#[get("/statuses")]
pub async fn list_statuses() -> impl Responder {
    HttpResponse::Ok().json(legend())
}
